//! Pushover message client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::NotifyError;

const PUSHOVER_BASE: &str = "https://api.pushover.net";

/// Emergency priority: the message repeats until acknowledged.
const PRIORITY_EMERGENCY: i32 = 2;
/// Seconds between provider-side redeliveries of an unacknowledged alert.
const RETRY_SECS: u32 = 300;
/// Seconds after which the provider stops redelivering.
const EXPIRE_SECS: u32 = 10_800;

/// One outgoing push message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub title: String,
    pub sound: String,
}

impl Notification {
    pub fn new(message: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: title.into(),
            sound: "siren".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    token: &'a str,
    user: &'a str,
    message: &'a str,
    title: &'a str,
    sound: &'a str,
    priority: i32,
    retry: u32,
    expire: u32,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    status: i32,
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NotifyClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    user_key: String,
}

impl NotifyClient {
    pub fn new(token: &str, user_key: &str) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: PUSHOVER_BASE.to_string(),
            token: token.to_string(),
            user_key: user_key.to_string(),
        })
    }

    pub fn new_with_base_url(
        token: &str,
        user_key: &str,
        base_url: &str,
    ) -> Result<Self, NotifyError> {
        let mut client = Self::new(token, user_key)?;
        client.base_url = base_url.to_string();
        Ok(client)
    }

    /// Send an emergency-priority message that must be manually
    /// dismissed; the provider retries delivery every [`RETRY_SECS`]
    /// until [`EXPIRE_SECS`] has passed.
    #[instrument(skip(self, notification), level = "info")]
    pub async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let url = format!("{}/1/messages.json", self.base_url);

        let request = MessageRequest {
            token: &self.token,
            user: &self.user_key,
            message: &notification.message,
            title: &notification.title,
            sound: &notification.sound,
            priority: PRIORITY_EMERGENCY,
            retry: RETRY_SECS,
            expire: EXPIRE_SECS,
        };

        let response = self.client.post(&url).form(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "notification send rejected");
            return Err(NotifyError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: MessageResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        if body.status != 1 {
            let reason = body.errors.join("; ");
            tracing::warn!(%reason, "notification send failed");
            return Err(NotifyError::SendFailed(reason));
        }

        tracing::info!(title = %notification.title, "notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .and(body_string_contains("token=app-token"))
            .and(body_string_contains("user=user-key"))
            .and(body_string_contains("priority=2"))
            .and(body_string_contains("retry=300"))
            .and(body_string_contains("expire=10800"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 1,
                "request": "647d2300-702c-4b38-8b2f-d56326ae460b"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client =
            NotifyClient::new_with_base_url("app-token", "user-key", &mock_server.uri()).unwrap();
        let result = client
            .send(&Notification::new("21.3 cm of snow overnight", "Time to shovel"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_includes_message_and_title() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .and(body_string_contains("title=Time+to+shovel"))
            .and(body_string_contains("sound=siren"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": 1 })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client =
            NotifyClient::new_with_base_url("app-token", "user-key", &mock_server.uri()).unwrap();
        let result = client
            .send(&Notification::new("snow", "Time to shovel"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_provider_rejection_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "status": 0,
                "errors": ["application token is invalid"]
            })))
            .mount(&mock_server)
            .await;

        let client =
            NotifyClient::new_with_base_url("bad-token", "user-key", &mock_server.uri()).unwrap();
        let err = client
            .send(&Notification::new("snow", "Time to shovel"))
            .await
            .unwrap_err();

        assert!(matches!(err, NotifyError::ApiError { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_zero_status_in_ok_response_is_send_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 0,
                "errors": ["user key is invalid"]
            })))
            .mount(&mock_server)
            .await;

        let client =
            NotifyClient::new_with_base_url("app-token", "bad-user", &mock_server.uri()).unwrap();
        let err = client
            .send(&Notification::new("snow", "Time to shovel"))
            .await
            .unwrap_err();

        match err {
            NotifyError::SendFailed(reason) => assert!(reason.contains("user key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
