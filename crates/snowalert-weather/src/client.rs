//! Open-Meteo forecast client.

use std::time::Duration;

use chrono::NaiveDate;
use tracing::instrument;

use crate::types::{ForecastResponse, HourlySample, WeatherError};

const OPEN_METEO_BASE: &str = "https://api.open-meteo.com";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
}

impl WeatherClient {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: OPEN_METEO_BASE.to_string(),
            latitude,
            longitude,
        })
    }

    pub fn new_with_base_url(
        latitude: f64,
        longitude: f64,
        base_url: &str,
    ) -> Result<Self, WeatherError> {
        let mut client = Self::new(latitude, longitude)?;
        client.base_url = base_url.to_string();
        Ok(client)
    }

    /// Fetch the hourly snowfall series for a single calendar day.
    ///
    /// `timezone=auto` makes the provider return hours in the local time
    /// of the coordinates, which is what the overnight window filters on.
    #[instrument(skip(self), level = "info")]
    pub async fn hourly_snowfall(&self, day: NaiveDate) -> Result<Vec<HourlySample>, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("hourly", "snowfall".to_string()),
                ("start_date", day.format("%Y-%m-%d").to_string()),
                ("end_date", day.format("%Y-%m-%d").to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let samples = parsed.into_samples()?;
        tracing::debug!(day = %day, samples = samples.len(), "fetched hourly snowfall");
        Ok(samples)
    }
}
