//! The per-invocation state machine.
//!
//! Start → dedup check → (already sent) | fetch both days → aggregate
//! → evaluate → (notify + persist) | (no action). Each invocation is
//! independent; the only state carried between runs is the dedup marker.

use chrono::NaiveDateTime;
use thiserror::Error;

use snowalert_core::{StateError, StateStore, LAST_MESSAGE_SENT_KEY};
use snowalert_notify::{Notification, NotifyClient, NotifyError};
use snowalert_weather::{overnight_window, sum_snowfall, WeatherClient, WeatherError};

const MARKER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Terminal state of one invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// The dedup marker already holds today's date.
    AlreadySent,
    /// Snow was measured but no rule fired.
    NoAction { total_cm: f64 },
    /// A notification went out and the marker was written.
    Notified { total_cm: f64 },
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadySent => write!(f, "already notified today"),
            Self::NoAction { total_cm } => {
                write!(f, "no alert needed ({total_cm:.1} cm overnight)")
            }
            Self::Notified { total_cm } => {
                write!(f, "alert sent ({total_cm:.1} cm overnight)")
            }
        }
    }
}

/// Anything that aborts an invocation.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Weather provider: {0}")]
    Weather(#[from] WeatherError),

    #[error("Notification: {0}")]
    Notify(#[from] NotifyError),

    #[error("State store: {0}")]
    State(#[from] StateError),
}

/// Execute one invocation at local wall-clock time `now`.
pub async fn run<S: StateStore>(
    weather: &WeatherClient,
    notifier: &NotifyClient,
    store: &mut S,
    now: NaiveDateTime,
) -> Result<RunOutcome, RunError> {
    let today = now.date();
    let today_marker = today.format(MARKER_DATE_FORMAT).to_string();

    if store.get(LAST_MESSAGE_SENT_KEY)?.as_deref() == Some(today_marker.as_str()) {
        tracing::info!(date = %today_marker, "already notified today, skipping");
        return Ok(RunOutcome::AlreadySent);
    }

    let yesterday = today.pred_opt().unwrap_or(today);
    let (mut samples, today_samples) = tokio::try_join!(
        weather.hourly_snowfall(yesterday),
        weather.hourly_snowfall(today),
    )?;
    samples.extend(today_samples);
    samples.sort_by_key(|s| s.time);

    let total_cm = sum_snowfall(&samples, overnight_window(today));
    tracing::info!(total_cm, samples = samples.len(), "overnight snowfall aggregated");

    let Some(rule) = crate::rules::evaluate(total_cm, now.time()) else {
        tracing::info!(total_cm, "below threshold, no alert");
        return Ok(RunOutcome::NoAction { total_cm });
    };

    tracing::info!(
        total_cm,
        threshold_cm = rule.min_snow_cm,
        from = %rule.from,
        "threshold exceeded, sending alert"
    );

    let notification = Notification::new(
        format!("{total_cm:.1} cm of snow fell overnight. Get up and shovel!"),
        "Time to shovel",
    );
    if let Err(e) = notifier.send(&notification).await {
        tracing::error!(error = %e, "failed to send notification");
        return Err(e.into());
    }

    store.set(LAST_MESSAGE_SENT_KEY, &today_marker)?;
    Ok(RunOutcome::Notified { total_cm })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display_includes_total() {
        let s = RunOutcome::Notified { total_cm: 21.34 }.to_string();
        assert!(s.contains("21.3"));
        assert_eq!(RunOutcome::AlreadySent.to_string(), "already notified today");
    }
}
