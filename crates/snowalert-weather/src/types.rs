use chrono::NaiveDateTime;
use serde::Deserialize;

/// One hourly snowfall reading.
///
/// `time` is a naive local timestamp: the provider is queried with
/// `timezone=auto`, so the hours it returns are already in the timezone
/// of the requested coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlySample {
    pub time: NaiveDateTime,
    /// Snowfall during this hour in centimeters; `None` when the
    /// provider has no reading for the hour.
    pub snowfall_cm: Option<f64>,
}

/// Raw Open-Meteo forecast response, columnar hourly arrays.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HourlyBlock {
    pub time: Vec<String>,
    pub snowfall: Vec<Option<f64>>,
}

impl ForecastResponse {
    /// Pair up the columnar arrays into samples.
    ///
    /// The provider formats hours as `2026-01-15T06:00` (no seconds, no
    /// offset). A time the parser rejects or a row missing from the
    /// shorter array is a malformed response.
    pub(crate) fn into_samples(self) -> Result<Vec<HourlySample>, WeatherError> {
        if self.hourly.time.len() != self.hourly.snowfall.len() {
            return Err(WeatherError::Parse(format!(
                "hourly arrays disagree in length: {} times vs {} snowfall values",
                self.hourly.time.len(),
                self.hourly.snowfall.len()
            )));
        }

        self.hourly
            .time
            .into_iter()
            .zip(self.hourly.snowfall)
            .map(|(time, snowfall_cm)| {
                let time = NaiveDateTime::parse_from_str(&time, "%Y-%m-%dT%H:%M")
                    .map_err(|e| WeatherError::Parse(format!("bad hourly time {time:?}: {e}")))?;
                Ok(HourlySample { time, snowfall_cm })
            })
            .collect()
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider error: {status} - {message}")]
    Provider { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}
