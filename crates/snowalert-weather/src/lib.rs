//! Snowfall data for snowalert
//!
//! Fetches hourly snowfall from the Open-Meteo forecast API and reduces
//! it to a single overnight accumulation total.

pub mod client;
pub mod types;
pub mod window;

pub use client::WeatherClient;
pub use types::{HourlySample, WeatherError};
pub use window::{overnight_window, sum_snowfall, OvernightWindow};
