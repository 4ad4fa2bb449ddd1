use anyhow::Result;
use chrono::Local;

use snowalert_core::{Config, JsonStateStore};
use snowalert_notify::NotifyClient;
use snowalert_weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    snowalert_core::init()?;

    let config = Config::load_validated()?;

    let mut store = JsonStateStore::open(&config.state_path)?;
    let weather = WeatherClient::new(config.location.latitude, config.location.longitude)?;
    let notifier = NotifyClient::new(&config.pushover.token, &config.pushover.user_key)?;

    let outcome = snowalert::run(&weather, &notifier, &mut store, Local::now().naive_local())
        .await?;

    tracing::info!(%outcome, "run finished");
    println!("{outcome}");

    Ok(())
}
