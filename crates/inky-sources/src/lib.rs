//! Data providers for inky-pi.
//!
//! Each provider is split into a pure `parse_*` function, tested against
//! fixture bodies, and a blocking HTTP client implementing the matching
//! source trait.

pub mod error;
pub mod huxley2;
pub mod openweathermap;

use std::time::Duration;

use inky_common::{TrainSchedule, WeatherSnapshot};
use reqwest::blocking::{Client, Response};

pub use error::{SourceError, SourceResult};
pub use huxley2::{Huxley2, HuxleyQuery};
pub use openweathermap::{OpenWeatherMap, WeatherQuery};

/// Connection establishment limit.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Whole-request limit.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can produce a weather snapshot.
pub trait WeatherSource {
    fn fetch_weather(&self) -> SourceResult<WeatherSnapshot>;
}

/// Something that can produce a departures schedule.
pub trait TrainSource {
    fn fetch_departures(&self) -> SourceResult<TrainSchedule>;
}

/// Blocking client shared by the providers.
pub fn http_client() -> SourceResult<Client> {
    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("inky-pi/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Read a response body, turning non-success statuses into `Api` errors.
pub(crate) fn read_body(response: Response) -> SourceResult<String> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.chars().take(200).collect());
        return Err(SourceError::api(status.as_u16().to_string(), message));
    }
    Ok(body)
}
