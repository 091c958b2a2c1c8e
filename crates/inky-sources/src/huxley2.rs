//! Huxley2 departures client (a JSON proxy for National Rail's OpenLDBWS).

use inky_common::{TrainSchedule, TrainService};
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, instrument};

use crate::error::SourceResult;
use crate::{http_client, read_body, TrainSource};

/// Public Huxley2 instance.
pub const DEFAULT_BASE_URL: &str = "https://huxley2.azurewebsites.net";

/// Which departures to ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuxleyQuery {
    /// CRS code of the departure station.
    pub from: String,
    /// CRS code of the destination filter.
    pub to: String,
    pub count: usize,
    /// OpenLDBWS token; the public instance accepts requests without one.
    pub token: Option<String>,
}

/// Distinguish a member that is absent from one that is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Board {
    #[serde(default, deserialize_with = "present")]
    train_services: Option<Option<Vec<RawService>>>,
    #[serde(default)]
    nrcc_messages: Option<Vec<RawMessage>>,
    #[serde(default)]
    location_name: Option<String>,
    #[serde(default)]
    filter_location_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawService {
    std: Option<String>,
    etd: Option<String>,
    platform: Option<String>,
    #[serde(default)]
    destination: Option<Vec<RawLocation>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    location_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMessage {
    value: Option<String>,
}

impl From<RawService> for TrainService {
    fn from(raw: RawService) -> Self {
        TrainService {
            scheduled: raw.std,
            platform: raw.platform,
            destination: raw
                .destination
                .and_then(|d| d.into_iter().next())
                .and_then(|l| l.location_name),
            status: raw.etd,
        }
    }
}

/// Decode a departures board.
///
/// `trainServices: null` means nothing is running; a board without the
/// member at all is treated as malformed, so the first slot reports a
/// generic error instead.
pub fn parse_departures(body: &str, query: &HuxleyQuery) -> SourceResult<TrainSchedule> {
    let board: Board = serde_json::from_str(body)?;

    let services = match board.train_services {
        None => Some(Vec::new()),
        Some(None) => None,
        Some(Some(services)) => Some(services.into_iter().map(TrainService::from).collect()),
    };
    let advisory = board
        .nrcc_messages
        .and_then(|m| m.into_iter().next())
        .and_then(|m| m.value);

    let schedule = TrainSchedule {
        origin: board.location_name.unwrap_or_else(|| query.from.clone()),
        destination: board
            .filter_location_name
            .unwrap_or_else(|| query.to.clone()),
        requested: query.count,
        services,
        advisory,
    };
    debug!(
        services = schedule.services.as_ref().map(Vec::len),
        advisory = schedule.advisory.is_some(),
        "Parsed departures board"
    );
    Ok(schedule)
}

/// Blocking Huxley2 client.
pub struct Huxley2 {
    client: Client,
    base_url: String,
    query: HuxleyQuery,
}

impl Huxley2 {
    pub fn new(query: HuxleyQuery) -> SourceResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, query)
    }

    pub fn with_base_url(base_url: impl Into<String>, query: HuxleyQuery) -> SourceResult<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            query,
        })
    }

    /// `{base}/departures/{from}/to/{to}/{count}`
    pub fn url(&self) -> String {
        format!(
            "{}/departures/{}/to/{}/{}",
            self.base_url, self.query.from, self.query.to, self.query.count
        )
    }
}

impl TrainSource for Huxley2 {
    #[instrument(skip(self), fields(from = %self.query.from, to = %self.query.to))]
    fn fetch_departures(&self) -> SourceResult<TrainSchedule> {
        let mut request = self.client.get(self.url());
        if let Some(token) = self.query.token.as_deref().filter(|t| !t.is_empty()) {
            request = request.query(&[("accessToken", token)]);
        }
        let body = read_body(request.send()?)?;
        let schedule = parse_departures(&body, &self.query)?;
        info!(
            services = schedule.services.as_ref().map_or(0, Vec::len),
            "Fetched departures"
        );
        Ok(schedule)
    }
}
