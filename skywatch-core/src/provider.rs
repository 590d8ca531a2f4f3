use crate::{
    Config,
    model::{CurrentConditions, DailyForecast, Location, LocationResult, WeatherSnapshot},
    provider::{openweather::OpenWeatherProvider, weatherapi::WeatherApiProvider},
};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::{convert::TryFrom, fmt::Debug};
use tracing::{debug, warn};

pub mod openweather;
pub mod weatherapi;

/// Queries shorter than this are answered with no results and no request.
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    WeatherApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::WeatherApi => "weatherapi",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::WeatherApi]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "weatherapi" => Ok(ProviderId::WeatherApi),
            _ => Err(anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, weatherapi."
            )),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn current(&self, location: &Location) -> anyhow::Result<CurrentConditions>;

    /// Daily forecast for up to `days` days, starting today.
    async fn forecast(
        &self,
        location: &Location,
        days: usize,
    ) -> anyhow::Result<Vec<DailyForecast>>;

    async fn search_locations(
        &self,
        query: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<LocationResult>>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.provider_api_key(id).ok_or_else(|| {
        anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `skywatch configure {id}` and enter your API key."
        )
    })?;

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::OpenWeather => Box::new(OpenWeatherProvider::new(api_key.to_owned())),
        ProviderId::WeatherApi => Box::new(WeatherApiProvider::new(api_key.to_owned())),
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

/// Fetch current conditions and the forecast concurrently.
///
/// Either half failing fails the whole snapshot; partial results are dropped.
pub async fn fetch_snapshot(
    provider: &dyn WeatherProvider,
    location: &Location,
    days: usize,
) -> anyhow::Result<WeatherSnapshot> {
    let (current, forecast) = tokio::try_join!(
        provider.current(location),
        provider.forecast(location, days)
    )
    .with_context(|| format!("Failed to fetch weather data for '{location}'"))?;

    Ok(WeatherSnapshot { current, forecast })
}

/// Location search that skips the provider for queries that are too short.
pub async fn search(
    provider: &dyn WeatherProvider,
    query: &str,
    limit: usize,
) -> anyhow::Result<Vec<LocationResult>> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }

    provider
        .search_locations(query, limit)
        .await
        .with_context(|| format!("Failed to search locations for '{query}'"))
}

/// GET `url` and return the body, turning non-success statuses into errors.
pub(crate) async fn get_body(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
    what: &str,
) -> anyhow::Result<String> {
    debug!(url, what, "sending provider request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("Failed to send request to {what}"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {what} response body"))?;

    if !status.is_success() {
        warn!(%status, what, "provider request failed");
        return Err(anyhow!(
            "{what} request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    Ok(body)
}

pub(crate) fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
