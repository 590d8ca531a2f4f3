use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    model::{Coordinates, CurrentConditions, DailyForecast, Location, LocationResult},
    provider::{ProviderId, get_body, unix_to_utc},
};

use super::WeatherProvider;

const BASE_URL: &str = "http://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }
}

/// WeatherAPI takes both place names and `lat,lon` pairs in `q`.
fn q_param(location: &Location) -> String {
    location.to_string()
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
    lat: f64,
    lon: f64,
    localtime_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaSearchResult {
    name: String,
    region: String,
    country: String,
    lat: f64,
    lon: f64,
}

fn parse_current(body: &str) -> Result<CurrentConditions> {
    let parsed: WaResponse =
        serde_json::from_str(body).context("Failed to parse WeatherAPI current JSON")?;

    let ts = parsed.current.last_updated_epoch.or(parsed.location.localtime_epoch);
    let observation_time = ts.and_then(unix_to_utc).unwrap_or_else(Utc::now);

    Ok(CurrentConditions {
        provider: ProviderId::WeatherApi.to_string(),
        location_name: format!("{}, {}", parsed.location.name, parsed.location.country),
        coordinates: Some(Coordinates::new(parsed.location.lat, parsed.location.lon)),
        temperature_c: parsed.current.temp_c,
        feels_like_c: parsed.current.feelslike_c,
        condition: parsed.current.condition.text,
        humidity_pct: parsed.current.humidity,
        wind_speed_kmh: parsed.current.wind_kph,
        observation_time,
    })
}

fn parse_forecast(body: &str, days: usize) -> Result<Vec<DailyForecast>> {
    let parsed: WaForecastResponse =
        serde_json::from_str(body).context("Failed to parse WeatherAPI forecast JSON")?;

    Ok(parsed
        .forecast
        .forecastday
        .into_iter()
        .take(days)
        .map(|d| DailyForecast {
            day: d.date.format("%a").to_string(),
            date: d.date,
            temperature_c: d.day.avgtemp_c.round(),
            condition: d.day.condition.text,
        })
        .collect())
}

fn parse_locations(body: &str) -> Result<Vec<LocationResult>> {
    let parsed: Vec<WaSearchResult> =
        serde_json::from_str(body).context("Failed to parse WeatherAPI search JSON")?;

    Ok(parsed
        .into_iter()
        .map(|r| LocationResult {
            name: r.name,
            lat: r.lat,
            lon: r.lon,
            country: r.country,
            state: Some(r.region).filter(|s| !s.is_empty()),
        })
        .collect())
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    async fn current(&self, location: &Location) -> Result<CurrentConditions> {
        let url = format!("{BASE_URL}/current.json");
        let body = get_body(
            &self.http,
            &url,
            &[("key", self.api_key.clone()), ("q", q_param(location))],
            "WeatherAPI current",
        )
        .await?;

        let mut current = parse_current(&body)?;
        if let Some(requested) = location.coordinates() {
            current.coordinates = Some(requested);
        }
        Ok(current)
    }

    async fn forecast(&self, location: &Location, days: usize) -> Result<Vec<DailyForecast>> {
        let url = format!("{BASE_URL}/forecast.json");
        let body = get_body(
            &self.http,
            &url,
            &[
                ("key", self.api_key.clone()),
                ("q", q_param(location)),
                ("days", days.to_string()),
            ],
            "WeatherAPI forecast",
        )
        .await?;

        parse_forecast(&body, days)
    }

    async fn search_locations(&self, query: &str, limit: usize) -> Result<Vec<LocationResult>> {
        let url = format!("{BASE_URL}/search.json");
        let body = get_body(
            &self.http,
            &url,
            &[("key", self.api_key.clone()), ("q", query.to_string())],
            "WeatherAPI search",
        )
        .await?;

        let mut results = parse_locations(&body)?;
        results.truncate(limit);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_uses_kph_directly() {
        let body = r#"{
            "location": {"name": "Phoenix", "country": "USA", "lat": 33.45, "lon": -112.07,
                         "localtime_epoch": 1700000500},
            "current": {"temp_c": 43.0, "feelslike_c": 45.5, "humidity": 12, "wind_kph": 18.0,
                        "condition": {"text": "Sunny"}, "last_updated_epoch": 1700000000}
        }"#;

        let current = parse_current(body).unwrap();
        assert_eq!(current.provider, "weatherapi");
        assert_eq!(current.location_name, "Phoenix, USA");
        assert_eq!(current.wind_speed_kmh, 18.0);
        assert_eq!(current.observation_time.timestamp(), 1_700_000_000);
        assert_eq!(current.coordinates, Some(Coordinates::new(33.45, -112.07)));
    }

    #[test]
    fn forecast_maps_days_and_respects_limit() {
        let body = r#"{"forecast": {"forecastday": [
            {"date": "2024-01-01", "day": {"avgtemp_c": 12.6, "condition": {"text": "Cloudy"}}},
            {"date": "2024-01-02", "day": {"avgtemp_c": 9.2, "condition": {"text": "Rain"}}},
            {"date": "2024-01-03", "day": {"avgtemp_c": 7.0, "condition": {"text": "Snow"}}}
        ]}}"#;

        let daily = parse_forecast(body, 2).unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].day, "Mon");
        assert_eq!(daily[0].temperature_c, 13.0);
        assert_eq!(daily[1].condition, "Rain");
    }

    #[test]
    fn search_maps_region_to_state() {
        let body = r#"[
            {"id": 1, "name": "Paris", "region": "Ile-de-France", "country": "France",
             "lat": 48.87, "lon": 2.33, "url": "paris-ile-de-france-france"},
            {"id": 2, "name": "Paris", "region": "", "country": "Somewhere",
             "lat": 1.0, "lon": 2.0, "url": "paris"}
        ]"#;

        let results = parse_locations(body).unwrap();
        assert_eq!(results[0].state.as_deref(), Some("Ile-de-France"));
        assert_eq!(results[1].state, None);
    }

    #[test]
    fn coordinates_are_sent_as_pair() {
        let loc = Location::parse("48.85,2.35").unwrap();
        assert_eq!(q_param(&loc), "48.85,2.35");
    }
}
