use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    forecast::{ENTRIES_PER_DAY, ForecastEntry, sample_daily},
    model::{Coordinates, CurrentConditions, DailyForecast, Location, LocationResult},
    provider::{ProviderId, get_body, unix_to_utc},
};

use super::WeatherProvider;

const DATA_URL: &str = "https://api.openweathermap.org/data/2.5";
const GEO_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// OpenWeather reports metric wind speed in metres per second.
const MPS_TO_KMH: f64 = 3.6;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    fn location_query(&self, location: &Location) -> Vec<(&'static str, String)> {
        let mut query = match location {
            Location::Coordinates(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
            Location::Query(q) => vec![("q", q.clone())],
        };
        query.push(("appid", self.api_key.clone()));
        query.push(("units", "metric".to_string()));
        query
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: Option<OwCoord>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn condition_of(weather: &[OwWeather]) -> String {
    weather
        .first()
        .map(|w| w.main.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn parse_current(body: &str) -> Result<CurrentConditions> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather current JSON")?;

    Ok(CurrentConditions {
        provider: ProviderId::OpenWeather.to_string(),
        location_name: parsed.name,
        coordinates: parsed.coord.map(|c| Coordinates::new(c.lat, c.lon)),
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        condition: condition_of(&parsed.weather),
        humidity_pct: parsed.main.humidity,
        wind_speed_kmh: parsed.wind.speed * MPS_TO_KMH,
        observation_time: unix_to_utc(parsed.dt).unwrap_or_else(Utc::now),
    })
}

fn parse_forecast(body: &str, days: usize) -> Result<Vec<DailyForecast>> {
    let parsed: OwForecastResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather forecast JSON")?;

    let entries: Vec<ForecastEntry> = parsed
        .list
        .iter()
        .filter_map(|e| {
            Some(ForecastEntry {
                time: unix_to_utc(e.dt)?,
                temperature_c: e.main.temp,
                condition: condition_of(&e.weather),
            })
        })
        .collect();

    Ok(sample_daily(&entries, ENTRIES_PER_DAY, days))
}

fn parse_locations(body: &str) -> Result<Vec<LocationResult>> {
    serde_json::from_str(body).context("Failed to parse OpenWeather geocoding JSON")
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn current(&self, location: &Location) -> Result<CurrentConditions> {
        let url = format!("{DATA_URL}/weather");
        let body = get_body(
            &self.http,
            &url,
            &self.location_query(location),
            "OpenWeather current weather",
        )
        .await?;

        let mut current = parse_current(&body)?;
        // Keep the point the user asked for rather than the station OpenWeather snapped to.
        if let Some(requested) = location.coordinates() {
            current.coordinates = Some(requested);
        }
        Ok(current)
    }

    async fn forecast(&self, location: &Location, days: usize) -> Result<Vec<DailyForecast>> {
        let url = format!("{DATA_URL}/forecast");
        let body = get_body(
            &self.http,
            &url,
            &self.location_query(location),
            "OpenWeather 5-day forecast",
        )
        .await?;

        parse_forecast(&body, days)
    }

    async fn search_locations(&self, query: &str, limit: usize) -> Result<Vec<LocationResult>> {
        let url = format!("{GEO_URL}/direct");
        let body = get_body(
            &self.http,
            &url,
            &[
                ("q", query.to_string()),
                ("limit", limit.to_string()),
                ("appid", self.api_key.clone()),
            ],
            "OpenWeather geocoding",
        )
        .await?;

        parse_locations(&body)
    }
}
