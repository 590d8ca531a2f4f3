use std::fmt;

use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReadingError;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// What the user asked weather for: a point, or a free-text place name.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Coordinates(Coordinates),
    Query(String),
}

impl Location {
    /// Parse `"lat,lon"` into coordinates; anything else is a place-name query.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Location must not be empty"));
        }

        if let Some((lat, lon)) = trimmed.split_once(',') {
            if let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
                return Ok(Location::Coordinates(Coordinates::new(lat, lon)));
            }
        }

        Ok(Location::Query(trimmed.to_string()))
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Location::Coordinates(c) => Some(*c),
            Location::Query(_) => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Coordinates(c) => c.fmt(f),
            Location::Query(q) => f.write_str(q),
        }
    }
}

/// Input to the hazard classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub coordinates: Option<Coordinates>,
}

impl WeatherReading {
    pub fn new(temperature_c: f64, humidity_pct: f64, wind_speed_kmh: f64) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            wind_speed_kmh,
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Reject readings that are not physically meaningful.
    ///
    /// The classifier itself never calls this; it is meant for untrusted
    /// input such as values typed on the command line.
    pub fn validate(&self) -> Result<(), ReadingError> {
        let fields = [
            ("temperature", self.temperature_c),
            ("humidity", self.humidity_pct),
            ("wind speed", self.wind_speed_kmh),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ReadingError::NonFinite { field, value });
            }
        }

        if !(0.0..=100.0).contains(&self.humidity_pct) {
            return Err(ReadingError::HumidityOutOfRange(self.humidity_pct));
        }
        if self.wind_speed_kmh < 0.0 {
            return Err(ReadingError::NegativeWindSpeed(self.wind_speed_kmh));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub provider: String,
    pub location_name: String,
    pub coordinates: Option<Coordinates>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_kmh: f64,
    pub observation_time: DateTime<Utc>,
}

impl CurrentConditions {
    pub fn reading(&self) -> WeatherReading {
        WeatherReading {
            temperature_c: self.temperature_c,
            humidity_pct: f64::from(self.humidity_pct),
            wind_speed_kmh: self.wind_speed_kmh,
            coordinates: self.coordinates,
        }
    }
}

/// One entry of the forecast strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Short weekday name, e.g. "Mon".
    pub day: String,
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl LocationResult {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    pub fn label(&self) -> String {
        match &self.state {
            Some(state) if !state.is_empty() => {
                format!("{}, {}, {}", self.name, state, self.country)
            }
            _ => format!("{}, {}", self.name, self.country),
        }
    }
}

/// Current conditions and forecast fetched together for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_pair() {
        let loc = Location::parse(" 51.5 , -0.12 ").unwrap();
        assert_eq!(loc, Location::Coordinates(Coordinates::new(51.5, -0.12)));
    }

    #[test]
    fn place_name_with_comma_is_a_query() {
        let loc = Location::parse("Paris, FR").unwrap();
        assert_eq!(loc, Location::Query("Paris, FR".to_string()));
        assert_eq!(loc.coordinates(), None);
    }

    #[test]
    fn blank_location_is_rejected() {
        let err = Location::parse("   ").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn reading_carries_coordinates_from_conditions() {
        let current = CurrentConditions {
            provider: "openweather".into(),
            location_name: "Darwin".into(),
            coordinates: Some(Coordinates::new(-12.46, 130.84)),
            temperature_c: 33.0,
            feels_like_c: 39.0,
            condition: "Clouds".into(),
            humidity_pct: 78,
            wind_speed_kmh: 22.0,
            observation_time: Utc::now(),
        };

        let reading = current.reading();
        assert_eq!(reading.humidity_pct, 78.0);
        assert_eq!(reading.coordinates, Some(Coordinates::new(-12.46, 130.84)));
    }

    #[test]
    fn validate_rejects_nan_and_out_of_range() {
        assert!(WeatherReading::new(20.0, 50.0, 10.0).validate().is_ok());

        let err = WeatherReading::new(f64::NAN, 50.0, 10.0).validate().unwrap_err();
        assert!(matches!(err, ReadingError::NonFinite { field: "temperature", .. }));

        let err = WeatherReading::new(20.0, -5.0, 10.0).validate().unwrap_err();
        assert_eq!(err, ReadingError::HumidityOutOfRange(-5.0));

        let err = WeatherReading::new(20.0, 50.0, -1.0).validate().unwrap_err();
        assert_eq!(err, ReadingError::NegativeWindSpeed(-1.0));
    }

    #[test]
    fn location_result_label_includes_state_when_present() {
        let mut result = LocationResult {
            name: "Springfield".into(),
            lat: 39.8,
            lon: -89.6,
            country: "US".into(),
            state: Some("Illinois".into()),
        };
        assert_eq!(result.label(), "Springfield, Illinois, US");

        result.state = None;
        assert_eq!(result.label(), "Springfield, US");
    }
}
