//! Rule-based hazard classification.
//!
//! Each rule is a threshold check on a single [`WeatherReading`]. Rules are
//! independent of one another: a reading can trigger any subset of them, and
//! the output always lists predictions in rule order.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Coordinates, WeatherReading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Cyclone,
    HeatWave,
    FloodRisk,
    Thunderstorm,
}

impl HazardKind {
    pub fn label(&self) -> &'static str {
        match self {
            HazardKind::Cyclone => "Cyclone",
            HazardKind::HeatWave => "Heat Wave",
            HazardKind::FloodRisk => "Flood Risk",
            HazardKind::Thunderstorm => "Thunderstorm",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            HazardKind::Cyclone => "🌪️",
            HazardKind::HeatWave => "🌡️",
            HazardKind::FloodRisk => "🌊",
            HazardKind::Thunderstorm => "⛈️",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            HazardKind::Cyclone => &[
                "Stay indoors and away from windows",
                "Secure loose outdoor items",
                "Prepare emergency supplies",
                "Monitor local weather updates",
            ],
            HazardKind::HeatWave => &[
                "Stay hydrated",
                "Avoid outdoor activities",
                "Find air-conditioned spaces",
                "Check on vulnerable neighbors",
            ],
            HazardKind::FloodRisk => &[
                "Monitor water levels",
                "Prepare for possible evacuation",
                "Move valuables to higher ground",
                "Keep emergency contacts handy",
            ],
            HazardKind::Thunderstorm => &[
                "Seek indoor shelter",
                "Avoid open areas",
                "Unplug electronic devices",
                "Stay away from windows",
            ],
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative risk tier. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardPrediction {
    pub kind: HazardKind,
    pub severity: Severity,
    pub coordinates: Option<Coordinates>,
    pub description: String,
    /// Distance past the trigger threshold, scaled to 0..=100.
    pub probability: f64,
    pub recommendations: Vec<String>,
    pub icon: String,
}

struct Rule {
    triggers: fn(&WeatherReading) -> bool,
    build: fn(&WeatherReading) -> HazardPrediction,
}

const RULES: [Rule; 4] = [
    Rule {
        triggers: |r| r.wind_speed_kmh > 50.0,
        build: cyclone,
    },
    Rule {
        triggers: |r| r.temperature_c > 35.0,
        build: heat_wave,
    },
    Rule {
        triggers: |r| r.humidity_pct > 70.0 && r.wind_speed_kmh > 20.0,
        build: flood_risk,
    },
    Rule {
        triggers: |r| r.humidity_pct > 80.0 && r.temperature_c > 25.0 && r.wind_speed_kmh > 15.0,
        build: thunderstorm,
    },
];

/// Classify a reading into zero or more hazard predictions.
///
/// A missing reading yields no predictions. Inputs are not validated; see
/// [`WeatherReading::validate`] for callers that need that.
pub fn classify(reading: Option<&WeatherReading>) -> Vec<HazardPrediction> {
    let Some(reading) = reading else {
        return Vec::new();
    };

    let predictions: Vec<HazardPrediction> = RULES
        .iter()
        .filter(|rule| (rule.triggers)(reading))
        .map(|rule| (rule.build)(reading))
        .collect();

    debug!(
        temperature_c = reading.temperature_c,
        humidity_pct = reading.humidity_pct,
        wind_speed_kmh = reading.wind_speed_kmh,
        count = predictions.len(),
        "classified weather reading"
    );

    predictions
}

/// Overall severity of a map marker, from temperature and wind alone.
pub fn marker_severity(temperature_c: f64, wind_speed_kmh: f64) -> Severity {
    if wind_speed_kmh > 63.0 || temperature_c > 40.0 {
        Severity::High
    } else if wind_speed_kmh > 50.0 || temperature_c > 35.0 {
        Severity::Moderate
    } else {
        Severity::Low
    }
}

fn cyclone(r: &WeatherReading) -> HazardPrediction {
    prediction(
        HazardKind::Cyclone,
        r,
        (r.wind_speed_kmh - 50.0) / 50.0 * 100.0,
        r.wind_speed_kmh > 63.0,
        format!(
            "Hurricane-force winds detected. Wind speed: {}km/h",
            r.wind_speed_kmh
        ),
    )
}

fn heat_wave(r: &WeatherReading) -> HazardPrediction {
    prediction(
        HazardKind::HeatWave,
        r,
        (r.temperature_c - 35.0) / 15.0 * 100.0,
        r.temperature_c > 40.0,
        format!("High temperature alert: {}°C", r.temperature_c),
    )
}

fn flood_risk(r: &WeatherReading) -> HazardPrediction {
    prediction(
        HazardKind::FloodRisk,
        r,
        (r.humidity_pct - 70.0) / 30.0 * 100.0,
        r.humidity_pct > 85.0,
        format!("High humidity ({}%) with strong winds", r.humidity_pct),
    )
}

fn thunderstorm(r: &WeatherReading) -> HazardPrediction {
    prediction(
        HazardKind::Thunderstorm,
        r,
        (r.humidity_pct - 80.0) / 20.0 * 100.0,
        r.wind_speed_kmh > 25.0,
        "Conditions favorable for thunderstorm development".to_string(),
    )
}

fn prediction(
    kind: HazardKind,
    reading: &WeatherReading,
    raw_probability: f64,
    high: bool,
    description: String,
) -> HazardPrediction {
    HazardPrediction {
        kind,
        severity: if high { Severity::High } else { Severity::Moderate },
        coordinates: reading.coordinates,
        description,
        probability: raw_probability.clamp(0.0, 100.0),
        recommendations: kind.recommendations().iter().map(|s| s.to_string()).collect(),
        icon: kind.icon().to_string(),
    }
}
