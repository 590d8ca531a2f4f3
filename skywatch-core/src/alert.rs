//! Banner alerts shown above the current conditions.
//!
//! These are coarser than hazard predictions: they fire at lower thresholds
//! and carry a single advisory line each.

use serde::{Deserialize, Serialize};

use crate::model::CurrentConditions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

impl WeatherAlert {
    fn new(level: AlertLevel, title: &str, message: &str) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

pub fn dashboard_alerts(current: &CurrentConditions) -> Vec<WeatherAlert> {
    let mut alerts = Vec::new();

    if current.temperature_c > 30.0 {
        alerts.push(WeatherAlert::new(
            AlertLevel::Warning,
            "Heat Warning",
            "High temperatures expected. Stay hydrated and avoid prolonged sun exposure.",
        ));
    }
    if current.wind_speed_kmh > 30.0 {
        alerts.push(WeatherAlert::new(
            AlertLevel::Danger,
            "Strong Winds",
            "High wind speeds detected. Secure outdoor objects and be cautious.",
        ));
    }
    if current.humidity_pct > 80 {
        alerts.push(WeatherAlert::new(
            AlertLevel::Info,
            "High Humidity",
            "Humidity levels are high. Consider using air conditioning or dehumidifier.",
        ));
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn conditions(temperature_c: f64, humidity_pct: u8, wind_speed_kmh: f64) -> CurrentConditions {
        CurrentConditions {
            provider: "test".into(),
            location_name: "Somewhere".into(),
            coordinates: None,
            temperature_c,
            feels_like_c: temperature_c,
            condition: "Clear".into(),
            humidity_pct,
            wind_speed_kmh,
            observation_time: Utc::now(),
        }
    }

    #[test]
    fn mild_day_has_no_alerts() {
        assert!(dashboard_alerts(&conditions(30.0, 80, 30.0)).is_empty());
    }

    #[test]
    fn alerts_follow_heat_wind_humidity_order() {
        let alerts = dashboard_alerts(&conditions(31.0, 81, 31.0));
        let titles: Vec<_> = alerts.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Heat Warning", "Strong Winds", "High Humidity"]);

        let levels: Vec<_> = alerts.iter().map(|a| a.level).collect();
        assert_eq!(
            levels,
            [AlertLevel::Warning, AlertLevel::Danger, AlertLevel::Info]
        );
    }

    #[test]
    fn humidity_alone_is_info() {
        let alerts = dashboard_alerts(&conditions(18.0, 95, 5.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].level, AlertLevel::Info);
    }
}
