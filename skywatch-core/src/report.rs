use serde::Serialize;
use tracing::info;

use crate::{
    alert::{WeatherAlert, dashboard_alerts},
    hazard::{HazardPrediction, Severity, classify, marker_severity},
    model::WeatherSnapshot,
};

/// Everything the dashboard shows for one location.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub snapshot: WeatherSnapshot,
    pub alerts: Vec<WeatherAlert>,
    pub hazards: Vec<HazardPrediction>,
    pub marker_severity: Severity,
}

impl Report {
    pub fn build(snapshot: WeatherSnapshot) -> Self {
        let current = &snapshot.current;
        let alerts = dashboard_alerts(current);
        let hazards = classify(Some(&current.reading()));
        let marker_severity = marker_severity(current.temperature_c, current.wind_speed_kmh);

        info!(
            location = %current.location_name,
            alerts = alerts.len(),
            hazards = hazards.len(),
            %marker_severity,
            "built weather report"
        );

        Self {
            snapshot,
            alerts,
            hazards,
            marker_severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::HazardKind;
    use crate::model::{Coordinates, CurrentConditions};
    use chrono::Utc;

    fn snapshot(temperature_c: f64, humidity_pct: u8, wind_speed_kmh: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                provider: "test".into(),
                location_name: "Chennai".into(),
                coordinates: Some(Coordinates::new(13.08, 80.27)),
                temperature_c,
                feels_like_c: temperature_c,
                condition: "Thunderstorm".into(),
                humidity_pct,
                wind_speed_kmh,
                observation_time: Utc::now(),
            },
            forecast: Vec::new(),
        }
    }

    #[test]
    fn storm_report_combines_alerts_and_hazards() {
        let report = Report::build(snapshot(32.0, 88, 70.0));

        assert_eq!(report.alerts.len(), 3);
        let kinds: Vec<_> = report.hazards.iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            [HazardKind::Cyclone, HazardKind::FloodRisk, HazardKind::Thunderstorm]
        );
        assert_eq!(report.marker_severity, Severity::High);
        assert!(
            report
                .hazards
                .iter()
                .all(|h| h.coordinates == Some(Coordinates::new(13.08, 80.27)))
        );
    }

    #[test]
    fn quiet_report_is_low_severity() {
        let report = Report::build(snapshot(18.0, 40, 8.0));

        assert!(report.alerts.is_empty());
        assert!(report.hazards.is_empty());
        assert_eq!(report.marker_severity, Severity::Low);
    }
}
