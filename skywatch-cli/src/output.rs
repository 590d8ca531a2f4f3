use chrono::Local;
use skywatch_core::{AlertLevel, HazardPrediction, LocationResult, Report, Severity, WeatherAlert};

pub fn print_report(report: &Report) {
    let current = &report.snapshot.current;
    let local_time = current.observation_time.with_timezone(&Local);

    println!("{} ({})", current.location_name, current.provider);
    println!("  Observed:    {}", local_time.format("%Y-%m-%d %H:%M"));
    println!("  Condition:   {}", current.condition);
    println!(
        "  Temperature: {:.0}°C (feels like {:.0}°C)",
        current.temperature_c, current.feels_like_c
    );
    println!("  Humidity:    {}%", current.humidity_pct);
    println!("  Wind:        {:.0} km/h", current.wind_speed_kmh);
    println!("  Severity:    {}", report.marker_severity.as_str().to_uppercase());
    if report.marker_severity == Severity::High {
        println!("  ⚠️ Warning: Severe weather conditions!");
    }

    if !report.snapshot.forecast.is_empty() {
        println!();
        println!("Forecast:");
        for day in &report.snapshot.forecast {
            println!("  {:<4} {:>4.0}°C  {}", day.day, day.temperature_c, day.condition);
        }
    }

    if !report.alerts.is_empty() {
        println!();
        println!("Alerts:");
        for alert in &report.alerts {
            println!("  {}", alert_line(alert));
        }
    }

    println!();
    print_hazards(&report.hazards);
}

pub fn print_hazards(hazards: &[HazardPrediction]) {
    if hazards.is_empty() {
        println!("No hazards predicted.");
        return;
    }

    println!("Hazards:");
    for hazard in hazards {
        println!("  {}", hazard_headline(hazard));
        println!("    {}", hazard.description);
        for rec in &hazard.recommendations {
            println!("    - {rec}");
        }
    }
}

pub fn print_locations(results: &[LocationResult]) {
    if results.is_empty() {
        println!("No locations found.");
        return;
    }

    for result in results {
        println!("{:<40} {}", result.label(), result.coordinates());
    }
}

fn alert_line(alert: &WeatherAlert) -> String {
    let tag = match alert.level {
        AlertLevel::Info => "INFO",
        AlertLevel::Warning => "WARNING",
        AlertLevel::Danger => "DANGER",
    };
    format!("[{tag}] {}: {}", alert.title, alert.message)
}

fn hazard_headline(hazard: &HazardPrediction) -> String {
    format!(
        "{} {} ({}, {:.0}%)",
        hazard.icon,
        hazard.kind,
        hazard.severity,
        hazard.probability.round()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use skywatch_core::{WeatherReading, classify};

    #[test]
    fn hazard_headline_rounds_probability() {
        let hazards = classify(Some(&WeatherReading::new(42.0, 20.0, 5.0)));
        assert_eq!(hazard_headline(&hazards[0]), "🌡️ Heat Wave (high, 47%)");
    }

    #[test]
    fn alert_line_tags_level() {
        let alert = WeatherAlert {
            level: AlertLevel::Danger,
            title: "Strong Winds".into(),
            message: "Be careful.".into(),
        };
        assert_eq!(alert_line(&alert), "[DANGER] Strong Winds: Be careful.");
    }
}
