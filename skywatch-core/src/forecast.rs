use chrono::{DateTime, Utc};

use crate::model::DailyForecast;

/// OpenWeather's free forecast is 3-hourly, so eight entries make a day.
pub const ENTRIES_PER_DAY: usize = 8;

/// A single forecast slot as returned by a provider, before daily sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub condition: String,
}

impl ForecastEntry {
    pub fn to_daily(&self) -> DailyForecast {
        DailyForecast {
            day: self.time.format("%a").to_string(),
            date: self.time.date_naive(),
            temperature_c: self.temperature_c.round(),
            condition: self.condition.clone(),
        }
    }
}

/// Take every `step`-th entry starting from the first, keeping at most `days`.
pub fn sample_daily(entries: &[ForecastEntry], step: usize, days: usize) -> Vec<DailyForecast> {
    entries
        .iter()
        .step_by(step.max(1))
        .take(days)
        .map(ForecastEntry::to_daily)
        .collect()
}
