use thiserror::Error;

/// Reasons a [`WeatherReading`](crate::WeatherReading) fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadingError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("humidity must be between 0 and 100 percent, got {0}")]
    HumidityOutOfRange(f64),

    #[error("wind speed must not be negative, got {0} km/h")]
    NegativeWindSpeed(f64),
}
