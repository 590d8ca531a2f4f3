//! Core library for the `skywatch` weather hazard dashboard.
//!
//! This crate defines:
//! - The hazard classifier and dashboard alert rules
//! - Abstraction over weather providers, with concurrent snapshot fetching
//! - Configuration & credentials handling
//! - Shared domain models (locations, readings, conditions, forecasts)
//!
//! It is used by `skywatch-cli`, but can also be reused by other binaries or services.

pub mod alert;
pub mod config;
pub mod error;
pub mod forecast;
pub mod hazard;
pub mod model;
pub mod provider;
pub mod report;

pub use alert::{AlertLevel, WeatherAlert};
pub use config::{Config, ProviderConfig};
pub use error::ReadingError;
pub use hazard::{HazardKind, HazardPrediction, Severity, classify};
pub use model::{
    Coordinates, CurrentConditions, DailyForecast, Location, LocationResult, WeatherReading,
    WeatherSnapshot,
};
pub use provider::{ProviderId, WeatherProvider};
pub use report::Report;
