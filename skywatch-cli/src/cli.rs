use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode};
use skywatch_core::{
    Config, Coordinates, Location, ProviderId, Report, WeatherProvider, WeatherReading, classify,
    provider::{self, default_provider_from_config, provider_from_config},
};
use tracing::debug;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "Weather conditions and hazard alerts")]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "weatherapi".
        provider: String,
    },

    /// Show current weather, forecast, alerts and hazards for a location.
    Show {
        /// Place name, or "lat,lon".
        location: String,

        /// Use this provider instead of the configured default.
        #[arg(long)]
        provider: Option<String>,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search for locations by name.
    Search {
        query: String,

        #[arg(long)]
        provider: Option<String>,
    },

    /// Classify a reading offline, without contacting any provider.
    Classify {
        /// Temperature in °C.
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,

        /// Relative humidity in percent.
        #[arg(long)]
        humidity: f64,

        /// Wind speed in km/h.
        #[arg(long)]
        wind: f64,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show {
                location,
                provider,
                json,
            } => {
                let config = Config::load()?;
                let client = resolve_provider(&config, provider.as_deref())?;
                let location = Location::parse(&location)?;
                debug!(%location, provider = %client.id(), "fetching report");

                let snapshot =
                    provider::fetch_snapshot(client.as_ref(), &location, config.forecast_days)
                        .await?;
                let report = Report::build(snapshot);

                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    output::print_report(&report);
                }
                Ok(())
            }
            Command::Search { query, provider } => {
                let config = Config::load()?;
                let client = resolve_provider(&config, provider.as_deref())?;

                let results = provider::search(client.as_ref(), &query, config.search_limit).await?;
                output::print_locations(&results);
                Ok(())
            }
            Command::Classify {
                temperature,
                humidity,
                wind,
                lat,
                lon,
                json,
            } => {
                let mut reading = WeatherReading::new(temperature, humidity, wind);
                if let (Some(lat), Some(lon)) = (lat, lon) {
                    reading = reading.with_coordinates(Coordinates::new(lat, lon));
                }
                reading.validate().context("Invalid weather reading")?;

                let hazards = classify(Some(&reading));
                if json {
                    println!("{}", serde_json::to_string_pretty(&hazards)?);
                } else {
                    output::print_hazards(&hazards);
                }
                Ok(())
            }
        }
    }
}

fn resolve_provider(
    config: &Config,
    explicit: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    match explicit {
        Some(name) => provider_from_config(ProviderId::try_from(name)?, config),
        None => default_provider_from_config(config),
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    config.upsert_provider_api_key(id, api_key.to_string());

    let current_default = config.default_provider_id().ok();
    if current_default != Some(id) {
        let make_default = Confirm::new(&format!("Make {id} the default provider?"))
            .with_default(false)
            .prompt()
            .context("Failed to read answer")?;
        if make_default {
            config.set_default_provider(id);
        }
    }

    let path = config.save()?;
    println!("Saved {id} credentials to {}", path.display());
    Ok(())
}
