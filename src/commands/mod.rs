//! CLI command definitions and dispatch.

pub mod booking;
pub mod certifications;
pub mod migrate;
pub mod offering;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use oceandive_booking::BookingService;
use oceandive_booking::store::OfferingStoreDispatch;
use oceandive_core::config::{AppConfig, BookingConfig, StoreBackend};
use oceandive_core::error::AppError;
use oceandive_core::types::OfferingId;
use oceandive_database::DatabasePool;

use crate::output::OutputFormat;

/// OceanDive dive-school booking and eligibility administration
#[derive(Debug, Parser)]
#[command(name = "oceandive", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Certification levels and eligibility checks
    Certifications(certifications::CertificationArgs),
    /// Offering catalog management
    Offering(offering::OfferingArgs),
    /// Booking and release
    Booking(booking::BookingArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Certifications(args) => {
                certifications::execute(args, &config, self.format)
            }
            Commands::Offering(args) => offering::execute(args, &config, self.format).await,
            Commands::Booking(args) => booking::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: load configuration from file, with the `OCEANDIVE_ENV` overlay
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("OCEANDIVE_ENV").ok();
    AppConfig::load(config_path, env.as_deref())
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}

/// Helper: booking service over the PostgreSQL store
///
/// Each CLI invocation is its own process, so the in-memory store would
/// always be empty; the configured backend is overridden.
pub fn booking_service(config: &AppConfig, pool: sqlx::PgPool) -> Result<BookingService, AppError> {
    if config.booking.store != StoreBackend::Postgres {
        debug!(configured = %config.booking.store, "CLI uses the postgres offering store");
    }
    let booking = BookingConfig {
        store: StoreBackend::Postgres,
        ..config.booking.clone()
    };
    let store = OfferingStoreDispatch::from_config(&booking, Some(pool))?;
    Ok(BookingService::from_config(&booking, Arc::new(store)))
}

/// Helper: parse an offering id argument
pub fn parse_offering_id(raw: &str) -> Result<OfferingId, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid offering id '{raw}'")))
}
