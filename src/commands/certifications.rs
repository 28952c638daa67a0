//! Certification level listing and eligibility checks.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use oceandive_booking::{EligibilityStrategy, EligibilityValidator};
use oceandive_core::config::AppConfig;
use oceandive_core::error::AppError;
use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::offering::Offering;

use crate::output::{self, OutputFormat};

/// Arguments for certification commands
#[derive(Debug, Args)]
pub struct CertificationArgs {
    /// Certification subcommand
    #[command(subcommand)]
    pub command: CertificationCommand,
}

/// Certification subcommands
#[derive(Debug, Subcommand)]
pub enum CertificationCommand {
    /// List every certification level in rank order
    List,
    /// Check whether a holder level qualifies for a requirement
    Check {
        /// Holder's level; omit for a holder without certification
        #[arg(long)]
        holder: Option<String>,
        /// Required prerequisite level
        #[arg(long)]
        required: Option<String>,
        /// Level the offering confers, if it is a certification course
        #[arg(long)]
        provides: Option<String>,
    },
}

/// Certification level display row
#[derive(Debug, Serialize, Tabled)]
struct LevelRow {
    /// Rank
    rank: u8,
    /// Canonical name
    canonical: &'static str,
    /// Display name
    name: &'static str,
    /// Full display name
    full_name: &'static str,
    /// Rescue Diver or higher
    advanced: bool,
    /// Divemaster or higher
    professional: bool,
}

/// Eligibility check display row
#[derive(Debug, Serialize, Tabled)]
struct CheckRow {
    /// Strategy used
    strategy: &'static str,
    /// Holder level
    holder: String,
    /// Required level
    required: String,
    /// Provided level
    provides: String,
    /// Outcome
    eligible: bool,
    /// Explanation
    message: String,
}

/// Execute certification commands
pub fn execute(
    args: &CertificationArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        CertificationCommand::List => {
            let rows: Vec<LevelRow> = CertificationLevel::all()
                .iter()
                .map(|level| LevelRow {
                    rank: level.rank(),
                    canonical: level.canonical_name(),
                    name: level.display_name(),
                    full_name: level.full_display_name(),
                    advanced: level.is_advanced(),
                    professional: level.is_professional(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        CertificationCommand::Check {
            holder,
            required,
            provides,
        } => {
            let holder = parse_level(holder.as_deref())?;
            let required = parse_level(required.as_deref())?;
            let provides = parse_level(provides.as_deref())?;

            let offering = Offering::trip("Eligibility check", 1, required)
                .with_provided_certification(provides);
            let strategy = EligibilityStrategy::from_kind(config.booking.eligibility_strategy);
            let result = strategy.validate(holder, &offering);

            output::print_row(
                CheckRow {
                    strategy: strategy.name(),
                    holder: describe(holder),
                    required: describe(required),
                    provides: describe(provides),
                    eligible: result.valid,
                    message: result.message,
                },
                format,
            );
        }
    }

    Ok(())
}

fn parse_level(raw: Option<&str>) -> Result<Option<CertificationLevel>, AppError> {
    raw.map(CertificationLevel::from_display_name).transpose()
}

fn describe(level: Option<CertificationLevel>) -> String {
    level.map_or_else(|| "-".to_string(), |l| l.display_name().to_string())
}
