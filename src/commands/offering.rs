//! Offering catalog commands.

use std::time::Duration;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use oceandive_core::config::AppConfig;
use oceandive_core::error::AppError;
use oceandive_database::repositories::OfferingRepository;
use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::offering::{
    CreateOffering, Offering, OfferingKind, PublicationStatus, UpdateCapacity,
};

use crate::output::{self, OutputFormat};

/// Arguments for offering commands
#[derive(Debug, Args)]
pub struct OfferingArgs {
    /// Offering subcommand
    #[command(subcommand)]
    pub command: OfferingCommand,
}

/// Offering subcommands
#[derive(Debug, Subcommand)]
pub enum OfferingCommand {
    /// Create a course or trip
    Create {
        /// `course` or `trip`
        #[arg(long)]
        kind: OfferingKind,
        /// Course name or trip location
        #[arg(long)]
        name: String,
        /// Total number of spots
        #[arg(long)]
        capacity: i32,
        /// Prerequisite certification level
        #[arg(long)]
        requires: Option<CertificationLevel>,
        /// Certification conferred on completion
        #[arg(long)]
        provides: Option<CertificationLevel>,
        /// Create as a draft instead of publishing
        #[arg(long)]
        draft: bool,
    },
    /// Show one offering
    Show {
        /// Offering ID
        id: String,
    },
    /// List all offerings
    List,
    /// Change the capacity of an offering
    Capacity {
        /// Offering ID
        id: String,
        /// New capacity
        capacity: i32,
    },
    /// Stop accepting bookings
    Archive {
        /// Offering ID
        id: String,
    },
    /// Start accepting bookings
    Publish {
        /// Offering ID
        id: String,
    },
}

/// Offering display row for table output
#[derive(Debug, Serialize, Tabled)]
struct OfferingRow {
    /// Offering ID
    id: String,
    /// Kind
    kind: String,
    /// Name
    name: String,
    /// Booked / capacity
    booked: String,
    /// Availability
    availability: String,
    /// Prerequisite
    requires: String,
    /// Conferred certification
    provides: String,
    /// Created at
    created_at: String,
}

impl From<&Offering> for OfferingRow {
    fn from(o: &Offering) -> Self {
        Self {
            id: o.id.to_string(),
            kind: o.kind.to_string(),
            name: o.name.clone(),
            booked: format!("{}/{}", o.current_bookings, o.capacity),
            availability: o.availability_label().to_string(),
            requires: o
                .min_certification_required
                .map_or_else(|| "-".to_string(), |l| l.to_string()),
            provides: o
                .provided_certification
                .map_or_else(|| "-".to_string(), |l| l.to_string()),
            created_at: o.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute offering commands
pub async fn execute(
    args: &OfferingArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let repo = OfferingRepository::new(pool);
    let lock_timeout = Duration::from_millis(config.booking.lock_timeout_ms);

    match &args.command {
        OfferingCommand::Create {
            kind,
            name,
            capacity,
            requires,
            provides,
            draft,
        } => {
            let request = CreateOffering {
                kind: *kind,
                name: name.clone(),
                capacity: *capacity,
                min_certification_required: *requires,
                provided_certification: *provides,
                status: if *draft {
                    PublicationStatus::Draft
                } else {
                    PublicationStatus::Published
                },
            };
            let offering = repo.create(&request.into_offering()?).await?;

            output::print_success(&format!("Offering '{}' created", offering.name));
            output::print_kv("ID", &offering.id.to_string());
            output::print_kv("Slug", &offering.slug());
            output::print_kv("Status", offering.status.display_name());
        }
        OfferingCommand::Show { id } => {
            let id = super::parse_offering_id(id)?;
            let offering = repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Offering {id} not found")))?;

            output::print_row(OfferingRow::from(&offering), format);
            if format == OutputFormat::Table {
                output::print_kv("Booked", &format!("{:.0}%", offering.booking_percentage()));
                output::print_kv("Available spots", &offering.available_spots().to_string());
            }
        }
        OfferingCommand::List => {
            let offerings = repo.find_all().await?;
            let rows: Vec<OfferingRow> = offerings.iter().map(OfferingRow::from).collect();
            output::print_list(&rows, format);
        }
        OfferingCommand::Capacity { id, capacity } => {
            let id = super::parse_offering_id(id)?;
            let request = UpdateCapacity {
                capacity: *capacity,
            };

            request.check()?;

            let offering = repo
                .update_capacity(id, request.capacity, lock_timeout)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Offering {id} not found")))?;
            output::print_success(&format!(
                "Capacity of '{}' set to {}",
                offering.name, offering.capacity
            ));
        }
        OfferingCommand::Archive { id } => {
            set_status(&repo, id, PublicationStatus::Archived).await?;
        }
        OfferingCommand::Publish { id } => {
            set_status(&repo, id, PublicationStatus::Published).await?;
        }
    }

    Ok(())
}

async fn set_status(
    repo: &OfferingRepository,
    id: &str,
    status: PublicationStatus,
) -> Result<(), AppError> {
    let id = super::parse_offering_id(id)?;
    let offering = repo
        .update_status(id, status)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Offering {id} not found")))?;

    output::print_success(&format!(
        "Offering '{}' is now {}",
        offering.name,
        status.display_name()
    ));
    Ok(())
}
