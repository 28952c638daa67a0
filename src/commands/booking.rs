//! Booking, release, and cancellation commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use oceandive_booking::{BookingError, BookingReferenceGenerator, ReleaseError};
use oceandive_core::config::AppConfig;
use oceandive_core::error::AppError;
use oceandive_database::repositories::{BookingRecordRepository, OfferingRepository};
use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::holder::{Customer, GuestUser, PremiumUser};
use oceandive_entity::offering::CapacitySnapshot;

use crate::output::{self, OutputFormat};

/// Arguments for booking commands
#[derive(Debug, Args)]
pub struct BookingArgs {
    /// Booking subcommand
    #[command(subcommand)]
    pub command: BookingCommand,
}

/// Booking subcommands
#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// Book one spot on an offering
    Book {
        /// Offering ID
        offering_id: String,
        /// Holder's first name
        #[arg(long)]
        name: String,
        /// Holder's last name
        #[arg(long, default_value = "")]
        last_name: String,
        /// Holder's email
        #[arg(long, default_value = "")]
        email: String,
        /// Holder's certification level
        #[arg(long)]
        certification: Option<CertificationLevel>,
        /// Book as a guest rather than a registered customer
        #[arg(long)]
        guest: bool,
    },
    /// Free one spot on an offering
    Release {
        /// Offering ID
        offering_id: String,
    },
    /// Cancel a booking by its reference
    Cancel {
        /// Booking reference
        reference: String,
    },
    /// Show capacity counters of an offering
    Availability {
        /// Offering ID
        offering_id: String,
    },
    /// List bookings of an offering
    List {
        /// Offering ID
        offering_id: String,
    },
}

/// Capacity display row
#[derive(Debug, Serialize, Tabled)]
struct AvailabilityRow {
    /// Offering ID
    offering_id: String,
    /// Capacity
    capacity: i32,
    /// Booked spots
    booked: i32,
    /// Free spots
    available: i32,
    /// State
    state: String,
}

impl From<CapacitySnapshot> for AvailabilityRow {
    fn from(s: CapacitySnapshot) -> Self {
        Self {
            offering_id: s.offering_id.to_string(),
            capacity: s.capacity,
            booked: s.current_bookings,
            available: s.available_spots,
            state: s.state.to_string(),
        }
    }
}

/// Booking record display row
#[derive(Debug, Serialize, Tabled)]
struct RecordRow {
    /// Reference
    reference: String,
    /// Holder
    holder: String,
    /// Issued at
    issued_at: String,
}

/// Execute booking commands
pub async fn execute(
    args: &BookingArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let records = BookingRecordRepository::new(pool.clone());
    let offerings = OfferingRepository::new(pool.clone());
    let service = super::booking_service(config, pool)?;

    match &args.command {
        BookingCommand::Book {
            offering_id,
            name,
            last_name,
            email,
            certification,
            guest,
        } => {
            let offering_id = super::parse_offering_id(offering_id)?;
            let customer: Customer = if *guest {
                GuestUser::new(name, last_name, email, *certification).into()
            } else {
                PremiumUser::new(name.to_lowercase(), name, last_name, email, *certification)
                    .into()
            };

            // References are global, so seed with every stored one sharing the
            // name segment, whichever offering it belongs to.
            if let Some(offering) = offerings.find_by_id(offering_id).await? {
                let prefix = BookingReferenceGenerator::prefix(Some(&offering.name));
                for existing in records.find_by_reference_prefix(&prefix).await? {
                    service.registry().record(&existing.reference, existing.offering_id);
                }
            }

            let record = match service.book_recorded(offering_id, &customer, &records).await {
                Ok(record) => record,
                Err(BookingError::CapacityExceeded) => {
                    output::print_warning("Offering is fully booked");
                    return Ok(());
                }
                Err(BookingError::EligibilityFailure(message)) => {
                    output::print_warning(&format!("Not eligible: {message}"));
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            output::print_success(&format!("Booked {} ({})", record.reference, customer.kind()));
        }
        BookingCommand::Release { offering_id } => {
            let offering_id = super::parse_offering_id(offering_id)?;
            match service.release(offering_id).await {
                Ok(snapshot) => {
                    output::print_success("Spot released");
                    output::print_row(AvailabilityRow::from(snapshot), format);
                }
                Err(ReleaseError::NothingToRelease) => {
                    output::print_warning("Offering has no bookings to release");
                }
                Err(e) => return Err(e.into()),
            }
        }
        BookingCommand::Cancel { reference } => {
            match service.cancel_recorded(reference, &records).await {
                Ok(snapshot) => {
                    output::print_success(&format!("Booking {reference} cancelled"));
                    output::print_row(AvailabilityRow::from(snapshot), format);
                }
                Err(ReleaseError::NothingToRelease) => {
                    output::print_warning(&format!(
                        "Booking {reference} removed; the offering had no bookings to release"
                    ));
                }
                Err(e) => return Err(e.into()),
            }
        }
        BookingCommand::Availability { offering_id } => {
            let offering_id = super::parse_offering_id(offering_id)?;
            let snapshot = service.availability(offering_id).await?;
            output::print_row(AvailabilityRow::from(snapshot), format);
        }
        BookingCommand::List { offering_id } => {
            let offering_id = super::parse_offering_id(offering_id)?;
            let rows: Vec<RecordRow> = records
                .find_by_offering(offering_id)
                .await?
                .into_iter()
                .map(|r| RecordRow {
                    reference: r.reference,
                    holder: r.holder_name,
                    issued_at: r.issued_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
