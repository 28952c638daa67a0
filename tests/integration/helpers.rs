//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use oceandive_booking::store::MemoryOfferingStore;
use oceandive_booking::{BookingReferenceGenerator, BookingService, EligibilityStrategy};
use oceandive_core::config::{DatabaseConfig, EligibilityStrategyKind, ReferenceConfig};
use oceandive_core::types::OfferingId;
use oceandive_entity::certification::CertificationLevel;
use oceandive_entity::holder::{Customer, GuestUser, PremiumUser};
use oceandive_entity::offering::Offering;

/// Booking engine over an in-memory store
pub struct TestEngine {
    /// Catalog side of the store
    pub store: MemoryOfferingStore,
    /// The service under test
    pub service: BookingService,
}

impl TestEngine {
    /// Engine with the ordinal strategy
    pub fn new() -> Self {
        Self::with_strategy(EligibilityStrategyKind::Ordinal)
    }

    /// Engine with the given strategy
    pub fn with_strategy(kind: EligibilityStrategyKind) -> Self {
        let store = MemoryOfferingStore::new(Duration::from_secs(5));
        let service = BookingService::new(
            Arc::new(store.clone()),
            EligibilityStrategy::from_kind(kind),
            BookingReferenceGenerator::new(),
            ReferenceConfig::default(),
        );
        Self { store, service }
    }

    /// Add an offering to the catalog and return its id
    pub fn add(&self, offering: Offering) -> OfferingId {
        let id = offering.id;
        self.store.insert(offering).expect("Failed to insert offering");
        id
    }

    /// Current booking counter of an offering
    pub async fn bookings(&self, id: OfferingId) -> i32 {
        self.service
            .availability(id)
            .await
            .expect("Offering should exist")
            .current_bookings
    }
}

/// A guest holder
pub fn guest(first_name: &str, level: Option<CertificationLevel>) -> Customer {
    GuestUser::new(first_name, "Guest", "guest@example.com", level).into()
}

/// A registered holder
pub fn premium(first_name: &str, level: Option<CertificationLevel>) -> Customer {
    PremiumUser::new(
        first_name.to_lowercase(),
        first_name,
        "Member",
        "member@example.com",
        level,
    )
    .into()
}

/// Connect to the database named by `DATABASE_URL` and run migrations
pub async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres tests");
    let config = DatabaseConfig {
        url,
        ..DatabaseConfig::default()
    };

    let pool = oceandive_database::DatabasePool::connect(&config)
        .await
        .expect("Failed to connect to test database")
        .into_pool();

    oceandive_database::migration::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
