//! # oceandive-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for offerings and booking records.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
