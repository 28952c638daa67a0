//! # oceandive-entity
//!
//! Domain entity models for the OceanDive booking engine. Database-backed
//! entities derive `sqlx::FromRow`; everything derives `Serialize` and
//! `Deserialize`.

pub mod booking;
pub mod certification;
pub mod holder;
pub mod offering;
