//! Core type definitions used across the OceanDive workspace.

pub mod id;

pub use id::*;
