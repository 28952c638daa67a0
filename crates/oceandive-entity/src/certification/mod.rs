//! Diver certification levels.

pub mod level;

pub use level::CertificationLevel;
