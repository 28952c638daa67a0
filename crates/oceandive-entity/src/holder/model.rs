//! Certification holder capability and the customer kinds that provide it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use oceandive_core::types::CustomerId;

use crate::certification::CertificationLevel;

/// Anything exposing a first name and a certification level.
///
/// The booking engine is written against this capability only and never
/// inspects the concrete customer type.
pub trait CertificationHolder: Send + Sync {
    /// First name, used in booking references.
    fn first_name(&self) -> &str;

    /// Declared certification level, if any.
    fn certification(&self) -> Option<CertificationLevel>;

    /// Declared level, treating a missing one as non-diver.
    fn effective_certification(&self) -> CertificationLevel {
        self.certification().unwrap_or(CertificationLevel::NonDiver)
    }
}

/// A registered customer with an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumUser {
    /// Customer identifier.
    pub id: CustomerId,
    /// Login name.
    pub username: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Declared certification level.
    pub certification: Option<CertificationLevel>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl PremiumUser {
    /// Create a premium user with a fresh id.
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        certification: Option<CertificationLevel>,
    ) -> Self {
        Self {
            id: CustomerId::new(),
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            certification,
            created_at: Utc::now(),
        }
    }
}

impl CertificationHolder for PremiumUser {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn certification(&self) -> Option<CertificationLevel> {
        self.certification
    }
}

/// An anonymous customer who booked without an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestUser {
    /// Customer identifier.
    pub id: CustomerId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Declared certification level.
    pub certification: Option<CertificationLevel>,
}

impl GuestUser {
    /// Create a guest with a fresh id.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        certification: Option<CertificationLevel>,
    ) -> Self {
        Self {
            id: CustomerId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            certification,
        }
    }
}

impl CertificationHolder for GuestUser {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn certification(&self) -> Option<CertificationLevel> {
        self.certification
    }
}

/// Which concrete record a customer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerKind {
    /// Registered account.
    Premium,
    /// Guest checkout.
    Guest,
}

impl fmt::Display for CustomerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Premium => write!(f, "premium"),
            Self::Guest => write!(f, "guest"),
        }
    }
}

/// Tagged customer, for callers that need to know which record to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Customer {
    /// Registered account.
    Premium(PremiumUser),
    /// Guest checkout.
    Guest(GuestUser),
}

impl Customer {
    /// Return the customer identifier.
    pub fn id(&self) -> CustomerId {
        match self {
            Self::Premium(user) => user.id,
            Self::Guest(guest) => guest.id,
        }
    }

    /// Return which kind of record this is.
    pub fn kind(&self) -> CustomerKind {
        match self {
            Self::Premium(_) => CustomerKind::Premium,
            Self::Guest(_) => CustomerKind::Guest,
        }
    }

    fn holder(&self) -> &dyn CertificationHolder {
        match self {
            Self::Premium(user) => user,
            Self::Guest(guest) => guest,
        }
    }
}

impl CertificationHolder for Customer {
    fn first_name(&self) -> &str {
        self.holder().first_name()
    }

    fn certification(&self) -> Option<CertificationLevel> {
        self.holder().certification()
    }
}

impl From<PremiumUser> for Customer {
    fn from(user: PremiumUser) -> Self {
        Self::Premium(user)
    }
}

impl From<GuestUser> for Customer {
    fn from(guest: GuestUser) -> Self {
        Self::Guest(guest)
    }
}
