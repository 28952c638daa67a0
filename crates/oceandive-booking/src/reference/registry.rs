//! Process-wide set of issued booking references.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use oceandive_core::types::OfferingId;

/// Concurrent map from issued reference to the offering it booked.
///
/// Entries leave only through [`ReferenceRegistry::forget`], which
/// cancellation calls; a plain release frees a spot without naming a
/// booking, so it cannot evict one. A long-lived service therefore holds one
/// entry per live booking. The CLI builds a fresh registry per invocation
/// and seeds it from stored records instead.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    issued: DashMap<String, OfferingId>,
}

impl ReferenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a reference. Returns `false` if it was already issued.
    pub fn claim(&self, reference: &str, offering_id: OfferingId) -> bool {
        match self.issued.entry(reference.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(offering_id);
                true
            }
        }
    }

    /// Record a reference even if it collides with an earlier one.
    pub fn record(&self, reference: &str, offering_id: OfferingId) {
        self.issued.insert(reference.to_string(), offering_id);
    }

    /// Whether the reference has been issued.
    pub fn contains(&self, reference: &str) -> bool {
        self.issued.contains_key(reference)
    }

    /// Offering booked under the reference.
    pub fn offering_of(&self, reference: &str) -> Option<OfferingId> {
        self.issued.get(reference).map(|entry| *entry.value())
    }

    /// Forget a reference, returning the offering it booked.
    pub fn forget(&self, reference: &str) -> Option<OfferingId> {
        self.issued.remove(reference).map(|(_, offering_id)| offering_id)
    }

    /// Number of references issued.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Whether nothing has been issued.
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_exclusive() {
        let registry = ReferenceRegistry::new();
        let offering = OfferingId::new();
        assert!(registry.claim("BLUEHOLE_ANA_123", offering));
        assert!(!registry.claim("BLUEHOLE_ANA_123", OfferingId::new()));
        assert_eq!(registry.offering_of("BLUEHOLE_ANA_123"), Some(offering));
    }

    #[test]
    fn test_forget() {
        let registry = ReferenceRegistry::new();
        let offering = OfferingId::new();
        registry.record("X_Y_100", offering);
        assert_eq!(registry.forget("X_Y_100"), Some(offering));
        assert_eq!(registry.forget("X_Y_100"), None);
        assert!(registry.is_empty());
    }
}
