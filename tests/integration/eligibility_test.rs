//! Integration tests for interchangeable eligibility strategies.

mod helpers;

use oceandive_booking::{BookingError, EligibilityStrategy, EligibilityValidator};
use oceandive_core::config::EligibilityStrategyKind;
use oceandive_entity::certification::CertificationLevel::{self, *};
use oceandive_entity::offering::Offering;

use helpers::{TestEngine, guest};

const STRATEGIES: [EligibilityStrategyKind; 2] =
    [EligibilityStrategyKind::Ordinal, EligibilityStrategyKind::Rules];

#[tokio::test]
async fn test_strategies_book_identically() {
    for kind in STRATEGIES {
        let engine = TestEngine::with_strategy(kind);
        let course = engine.add(Offering::course("Rescue Diver", 6, Some(AdvancedOpenWater)));

        let err = engine.service.book(course, &guest("Ana", Some(OpenWater))).await.unwrap_err();
        assert!(matches!(err, BookingError::EligibilityFailure(_)), "{kind}");

        let err = engine.service.book(course, &guest("Ana", Some(Divemaster))).await.unwrap_err();
        assert!(
            err.to_string().contains("already holds this certification or higher"),
            "{kind}"
        );

        engine
            .service
            .book(course, &guest("Ana", Some(AdvancedOpenWater)))
            .await
            .unwrap();
        assert_eq!(engine.service.validator().name(), kind.to_string());
    }
}

#[test]
fn test_monotonic_for_both_strategies() {
    for kind in STRATEGIES {
        let strategy = EligibilityStrategy::from_kind(kind);
        for required in CertificationLevel::ALL {
            let trip = Offering::trip("Monotonic", 4, Some(required));
            let first_ok = CertificationLevel::ALL
                .iter()
                .position(|level| strategy.validate(Some(*level), &trip).valid)
                .unwrap();
            for (rank, level) in CertificationLevel::ALL.iter().enumerate() {
                assert_eq!(
                    strategy.validate(Some(*level), &trip).valid,
                    rank >= first_ok,
                    "{kind}: {level:?} vs {required:?}"
                );
            }
            assert_eq!(first_ok, usize::from(required.rank()));
        }
    }
}

#[test]
fn test_display_name_lookup_feeds_validation() {
    let level = CertificationLevel::from_display_name("  advanced open water diver ").unwrap();
    let trip = Offering::trip("Drift", 4, Some(OpenWater));
    assert!(EligibilityStrategy::default().validate(Some(level), &trip).valid);

    assert!(CertificationLevel::from_display_name("Tech Diver").is_err());
}
