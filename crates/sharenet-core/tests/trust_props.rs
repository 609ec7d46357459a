// Rust guideline compliant 2026-02-06

//! Property-based tests for trust score adjustment.

use proptest::prelude::*;
use sharenet_core::trust::{classify_return, days_late, MAX_SCORE};
use sharenet_core::{apply_outcome, TrustDeltas, TrustOutcome};

fn arb_outcome() -> impl Strategy<Value = TrustOutcome> {
    prop_oneof![
        Just(TrustOutcome::OnTimeReturn),
        Just(TrustOutcome::Completed),
        Just(TrustOutcome::LateReturnMinor),
        Just(TrustOutcome::LateReturnMajor),
        Just(TrustOutcome::Dispute),
    ]
}

proptest! {
    /// Scores never leave the valid range.
    #[test]
    fn prop_score_stays_bounded(
        score in 0u8..=MAX_SCORE,
        outcomes in prop::collection::vec(arb_outcome(), 0..40),
    ) {
        let mut current = score;
        for outcome in outcomes {
            current = apply_outcome(current, outcome);
            prop_assert!(current <= MAX_SCORE);
        }
    }

    /// Positive outcomes never lower a score, negative ones never raise it.
    #[test]
    fn prop_delta_sign_is_respected(score in 0u8..=MAX_SCORE, outcome in arb_outcome()) {
        let deltas = TrustDeltas::default();
        let next = deltas.apply(score, outcome);
        if deltas.delta(outcome) >= 0 {
            prop_assert!(next >= score);
        } else {
            prop_assert!(next <= score);
        }
    }

    /// Returning within the agreed duration is always on time.
    #[test]
    fn prop_early_return_is_on_time(
        start in 0i64..2_000_000_000,
        days in 1u32..60,
        early_by in 0i64..(86_400 * 30),
    ) {
        let end = start + i64::from(days) * 86_400;
        let late = days_late(start, days, end - early_by);
        prop_assert_eq!(classify_return(late, 3), TrustOutcome::OnTimeReturn);
    }

    /// Lateness is defined for every timestamp, including stored garbage.
    #[test]
    fn prop_days_late_is_total(start in any::<i64>(), days in any::<u32>(), returned in any::<i64>()) {
        let late = days_late(start, days, returned);
        if returned >= start.saturating_add(i64::from(days) * 86_400) {
            prop_assert!(late >= 0);
        } else {
            prop_assert!(late < 0);
        }
    }
}

#[test]
fn test_rental_return_scenarios() {
    let start = 1_700_000_000;
    let day = 86_400;
    let on_time = days_late(start, 7, start + 6 * day);
    assert_eq!(classify_return(on_time, 3), TrustOutcome::OnTimeReturn);

    let major = days_late(start, 7, start + 12 * day);
    assert_eq!(major, 5);
    assert_eq!(classify_return(major, 3), TrustOutcome::LateReturnMajor);
}
