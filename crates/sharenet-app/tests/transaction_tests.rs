// Rust guideline compliant 2026-02-09

//! Integration tests for the transaction state machine and trust settlement.

mod common;

use common::{Harness, DAY, START};
use sharenet_app::{AgreementTerms, ErrorCode, NewRequest};
use sharenet_core::{Config, Transaction, TransactionStatus, TrustDeltas, TrustOutcome};

/// Walks a RENT request to ACCEPTED and returns the spawned transaction.
fn accepted_rental(h: &Harness, duration: Option<&str>) -> Transaction {
    let item = h.rent_item("alice", 10.0);
    let request = h
        .market
        .create_request(
            &item.id,
            "bob",
            NewRequest {
                proposed_duration: duration.map(str::to_string),
                ..NewRequest::default()
            },
        )
        .unwrap();
    h.market.accept_request(&request.id, "alice").unwrap().transaction
}

/// Drives a transaction to RETURN_PENDING with the agreement confirmed at START.
fn returned_rental(h: &Harness, days: &str) -> Transaction {
    let txn = accepted_rental(h, None);
    h.market
        .propose_agreement(
            &txn.id,
            "alice",
            AgreementTerms {
                agreed_duration: Some(days.to_string()),
                ..AgreementTerms::default()
            },
        )
        .unwrap();
    h.market.confirm_agreement(&txn.id, "bob").unwrap();
    h.market.mark_return_pending(&txn.id, "bob").unwrap()
}

#[test]
fn test_full_lifecycle_on_time_return() {
    let h = Harness::new();
    let txn = returned_rental(&h, "7");
    assert_eq!(txn.status, TransactionStatus::ReturnPending);
    assert_eq!(txn.start_date, Some(START));

    h.clock.set(START + 6 * DAY);
    let settlement = h.market.confirm_return(&txn.id, "alice").unwrap();

    assert_eq!(settlement.transaction.status, TransactionStatus::Completed);
    assert_eq!(settlement.transaction.actual_return_date, Some(START + 6 * DAY));
    assert_eq!(settlement.requester_outcome, TrustOutcome::OnTimeReturn);
    assert_eq!(settlement.requester_score, 55);
    assert_eq!(settlement.owner_score, 52);
    assert!(h.market.get_item(&txn.item).unwrap().is_available);
    assert_eq!(h.market.trust_score("bob").unwrap(), 55);
}

#[test]
fn test_major_late_return() {
    let h = Harness::new();
    let txn = returned_rental(&h, "7");

    h.clock.set(START + 12 * DAY);
    let settlement = h.market.confirm_return(&txn.id, "alice").unwrap();
    assert_eq!(settlement.requester_outcome, TrustOutcome::LateReturnMajor);
    assert_eq!(settlement.requester_score, 40);
}

#[test]
fn test_minor_late_return_uses_configured_band() {
    let h = Harness::with_config(Config {
        minor_late_days: 5,
        trust: TrustDeltas {
            late_return_minor: -1,
            ..TrustDeltas::default()
        },
        ..Config::default()
    });
    let txn = returned_rental(&h, "3");

    h.clock.set(START + 8 * DAY);
    let settlement = h.market.confirm_return(&txn.id, "alice").unwrap();
    assert_eq!(settlement.requester_outcome, TrustOutcome::LateReturnMinor);
    assert_eq!(settlement.requester_score, 49);
}

#[test]
fn test_far_future_start_date_settles_without_overflow() {
    let h = Harness::new();
    let txn = accepted_rental(&h, None);
    h.market
        .propose_agreement(
            &txn.id,
            "alice",
            AgreementTerms {
                agreed_duration: Some("30".to_string()),
                start_date: Some(i64::MAX - DAY),
                ..AgreementTerms::default()
            },
        )
        .unwrap();
    h.market.confirm_agreement(&txn.id, "bob").unwrap();
    h.market.mark_return_pending(&txn.id, "bob").unwrap();

    let settlement = h.market.confirm_return(&txn.id, "alice").unwrap();
    assert_eq!(settlement.transaction.status, TransactionStatus::Completed);
    assert_eq!(settlement.requester_outcome, TrustOutcome::OnTimeReturn);
}

#[test]
fn test_return_without_duration_records_completion() {
    let h = Harness::new();
    let txn = accepted_rental(&h, None);
    h.market
        .propose_agreement(&txn.id, "alice", AgreementTerms::default())
        .unwrap();
    h.market.confirm_agreement(&txn.id, "bob").unwrap();
    h.market.mark_return_pending(&txn.id, "bob").unwrap();

    let settlement = h.market.confirm_return(&txn.id, "alice").unwrap();
    assert_eq!(settlement.requester_outcome, TrustOutcome::Completed);
}

#[test]
fn test_confirm_agreement_twice_fails_without_changes() {
    let h = Harness::new();
    let txn = accepted_rental(&h, Some("7"));
    h.market
        .propose_agreement(
            &txn.id,
            "alice",
            AgreementTerms {
                agreed_price: Some(9.0),
                terms: Some("Return charged".to_string()),
                ..AgreementTerms::default()
            },
        )
        .unwrap();

    let first = h.market.confirm_agreement(&txn.id, "bob").unwrap();
    assert_eq!(first.status, TransactionStatus::Active);

    h.clock.advance_days(1);
    let err = h.market.confirm_agreement(&txn.id, "bob").unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
    let details = err.details().unwrap();
    assert_eq!(details["current"], "ACTIVE");
    assert_eq!(details["attempted"], "ACTIVE");

    assert_eq!(h.market.get_transaction(&txn.id, "bob").unwrap(), first);
}

#[test]
fn test_propose_agreement_validates_duration_and_actor() {
    let h = Harness::new();
    let txn = accepted_rental(&h, None);

    let err = h
        .market
        .propose_agreement(
            &txn.id,
            "alice",
            AgreementTerms {
                agreed_duration: Some("two weeks".to_string()),
                ..AgreementTerms::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationFailed);

    let err = h
        .market
        .propose_agreement(&txn.id, "bob", AgreementTerms::default())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let stored = h.market.get_transaction(&txn.id, "alice").unwrap();
    assert_eq!(stored, txn);
}

#[test]
fn test_update_status_follows_table() {
    let h = Harness::new();
    let txn = accepted_rental(&h, None);

    let err = h
        .market
        .update_transaction_status(&txn.id, "bob", TransactionStatus::Completed)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
    assert_eq!(
        err.to_string(),
        "Invalid transaction status transition from ACCEPTED to COMPLETED"
    );

    assert_eq!(
        h.market
            .update_transaction_status(&txn.id, "mallory", TransactionStatus::Cancelled)
            .unwrap_err()
            .code(),
        ErrorCode::Forbidden
    );

    let cancelled = h
        .market
        .update_transaction_status(&txn.id, "bob", TransactionStatus::Cancelled)
        .unwrap();
    assert_eq!(cancelled.status, TransactionStatus::Cancelled);
    assert!(h.notifier.kinds_for("alice").contains(&"TRANSACTION_UPDATED".to_string()));
}

#[test]
fn test_dispute_penalizes_raiser() {
    let h = Harness::new();
    let txn = accepted_rental(&h, Some("7"));

    let disputed = h
        .market
        .raise_dispute(&txn.id, "bob", "Item was damaged on pickup")
        .unwrap();
    assert_eq!(disputed.status, TransactionStatus::Disputed);
    assert_eq!(disputed.dispute_raised_by.as_deref(), Some("bob"));
    assert_eq!(disputed.dispute_date, Some(START));
    assert_eq!(h.market.trust_score("bob").unwrap(), 45);
    assert_eq!(h.market.trust_score("alice").unwrap(), 50);
    assert!(h.notifier.kinds_for("alice").contains(&"DISPUTE_RAISED".to_string()));

    let err = h.market.raise_dispute(&txn.id, "alice", "again").unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
    assert_eq!(h.market.trust_score("alice").unwrap(), 50);

    let resolved = h
        .market
        .update_transaction_status(&txn.id, "alice", TransactionStatus::Completed)
        .unwrap();
    assert_eq!(resolved.status, TransactionStatus::Completed);
}

#[test]
fn test_dispute_requires_reason() {
    let h = Harness::new();
    let txn = accepted_rental(&h, None);
    assert_eq!(
        h.market.raise_dispute(&txn.id, "bob", "   ").unwrap_err().code(),
        ErrorCode::ValidationFailed
    );
}

#[test]
fn test_get_transaction_is_participant_only() {
    let h = Harness::new();
    let txn = accepted_rental(&h, None);
    assert!(h.market.get_transaction(&txn.id, "alice").is_ok());
    assert_eq!(
        h.market.get_transaction(&txn.id, "mallory").unwrap_err().code(),
        ErrorCode::Forbidden
    );
    assert_eq!(
        h.market.get_transaction("txn-00000000", "alice").unwrap_err().code(),
        ErrorCode::NotFound
    );
}
