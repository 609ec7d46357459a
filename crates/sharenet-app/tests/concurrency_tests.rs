// Rust guideline compliant 2026-02-09

//! Races between marketplace handles sharing one data directory.

mod common;

use common::Harness;
use proptest::prelude::*;
use sharenet_app::{ErrorCode, NewRequest};
use sharenet_core::{ClaimEntryStatus, TransactionStatus};
use std::thread;

#[test]
fn test_instant_claims_never_exceed_capacity() {
    let h = Harness::new();
    let item = h.give_item("alice", 3);

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let market = h.market.clone();
            let item_id = item.id.clone();
            thread::spawn(move || market.instant_claim(&item_id, &format!("student{}", n)))
        })
        .collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("claim thread panicked"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 3);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(matches!(err.code(), ErrorCode::InvalidState | ErrorCode::Conflict));
    }

    let item = h.market.get_item(&item.id).unwrap();
    assert!(!item.is_available);
    assert_eq!(item.active_claims(), 3);
    let queue = h.market.get_claim_queue(&item.id, "alice").unwrap();
    assert!(queue
        .entries
        .iter()
        .all(|entry| entry.status == ClaimEntryStatus::PendingPickup));
}

#[test]
fn test_racing_acceptances_spawn_one_transaction() {
    let h = Harness::new();
    let item = h.rent_item("alice", 5.0);
    let request_ids: Vec<_> = (0..5)
        .map(|n| {
            h.market
                .create_request(&item.id, &format!("student{}", n), NewRequest::default())
                .unwrap()
                .id
        })
        .collect();

    let handles: Vec<_> = request_ids
        .into_iter()
        .map(|request_id| {
            let market = h.market.clone();
            thread::spawn(move || market.accept_request(&request_id, "alice"))
        })
        .collect();
    let accepted = handles
        .into_iter()
        .map(|handle| handle.join().expect("accept thread panicked"))
        .filter(|r| r.is_ok())
        .count();

    assert_eq!(accepted, 1);
    let snapshot = h.market.store().snapshot().unwrap();
    assert_eq!(snapshot.transactions.len(), 1);
    assert_eq!(snapshot.transactions[0].status, TransactionStatus::Accepted);
    assert!(!snapshot.item(&item.id).unwrap().is_available);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_capacity_admits_exactly_max_claimers(capacity in 1u32..5) {
        let h = Harness::new();
        let item = h.give_item("alice", capacity);

        for n in 0..capacity {
            let receipt = h.market.instant_claim(&item.id, &format!("student{}", n));
            prop_assert!(receipt.is_ok());
            prop_assert_eq!(receipt.unwrap().request.priority, n + 1);
        }

        let overflow = h.market.instant_claim(&item.id, "latecomer").unwrap_err();
        prop_assert_eq!(overflow.code(), ErrorCode::InvalidState);
        prop_assert!(!h.market.get_item(&item.id).unwrap().is_available);
    }
}
