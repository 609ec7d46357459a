// Rust guideline compliant 2026-02-09

//! Integration tests for the request engine.

mod common;

use common::{Harness, DAY};
use sharenet_app::{CounterTerms, ErrorCode, NewRequest, PickupProposal};
use sharenet_core::{
    ClaimEntryStatus, CounterOfferStatus, NegotiationKind, RequestStatus, RequestType,
    TransactionStatus,
};

fn terms(price: f64, duration: &str) -> NewRequest {
    NewRequest {
        description: Some("Need it for the midterm".to_string()),
        proposed_price: Some(price),
        proposed_duration: Some(duration.to_string()),
    }
}

#[test]
fn test_create_request_notifies_owner() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);

    let request = h
        .market
        .create_request(&item.id, "bob", terms(8.0, "7"))
        .expect("request failed");

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.owner, "alice");
    assert_eq!(h.notifier.kinds_for("alice"), vec!["REQUEST_RECEIVED"]);
}

#[test]
fn test_create_request_rejects_own_item() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);

    let err = h
        .market
        .create_request(&item.id, "alice", NewRequest::default())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationFailed);
}

#[test]
fn test_create_request_unknown_item() {
    let h = Harness::new();
    let err = h
        .market
        .create_request("itm-00000000", "bob", NewRequest::default())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[test]
fn test_at_most_one_open_request_per_requester() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);
    let first = h
        .market
        .create_request(&item.id, "bob", NewRequest::default())
        .unwrap();

    let err = h
        .market
        .create_request(&item.id, "bob", NewRequest::default())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);

    h.market.cancel_request(&first.id, "bob").unwrap();
    assert!(h
        .market
        .create_request(&item.id, "bob", NewRequest::default())
        .is_ok());
}

#[test]
fn test_accept_request_spawns_transaction_and_closes_item() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);
    let request = h
        .market
        .create_request(&item.id, "bob", terms(8.0, "7"))
        .unwrap();

    let accepted = h.market.accept_request(&request.id, "alice").unwrap();

    assert_eq!(accepted.request.status, RequestStatus::Accepted);
    let txn = &accepted.transaction;
    assert_eq!(txn.status, TransactionStatus::Accepted);
    assert_eq!(txn.agreed_price, 8.0);
    assert_eq!(txn.agreed_duration, Some(7));
    assert_eq!(txn.request.as_deref(), Some(request.id.as_str()));
    assert!(!h.market.get_item(&item.id).unwrap().is_available);
    assert_eq!(h.notifier.kinds_for("bob"), vec!["REQUEST_ACCEPTED"]);

    let err = h
        .market
        .create_request(&item.id, "carol", NewRequest::default())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
}

#[test]
fn test_accept_request_falls_back_to_item_price() {
    let h = Harness::new();
    let item = h.rent_item("alice", 12.5);
    let request = h
        .market
        .create_request(
            &item.id,
            "bob",
            NewRequest {
                proposed_duration: Some("a week".to_string()),
                ..NewRequest::default()
            },
        )
        .unwrap();

    let txn = h.market.accept_request(&request.id, "alice").unwrap().transaction;
    assert_eq!(txn.agreed_price, 12.5);
    assert_eq!(txn.agreed_duration, None);
}

#[test]
fn test_second_acceptance_on_same_item_fails() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);
    let bob = h.market.create_request(&item.id, "bob", NewRequest::default()).unwrap();
    let carol = h.market.create_request(&item.id, "carol", NewRequest::default()).unwrap();

    h.market.accept_request(&bob.id, "alice").unwrap();
    let err = h.market.accept_request(&carol.id, "alice").unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidState);
    assert_eq!(err.to_string(), "Item is no longer available");
    let snapshot = h.market.store().snapshot().unwrap();
    assert_eq!(snapshot.transactions.len(), 1);
    assert_eq!(snapshot.request(&carol.id).unwrap().status, RequestStatus::Pending);
}

#[test]
fn test_only_owner_accepts_and_only_pending() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);
    let request = h.market.create_request(&item.id, "bob", NewRequest::default()).unwrap();

    let err = h.market.accept_request(&request.id, "bob").unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);

    h.market
        .reject_request(&request.id, "alice", Some("Already lent out".to_string()))
        .unwrap();
    let err = h.market.accept_request(&request.id, "alice").unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);

    let stored = h.market.store().snapshot().unwrap();
    let stored = stored.request(&request.id).unwrap();
    assert_eq!(stored.status, RequestStatus::Rejected);
    assert_eq!(stored.rejection_reason.as_deref(), Some("Already lent out"));
}

#[test]
fn test_cancel_requires_requester() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);
    let request = h.market.create_request(&item.id, "bob", NewRequest::default()).unwrap();

    assert_eq!(
        h.market.cancel_request(&request.id, "alice").unwrap_err().code(),
        ErrorCode::Forbidden
    );
    let cancelled = h.market.cancel_request(&request.id, "bob").unwrap();
    assert_eq!(cancelled.status, RequestStatus::Cancelled);
    assert_eq!(
        h.market.cancel_request(&request.id, "bob").unwrap_err().code(),
        ErrorCode::InvalidState
    );
}

#[test]
fn test_rejected_counter_offer_returns_to_pending() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);
    let request = h.market.create_request(&item.id, "bob", terms(5.0, "7")).unwrap();

    let countered = h
        .market
        .create_counter_offer(
            &request.id,
            "alice",
            CounterTerms {
                price: Some(9.0),
                duration: Some("5".to_string()),
                message: Some("Best I can do".to_string()),
            },
        )
        .unwrap();
    assert_eq!(countered.status, RequestStatus::CounterOffered);

    let response = h.market.respond_to_counter_offer(&request.id, "bob", false).unwrap();
    assert_eq!(response.request.status, RequestStatus::Pending);
    assert!(response.transaction.is_none());
    let counter = response.request.counter_offer.unwrap();
    assert_eq!(counter.status, CounterOfferStatus::Rejected);
    let kinds: Vec<_> = response
        .request
        .negotiation_history
        .iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(kinds, vec![NegotiationKind::Counter, NegotiationKind::Reject]);
}

#[test]
fn test_accepted_counter_offer_spawns_transaction_with_counter_terms() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);
    let request = h.market.create_request(&item.id, "bob", terms(5.0, "7")).unwrap();

    h.market
        .create_counter_offer(
            &request.id,
            "alice",
            CounterTerms {
                price: Some(7.0),
                duration: None,
                message: None,
            },
        )
        .unwrap();
    h.market
        .create_counter_offer(
            &request.id,
            "alice",
            CounterTerms {
                price: Some(6.0),
                duration: Some("3".to_string()),
                message: None,
            },
        )
        .unwrap();

    let response = h.market.respond_to_counter_offer(&request.id, "bob", true).unwrap();
    assert_eq!(response.request.status, RequestStatus::Accepted);
    assert_eq!(response.request.proposed_price, Some(6.0));
    assert_eq!(response.request.negotiation_history.len(), 3);
    let txn = response.transaction.expect("transaction spawned");
    assert_eq!(txn.agreed_price, 6.0);
    assert_eq!(txn.agreed_duration, Some(3));
    assert!(!h.market.get_item(&item.id).unwrap().is_available);
}

#[test]
fn test_counter_offer_requires_owner_and_response_requires_requester() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);
    let request = h.market.create_request(&item.id, "bob", NewRequest::default()).unwrap();
    let counter = CounterTerms {
        price: Some(9.0),
        ..CounterTerms::default()
    };

    assert_eq!(
        h.market
            .create_counter_offer(&request.id, "bob", counter.clone())
            .unwrap_err()
            .code(),
        ErrorCode::Forbidden
    );
    assert_eq!(
        h.market
            .respond_to_counter_offer(&request.id, "bob", true)
            .unwrap_err()
            .code(),
        ErrorCode::InvalidState
    );
    h.market.create_counter_offer(&request.id, "alice", counter).unwrap();
    assert_eq!(
        h.market
            .respond_to_counter_offer(&request.id, "alice", true)
            .unwrap_err()
            .code(),
        ErrorCode::Forbidden
    );
}

#[test]
fn test_single_slot_instant_claim() {
    let h = Harness::new();
    let item = h.give_item("alice", 1);

    let receipt = h.market.instant_claim(&item.id, "bob").unwrap();
    assert!(!receipt.item.is_available);
    assert_eq!(receipt.request.status, RequestStatus::Accepted);
    assert_eq!(receipt.request.request_type, RequestType::InstantClaim);
    assert_eq!(receipt.request.priority, 1);

    let err = h.market.instant_claim(&item.id, "carol").unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
    assert_eq!(err.to_string(), "Item is no longer available");
}

#[test]
fn test_instant_claim_rules() {
    let h = Harness::new();
    let item = h.give_item("alice", 3);
    let rental = h.rent_item("alice", 4.0);

    assert_eq!(
        h.market.instant_claim(&rental.id, "bob").unwrap_err().code(),
        ErrorCode::ValidationFailed
    );
    assert_eq!(
        h.market.instant_claim(&item.id, "alice").unwrap_err().code(),
        ErrorCode::ValidationFailed
    );
    h.market.instant_claim(&item.id, "bob").unwrap();
    assert_eq!(
        h.market.instant_claim(&item.id, "bob").unwrap_err().code(),
        ErrorCode::Conflict
    );
}

#[test]
fn test_claim_queue_is_fifo_and_owner_only() {
    let h = Harness::new();
    let item = h.give_item("alice", 3);
    for user in ["carol", "bob", "dave"] {
        h.market.instant_claim(&item.id, user).unwrap();
        h.clock.advance_days(1);
    }

    let queue = h.market.get_claim_queue(&item.id, "alice").unwrap();
    let users: Vec<_> = queue.entries.iter().map(|e| e.user.as_str()).collect();
    assert_eq!(users, vec!["carol", "bob", "dave"]);
    assert_eq!(queue.max_claimers, 3);
    assert!(!h.market.get_item(&item.id).unwrap().is_available);

    assert_eq!(
        h.market.get_claim_queue(&item.id, "bob").unwrap_err().code(),
        ErrorCode::Forbidden
    );
}

#[test]
fn test_confirm_pickup_completes_claim_entry() {
    let h = Harness::new();
    let item = h.give_item("alice", 2);
    let receipt = h.market.instant_claim(&item.id, "bob").unwrap();

    let request = h.market.confirm_pickup(&receipt.request.id, "alice").unwrap();
    assert_eq!(request.status, RequestStatus::Completed);

    let item = h.market.get_item(&item.id).unwrap();
    assert_eq!(item.claimed_by[0].status, ClaimEntryStatus::Completed);
    assert!(h.market.get_claim_queue(&item.id, "alice").unwrap().entries.is_empty());
    assert!(h.notifier.kinds_for("bob").contains(&"PICKUP_CONFIRMED".to_string()));

    assert_eq!(
        h.market.confirm_pickup(&receipt.request.id, "bob").unwrap_err().code(),
        ErrorCode::InvalidState
    );
}

#[test]
fn test_pickup_details_flow() {
    let h = Harness::new();
    let item = h.rent_item("alice", 10.0);
    let request = h.market.create_request(&item.id, "bob", NewRequest::default()).unwrap();
    let proposal = PickupProposal {
        location: "Student union".to_string(),
        proposed_time: common::START + DAY,
        instructions: Some("Front desk".to_string()),
    };

    assert_eq!(
        h.market
            .propose_pickup_details(&request.id, "bob", proposal.clone())
            .unwrap_err()
            .code(),
        ErrorCode::InvalidState
    );
    h.market.accept_request(&request.id, "alice").unwrap();
    assert_eq!(
        h.market.confirm_pickup_details(&request.id, "alice").unwrap_err().code(),
        ErrorCode::InvalidState
    );

    h.market.propose_pickup_details(&request.id, "bob", proposal).unwrap();
    let confirmed = h.market.confirm_pickup_details(&request.id, "alice").unwrap();
    let details = confirmed.pickup_details.unwrap();
    assert_eq!(details.confirmed_time, Some(common::START + DAY));
    assert_eq!(confirmed.status, RequestStatus::Accepted);
    assert_eq!(
        h.market.confirm_pickup_details(&request.id, "mallory").unwrap_err().code(),
        ErrorCode::Forbidden
    );
}
