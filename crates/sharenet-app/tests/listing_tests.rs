// Rust guideline compliant 2026-02-09

//! Integration tests for listings, read queries and data directory setup.

mod common;

use common::{FailingNotifier, Harness};
use sharenet_app::{
    ErrorCode, ItemUpdate, Marketplace, NewItem, NewRequest, PageRequest, RepoContext,
    TransactionRole,
};
use sharenet_core::{
    Config, ItemMode, PostStatus, RequestStatus, Store, TransactionStatus, Transition,
};
use std::sync::Arc;
use tempfile::TempDir;

fn sell_input(price: Option<f64>) -> NewItem {
    NewItem {
        title: "Desk lamp".to_string(),
        description: String::new(),
        mode: ItemMode::Sell,
        price,
        instant_claim: false,
        max_claimers: 1,
    }
}

#[test]
fn test_create_item_validation() {
    let h = Harness::new();

    let missing_price = h.market.create_item("alice", sell_input(None)).unwrap_err();
    assert_eq!(missing_price.code(), ErrorCode::ValidationFailed);

    let negative = h.market.create_item("alice", sell_input(Some(-1.0))).unwrap_err();
    assert_eq!(negative.code(), ErrorCode::ValidationFailed);

    let instant_sell = NewItem {
        instant_claim: true,
        ..sell_input(Some(3.0))
    };
    assert_eq!(
        h.market.create_item("alice", instant_sell).unwrap_err().code(),
        ErrorCode::ValidationFailed
    );

    let blank = NewItem {
        title: "   ".to_string(),
        ..sell_input(Some(3.0))
    };
    assert_eq!(
        h.market.create_item("alice", blank).unwrap_err().code(),
        ErrorCode::ValidationFailed
    );

    let item = h.market.create_item("alice", sell_input(Some(12.5))).unwrap();
    assert!(item.is_available);
    assert_eq!(item.price, Some(12.5));
    assert_eq!(h.market.get_item(&item.id).unwrap(), item);
}

#[test]
fn test_give_items_have_no_price() {
    let h = Harness::new();
    let item = h
        .market
        .create_item(
            "alice",
            NewItem {
                title: "Old mugs".to_string(),
                description: String::new(),
                mode: ItemMode::Give,
                price: Some(4.0),
                instant_claim: false,
                max_claimers: 1,
            },
        )
        .unwrap();
    assert_eq!(item.price, None);
}

#[test]
fn test_set_item_availability_owner_only() {
    let h = Harness::new();
    let item = h.rent_item("alice", 5.0);

    assert_eq!(
        h.market.set_item_availability(&item.id, "bob", false).unwrap_err().code(),
        ErrorCode::Forbidden
    );
    let closed = h.market.set_item_availability(&item.id, "alice", false).unwrap();
    assert!(!closed.is_available);

    let err = h
        .market
        .create_request(&item.id, "bob", NewRequest::default())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
}

#[test]
fn test_reopen_refused_while_transaction_is_live() {
    let h = Harness::new();
    let item = h.rent_item("alice", 5.0);
    let first = h
        .market
        .create_request(&item.id, "bob", NewRequest::default())
        .unwrap();
    let accepted = h.market.accept_request(&first.id, "alice").unwrap();

    let err = h
        .market
        .set_item_availability(&item.id, "alice", true)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
    assert!(!h.market.get_item(&item.id).unwrap().is_available);
    assert_eq!(
        h.market
            .create_request(&item.id, "carol", NewRequest::default())
            .unwrap_err()
            .code(),
        ErrorCode::InvalidState
    );

    let snapshot = h.market.store().snapshot().unwrap();
    let live = snapshot
        .transactions
        .iter()
        .filter(|t| t.item == item.id && !t.status.is_terminal())
        .count();
    assert_eq!(live, 1);

    h.market
        .update_transaction_status(&accepted.transaction.id, "alice", TransactionStatus::Cancelled)
        .unwrap();
    let reopened = h.market.set_item_availability(&item.id, "alice", true).unwrap();
    assert!(reopened.is_available);
}

#[test]
fn test_reopen_refused_while_claim_queue_is_full() {
    let h = Harness::new();
    let item = h.give_item("bob", 1);
    let receipt = h.market.instant_claim(&item.id, "carol").unwrap();
    assert!(!receipt.item.is_available);

    assert_eq!(
        h.market
            .set_item_availability(&item.id, "bob", true)
            .unwrap_err()
            .code(),
        ErrorCode::InvalidState
    );

    h.market.confirm_pickup(&receipt.request.id, "bob").unwrap();
    assert!(h.market.set_item_availability(&item.id, "bob", true).unwrap().is_available);
}

#[test]
fn test_update_item_merges_fields() {
    let h = Harness::new();
    let item = h.rent_item("alice", 5.0);
    h.clock.advance_days(1);

    assert_eq!(
        h.market
            .update_item(&item.id, "bob", ItemUpdate::default())
            .unwrap_err()
            .code(),
        ErrorCode::Forbidden
    );

    let edited = h
        .market
        .update_item(
            &item.id,
            "alice",
            ItemUpdate {
                title: Some("  Scientific calculator ".to_string()),
                price: Some(7.5),
                ..ItemUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(edited.title, "Scientific calculator");
    assert_eq!(edited.price, Some(7.5));
    assert_eq!(edited.description, "TI-84");
    assert_eq!(edited.mode, ItemMode::Rent);
    assert!(edited.updated_at > item.updated_at);

    let given = h
        .market
        .update_item(
            &item.id,
            "alice",
            ItemUpdate {
                mode: Some(ItemMode::Give),
                ..ItemUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(given.price, None);
    assert_eq!(h.market.get_item(&item.id).unwrap(), given);
}

#[test]
fn test_update_item_keeps_listing_rules() {
    let h = Harness::new();
    let give = h.give_item("bob", 2);
    h.market.instant_claim(&give.id, "carol").unwrap();
    h.market.instant_claim(&give.id, "dave").unwrap();
    let before = h.market.get_item(&give.id).unwrap();

    let to_sell = ItemUpdate {
        mode: Some(ItemMode::Sell),
        instant_claim: Some(false),
        ..ItemUpdate::default()
    };
    assert_eq!(
        h.market.update_item(&give.id, "bob", to_sell).unwrap_err().code(),
        ErrorCode::ValidationFailed
    );
    let shrink = ItemUpdate {
        max_claimers: Some(1),
        ..ItemUpdate::default()
    };
    assert_eq!(
        h.market.update_item(&give.id, "bob", shrink).unwrap_err().code(),
        ErrorCode::ValidationFailed
    );
    let blank = ItemUpdate {
        title: Some(" ".to_string()),
        ..ItemUpdate::default()
    };
    assert_eq!(
        h.market.update_item(&give.id, "bob", blank).unwrap_err().code(),
        ErrorCode::ValidationFailed
    );
    assert_eq!(h.market.get_item(&give.id).unwrap(), before);
}

#[test]
fn test_expire_post_closes_it() {
    let h = Harness::new();
    let post = h.found_post("alice");

    assert_eq!(
        h.market.expire_post(&post.id, "bob").unwrap_err().code(),
        ErrorCode::Forbidden
    );
    let expired = h.market.expire_post(&post.id, "alice").unwrap();
    assert_eq!(expired.status, PostStatus::Expired);
    assert!(expired.verification_questions.iter().all(|q| q.answer.is_some()));
    assert_eq!(
        h.market.expire_post(&post.id, "alice").unwrap_err().code(),
        ErrorCode::InvalidState
    );
}

#[test]
fn test_list_items_filters_and_paginates() {
    let h = Harness::new();
    for _ in 0..3 {
        h.rent_item("alice", 5.0);
        h.clock.advance_days(1);
    }
    let give = h.give_item("bob", 1);
    h.market.set_item_availability(&give.id, "bob", false).unwrap();

    let all = h.market.list_items(false, None, PageRequest::default()).unwrap();
    assert_eq!(all.total, 4);
    assert_eq!(all.items[0].id, give.id);

    let available = h.market.list_items(true, None, PageRequest::default()).unwrap();
    assert_eq!(available.total, 3);

    let gives = h
        .market
        .list_items(false, Some(ItemMode::Give), PageRequest::default())
        .unwrap();
    assert_eq!(gives.total, 1);

    let second = h
        .market
        .list_items(
            false,
            None,
            PageRequest {
                page: 2,
                limit: Some(3),
            },
        )
        .unwrap();
    assert_eq!(second.pages, 2);
    assert_eq!(second.items.len(), 1);
}

#[test]
fn test_request_and_transaction_queries() {
    let h = Harness::new();
    let item = h.rent_item("alice", 5.0);
    let request = h
        .market
        .create_request(&item.id, "bob", NewRequest::default())
        .unwrap();
    let other = h.rent_item("alice", 8.0);
    h.market
        .create_request(&other.id, "carol", NewRequest::default())
        .unwrap();
    h.market.accept_request(&request.id, "alice").unwrap();

    let mine = h.market.my_requests("bob", None, PageRequest::default()).unwrap();
    assert_eq!(mine.total, 1);
    let received = h
        .market
        .received_requests("alice", Some(RequestStatus::Pending), PageRequest::default())
        .unwrap();
    assert_eq!(received.total, 1);
    assert_eq!(received.items[0].requester, "carol");

    assert_eq!(
        h.market
            .item_requests(&item.id, "bob", PageRequest::default())
            .unwrap_err()
            .code(),
        ErrorCode::Forbidden
    );

    let as_owner = h
        .market
        .my_transactions("alice", TransactionRole::Owner, None, PageRequest::default())
        .unwrap();
    assert_eq!(as_owner.total, 1);
    let as_requester = h
        .market
        .my_transactions("alice", TransactionRole::Requester, None, PageRequest::default())
        .unwrap();
    assert_eq!(as_requester.total, 0);
}

#[test]
fn test_post_queries_hide_answers() {
    let h = Harness::new();
    let post = h.found_post("alice");
    h.market.create_claim(&post.id, "bob", "mine").unwrap();

    let posts = h.market.list_posts(None, None, PageRequest::default()).unwrap();
    assert_eq!(posts.total, 1);
    assert!(posts.items[0]
        .verification_questions
        .iter()
        .all(|q| q.answer.is_none()));

    assert_eq!(
        h.market
            .post_claims(&post.id, "bob", PageRequest::default())
            .unwrap_err()
            .code(),
        ErrorCode::Forbidden
    );
    assert_eq!(
        h.market
            .post_claims(&post.id, "alice", PageRequest::default())
            .unwrap()
            .total,
        1
    );
    assert_eq!(h.market.my_claims("bob", None, PageRequest::default()).unwrap().total, 1);
    assert_eq!(
        h.market
            .received_claims("alice", None, PageRequest::default())
            .unwrap()
            .total,
        1
    );
}

#[test]
fn test_failed_delivery_keeps_the_commit() {
    let dir = TempDir::new().unwrap();
    let market = Marketplace::new(Store::open(dir.path()).unwrap(), Config::default())
        .with_notifier(Arc::new(FailingNotifier));
    let item = market
        .create_item("alice", sell_input(Some(2.0)))
        .unwrap();

    let request = market
        .create_request(&item.id, "bob", NewRequest::default())
        .unwrap();

    assert_eq!(
        market.store().snapshot().unwrap().request(&request.id).unwrap().status,
        RequestStatus::Pending
    );
}

#[test]
fn test_repo_context_init_and_discover() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");

    let missing = RepoContext::discover(Some(data_dir.as_path())).unwrap_err();
    assert_eq!(missing.code(), ErrorCode::NotInitialized);

    let context = RepoContext::init(&data_dir).unwrap();
    assert!(context.config_path().exists());

    let discovered = RepoContext::discover(Some(data_dir.as_path())).unwrap();
    let market = discovered.marketplace().unwrap();
    let item = market.create_item("alice", sell_input(Some(1.0))).unwrap();
    market
        .create_request(&item.id, "bob", NewRequest::default())
        .unwrap();

    let outbox = std::fs::read_to_string(discovered.outbox_path()).unwrap();
    assert_eq!(outbox.lines().count(), 1);
    assert!(outbox.contains("REQUEST_RECEIVED"));
}

#[test]
fn test_trust_score_defaults_and_config() {
    let h = Harness::with_config(Config {
        default_trust_score: 70,
        ..Config::default()
    });
    assert_eq!(h.market.trust_score("nobody").unwrap(), 70);
    assert!(h.market.store().snapshot().unwrap().profiles.is_empty());
}
