// Rust guideline compliant 2026-02-09

//! Integration tests for the lost&found claim engine.

mod common;

use common::{Harness, DAY, START};
use sharenet_app::{ErrorCode, MeetupProposal};
use sharenet_core::{
    ClaimStatus, ClaimType, MeetupStatus, PostStatus, Transition, VerificationAnswer,
};

fn answers(post: &sharenet_core::LostFoundPost, texts: &[&str]) -> Vec<VerificationAnswer> {
    post.verification_questions
        .iter()
        .zip(texts)
        .map(|(q, text)| VerificationAnswer {
            question_id: q.id.clone(),
            answer: text.to_string(),
        })
        .collect()
}

#[test]
fn test_create_claim_derives_type_and_marks_post_claimed() {
    let h = Harness::new();
    let post = h.found_post("alice");

    let claim = h.market.create_claim(&post.id, "bob", "That's my bag").unwrap();

    assert_eq!(claim.claim_type, ClaimType::ItsMine);
    assert_eq!(claim.status, ClaimStatus::Pending);
    assert_eq!(claim.timeline[0].action, "CLAIM_SUBMITTED");
    let post = h.market.get_post_detail(&post.id, "alice").unwrap();
    assert_eq!(post.status, PostStatus::Claimed);
    assert_eq!(post.claims_count, 1);
    assert_eq!(h.notifier.kinds_for("alice"), vec!["CLAIM_RECEIVED"]);
}

#[test]
fn test_create_claim_rejections() {
    let h = Harness::new();
    let post = h.found_post("alice");

    assert_eq!(
        h.market.create_claim(&post.id, "alice", "mine").unwrap_err().code(),
        ErrorCode::ValidationFailed
    );
    assert_eq!(
        h.market.create_claim(&post.id, "bob", "  ").unwrap_err().code(),
        ErrorCode::ValidationFailed
    );
    h.market.create_claim(&post.id, "bob", "mine").unwrap();
    assert_eq!(
        h.market.create_claim(&post.id, "bob", "mine again").unwrap_err().code(),
        ErrorCode::Conflict
    );

    h.market.expire_post(&post.id, "alice").unwrap();
    assert_eq!(
        h.market.create_claim(&post.id, "carol", "mine").unwrap_err().code(),
        ErrorCode::InvalidState
    );
}

#[test]
fn test_answers_hidden_from_non_owners() {
    let h = Harness::new();
    let post = h.found_post("alice");

    let owner_view = h.market.get_post_detail(&post.id, "alice").unwrap();
    assert!(owner_view.verification_questions.iter().all(|q| q.answer.is_some()));

    let public_view = h.market.get_post_detail(&post.id, "bob").unwrap();
    assert!(public_view.verification_questions.iter().all(|q| q.answer.is_none()));
    let json = serde_json::to_string(&public_view).unwrap();
    assert!(!json.contains("Jansport"));

    let claim = h.market.create_claim(&post.id, "bob", "mine").unwrap();
    let prompt = h.market.start_verification(&claim.id, "alice").unwrap();
    assert_eq!(prompt.claim.status, ClaimStatus::Verification);
    assert_eq!(prompt.questions.len(), 2);
    assert!(prompt.questions.iter().all(|q| q.answer.is_none()));
}

#[test]
fn test_verification_scoring_and_owner_decision() {
    let h = Harness::new();
    let post = h.found_post("alice");
    let claim = h.market.create_claim(&post.id, "bob", "mine").unwrap();

    assert_eq!(
        h.market.start_verification(&claim.id, "bob").unwrap_err().code(),
        ErrorCode::Forbidden
    );
    assert_eq!(
        h.market
            .submit_verification(&claim.id, "bob", answers(&post, &["jansport", "duck"]))
            .unwrap_err()
            .code(),
        ErrorCode::InvalidState
    );

    h.market.start_verification(&claim.id, "alice").unwrap();
    assert_eq!(
        h.market.submit_verification(&claim.id, "bob", Vec::new()).unwrap_err().code(),
        ErrorCode::ValidationFailed
    );

    let scored = h
        .market
        .submit_verification(&claim.id, "bob", answers(&post, &[" JANSPORT ", "duck"]))
        .unwrap();
    assert_eq!(scored.verification_score, 50);
    assert_eq!(scored.status, ClaimStatus::Verification);

    let verified = h.market.verify_claim(&claim.id, "alice").unwrap();
    assert_eq!(verified.status, ClaimStatus::Verified);
    assert!(verified.chat_enabled);
    assert_eq!(
        h.market.get_post_detail(&post.id, "alice").unwrap().status,
        PostStatus::Verified
    );
    let actions: Vec<_> = verified.timeline.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec![
            "CLAIM_SUBMITTED",
            "VERIFICATION_STARTED",
            "VERIFICATION_SUBMITTED",
            "CLAIM_VERIFIED"
        ]
    );
}

#[test]
fn test_reject_claim() {
    let h = Harness::new();
    let post = h.found_post("alice");
    let claim = h.market.create_claim(&post.id, "bob", "mine").unwrap();

    let rejected = h
        .market
        .reject_claim(&claim.id, "alice", Some("Wrong colour".to_string()))
        .unwrap();
    assert_eq!(rejected.status, ClaimStatus::Rejected);
    assert_eq!(
        rejected.timeline.last().unwrap().details,
        "Claim rejected: Wrong colour"
    );
    assert_eq!(
        h.market.reject_claim(&claim.id, "alice", None).unwrap_err().code(),
        ErrorCode::InvalidState
    );
}

#[test]
fn test_meetup_negotiation() {
    let h = Harness::new();
    let post = h.found_post("alice");
    let claim = h.market.create_claim(&post.id, "bob", "mine").unwrap();
    let proposal = MeetupProposal {
        location: "Library entrance".to_string(),
        time: START + DAY,
    };

    assert_eq!(
        h.market
            .propose_meetup(&claim.id, "bob", proposal.clone())
            .unwrap_err()
            .code(),
        ErrorCode::InvalidState
    );
    h.market.start_verification(&claim.id, "alice").unwrap();
    h.market
        .submit_verification(&claim.id, "bob", answers(&post, &["Jansport", "a rubber duck"]))
        .unwrap();
    h.market.verify_claim(&claim.id, "alice").unwrap();

    assert_eq!(
        h.market.accept_meetup(&claim.id, "alice").unwrap_err().code(),
        ErrorCode::InvalidState
    );
    h.market.propose_meetup(&claim.id, "bob", proposal).unwrap();
    let agreed = h.market.accept_meetup(&claim.id, "alice").unwrap();
    assert_eq!(agreed.meetup_details.status, MeetupStatus::Agreed);
    assert_eq!(
        agreed.meetup_details.agreed_location.as_deref(),
        Some("Library entrance")
    );
    assert_eq!(agreed.meetup_details.agreed_time, Some(START + DAY));
}

#[test]
fn test_meetup_cannot_be_accepted_after_claim_rejected() {
    let h = Harness::new();
    let post = h.found_post("alice");
    let claim = h.market.create_claim(&post.id, "bob", "mine").unwrap();
    h.market.start_verification(&claim.id, "alice").unwrap();
    h.market.verify_claim(&claim.id, "alice").unwrap();
    h.market
        .propose_meetup(
            &claim.id,
            "bob",
            MeetupProposal {
                location: "Student union".to_string(),
                time: START + DAY,
            },
        )
        .unwrap();
    h.market.reject_claim(&claim.id, "alice", None).unwrap();

    let err = h.market.accept_meetup(&claim.id, "alice").unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidState);
    let stored = h.market.get_claim(&claim.id, "bob").unwrap();
    assert_eq!(stored.status, ClaimStatus::Rejected);
    assert_eq!(stored.meetup_details.status, MeetupStatus::Proposed);
    assert_eq!(stored.meetup_details.agreed_location, None);
}

#[test]
fn test_accept_meetup_reports_meetup_status() {
    let h = Harness::new();
    let post = h.found_post("alice");
    let claim = h.market.create_claim(&post.id, "bob", "mine").unwrap();
    h.market.start_verification(&claim.id, "alice").unwrap();
    h.market.verify_claim(&claim.id, "alice").unwrap();

    let details = h
        .market
        .accept_meetup(&claim.id, "bob")
        .unwrap_err()
        .details()
        .unwrap();
    assert_eq!(details["current"], "NONE");
    assert_eq!(details["attempted"], "AGREED");
}

#[test]
fn test_mark_resolved_without_claim_cancels_open_claims() {
    let h = Harness::new();
    let post = h.found_post("alice");
    let c1 = h.market.create_claim(&post.id, "bob", "mine").unwrap();
    let c2 = h.market.create_claim(&post.id, "carol", "no, mine").unwrap();
    h.market.reject_claim(&c2.id, "alice", None).unwrap();

    assert_eq!(
        h.market.mark_resolved(&post.id, "bob").unwrap_err().code(),
        ErrorCode::Forbidden
    );

    h.clock.advance_days(2);
    let resolution = h.market.mark_resolved(&post.id, "alice").unwrap();

    assert!(resolution.claim.is_none());
    assert_eq!(resolution.post.status, PostStatus::Resolved);
    assert!(resolution.post.is_resolved);
    assert_eq!(resolution.post.resolved_with, None);
    assert_eq!(resolution.post.resolved_at, Some(START + 2 * DAY));
    assert_eq!(resolution.cancelled, vec![c1.id.clone()]);

    let snapshot = h.market.store().snapshot().unwrap();
    assert_eq!(snapshot.claim(&c1.id).unwrap().status, ClaimStatus::Cancelled);
    assert_eq!(snapshot.claim(&c2.id).unwrap().status, ClaimStatus::Rejected);
    assert!(h.notifier.kinds_for("bob").contains(&"CLAIM_CANCELLED".to_string()));

    assert_eq!(
        h.market.mark_resolved(&post.id, "alice").unwrap_err().code(),
        ErrorCode::InvalidState
    );
    assert_eq!(
        h.market.create_claim(&post.id, "dave", "mine").unwrap_err().code(),
        ErrorCode::InvalidState
    );
}

#[test]
fn test_resolve_post_cancels_every_competing_claim() {
    let h = Harness::new();
    let post = h.found_post("alice");
    let c1 = h.market.create_claim(&post.id, "bob", "mine").unwrap();
    let c2 = h.market.create_claim(&post.id, "carol", "no, mine").unwrap();
    let c3 = h.market.create_claim(&post.id, "dave", "definitely mine").unwrap();
    h.market.start_verification(&c1.id, "alice").unwrap();

    let resolution = h.market.resolve_post(&post.id, &c2.id, "alice").unwrap();

    let winner = resolution.claim.as_ref().unwrap();
    assert_eq!(winner.status, ClaimStatus::Resolved);
    assert_eq!(winner.meetup_details.status, MeetupStatus::Completed);
    assert_eq!(resolution.post.status, PostStatus::Resolved);
    assert!(resolution.post.is_resolved);
    assert_eq!(resolution.post.resolved_with.as_deref(), Some("carol"));
    assert_eq!(resolution.cancelled.len(), 2);

    let snapshot = h.market.store().snapshot().unwrap();
    for id in [&c1.id, &c3.id] {
        let sibling = snapshot.claim(id).unwrap();
        assert_eq!(sibling.status, ClaimStatus::Cancelled);
        assert_eq!(sibling.timeline.last().unwrap().action, "CLAIM_CANCELLED");
    }
    let live: Vec<_> = snapshot
        .claims
        .iter()
        .filter(|c| !c.status.is_terminal())
        .collect();
    assert!(live.is_empty());
    assert!(h.notifier.kinds_for("dave").contains(&"CLAIM_CANCELLED".to_string()));
    assert!(h.notifier.kinds_for("carol").contains(&"POST_RESOLVED".to_string()));
}

#[test]
fn test_resolve_post_failure_changes_nothing() {
    let h = Harness::new();
    let post = h.found_post("alice");
    let other = h.found_post("erin");
    let c1 = h.market.create_claim(&post.id, "bob", "mine").unwrap();
    let foreign = h.market.create_claim(&other.id, "carol", "mine").unwrap();
    let before = h.market.store().snapshot().unwrap();

    assert_eq!(
        h.market.resolve_post(&post.id, &foreign.id, "alice").unwrap_err().code(),
        ErrorCode::ValidationFailed
    );
    assert_eq!(
        h.market.resolve_post(&post.id, &c1.id, "bob").unwrap_err().code(),
        ErrorCode::Forbidden
    );
    assert_eq!(h.market.store().snapshot().unwrap(), before);
}

#[test]
fn test_get_claim_is_participant_only() {
    let h = Harness::new();
    let post = h.found_post("alice");
    let claim = h.market.create_claim(&post.id, "bob", "mine").unwrap();

    assert!(h.market.get_claim(&claim.id, "alice").is_ok());
    assert!(h.market.get_claim(&claim.id, "bob").is_ok());
    assert_eq!(
        h.market.get_claim(&claim.id, "carol").unwrap_err().code(),
        ErrorCode::Forbidden
    );
}
