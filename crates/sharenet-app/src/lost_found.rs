// Rust guideline compliant 2026-02-09

//! Lost&found claim engine.
//!
//! Claims move through verification before contact is enabled. Resolving a
//! post settles the winning claim and cancels every competing claim in the
//! same commit.

use crate::error::{AppError, Result};
use crate::marketplace::{ensure_actor, required_text, Marketplace, Outbox};
use serde::{Deserialize, Serialize};
use sharenet_core::fsm::advance;
use sharenet_core::identity::{unique_id, CLAIM_PREFIX};
use sharenet_core::{
    ClaimStatus, Dataset, LostFoundClaim, LostFoundPost, MeetupDetails, MeetupStatus, PostStatus,
    RelatedType, Transition, VerificationAnswer, VerificationQuestion,
};

/// Questions shown to a claimant, answers stripped.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationPrompt {
    /// The claim under verification.
    pub claim: LostFoundClaim,
    /// Question ids and texts only.
    pub questions: Vec<VerificationQuestion>,
}

/// Proposed meetup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetupProposal {
    /// Meeting place.
    pub location: String,
    /// Meeting time (unix seconds).
    pub time: i64,
}

/// Outcome of resolving a post.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// The resolved post.
    pub post: LostFoundPost,
    /// The winning claim, absent when the poster resolved without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<LostFoundClaim>,
    /// Competing claims cancelled by the resolution.
    pub cancelled: Vec<String>,
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Share of questions answered correctly, rounded to a whole percent.
///
/// Answers are matched to questions by id, compared case-insensitively after
/// trimming. A post without questions scores 0.
pub fn score_answers(questions: &[VerificationQuestion], answers: &[VerificationAnswer]) -> u8 {
    if questions.is_empty() {
        return 0;
    }
    let correct = questions
        .iter()
        .filter(|question| {
            let Some(expected) = question.answer.as_deref() else {
                return false;
            };
            answers
                .iter()
                .find(|answer| answer.question_id == question.id)
                .is_some_and(|answer| normalize(&answer.answer) == normalize(expected))
        })
        .count();
    let total = questions.len();
    ((200 * correct + total) / (2 * total)) as u8
}

/// Cancels every live claim on `post` except `keep`, returning their ids.
fn cancel_competing_claims(
    dataset: &mut Dataset,
    outbox: &mut Outbox,
    post: &LostFoundPost,
    keep: Option<&str>,
    reason: &str,
    actor: &str,
    now: i64,
) -> Result<Vec<String>> {
    let mut cancelled = Vec::new();
    for sibling in dataset
        .claims
        .iter_mut()
        .filter(|c| c.post == post.id && Some(c.id.as_str()) != keep && !c.status.is_terminal())
    {
        advance(&mut sibling.status, ClaimStatus::Cancelled)?;
        sibling.record("CLAIM_CANCELLED", actor, reason, now);
        outbox.push(
            &sibling.claimant,
            "CLAIM_CANCELLED",
            format!("\"{}\": {}", post.title, reason),
            &sibling.id,
            RelatedType::LostFoundClaim,
        );
        cancelled.push(sibling.id.clone());
    }
    Ok(cancelled)
}

fn require_claim_status(claim: &LostFoundClaim, expected: ClaimStatus, attempted: &str) -> Result<()> {
    if claim.status == expected {
        return Ok(());
    }
    Err(AppError::invalid_state(
        format!("Claim must be {} for {}, but is {}", expected, attempted, claim.status),
        claim.status,
        attempted,
    ))
}

impl Marketplace {
    /// Submits a claim against a post.
    ///
    /// # Errors
    ///
    /// Fails if `actor` posted it, the post is resolved or expired, or
    /// `actor` already holds a claim on it that was not cancelled.
    pub fn create_claim(&self, post_id: &str, actor: &str, message: &str) -> Result<LostFoundClaim> {
        let message = required_text(message, "message")?;

        self.execute("create_claim", |dataset, outbox, now| {
            let post = dataset.post(post_id)?;
            if post.user == actor {
                return Err(AppError::Validation(
                    "You cannot claim your own post".to_string(),
                ));
            }
            if !post.accepts_claims() {
                return Err(AppError::invalid_state(
                    format!("Post is {} and no longer accepts claims", post.status),
                    post.status,
                    "CLAIM",
                ));
            }
            let duplicate = dataset.claims.iter().any(|c| {
                c.post == post_id && c.claimant == actor && c.status != ClaimStatus::Cancelled
            });
            if duplicate {
                return Err(AppError::Conflict(
                    "You have already claimed this post".to_string(),
                ));
            }

            let id = unique_id(CLAIM_PREFIX, &[post_id, actor], now, |candidate| {
                dataset.claims.iter().any(|c| c.id == candidate)
            });
            let mut claim = LostFoundClaim {
                id,
                post: post.id.clone(),
                claimant: actor.to_string(),
                post_owner: post.user.clone(),
                claim_type: post.post_type.claim_type(),
                status: ClaimStatus::Pending,
                message,
                verification_answers: Vec::new(),
                verification_score: 0,
                chat_enabled: false,
                meetup_details: MeetupDetails::default(),
                timeline: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            claim.record("CLAIM_SUBMITTED", actor, "Claim submitted", now);

            let post = dataset.post_mut(post_id)?;
            post.claims_count += 1;
            if post.status == PostStatus::Open {
                advance(&mut post.status, PostStatus::Claimed)?;
            }
            post.updated_at = now;

            outbox.push(
                &claim.post_owner,
                "CLAIM_RECEIVED",
                format!("{} submitted a claim on \"{}\"", actor, post.title),
                &claim.id,
                RelatedType::LostFoundClaim,
            );
            dataset.claims.push(claim.clone());
            Ok(claim)
        })
    }

    /// Opens verification and returns the questions without their answers.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` owns the post and the claim is PENDING.
    pub fn start_verification(&self, claim_id: &str, actor: &str) -> Result<VerificationPrompt> {
        self.execute("start_verification", |dataset, outbox, now| {
            let claim = dataset.claim_mut(claim_id)?;
            ensure_actor(claim.post_owner == actor, "only the post owner can start verification")?;
            require_claim_status(claim, ClaimStatus::Pending, "VERIFICATION")?;

            advance(&mut claim.status, ClaimStatus::Verification)?;
            claim.record("VERIFICATION_STARTED", actor, "Verification questions sent", now);
            let claim = claim.clone();

            let questions = dataset.post(&claim.post)?.redacted().verification_questions;
            outbox.push(
                &claim.claimant,
                "VERIFICATION_REQUESTED",
                format!("Please answer {} verification question(s)", questions.len()),
                &claim.id,
                RelatedType::LostFoundClaim,
            );
            Ok(VerificationPrompt { claim, questions })
        })
    }

    /// Records the claimant's answers and scores them.
    ///
    /// The status does not change; the post owner decides afterwards.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the claimant and the claim is in VERIFICATION,
    /// or if answers are missing while the post has questions.
    pub fn submit_verification(
        &self,
        claim_id: &str,
        actor: &str,
        answers: Vec<VerificationAnswer>,
    ) -> Result<LostFoundClaim> {
        self.execute("submit_verification", |dataset, outbox, now| {
            let claim = dataset.claim(claim_id)?;
            ensure_actor(claim.claimant == actor, "only the claimant can submit answers")?;
            require_claim_status(claim, ClaimStatus::Verification, "VERIFICATION_SUBMITTED")?;

            let questions = &dataset.post(&claim.post)?.verification_questions;
            if answers.is_empty() && !questions.is_empty() {
                return Err(AppError::Validation("answers are required".to_string()));
            }
            let score = score_answers(questions, &answers);

            let claim = dataset.claim_mut(claim_id)?;
            claim.verification_answers = answers;
            claim.verification_score = score;
            claim.record(
                "VERIFICATION_SUBMITTED",
                actor,
                format!("Answers submitted, score {}%", score),
                now,
            );

            outbox.push(
                &claim.post_owner,
                "VERIFICATION_SUBMITTED",
                format!("{} answered the verification questions ({}%)", actor, score),
                &claim.id,
                RelatedType::LostFoundClaim,
            );
            Ok(claim.clone())
        })
    }

    /// Accepts a claim and enables chat.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` owns the post and the claim is in VERIFICATION.
    pub fn verify_claim(&self, claim_id: &str, actor: &str) -> Result<LostFoundClaim> {
        self.execute("verify_claim", |dataset, outbox, now| {
            let claim = dataset.claim_mut(claim_id)?;
            ensure_actor(claim.post_owner == actor, "only the post owner can verify a claim")?;
            require_claim_status(claim, ClaimStatus::Verification, "VERIFIED")?;

            advance(&mut claim.status, ClaimStatus::Verified)?;
            claim.chat_enabled = true;
            claim.record("CLAIM_VERIFIED", actor, "Claim verified, chat enabled", now);
            let claim = claim.clone();

            let post = dataset.post_mut(&claim.post)?;
            if post.status != PostStatus::Verified {
                advance(&mut post.status, PostStatus::Verified)?;
                post.updated_at = now;
            }

            outbox.push(
                &claim.claimant,
                "CLAIM_VERIFIED",
                "Your claim was verified; you can now chat with the poster",
                &claim.id,
                RelatedType::LostFoundClaim,
            );
            Ok(claim)
        })
    }

    /// Declines a claim.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` owns the post and the claim is still open.
    pub fn reject_claim(&self, claim_id: &str, actor: &str, reason: Option<String>) -> Result<LostFoundClaim> {
        self.execute("reject_claim", |dataset, outbox, now| {
            let claim = dataset.claim_mut(claim_id)?;
            ensure_actor(claim.post_owner == actor, "only the post owner can reject a claim")?;
            if matches!(claim.status, ClaimStatus::Resolved | ClaimStatus::Rejected) {
                return Err(AppError::invalid_state(
                    format!("Claim is already {}", claim.status),
                    claim.status,
                    ClaimStatus::Rejected,
                ));
            }

            advance(&mut claim.status, ClaimStatus::Rejected)?;
            let details = match reason.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
                Some(reason) => format!("Claim rejected: {}", reason),
                None => "Claim rejected".to_string(),
            };
            claim.record("CLAIM_REJECTED", actor, details.clone(), now);

            outbox.push(
                &claim.claimant,
                "CLAIM_REJECTED",
                details,
                &claim.id,
                RelatedType::LostFoundClaim,
            );
            Ok(claim.clone())
        })
    }

    /// Proposes where and when to meet.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is a participant and the claim is VERIFIED.
    pub fn propose_meetup(&self, claim_id: &str, actor: &str, proposal: MeetupProposal) -> Result<LostFoundClaim> {
        let location = required_text(&proposal.location, "location")?;

        self.execute("propose_meetup", |dataset, outbox, now| {
            let claim = dataset.claim_mut(claim_id)?;
            ensure_actor(claim.is_participant(actor), "only participants can propose a meetup")?;
            require_claim_status(claim, ClaimStatus::Verified, "MEETUP_PROPOSED")?;

            claim.meetup_details.proposed_location = Some(location.clone());
            claim.meetup_details.proposed_time = Some(proposal.time);
            claim.meetup_details.status = MeetupStatus::Proposed;
            claim.record(
                "MEETUP_PROPOSED",
                actor,
                format!("Meetup proposed at {}", location),
                now,
            );

            outbox.push(
                claim.counterparty(actor),
                "MEETUP_PROPOSED",
                format!("{} proposed a meetup at {}", actor, location),
                &claim.id,
                RelatedType::LostFoundClaim,
            );
            Ok(claim.clone())
        })
    }

    /// Agrees to the proposed meetup.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is a participant, the claim is still VERIFIED and
    /// a meetup is proposed.
    pub fn accept_meetup(&self, claim_id: &str, actor: &str) -> Result<LostFoundClaim> {
        self.execute("accept_meetup", |dataset, outbox, now| {
            let claim = dataset.claim_mut(claim_id)?;
            ensure_actor(claim.is_participant(actor), "only participants can accept a meetup")?;
            require_claim_status(claim, ClaimStatus::Verified, "MEETUP_ACCEPTED")?;
            if claim.meetup_details.status != MeetupStatus::Proposed {
                return Err(AppError::invalid_state(
                    "No meetup has been proposed",
                    claim.meetup_details.status,
                    MeetupStatus::Agreed,
                ));
            }

            let meetup = &mut claim.meetup_details;
            meetup.agreed_location = meetup.proposed_location.clone();
            meetup.agreed_time = meetup.proposed_time;
            meetup.status = MeetupStatus::Agreed;
            claim.record("MEETUP_ACCEPTED", actor, "Meetup accepted", now);

            outbox.push(
                claim.counterparty(actor),
                "MEETUP_ACCEPTED",
                format!("{} accepted the meetup", actor),
                &claim.id,
                RelatedType::LostFoundClaim,
            );
            Ok(claim.clone())
        })
    }

    /// Resolves a post with one claim and cancels every competing claim.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the poster, the claim belongs to the post and
    /// both can still move to RESOLVED.
    pub fn resolve_post(&self, post_id: &str, claim_id: &str, actor: &str) -> Result<Resolution> {
        self.execute("resolve_post", |dataset, outbox, now| {
            let post = dataset.post_mut(post_id)?;
            ensure_actor(post.user == actor, "only the poster can resolve a post")?;
            advance(&mut post.status, PostStatus::Resolved)?;

            let claim = dataset.claim_mut(claim_id)?;
            if claim.post != post_id {
                return Err(AppError::Validation(
                    "Claim does not belong to this post".to_string(),
                ));
            }
            advance(&mut claim.status, ClaimStatus::Resolved)?;
            claim.meetup_details.status = MeetupStatus::Completed;
            claim.record("POST_RESOLVED", actor, "Post resolved with this claim", now);
            let claim = claim.clone();

            let post = dataset.post_mut(post_id)?;
            post.is_resolved = true;
            post.resolved_with = Some(claim.claimant.clone());
            post.resolved_at = Some(now);
            post.updated_at = now;
            let post = post.clone();

            let cancelled = cancel_competing_claims(
                dataset,
                outbox,
                &post,
                Some(claim_id),
                "Post resolved with another claim",
                actor,
                now,
            )?;

            outbox.push(
                &claim.claimant,
                "POST_RESOLVED",
                format!("\"{}\" was resolved with your claim", post.title),
                &claim.id,
                RelatedType::LostFoundClaim,
            );
            Ok(Resolution {
                post,
                claim: Some(claim),
                cancelled,
            })
        })
    }

    /// Resolves a post without naming a claim, e.g. when the item turned up
    /// elsewhere. Every open claim is cancelled.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the poster and the post can still move to
    /// RESOLVED.
    pub fn mark_resolved(&self, post_id: &str, actor: &str) -> Result<Resolution> {
        self.execute("mark_resolved", |dataset, outbox, now| {
            let post = dataset.post_mut(post_id)?;
            ensure_actor(post.user == actor, "only the poster can resolve a post")?;
            advance(&mut post.status, PostStatus::Resolved)?;
            post.is_resolved = true;
            post.resolved_with = None;
            post.resolved_at = Some(now);
            post.updated_at = now;
            let post = post.clone();

            let cancelled = cancel_competing_claims(
                dataset,
                outbox,
                &post,
                None,
                "Post was marked as resolved",
                actor,
                now,
            )?;
            Ok(Resolution {
                post,
                claim: None,
                cancelled,
            })
        })
    }

    /// Returns a claim to one of its participants.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] for non-participants.
    pub fn get_claim(&self, claim_id: &str, viewer: &str) -> Result<LostFoundClaim> {
        let dataset = self.snapshot()?;
        let claim = dataset.claim(claim_id)?;
        ensure_actor(claim.is_participant(viewer), "only participants can view a claim")?;
        Ok(claim.clone())
    }
}
