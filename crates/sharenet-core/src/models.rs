// Rust guideline compliant 2026-02-06

//! Core data models for ShareNet.
//!
//! Every status enum here has a transition table in [`crate::fsm`]. Embedded
//! child collections (`claimed_by` on [`Item`], `offers` on [`WantedItem`]) carry
//! their own sub-identifiers and are only mutated through the parent record.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

/// How an item is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemMode {
    /// Lent out for a duration and returned.
    Rent,
    /// Sold outright.
    Sell,
    /// Given away for free.
    Give,
}

impl ItemMode {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemMode::Rent => "RENT",
            ItemMode::Sell => "SELL",
            ItemMode::Give => "GIVE",
        }
    }

    /// Whether listings in this mode must carry a price.
    pub fn requires_price(&self) -> bool {
        matches!(self, ItemMode::Rent | ItemMode::Sell)
    }
}

/// Status of a single instant-claim entry on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimEntryStatus {
    /// Claimed, waiting for the claimant to pick the item up.
    PendingPickup,
    /// Picked up.
    Completed,
    /// Withdrawn.
    Cancelled,
}

/// One claimant in an item's instant-claim queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimEntry {
    /// Sub-identifier assigned by the item (format: clq-XXXXXXXX).
    pub id: String,
    /// Claiming user.
    pub user: String,
    /// Unix timestamp of the claim.
    pub claimed_at: i64,
    /// Pickup status.
    pub status: ClaimEntryStatus,
}

/// A marketplace listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (format: itm-XXXXXXXX).
    pub id: String,
    /// Listing creator.
    pub owner: String,
    /// One-line title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Offer mode.
    pub mode: ItemMode,
    /// Price, required for RENT and SELL.
    #[serde(default)]
    pub price: Option<f64>,
    /// Whether new requests or claims can be made.
    pub is_available: bool,
    /// Whether the item can be claimed without negotiation.
    #[serde(default)]
    pub instant_claim: bool,
    /// Capacity of the instant-claim queue.
    #[serde(default = "default_max_claimers")]
    pub max_claimers: u32,
    /// Instant-claim queue in insertion order.
    #[serde(default)]
    pub claimed_by: Vec<ClaimEntry>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

fn default_max_claimers() -> u32 {
    1
}

impl Item {
    /// Creates an available item with an empty claim queue.
    pub fn new(id: String, owner: String, title: String, mode: ItemMode, now: i64) -> Self {
        Self {
            id,
            owner,
            title,
            description: String::new(),
            mode,
            price: None,
            is_available: true,
            instant_claim: false,
            max_claimers: default_max_claimers(),
            claimed_by: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validates the item data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Title or owner is empty
    /// - Price is missing or negative for RENT/SELL
    /// - `max_claimers` is zero
    pub fn validate(&self) -> crate::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::Error::InvalidRecord(
                "Item title cannot be empty".to_string(),
            ));
        }
        if self.owner.trim().is_empty() {
            return Err(crate::Error::InvalidRecord(
                "Item owner cannot be empty".to_string(),
            ));
        }
        if self.mode.requires_price() {
            match self.price {
                Some(price) if price >= 0.0 => {}
                _ => {
                    return Err(crate::Error::InvalidRecord(
                        "Price is required for RENT and SELL modes".to_string(),
                    ))
                }
            }
        }
        if self.max_claimers == 0 {
            return Err(crate::Error::InvalidRecord(
                "max_claimers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of claim entries still waiting for pickup.
    pub fn active_claims(&self) -> usize {
        self.claimed_by
            .iter()
            .filter(|entry| entry.status == ClaimEntryStatus::PendingPickup)
            .count()
    }

    /// Whether `user` holds a claim entry that is not cancelled.
    pub fn has_live_claim(&self, user: &str) -> bool {
        self.claimed_by
            .iter()
            .any(|entry| entry.user == user && entry.status != ClaimEntryStatus::Cancelled)
    }

    /// Pending-pickup entries, oldest first.
    pub fn claim_queue(&self) -> Vec<ClaimEntry> {
        let mut queue: Vec<ClaimEntry> = self
            .claimed_by
            .iter()
            .filter(|entry| entry.status == ClaimEntryStatus::PendingPickup)
            .cloned()
            .collect();
        queue.sort_by_key(|entry| entry.claimed_at);
        queue
    }
}

/// Status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Waiting for the owner.
    Pending,
    /// The owner proposed different terms.
    CounterOffered,
    /// Accepted; a transaction or pickup follows.
    Accepted,
    /// Declined by the owner.
    Rejected,
    /// Withdrawn by the requester.
    Cancelled,
    /// Pickup confirmed.
    Completed,
}

impl RequestStatus {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::CounterOffered => "COUNTER_OFFERED",
            RequestStatus::Accepted => "ACCEPTED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Cancelled => "CANCELLED",
            RequestStatus::Completed => "COMPLETED",
        }
    }
}

/// Kind of request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// Negotiated request.
    #[default]
    Standard,
    /// Auto-accepted claim on a free item.
    InstantClaim,
}

/// Status of a counter offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterOfferStatus {
    /// Waiting for the requester.
    Pending,
    /// Accepted by the requester.
    Accepted,
    /// Rejected by the requester.
    Rejected,
}

/// Owner-proposed alternative terms for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterOffer {
    /// Proposed price.
    pub price: Option<f64>,
    /// Proposed duration as entered.
    pub duration: Option<String>,
    /// Message to the requester.
    pub message: Option<String>,
    /// User who made the offer.
    pub proposed_by: String,
    /// Response status.
    pub status: CounterOfferStatus,
}

/// Kind of negotiation log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NegotiationKind {
    /// Counter offer made.
    Counter,
    /// Counter offer accepted.
    Accept,
    /// Counter offer rejected.
    Reject,
}

/// One append-only negotiation log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationEntry {
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: NegotiationKind,
    /// Price under discussion.
    pub price: Option<f64>,
    /// Duration under discussion.
    pub duration: Option<String>,
    /// Optional message.
    #[serde(default)]
    pub message: Option<String>,
    /// Acting user.
    pub by: String,
    /// Unix timestamp.
    pub timestamp: i64,
}

/// Pickup arrangement attached to an accepted request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupDetails {
    /// Meeting place.
    pub location: String,
    /// Proposed pickup time (unix seconds).
    pub proposed_time: i64,
    /// Extra instructions.
    #[serde(default)]
    pub instructions: Option<String>,
    /// Set once the other party confirms.
    #[serde(default)]
    pub confirmed_time: Option<i64>,
}

/// A request for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Unique identifier (format: req-XXXXXXXX).
    pub id: String,
    /// Requested item.
    pub item: String,
    /// Requesting user.
    pub requester: String,
    /// Item owner at request time.
    pub owner: String,
    /// Current status.
    pub status: RequestStatus,
    /// Free-form message.
    #[serde(default)]
    pub description: Option<String>,
    /// Proposed price.
    #[serde(default)]
    pub proposed_price: Option<f64>,
    /// Proposed duration as entered (days when numeric).
    #[serde(default)]
    pub proposed_duration: Option<String>,
    /// The single retained counter offer.
    #[serde(default)]
    pub counter_offer: Option<CounterOffer>,
    /// Append-only negotiation log.
    #[serde(default)]
    pub negotiation_history: Vec<NegotiationEntry>,
    /// Standard or instant claim.
    #[serde(default)]
    pub request_type: RequestType,
    /// Claim ordering, 1 for the first claimant.
    #[serde(default)]
    pub priority: u32,
    /// Reason given on rejection.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Pickup arrangement.
    #[serde(default)]
    pub pickup_details: Option<PickupDetails>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Request {
    /// Whether `user` is the owner or the requester.
    pub fn is_participant(&self, user: &str) -> bool {
        self.owner == user || self.requester == user
    }

    /// The participant other than `user`.
    pub fn counterparty(&self, user: &str) -> &str {
        if self.owner == user {
            &self.requester
        } else {
            &self.owner
        }
    }

    /// Validates the request data.
    ///
    /// # Errors
    ///
    /// Returns an error if a reference is empty or the requester owns the item.
    pub fn validate(&self) -> crate::Result<()> {
        if self.item.is_empty() || self.requester.is_empty() || self.owner.is_empty() {
            return Err(crate::Error::InvalidRecord(
                "Request must reference an item, requester and owner".to_string(),
            ));
        }
        if self.requester == self.owner {
            return Err(crate::Error::InvalidRecord(
                "Requester cannot be the item owner".to_string(),
            ));
        }
        Ok(())
    }
}

/// Status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Created but not yet accepted.
    Pending,
    /// Request accepted, terms not yet agreed.
    Accepted,
    /// Owner proposed final terms.
    AgreementProposed,
    /// Terms confirmed, item handed over.
    Active,
    /// Requester reported the item returned.
    ReturnPending,
    /// Finished.
    Completed,
    /// Abandoned.
    Cancelled,
    /// Under dispute.
    Disputed,
    /// Declined.
    Rejected,
}

impl TransactionStatus {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Accepted => "ACCEPTED",
            TransactionStatus::AgreementProposed => "AGREEMENT_PROPOSED",
            TransactionStatus::Active => "ACTIVE",
            TransactionStatus::ReturnPending => "RETURN_PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Cancelled => "CANCELLED",
            TransactionStatus::Disputed => "DISPUTED",
            TransactionStatus::Rejected => "REJECTED",
        }
    }
}

/// Post-acceptance lifecycle of an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (format: txn-XXXXXXXX).
    pub id: String,
    /// Exchanged item.
    pub item: String,
    /// Item owner.
    pub owner: String,
    /// Receiving user.
    pub requester: String,
    /// Originating request.
    #[serde(default)]
    pub request: Option<String>,
    /// Item mode at acceptance.
    pub mode: ItemMode,
    /// Agreed price.
    pub agreed_price: f64,
    /// Agreed duration in days.
    #[serde(default)]
    pub agreed_duration: Option<u32>,
    /// Free-form terms.
    #[serde(default)]
    pub terms: Option<String>,
    /// Current status.
    pub status: TransactionStatus,
    /// Start of the exchange.
    #[serde(default)]
    pub start_date: Option<i64>,
    /// End of the exchange.
    #[serde(default)]
    pub end_date: Option<i64>,
    /// When the owner confirmed the return.
    #[serde(default)]
    pub actual_return_date: Option<i64>,
    /// Dispute reason.
    #[serde(default)]
    pub dispute_reason: Option<String>,
    /// Participant who raised the dispute.
    #[serde(default)]
    pub dispute_raised_by: Option<String>,
    /// When the dispute was raised.
    #[serde(default)]
    pub dispute_date: Option<i64>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Transaction {
    /// Whether `user` is the owner or the requester.
    pub fn is_participant(&self, user: &str) -> bool {
        self.owner == user || self.requester == user
    }

    /// The participant other than `user`.
    pub fn counterparty(&self, user: &str) -> &str {
        if self.owner == user {
            &self.requester
        } else {
            &self.owner
        }
    }

    /// Validates the transaction data.
    ///
    /// # Errors
    ///
    /// Returns an error if a reference is empty or the price is negative.
    pub fn validate(&self) -> crate::Result<()> {
        if self.item.is_empty() || self.owner.is_empty() || self.requester.is_empty() {
            return Err(crate::Error::InvalidRecord(
                "Transaction must reference an item, owner and requester".to_string(),
            ));
        }
        if self.agreed_price < 0.0 {
            return Err(crate::Error::InvalidRecord(format!(
                "Agreed price cannot be negative, got {}",
                self.agreed_price
            )));
        }
        Ok(())
    }
}

/// Lost or found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    /// The poster lost something.
    Lost,
    /// The poster found something.
    Found,
}

impl PostType {
    /// The claim type a claimant asserts against a post of this type.
    pub fn claim_type(&self) -> ClaimType {
        match self {
            PostType::Lost => ClaimType::IFoundIt,
            PostType::Found => ClaimType::ItsMine,
        }
    }
}

/// Status of a lost&found post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    /// No claims yet.
    Open,
    /// At least one claim submitted.
    Claimed,
    /// A claim was verified.
    Verified,
    /// Item returned.
    Resolved,
    /// No longer accepting claims.
    Expired,
}

impl PostStatus {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Open => "OPEN",
            PostStatus::Claimed => "CLAIMED",
            PostStatus::Verified => "VERIFIED",
            PostStatus::Resolved => "RESOLVED",
            PostStatus::Expired => "EXPIRED",
        }
    }
}

/// Owner-authored challenge question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationQuestion {
    /// Question identifier (format: vq-XXXXXXXX).
    pub id: String,
    /// Question text.
    pub question: String,
    /// Expected answer; stripped from every non-owner view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// A lost or found report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LostFoundPost {
    /// Unique identifier (format: lfp-XXXXXXXX).
    pub id: String,
    /// Poster.
    pub user: String,
    /// Lost or found.
    #[serde(rename = "type")]
    pub post_type: PostType,
    /// One-line title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Where it was lost or found.
    #[serde(default)]
    pub location: String,
    /// Current status.
    pub status: PostStatus,
    /// Challenge questions in display order.
    #[serde(default)]
    pub verification_questions: Vec<VerificationQuestion>,
    /// Number of claims ever submitted.
    #[serde(default)]
    pub claims_count: u32,
    /// Claimant the post was resolved with.
    #[serde(default)]
    pub resolved_with: Option<String>,
    /// When the post was resolved.
    #[serde(default)]
    pub resolved_at: Option<i64>,
    /// Whether the post is resolved.
    #[serde(default)]
    pub is_resolved: bool,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl LostFoundPost {
    /// Returns a copy with every verification answer removed.
    pub fn redacted(&self) -> Self {
        let mut post = self.clone();
        for question in &mut post.verification_questions {
            question.answer = None;
        }
        post
    }

    /// Whether the post still accepts claims.
    pub fn accepts_claims(&self) -> bool {
        !matches!(self.status, PostStatus::Resolved | PostStatus::Expired)
    }

    /// Validates the post data.
    ///
    /// # Errors
    ///
    /// Returns an error if the title or poster is empty, or a question is blank.
    pub fn validate(&self) -> crate::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::Error::InvalidRecord(
                "Post title cannot be empty".to_string(),
            ));
        }
        if self.user.trim().is_empty() {
            return Err(crate::Error::InvalidRecord(
                "Post user cannot be empty".to_string(),
            ));
        }
        if self
            .verification_questions
            .iter()
            .any(|q| q.question.trim().is_empty())
        {
            return Err(crate::Error::InvalidRecord(
                "Verification question cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Role the claimant asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimType {
    /// Claimant found the poster's lost item.
    IFoundIt,
    /// Claimant owns the poster's found item.
    ItsMine,
}

/// Status of a lost&found claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Submitted.
    Pending,
    /// Claimant is answering questions.
    Verification,
    /// Owner accepted the claim.
    Verified,
    /// Owner declined the claim.
    Rejected,
    /// Post resolved with this claim.
    Resolved,
    /// Withdrawn or superseded.
    Cancelled,
}

impl ClaimStatus {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Verification => "VERIFICATION",
            ClaimStatus::Verified => "VERIFIED",
            ClaimStatus::Rejected => "REJECTED",
            ClaimStatus::Resolved => "RESOLVED",
            ClaimStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Status of a meetup arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetupStatus {
    /// Nothing proposed.
    #[default]
    None,
    /// Proposed by one participant.
    Proposed,
    /// Accepted by the other participant.
    Agreed,
    /// Handover done.
    Completed,
}

impl MeetupStatus {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetupStatus::None => "NONE",
            MeetupStatus::Proposed => "PROPOSED",
            MeetupStatus::Agreed => "AGREED",
            MeetupStatus::Completed => "COMPLETED",
        }
    }
}

/// Meetup arrangement for a verified claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MeetupDetails {
    /// Proposed place.
    #[serde(default)]
    pub proposed_location: Option<String>,
    /// Proposed time.
    #[serde(default)]
    pub proposed_time: Option<i64>,
    /// Arrangement status.
    #[serde(default)]
    pub status: MeetupStatus,
    /// Agreed place.
    #[serde(default)]
    pub agreed_location: Option<String>,
    /// Agreed time.
    #[serde(default)]
    pub agreed_time: Option<i64>,
}

/// Claimant answer to one verification question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationAnswer {
    /// Question being answered.
    pub question_id: String,
    /// Claimant answer.
    pub answer: String,
}

/// One append-only claim timeline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Action name, e.g. CLAIM_SUBMITTED.
    pub action: String,
    /// Acting user.
    pub by: String,
    /// Human-readable details.
    pub details: String,
    /// Unix timestamp.
    pub timestamp: i64,
}

/// A claim against a lost&found post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LostFoundClaim {
    /// Unique identifier (format: clm-XXXXXXXX).
    pub id: String,
    /// Claimed post.
    pub post: String,
    /// Claiming user.
    pub claimant: String,
    /// Poster.
    pub post_owner: String,
    /// Asserted role.
    pub claim_type: ClaimType,
    /// Current status.
    pub status: ClaimStatus,
    /// Claimant message.
    pub message: String,
    /// Submitted answers.
    #[serde(default)]
    pub verification_answers: Vec<VerificationAnswer>,
    /// Share of correct answers, 0-100.
    #[serde(default)]
    pub verification_score: u8,
    /// Whether participants may chat.
    #[serde(default)]
    pub chat_enabled: bool,
    /// Meetup arrangement.
    #[serde(default)]
    pub meetup_details: MeetupDetails,
    /// Append-only action log.
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl LostFoundClaim {
    /// Whether `user` is the claimant or the post owner.
    pub fn is_participant(&self, user: &str) -> bool {
        self.claimant == user || self.post_owner == user
    }

    /// The participant other than `user`.
    pub fn counterparty(&self, user: &str) -> &str {
        if self.post_owner == user {
            &self.claimant
        } else {
            &self.post_owner
        }
    }

    /// Appends a timeline entry and bumps `updated_at`.
    pub fn record(&mut self, action: &str, by: &str, details: impl Into<String>, now: i64) {
        self.timeline.push(TimelineEntry {
            action: action.to_string(),
            by: by.to_string(),
            details: details.into(),
            timestamp: now,
        });
        self.updated_at = now;
    }

    /// Validates the claim data.
    ///
    /// # Errors
    ///
    /// Returns an error if the message is empty, the claimant owns the post,
    /// or the score exceeds 100.
    pub fn validate(&self) -> crate::Result<()> {
        if self.message.trim().is_empty() {
            return Err(crate::Error::InvalidRecord(
                "Claim message cannot be empty".to_string(),
            ));
        }
        if self.claimant == self.post_owner {
            return Err(crate::Error::InvalidRecord(
                "Claimant cannot be the post owner".to_string(),
            ));
        }
        if self.verification_score > 100 {
            return Err(crate::Error::InvalidRecord(format!(
                "Verification score must be 0-100, got {}",
                self.verification_score
            )));
        }
        Ok(())
    }
}

/// Status of a wanted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WantedStatus {
    /// Accepting offers.
    Open,
    /// An offer was accepted or the poster marked it done.
    Fulfilled,
    /// Closed by the poster.
    Closed,
    /// Timed out.
    Expired,
}

impl WantedStatus {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            WantedStatus::Open => "OPEN",
            WantedStatus::Fulfilled => "FULFILLED",
            WantedStatus::Closed => "CLOSED",
            WantedStatus::Expired => "EXPIRED",
        }
    }
}

/// Terms of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferType {
    /// Given away.
    Free,
    /// Sold.
    Sell,
    /// Lent.
    Rent,
}

/// Status of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    /// Waiting for the poster.
    Pending,
    /// Accepted.
    Accepted,
    /// Declined, or superseded by another accepted offer.
    Rejected,
    /// Withdrawn by the offerer.
    Cancelled,
}

impl OfferStatus {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "PENDING",
            OfferStatus::Accepted => "ACCEPTED",
            OfferStatus::Rejected => "REJECTED",
            OfferStatus::Cancelled => "CANCELLED",
        }
    }
}

/// An offer made against a wanted request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Sub-identifier assigned by the wanted item (format: ofr-XXXXXXXX).
    pub id: String,
    /// Offering user.
    pub offerer: String,
    /// Message to the poster.
    pub message: String,
    /// Offer terms.
    pub offer_type: OfferType,
    /// Price, absent for free offers.
    #[serde(default)]
    pub price: Option<f64>,
    /// Current status.
    pub status: OfferStatus,
    /// Whether participants may chat.
    #[serde(default)]
    pub chat_enabled: bool,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

/// A "wanted" request posted by a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantedItem {
    /// Unique identifier (format: wnt-XXXXXXXX).
    pub id: String,
    /// Poster.
    pub user: String,
    /// One-line title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Highest acceptable price, if any.
    #[serde(default)]
    pub max_budget: Option<f64>,
    /// Current status.
    pub status: WantedStatus,
    /// Offers in submission order.
    #[serde(default)]
    pub offers: Vec<Offer>,
    /// Offer that fulfilled the request.
    #[serde(default)]
    pub accepted_offer: Option<String>,
    /// User who fulfilled the request.
    #[serde(default)]
    pub fulfilled_by: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl WantedItem {
    /// Validates the wanted item data.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty or an offer has an empty message.
    pub fn validate(&self) -> crate::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::Error::InvalidRecord(
                "Wanted item title cannot be empty".to_string(),
            ));
        }
        if self.offers.iter().any(|o| o.message.trim().is_empty()) {
            return Err(crate::Error::InvalidRecord(
                "Offer message cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-user reputation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier.
    pub id: String,
    /// Trust score, 0-100.
    pub trust_score: u8,
    /// Unix timestamp of last adjustment.
    pub updated_at: i64,
}

impl UserProfile {
    /// Validates the profile data.
    ///
    /// # Errors
    ///
    /// Returns an error if the score exceeds 100.
    pub fn validate(&self) -> crate::Result<()> {
        if self.trust_score > crate::trust::MAX_SCORE {
            return Err(crate::Error::InvalidRecord(format!(
                "Trust score must be 0-100, got {}",
                self.trust_score
            )));
        }
        Ok(())
    }
}

display_as_str!(
    ItemMode,
    RequestStatus,
    TransactionStatus,
    PostStatus,
    ClaimStatus,
    MeetupStatus,
    WantedStatus,
    OfferStatus,
);
