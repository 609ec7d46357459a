// Rust guideline compliant 2026-02-06

//! ShareNet Core Library
//!
//! This crate provides the foundational components for the ShareNet campus marketplace:
//! - Data models (Item, Request, Transaction, LostFoundPost, LostFoundClaim, WantedItem)
//! - Transition tables for every status field
//! - Trust score adjustment
//! - Storage engine (JSONL collections, file locking, atomic multi-collection commits)
//! - Hash ID generation
//! - Notification sink and clock capabilities
//! - Error types and result handling

pub mod clock;
pub mod config;
pub mod error;
pub mod fsm;
pub mod identity;
pub mod models;
pub mod notify;
pub mod storage;
pub mod trust;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, OutputFormat, TrustDeltas};
pub use error::{Error, Result};
pub use fsm::Transition;
pub use models::{
    ClaimEntry, ClaimEntryStatus, ClaimStatus, ClaimType, CounterOffer, CounterOfferStatus,
    Item, ItemMode, LostFoundClaim, LostFoundPost, MeetupDetails, MeetupStatus,
    NegotiationEntry, NegotiationKind, Offer, OfferStatus, OfferType, PickupDetails, PostStatus,
    PostType, Request, RequestStatus, RequestType, TimelineEntry, Transaction,
    TransactionStatus, UserProfile, VerificationAnswer, VerificationQuestion, WantedItem,
    WantedStatus,
};
pub use notify::{dispatch, JsonlNotifier, Notification, Notifier, RelatedType, TracingNotifier};
pub use storage::{Dataset, Record, Store};
pub use trust::{apply_outcome, TrustOutcome};
