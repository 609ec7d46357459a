// Rust guideline compliant 2026-02-09

//! Application services for ShareNet.
//!
//! This crate hosts the marketplace engines on top of `sharenet-core`:
//! listings, the request engine, the transaction state machine, the
//! lost&found claim engine, wanted-item offers and read-side queries, plus
//! error codes and standardized response envelopes.

pub mod error;
pub mod listings;
pub mod lost_found;
pub mod marketplace;
pub mod queries;
pub mod repo;
pub mod requests;
pub mod response;
pub mod transactions;
pub mod wanted;

pub use error::{AppError, ErrorCode, Result};
pub use listings::{ItemUpdate, NewItem, NewPost, QuestionInput};
pub use lost_found::{score_answers, MeetupProposal, Resolution, VerificationPrompt};
pub use marketplace::Marketplace;
pub use queries::{
    paginate, parse_claim_status, parse_item_mode, parse_offer_status, parse_offer_type,
    parse_post_status, parse_post_type, parse_request_status, parse_transaction_status,
    parse_wanted_status, OfferSummary, Page, PageRequest, TransactionRole,
};
pub use repo::RepoContext;
pub use requests::{
    Acceptance, ClaimQueue, CounterResponse, CounterTerms, InstantClaimReceipt, NewRequest,
    PickupProposal,
};
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use transactions::{AgreementTerms, ReturnSettlement};
pub use wanted::{NewOffer, NewWanted};
