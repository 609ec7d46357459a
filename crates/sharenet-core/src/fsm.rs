// Rust guideline compliant 2026-02-06

//! Finite State Machine module for status transitions.
//!
//! Every status field is driven by an explicit transition table consulted by one
//! generic validator. Named operations layer their side effects on top of it.
//!
//! Transaction:
//!
//! - Pending → Accepted | Rejected | Cancelled
//! - Accepted → AgreementProposed | Cancelled | Disputed
//! - AgreementProposed → Active | Cancelled | Disputed
//! - Active → ReturnPending | Disputed
//! - ReturnPending → Completed | Disputed
//! - Disputed → Completed | Cancelled
//! - Completed, Cancelled, Rejected are terminal
//!
//! Request:
//!
//! - Pending → CounterOffered | Accepted | Rejected | Cancelled
//! - CounterOffered → CounterOffered | Pending | Accepted
//! - Accepted → Completed
//!
//! Lost&found claim:
//!
//! - Pending → Verification | Rejected | Cancelled | Resolved
//! - Verification → Verified | Rejected | Cancelled | Resolved
//! - Verified → Resolved | Rejected | Cancelled
//!
//! Lost&found post:
//!
//! - Open → Claimed | Resolved | Expired
//! - Claimed → Verified | Resolved | Expired
//! - Verified → Resolved | Expired

use crate::models::{
    ClaimStatus, OfferStatus, PostStatus, RequestStatus, TransactionStatus, WantedStatus,
};
use crate::{Error, Result};
use std::fmt::Display;

/// A status enum backed by a transition table.
pub trait Transition: Copy + PartialEq + Display + 'static {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// Statuses reachable in one step from `self`.
    fn allowed_targets(&self) -> &'static [Self];

    /// Checks if a transition to the target status is valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] naming both states if `target` is
    /// not in the table row for `self`.
    fn can_transition_to(&self, target: Self) -> Result<()> {
        if self.allowed_targets().contains(&target) {
            return Ok(());
        }
        Err(Error::InvalidTransition {
            entity: Self::ENTITY,
            from: self.to_string(),
            to: target.to_string(),
        })
    }

    /// Whether the status has no outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.allowed_targets().is_empty()
    }
}

/// Validates and applies a transition in place.
///
/// # Errors
///
/// Returns an error and leaves `status` untouched if the move is not allowed.
pub fn advance<S: Transition>(status: &mut S, target: S) -> Result<()> {
    status.can_transition_to(target)?;
    *status = target;
    Ok(())
}

impl Transition for TransactionStatus {
    const ENTITY: &'static str = "transaction";

    fn allowed_targets(&self) -> &'static [Self] {
        use TransactionStatus::*;
        match self {
            Pending => &[Accepted, Rejected, Cancelled],
            Accepted => &[AgreementProposed, Cancelled, Disputed],
            AgreementProposed => &[Active, Cancelled, Disputed],
            Active => &[ReturnPending, Disputed],
            ReturnPending => &[Completed, Disputed],
            Disputed => &[Completed, Cancelled],
            Completed | Cancelled | Rejected => &[],
        }
    }
}

impl Transition for RequestStatus {
    const ENTITY: &'static str = "request";

    fn allowed_targets(&self) -> &'static [Self] {
        use RequestStatus::*;
        match self {
            Pending => &[CounterOffered, Accepted, Rejected, Cancelled],
            CounterOffered => &[CounterOffered, Pending, Accepted],
            Accepted => &[Completed],
            Rejected | Cancelled | Completed => &[],
        }
    }
}

impl Transition for ClaimStatus {
    const ENTITY: &'static str = "claim";

    fn allowed_targets(&self) -> &'static [Self] {
        use ClaimStatus::*;
        match self {
            Pending => &[Verification, Rejected, Cancelled, Resolved],
            Verification => &[Verified, Rejected, Cancelled, Resolved],
            Verified => &[Resolved, Rejected, Cancelled],
            Rejected | Resolved | Cancelled => &[],
        }
    }
}

impl Transition for PostStatus {
    const ENTITY: &'static str = "post";

    fn allowed_targets(&self) -> &'static [Self] {
        use PostStatus::*;
        match self {
            Open => &[Claimed, Resolved, Expired],
            Claimed => &[Verified, Resolved, Expired],
            Verified => &[Resolved, Expired],
            Resolved | Expired => &[],
        }
    }
}

impl Transition for WantedStatus {
    const ENTITY: &'static str = "wanted item";

    fn allowed_targets(&self) -> &'static [Self] {
        use WantedStatus::*;
        match self {
            Open => &[Fulfilled, Closed, Expired],
            Closed | Expired => &[Fulfilled],
            Fulfilled => &[],
        }
    }
}

impl Transition for OfferStatus {
    const ENTITY: &'static str = "offer";

    fn allowed_targets(&self) -> &'static [Self] {
        use OfferStatus::*;
        match self {
            Pending => &[Accepted, Rejected, Cancelled],
            Accepted | Rejected | Cancelled => &[],
        }
    }
}
