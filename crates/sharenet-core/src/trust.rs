// Rust guideline compliant 2026-02-06

//! Trust score adjustment.
//!
//! Scores live in `[MIN_SCORE, MAX_SCORE]` and start at `DEFAULT_SCORE`.
//! Adjusting is a pure function of the current score, the outcome and the
//! configured deltas.

use crate::config::TrustDeltas;
use serde::{Deserialize, Serialize};

/// Lowest possible trust score.
pub const MIN_SCORE: u8 = 0;

/// Highest possible trust score.
pub const MAX_SCORE: u8 = 100;

/// Score assigned to users without a profile.
pub const DEFAULT_SCORE: u8 = 50;

const SECONDS_PER_DAY: i64 = 86_400;

/// Reputation-relevant outcome of a transaction or dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrustOutcome {
    /// Item returned on or before the agreed end.
    OnTimeReturn,
    /// Transaction completed.
    Completed,
    /// Returned a few days late.
    LateReturnMinor,
    /// Returned well past the agreed end.
    LateReturnMajor,
    /// Raised a dispute.
    Dispute,
}

impl TrustOutcome {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustOutcome::OnTimeReturn => "ON_TIME_RETURN",
            TrustOutcome::Completed => "COMPLETED",
            TrustOutcome::LateReturnMinor => "LATE_RETURN_MINOR",
            TrustOutcome::LateReturnMajor => "LATE_RETURN_MAJOR",
            TrustOutcome::Dispute => "DISPUTE",
        }
    }
}

impl std::fmt::Display for TrustOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TrustDeltas {
    /// Signed adjustment for an outcome.
    pub fn delta(&self, outcome: TrustOutcome) -> i32 {
        match outcome {
            TrustOutcome::OnTimeReturn => self.on_time_return,
            TrustOutcome::Completed => self.completed,
            TrustOutcome::LateReturnMinor => self.late_return_minor,
            TrustOutcome::LateReturnMajor => self.late_return_major,
            TrustOutcome::Dispute => self.dispute,
        }
    }

    /// Applies an outcome to a score, clamped to the valid range.
    pub fn apply(&self, score: u8, outcome: TrustOutcome) -> u8 {
        let next = i32::from(score) + self.delta(outcome);
        next.clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE)) as u8
    }
}

/// Applies an outcome using the default deltas.
pub fn apply_outcome(score: u8, outcome: TrustOutcome) -> u8 {
    TrustDeltas::default().apply(score, outcome)
}

/// Whole days between the expected end of a rental and the actual return.
///
/// Negative when returned early; floors partial days. Timestamps at the edge
/// of the `i64` range saturate instead of overflowing.
pub fn days_late(start: i64, agreed_days: u32, returned_at: i64) -> i64 {
    let expected_end = start.saturating_add(i64::from(agreed_days) * SECONDS_PER_DAY);
    returned_at
        .saturating_sub(expected_end)
        .div_euclid(SECONDS_PER_DAY)
}

/// Maps lateness to an outcome; `minor_band` is the last day counted as minor.
pub fn classify_return(days_late: i64, minor_band: i64) -> TrustOutcome {
    if days_late <= 0 {
        TrustOutcome::OnTimeReturn
    } else if days_late <= minor_band {
        TrustOutcome::LateReturnMinor
    } else {
        TrustOutcome::LateReturnMajor
    }
}
