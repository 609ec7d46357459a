// Rust guideline compliant 2026-02-06

//! Implementation of the `snet trust` command.

use super::Session;
use crate::output::{Detail, Reply};
use anyhow::Result;
use serde::Serialize;

/// A user's current trust score.
#[derive(Debug, Serialize)]
pub struct TrustReport {
    /// User identifier.
    pub user: String,
    /// Score, 0-100.
    pub trust_score: u8,
}

impl Detail for TrustReport {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("User", self.user.clone()),
            ("Trust score", self.trust_score.to_string()),
        ]
    }
}

/// Shows the trust score of `user`, or of the acting user.
///
/// # Errors
///
/// Returns an error if no user is given or the store cannot be read.
pub fn execute(session: &Session, user: Option<&str>) -> Result<Reply> {
    let user = match user {
        Some(user) => user,
        None => session.actor()?,
    };
    let trust_score = session.market().trust_score(user)?;
    Reply::record(&TrustReport {
        user: user.to_string(),
        trust_score,
    })
}
