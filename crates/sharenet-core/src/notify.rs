// Rust guideline compliant 2026-02-06

//! Notification sink capability.
//!
//! Delivery is best-effort: callers dispatch after their state change has been
//! committed and a failed delivery never rolls anything back.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Entity a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelatedType {
    /// An item listing.
    Item,
    /// A request.
    Request,
    /// A transaction.
    Transaction,
    /// A lost&found claim.
    LostFoundClaim,
    /// An offer on a wanted item.
    Offer,
}

/// A message for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Recipient.
    pub user: String,
    /// Machine-readable kind, e.g. REQUEST_RECEIVED.
    pub kind: String,
    /// Human-readable text.
    pub message: String,
    /// Referenced entity.
    pub related_id: String,
    /// Type of the referenced entity.
    pub related_type: RelatedType,
    /// Unix timestamp.
    pub created_at: i64,
}

/// Delivers notifications to users.
pub trait Notifier: Send + Sync {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery failed.
    fn notify(&self, notification: &Notification) -> Result<()>;
}

/// Delivers each notification, logging and dropping failures.
pub fn dispatch(notifier: &dyn Notifier, notifications: &[Notification]) {
    for notification in notifications {
        if let Err(err) = notifier.notify(notification) {
            tracing::warn!(
                user = %notification.user,
                kind = %notification.kind,
                error = %err,
                "notification dropped"
            );
        }
    }
}

/// Writes notifications to the tracing log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) -> Result<()> {
        tracing::info!(
            user = %notification.user,
            kind = %notification.kind,
            related_id = %notification.related_id,
            "{}",
            notification.message
        );
        Ok(())
    }
}

/// Appends notifications to a JSONL outbox for a delivery worker to drain.
#[derive(Debug)]
pub struct JsonlNotifier {
    path: PathBuf,
    write_guard: Mutex<()>,
}

impl JsonlNotifier {
    /// Creates a notifier writing to `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_guard: Mutex::new(()),
        }
    }
}

impl Notifier for JsonlNotifier {
    fn notify(&self, notification: &Notification) -> Result<()> {
        let line = serde_json::to_string(notification)?;
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }
}
