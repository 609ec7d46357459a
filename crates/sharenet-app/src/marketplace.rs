// Rust guideline compliant 2026-02-09

//! The service handle every engine operation hangs off.
//!
//! A [`Marketplace`] owns the store plus the injected notifier and clock. Each
//! mutating operation runs through [`Marketplace::execute`], which performs the
//! whole read-validate-write unit under the store lock and dispatches buffered
//! notifications only after the commit succeeded.

use crate::error::{AppError, Result};
use sharenet_core::notify::dispatch;
use sharenet_core::{
    Clock, Config, Dataset, Notification, Notifier, RelatedType, Store, SystemClock,
    TracingNotifier,
};
use std::sync::Arc;

/// Notifications collected while an operation runs.
#[derive(Debug)]
pub(crate) struct Outbox {
    pending: Vec<Notification>,
    now: i64,
}

impl Outbox {
    fn new(now: i64) -> Self {
        Self {
            pending: Vec::new(),
            now,
        }
    }

    /// Queues a notification for `user`.
    pub(crate) fn push(
        &mut self,
        user: &str,
        kind: &str,
        message: impl Into<String>,
        related_id: &str,
        related_type: RelatedType,
    ) {
        self.pending.push(Notification {
            user: user.to_string(),
            kind: kind.to_string(),
            message: message.into(),
            related_id: related_id.to_string(),
            related_type,
            created_at: self.now,
        });
    }
}

/// Entry point for every marketplace operation.
#[derive(Clone)]
pub struct Marketplace {
    store: Store,
    config: Config,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marketplace")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Marketplace {
    /// Creates a marketplace that logs notifications and uses wall-clock time.
    #[must_use]
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store,
            config,
            notifier: Arc::new(TracingNotifier),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replaces the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current time from the injected clock.
    #[must_use]
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Loads a consistent read-only view of every collection.
    pub(crate) fn snapshot(&self) -> Result<Dataset> {
        Ok(self.store.snapshot()?)
    }

    /// Runs one mutating operation as an atomic unit.
    ///
    /// Notifications queued in the [`Outbox`] are delivered only if the
    /// operation committed.
    pub(crate) fn execute<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Dataset, &mut Outbox, i64) -> Result<T>,
    {
        let now = self.clock.now();
        let mut outbox = Outbox::new(now);

        let result = self
            .store
            .atomic(|dataset| f(dataset, &mut outbox, now));

        match result {
            Ok(value) => {
                tracing::info!(operation, notifications = outbox.pending.len(), "committed");
                dispatch(self.notifier.as_ref(), &outbox.pending);
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(operation, code = ?err.code(), error = %err, "rejected");
                Err(err)
            }
        }
    }
}

/// Fails with [`AppError::Forbidden`] unless `allowed` holds.
pub(crate) fn ensure_actor(allowed: bool, message: &str) -> Result<()> {
    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_string()))
    }
}

/// Trims free text and rejects blank input.
pub(crate) fn required_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Rejects negative or non-finite prices.
pub(crate) fn check_price(price: Option<f64>) -> Result<()> {
    match price {
        Some(value) if !value.is_finite() || value < 0.0 => Err(AppError::Validation(format!(
            "price must be a non-negative number, got {}",
            value
        ))),
        _ => Ok(()),
    }
}

/// Parses a duration in whole days.
pub(crate) fn parse_duration_days(value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("duration must be a number of days, got '{}'", value)))
}
