// Rust guideline compliant 2026-02-09

//! Transaction state machine operations.
//!
//! Every status change is checked against the transaction transition table;
//! the named operations add their own actor rules and side effects on top.

use crate::error::{AppError, Result};
use crate::marketplace::{check_price, ensure_actor, parse_duration_days, required_text, Marketplace};
use serde::{Deserialize, Serialize};
use sharenet_core::fsm::advance;
use sharenet_core::trust::{classify_return, days_late};
use sharenet_core::{Config, Dataset, RelatedType, Transaction, TransactionStatus, TrustOutcome};

/// Final terms proposed by the owner. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgreementTerms {
    /// Agreed price.
    #[serde(default)]
    pub agreed_price: Option<f64>,
    /// Agreed duration in days, as entered.
    #[serde(default)]
    pub agreed_duration: Option<String>,
    /// Free-form terms.
    #[serde(default)]
    pub terms: Option<String>,
    /// Start of the exchange.
    #[serde(default)]
    pub start_date: Option<i64>,
    /// End of the exchange.
    #[serde(default)]
    pub end_date: Option<i64>,
}

/// Outcome of a confirmed return.
#[derive(Debug, Clone, Serialize)]
pub struct ReturnSettlement {
    /// The completed transaction.
    pub transaction: Transaction,
    /// Outcome recorded for the requester.
    pub requester_outcome: TrustOutcome,
    /// Requester score after adjustment.
    pub requester_score: u8,
    /// Owner score after adjustment.
    pub owner_score: u8,
}

/// Applies an outcome to a user's profile and returns the new score.
fn adjust_trust(dataset: &mut Dataset, config: &Config, user: &str, outcome: TrustOutcome, now: i64) -> u8 {
    let profile = dataset.profile_mut(user, config.default_trust_score, now);
    let before = profile.trust_score;
    profile.trust_score = config.trust.apply(before, outcome);
    profile.updated_at = now;
    tracing::info!(user, %outcome, before, after = profile.trust_score, "trust score adjusted");
    profile.trust_score
}

fn require_status(transaction: &Transaction, expected: TransactionStatus, attempted: TransactionStatus) -> Result<()> {
    if transaction.status == expected {
        return Ok(());
    }
    Err(AppError::invalid_state(
        format!(
            "Transaction must be {} to move to {}, but is {}",
            expected, attempted, transaction.status
        ),
        transaction.status,
        attempted,
    ))
}

impl Marketplace {
    /// Moves a transaction along its transition table without side effects.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is a participant and `target` is allowed from the
    /// current status.
    pub fn update_transaction_status(
        &self,
        transaction_id: &str,
        actor: &str,
        target: TransactionStatus,
    ) -> Result<Transaction> {
        self.execute("update_transaction_status", |dataset, outbox, now| {
            let transaction = dataset.transaction_mut(transaction_id)?;
            ensure_actor(transaction.is_participant(actor), "only participants can update a transaction")?;
            advance(&mut transaction.status, target)?;
            transaction.updated_at = now;

            outbox.push(
                transaction.counterparty(actor),
                "TRANSACTION_UPDATED",
                format!("Transaction is now {}", target),
                &transaction.id,
                RelatedType::Transaction,
            );
            Ok(transaction.clone())
        })
    }

    /// Proposes the final terms of an accepted transaction.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the owner and the transaction is ACCEPTED, or
    /// if the duration is not a whole number of days.
    pub fn propose_agreement(&self, transaction_id: &str, actor: &str, terms: AgreementTerms) -> Result<Transaction> {
        check_price(terms.agreed_price)?;
        let duration = terms
            .agreed_duration
            .as_deref()
            .map(parse_duration_days)
            .transpose()?;
        if let (Some(start), Some(end)) = (terms.start_date, terms.end_date) {
            if end < start {
                return Err(AppError::Validation(
                    "end date cannot be before start date".to_string(),
                ));
            }
        }

        self.execute("propose_agreement", |dataset, outbox, now| {
            let transaction = dataset.transaction_mut(transaction_id)?;
            ensure_actor(transaction.owner == actor, "only the owner can propose an agreement")?;
            require_status(transaction, TransactionStatus::Accepted, TransactionStatus::AgreementProposed)?;

            if let Some(price) = terms.agreed_price {
                transaction.agreed_price = price;
            }
            if duration.is_some() {
                transaction.agreed_duration = duration;
            }
            if let Some(text) = terms.terms {
                transaction.terms = Some(text.trim().to_string());
            }
            if terms.start_date.is_some() {
                transaction.start_date = terms.start_date;
            }
            if terms.end_date.is_some() {
                transaction.end_date = terms.end_date;
            }
            advance(&mut transaction.status, TransactionStatus::AgreementProposed)?;
            transaction.updated_at = now;

            outbox.push(
                &transaction.requester,
                "AGREEMENT_PROPOSED",
                format!("Agreement proposed: price {:.2}", transaction.agreed_price),
                &transaction.id,
                RelatedType::Transaction,
            );
            Ok(transaction.clone())
        })
    }

    /// Confirms the proposed agreement, activating the transaction.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the requester and the transaction is
    /// AGREEMENT_PROPOSED.
    pub fn confirm_agreement(&self, transaction_id: &str, actor: &str) -> Result<Transaction> {
        self.execute("confirm_agreement", |dataset, outbox, now| {
            let transaction = dataset.transaction_mut(transaction_id)?;
            ensure_actor(transaction.requester == actor, "only the requester can confirm an agreement")?;
            require_status(transaction, TransactionStatus::AgreementProposed, TransactionStatus::Active)?;

            advance(&mut transaction.status, TransactionStatus::Active)?;
            transaction.start_date.get_or_insert(now);
            transaction.updated_at = now;

            outbox.push(
                &transaction.owner,
                "AGREEMENT_CONFIRMED",
                "The agreement was confirmed; the transaction is active",
                &transaction.id,
                RelatedType::Transaction,
            );
            Ok(transaction.clone())
        })
    }

    /// Reports the item as returned.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the requester and the transaction is ACTIVE.
    pub fn mark_return_pending(&self, transaction_id: &str, actor: &str) -> Result<Transaction> {
        self.execute("mark_return_pending", |dataset, outbox, now| {
            let transaction = dataset.transaction_mut(transaction_id)?;
            ensure_actor(transaction.requester == actor, "only the requester can mark a return")?;
            require_status(transaction, TransactionStatus::Active, TransactionStatus::ReturnPending)?;

            advance(&mut transaction.status, TransactionStatus::ReturnPending)?;
            transaction.updated_at = now;

            outbox.push(
                &transaction.owner,
                "RETURN_PENDING",
                "The item was marked as returned; please confirm",
                &transaction.id,
                RelatedType::Transaction,
            );
            Ok(transaction.clone())
        })
    }

    /// Confirms the return, reopens the item and settles trust scores.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the owner and the transaction is RETURN_PENDING.
    pub fn confirm_return(&self, transaction_id: &str, actor: &str) -> Result<ReturnSettlement> {
        let config = self.config().clone();

        self.execute("confirm_return", |dataset, outbox, now| {
            let transaction = dataset.transaction_mut(transaction_id)?;
            ensure_actor(transaction.owner == actor, "only the owner can confirm a return")?;
            require_status(transaction, TransactionStatus::ReturnPending, TransactionStatus::Completed)?;

            advance(&mut transaction.status, TransactionStatus::Completed)?;
            transaction.end_date = Some(now);
            transaction.actual_return_date = Some(now);
            transaction.updated_at = now;

            let requester_outcome = match (transaction.start_date, transaction.agreed_duration) {
                (Some(start), Some(days)) => {
                    classify_return(days_late(start, days, now), config.minor_late_days)
                }
                _ => TrustOutcome::Completed,
            };
            let transaction = transaction.clone();

            let item = dataset.item_mut(&transaction.item)?;
            item.is_available = true;
            item.updated_at = now;

            let requester_score = adjust_trust(dataset, &config, &transaction.requester, requester_outcome, now);
            let owner_score = adjust_trust(dataset, &config, &transaction.owner, TrustOutcome::Completed, now);

            outbox.push(
                &transaction.requester,
                "RETURN_CONFIRMED",
                format!("Return confirmed ({})", requester_outcome),
                &transaction.id,
                RelatedType::Transaction,
            );
            Ok(ReturnSettlement {
                transaction,
                requester_outcome,
                requester_score,
                owner_score,
            })
        })
    }

    /// Puts a transaction under dispute.
    ///
    /// The raiser always takes the DISPUTE trust penalty, whatever the
    /// eventual resolution.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is a participant, a reason is given and the
    /// transaction can still be disputed.
    pub fn raise_dispute(&self, transaction_id: &str, actor: &str, reason: &str) -> Result<Transaction> {
        let reason = required_text(reason, "reason")?;
        let config = self.config().clone();

        self.execute("raise_dispute", |dataset, outbox, now| {
            let transaction = dataset.transaction_mut(transaction_id)?;
            ensure_actor(transaction.is_participant(actor), "only participants can raise a dispute")?;
            if matches!(
                transaction.status,
                TransactionStatus::Completed | TransactionStatus::Cancelled | TransactionStatus::Disputed
            ) {
                return Err(AppError::invalid_state(
                    format!("Cannot dispute a transaction that is {}", transaction.status),
                    transaction.status,
                    TransactionStatus::Disputed,
                ));
            }

            advance(&mut transaction.status, TransactionStatus::Disputed)?;
            transaction.dispute_reason = Some(reason);
            transaction.dispute_raised_by = Some(actor.to_string());
            transaction.dispute_date = Some(now);
            transaction.updated_at = now;
            let transaction = transaction.clone();

            adjust_trust(dataset, &config, actor, TrustOutcome::Dispute, now);
            outbox.push(
                transaction.counterparty(actor),
                "DISPUTE_RAISED",
                format!("{} raised a dispute", actor),
                &transaction.id,
                RelatedType::Transaction,
            );
            Ok(transaction)
        })
    }

    /// Returns a transaction to one of its participants.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] for non-participants.
    pub fn get_transaction(&self, transaction_id: &str, viewer: &str) -> Result<Transaction> {
        let dataset = self.snapshot()?;
        let transaction = dataset.transaction(transaction_id)?;
        ensure_actor(transaction.is_participant(viewer), "only participants can view a transaction")?;
        Ok(transaction.clone())
    }

    /// Current trust score of `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn trust_score(&self, user: &str) -> Result<u8> {
        Ok(self
            .snapshot()?
            .trust_score(user, self.config().default_trust_score))
    }
}
