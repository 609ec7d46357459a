// Rust guideline compliant 2026-02-09

//! Request engine: negotiation between one owner and one requester.
//!
//! Acceptance and instant claims check and flip item availability inside the
//! same store transaction that creates the request or transaction, so two
//! racing callers cannot both take the last slot.

use crate::error::{AppError, Result};
use crate::marketplace::{check_price, ensure_actor, required_text, Marketplace, Outbox};
use serde::{Deserialize, Serialize};
use sharenet_core::fsm::advance;
use sharenet_core::identity::{unique_id, CLAIM_ENTRY_PREFIX, REQUEST_PREFIX, TRANSACTION_PREFIX};
use sharenet_core::{
    ClaimEntry, ClaimEntryStatus, CounterOffer, CounterOfferStatus, Dataset, Item, ItemMode,
    NegotiationEntry, NegotiationKind, PickupDetails, RelatedType, Request, RequestStatus,
    RequestType, Transaction, TransactionStatus,
};

const ITEM_UNAVAILABLE: &str = "Item is no longer available";

/// Optional terms sent with a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRequest {
    /// Message to the owner.
    #[serde(default)]
    pub description: Option<String>,
    /// Proposed price.
    #[serde(default)]
    pub proposed_price: Option<f64>,
    /// Proposed duration in days, as entered.
    #[serde(default)]
    pub proposed_duration: Option<String>,
}

/// Terms of a counter offer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CounterTerms {
    /// Counter price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Counter duration.
    #[serde(default)]
    pub duration: Option<String>,
    /// Message to the requester.
    #[serde(default)]
    pub message: Option<String>,
}

/// Proposed pickup arrangement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupProposal {
    /// Meeting place.
    pub location: String,
    /// Proposed time (unix seconds).
    pub proposed_time: i64,
    /// Extra instructions.
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Outcome of accepting a request or counter offer.
#[derive(Debug, Clone, Serialize)]
pub struct Acceptance {
    /// The accepted request.
    pub request: Request,
    /// The spawned transaction.
    pub transaction: Transaction,
}

/// Outcome of a counter-offer response.
#[derive(Debug, Clone, Serialize)]
pub struct CounterResponse {
    /// The updated request.
    pub request: Request,
    /// Present when the counter offer was accepted.
    pub transaction: Option<Transaction>,
}

/// Outcome of an instant claim.
#[derive(Debug, Clone, Serialize)]
pub struct InstantClaimReceipt {
    /// The item after the claim.
    pub item: Item,
    /// Auto-accepted request recording the claim.
    pub request: Request,
}

/// Pending pickups on an item, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimQueue {
    /// Item identifier.
    pub item: String,
    /// Queue capacity.
    pub max_claimers: u32,
    /// Entries waiting for pickup in FIFO order.
    pub entries: Vec<ClaimEntry>,
}

fn unavailable(attempted: &str) -> AppError {
    AppError::invalid_state(ITEM_UNAVAILABLE, "UNAVAILABLE", attempted)
}

fn require_request_status(
    request: &Request,
    allowed: &[RequestStatus],
    attempted: RequestStatus,
) -> Result<()> {
    if allowed.contains(&request.status) {
        return Ok(());
    }
    Err(AppError::invalid_state(
        format!(
            "Request is {}, cannot move to {}",
            request.status, attempted
        ),
        request.status,
        attempted,
    ))
}

/// Creates the transaction for an accepted request and closes the item.
fn spawn_transaction(dataset: &mut Dataset, request: &Request, now: i64) -> Result<Transaction> {
    let item = dataset.item(&request.item)?;
    if !item.is_available {
        return Err(unavailable("ACCEPTED"));
    }

    let agreed_duration = request
        .proposed_duration
        .as_deref()
        .and_then(|value| value.trim().parse::<u32>().ok());
    let id = unique_id(
        TRANSACTION_PREFIX,
        &[request.id.as_str(), item.id.as_str()],
        now,
        |candidate| dataset.transactions.iter().any(|t| t.id == candidate),
    );

    let transaction = Transaction {
        id,
        item: item.id.clone(),
        owner: request.owner.clone(),
        requester: request.requester.clone(),
        request: Some(request.id.clone()),
        mode: item.mode,
        agreed_price: request.proposed_price.or(item.price).unwrap_or(0.0),
        agreed_duration,
        terms: None,
        status: TransactionStatus::Accepted,
        start_date: None,
        end_date: None,
        actual_return_date: None,
        dispute_reason: None,
        dispute_raised_by: None,
        dispute_date: None,
        created_at: now,
        updated_at: now,
    };

    let item = dataset.item_mut(&request.item)?;
    item.is_available = false;
    item.updated_at = now;
    dataset.transactions.push(transaction.clone());
    Ok(transaction)
}

fn notify_accepted(outbox: &mut Outbox, request: &Request, transaction: &Transaction) {
    outbox.push(
        &request.requester,
        "REQUEST_ACCEPTED",
        format!("Your request was accepted; transaction {} created", transaction.id),
        &transaction.id,
        RelatedType::Transaction,
    );
}

impl Marketplace {
    /// Submits a request for an item.
    ///
    /// # Errors
    ///
    /// Fails if the item does not exist, is unavailable, belongs to the
    /// requester, or the requester already has an open request on it.
    pub fn create_request(&self, item_id: &str, requester: &str, input: NewRequest) -> Result<Request> {
        check_price(input.proposed_price)?;

        self.execute("create_request", |dataset, outbox, now| {
            let item = dataset.item(item_id)?;
            if item.owner == requester {
                return Err(AppError::Validation(
                    "You cannot request your own item".to_string(),
                ));
            }
            if !item.is_available {
                return Err(unavailable("PENDING"));
            }
            let open = dataset.requests.iter().any(|r| {
                r.item == item_id
                    && r.requester == requester
                    && matches!(r.status, RequestStatus::Pending | RequestStatus::CounterOffered)
            });
            if open {
                return Err(AppError::Conflict(
                    "You already have a pending request for this item".to_string(),
                ));
            }

            let id = unique_id(REQUEST_PREFIX, &[item_id, requester], now, |candidate| {
                dataset.requests.iter().any(|r| r.id == candidate)
            });
            let request = Request {
                id,
                item: item.id.clone(),
                requester: requester.to_string(),
                owner: item.owner.clone(),
                status: RequestStatus::Pending,
                description: input.description.map(|d| d.trim().to_string()),
                proposed_price: input.proposed_price,
                proposed_duration: input.proposed_duration,
                counter_offer: None,
                negotiation_history: Vec::new(),
                request_type: RequestType::Standard,
                priority: 0,
                rejection_reason: None,
                pickup_details: None,
                created_at: now,
                updated_at: now,
            };
            outbox.push(
                &request.owner,
                "REQUEST_RECEIVED",
                format!("{} requested your item \"{}\"", requester, item.title),
                &request.id,
                RelatedType::Request,
            );
            dataset.requests.push(request.clone());
            Ok(request)
        })
    }

    /// Accepts a pending request and spawns its transaction.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` owns the request's item, the request is PENDING
    /// and the item is still available.
    pub fn accept_request(&self, request_id: &str, actor: &str) -> Result<Acceptance> {
        self.execute("accept_request", |dataset, outbox, now| {
            let mut request = dataset.request(request_id)?.clone();
            ensure_actor(request.owner == actor, "only the item owner can accept a request")?;
            require_request_status(&request, &[RequestStatus::Pending], RequestStatus::Accepted)?;

            advance(&mut request.status, RequestStatus::Accepted)?;
            request.updated_at = now;
            let transaction = spawn_transaction(dataset, &request, now)?;
            *dataset.request_mut(request_id)? = request.clone();

            notify_accepted(outbox, &request, &transaction);
            Ok(Acceptance {
                request,
                transaction,
            })
        })
    }

    /// Declines a pending request.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the owner and the request is PENDING.
    pub fn reject_request(&self, request_id: &str, actor: &str, reason: Option<String>) -> Result<Request> {
        self.execute("reject_request", |dataset, outbox, now| {
            let request = dataset.request_mut(request_id)?;
            ensure_actor(request.owner == actor, "only the item owner can reject a request")?;
            require_request_status(request, &[RequestStatus::Pending], RequestStatus::Rejected)?;

            advance(&mut request.status, RequestStatus::Rejected)?;
            request.rejection_reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
            request.updated_at = now;

            let message = match &request.rejection_reason {
                Some(reason) => format!("Your request was declined: {}", reason),
                None => "Your request was declined".to_string(),
            };
            outbox.push(
                &request.requester,
                "REQUEST_REJECTED",
                message,
                &request.id,
                RelatedType::Request,
            );
            Ok(request.clone())
        })
    }

    /// Withdraws a pending request.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the requester and the request is PENDING.
    pub fn cancel_request(&self, request_id: &str, actor: &str) -> Result<Request> {
        self.execute("cancel_request", |dataset, outbox, now| {
            let request = dataset.request_mut(request_id)?;
            ensure_actor(request.requester == actor, "only the requester can cancel a request")?;
            require_request_status(request, &[RequestStatus::Pending], RequestStatus::Cancelled)?;

            advance(&mut request.status, RequestStatus::Cancelled)?;
            request.updated_at = now;
            outbox.push(
                &request.owner,
                "REQUEST_CANCELLED",
                format!("{} withdrew their request", request.requester),
                &request.id,
                RelatedType::Request,
            );
            Ok(request.clone())
        })
    }

    /// Proposes different terms to the requester, replacing any earlier counter offer.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the owner and the request is PENDING or
    /// COUNTER_OFFERED.
    pub fn create_counter_offer(&self, request_id: &str, actor: &str, terms: CounterTerms) -> Result<Request> {
        check_price(terms.price)?;
        if terms.price.is_none() && terms.duration.is_none() {
            return Err(AppError::Validation(
                "a counter offer needs a price or a duration".to_string(),
            ));
        }

        self.execute("create_counter_offer", |dataset, outbox, now| {
            let request = dataset.request_mut(request_id)?;
            ensure_actor(request.owner == actor, "only the item owner can counter a request")?;
            require_request_status(
                request,
                &[RequestStatus::Pending, RequestStatus::CounterOffered],
                RequestStatus::CounterOffered,
            )?;

            advance(&mut request.status, RequestStatus::CounterOffered)?;
            let message = terms.message.map(|m| m.trim().to_string()).filter(|m| !m.is_empty());
            request.negotiation_history.push(NegotiationEntry {
                kind: NegotiationKind::Counter,
                price: terms.price,
                duration: terms.duration.clone(),
                message: message.clone(),
                by: actor.to_string(),
                timestamp: now,
            });
            request.counter_offer = Some(CounterOffer {
                price: terms.price,
                duration: terms.duration,
                message,
                proposed_by: actor.to_string(),
                status: CounterOfferStatus::Pending,
            });
            request.updated_at = now;

            outbox.push(
                &request.requester,
                "COUNTER_OFFER",
                "The owner proposed different terms for your request",
                &request.id,
                RelatedType::Request,
            );
            Ok(request.clone())
        })
    }

    /// Accepts or rejects the pending counter offer.
    ///
    /// Accepting spawns the transaction exactly like [`Marketplace::accept_request`];
    /// rejecting returns the request to PENDING for further negotiation.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is the requester and a counter offer is pending.
    pub fn respond_to_counter_offer(&self, request_id: &str, actor: &str, accept: bool) -> Result<CounterResponse> {
        self.execute("respond_to_counter_offer", |dataset, outbox, now| {
            let mut request = dataset.request(request_id)?.clone();
            ensure_actor(request.requester == actor, "only the requester can respond to a counter offer")?;
            let target = if accept {
                RequestStatus::Accepted
            } else {
                RequestStatus::Pending
            };
            require_request_status(&request, &[RequestStatus::CounterOffered], target)?;

            let counter = match request.counter_offer.as_mut() {
                Some(counter) if counter.status == CounterOfferStatus::Pending => counter,
                _ => {
                    return Err(AppError::invalid_state(
                        "There is no pending counter offer",
                        request.status,
                        target,
                    ))
                }
            };
            counter.status = if accept {
                CounterOfferStatus::Accepted
            } else {
                CounterOfferStatus::Rejected
            };
            let (price, duration) = (counter.price, counter.duration.clone());
            request.negotiation_history.push(NegotiationEntry {
                kind: if accept {
                    NegotiationKind::Accept
                } else {
                    NegotiationKind::Reject
                },
                price,
                duration: duration.clone(),
                message: None,
                by: actor.to_string(),
                timestamp: now,
            });
            advance(&mut request.status, target)?;
            request.updated_at = now;

            let transaction = if accept {
                if price.is_some() {
                    request.proposed_price = price;
                }
                if duration.is_some() {
                    request.proposed_duration = duration;
                }
                let transaction = spawn_transaction(dataset, &request, now)?;
                outbox.push(
                    &request.owner,
                    "COUNTER_OFFER_ACCEPTED",
                    format!("Your counter offer was accepted; transaction {} created", transaction.id),
                    &transaction.id,
                    RelatedType::Transaction,
                );
                Some(transaction)
            } else {
                outbox.push(
                    &request.owner,
                    "COUNTER_OFFER_REJECTED",
                    "Your counter offer was declined",
                    &request.id,
                    RelatedType::Request,
                );
                None
            };

            *dataset.request_mut(request_id)? = request.clone();
            Ok(CounterResponse {
                request,
                transaction,
            })
        })
    }

    /// Claims a free item without negotiation.
    ///
    /// # Errors
    ///
    /// Fails if the item does not allow instant claims, is unavailable, is
    /// owned by `actor`, is already claimed by `actor` or its queue is full.
    pub fn instant_claim(&self, item_id: &str, actor: &str) -> Result<InstantClaimReceipt> {
        self.execute("instant_claim", |dataset, outbox, now| {
            let item = dataset.item(item_id)?;
            if !item.instant_claim || item.mode != ItemMode::Give {
                return Err(AppError::Validation(
                    "This item is not available for instant claim".to_string(),
                ));
            }
            if item.owner == actor {
                return Err(AppError::Validation(
                    "You cannot claim your own item".to_string(),
                ));
            }
            if !item.is_available {
                return Err(unavailable("INSTANT_CLAIM"));
            }
            if item.has_live_claim(actor) {
                return Err(AppError::Conflict(
                    "You have already claimed this item".to_string(),
                ));
            }
            let active = item.active_claims();
            if active >= item.max_claimers as usize {
                return Err(AppError::Conflict(format!(
                    "Maximum claimers ({}) reached for this item",
                    item.max_claimers
                )));
            }

            let entry_id = unique_id(CLAIM_ENTRY_PREFIX, &[item_id, actor], now, |candidate| {
                item.claimed_by.iter().any(|entry| entry.id == candidate)
            });
            let request_id = unique_id(REQUEST_PREFIX, &[item_id, actor], now, |candidate| {
                dataset.requests.iter().any(|r| r.id == candidate)
            });
            let priority = u32::try_from(active + 1).unwrap_or(u32::MAX);
            let owner = item.owner.clone();
            let title = item.title.clone();

            let item = dataset.item_mut(item_id)?;
            item.claimed_by.push(ClaimEntry {
                id: entry_id,
                user: actor.to_string(),
                claimed_at: now,
                status: ClaimEntryStatus::PendingPickup,
            });
            if item.active_claims() >= item.max_claimers as usize {
                item.is_available = false;
            }
            item.updated_at = now;
            let item = item.clone();

            let request = Request {
                id: request_id,
                item: item_id.to_string(),
                requester: actor.to_string(),
                owner: owner.clone(),
                status: RequestStatus::Accepted,
                description: None,
                proposed_price: None,
                proposed_duration: None,
                counter_offer: None,
                negotiation_history: Vec::new(),
                request_type: RequestType::InstantClaim,
                priority,
                rejection_reason: None,
                pickup_details: None,
                created_at: now,
                updated_at: now,
            };
            dataset.requests.push(request.clone());

            outbox.push(
                &owner,
                "ITEM_CLAIMED",
                format!("{} claimed \"{}\" (#{} in queue)", actor, title, priority),
                &request.id,
                RelatedType::Request,
            );
            Ok(InstantClaimReceipt { item, request })
        })
    }

    /// Returns the FIFO pickup queue of an item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `actor` owns the item.
    pub fn get_claim_queue(&self, item_id: &str, actor: &str) -> Result<ClaimQueue> {
        let dataset = self.snapshot()?;
        let item = dataset.item(item_id)?;
        ensure_actor(item.owner == actor, "only the owner can view the claim queue")?;
        Ok(ClaimQueue {
            item: item.id.clone(),
            max_claimers: item.max_claimers,
            entries: item.claim_queue(),
        })
    }

    /// Marks an accepted request as picked up.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is a participant and the request is ACCEPTED.
    pub fn confirm_pickup(&self, request_id: &str, actor: &str) -> Result<Request> {
        self.execute("confirm_pickup", |dataset, outbox, now| {
            let request = dataset.request_mut(request_id)?;
            ensure_actor(request.is_participant(actor), "only participants can confirm pickup")?;
            require_request_status(request, &[RequestStatus::Accepted], RequestStatus::Completed)?;

            advance(&mut request.status, RequestStatus::Completed)?;
            request.updated_at = now;
            let request = request.clone();

            if request.request_type == RequestType::InstantClaim {
                let item = dataset.item_mut(&request.item)?;
                if let Some(entry) = item.claimed_by.iter_mut().find(|entry| {
                    entry.user == request.requester && entry.status == ClaimEntryStatus::PendingPickup
                }) {
                    entry.status = ClaimEntryStatus::Completed;
                    item.updated_at = now;
                }
            }

            outbox.push(
                request.counterparty(actor),
                "PICKUP_CONFIRMED",
                format!("{} confirmed the pickup", actor),
                &request.id,
                RelatedType::Request,
            );
            Ok(request)
        })
    }

    /// Attaches a proposed pickup arrangement to an accepted request.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is a participant, the request is ACCEPTED and the
    /// location is not blank.
    pub fn propose_pickup_details(&self, request_id: &str, actor: &str, proposal: PickupProposal) -> Result<Request> {
        let location = required_text(&proposal.location, "location")?;

        self.execute("propose_pickup_details", |dataset, outbox, now| {
            let request = dataset.request_mut(request_id)?;
            ensure_actor(request.is_participant(actor), "only participants can arrange pickup")?;
            if request.status != RequestStatus::Accepted {
                return Err(AppError::invalid_state(
                    "Pickup can only be arranged for accepted requests",
                    request.status,
                    "PICKUP_PROPOSED",
                ));
            }

            request.pickup_details = Some(PickupDetails {
                location,
                proposed_time: proposal.proposed_time,
                instructions: proposal.instructions,
                confirmed_time: None,
            });
            request.updated_at = now;
            outbox.push(
                request.counterparty(actor),
                "PICKUP_PROPOSED",
                format!("{} proposed pickup details", actor),
                &request.id,
                RelatedType::Request,
            );
            Ok(request.clone())
        })
    }

    /// Confirms the proposed pickup time.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` is a participant, the request is ACCEPTED and
    /// pickup details were proposed.
    pub fn confirm_pickup_details(&self, request_id: &str, actor: &str) -> Result<Request> {
        self.execute("confirm_pickup_details", |dataset, outbox, now| {
            let request = dataset.request_mut(request_id)?;
            ensure_actor(request.is_participant(actor), "only participants can confirm pickup details")?;
            if request.status != RequestStatus::Accepted {
                return Err(AppError::invalid_state(
                    "Pickup can only be arranged for accepted requests",
                    request.status,
                    "PICKUP_CONFIRMED",
                ));
            }
            let details = request.pickup_details.as_mut().ok_or_else(|| {
                AppError::invalid_state("No pickup details have been proposed", "NONE", "PICKUP_CONFIRMED")
            })?;

            details.confirmed_time = Some(details.proposed_time);
            request.updated_at = now;
            outbox.push(
                request.counterparty(actor),
                "PICKUP_DETAILS_CONFIRMED",
                format!("{} confirmed the pickup time", actor),
                &request.id,
                RelatedType::Request,
            );
            Ok(request.clone())
        })
    }
}
