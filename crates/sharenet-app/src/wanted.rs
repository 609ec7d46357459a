// Rust guideline compliant 2026-02-09

//! Wanted items and the offers made against them.
//!
//! Offers live inside their wanted item and are only changed through it.

use crate::error::{AppError, Result};
use crate::marketplace::{check_price, ensure_actor, required_text, Marketplace};
use serde::{Deserialize, Serialize};
use sharenet_core::fsm::advance;
use sharenet_core::identity::{unique_id, OFFER_PREFIX, WANTED_PREFIX};
use sharenet_core::{Offer, OfferStatus, OfferType, RelatedType, WantedItem, WantedStatus};

/// Input for a new wanted item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWanted {
    /// One-line title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Highest acceptable price.
    #[serde(default)]
    pub max_budget: Option<f64>,
}

/// Input for a new offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOffer {
    /// Message to the poster.
    pub message: String,
    /// Offer terms.
    pub offer_type: OfferType,
    /// Asking price; ignored for free offers.
    #[serde(default)]
    pub price: Option<f64>,
}

fn offer_mut<'a>(wanted: &'a mut WantedItem, offer_id: &str) -> Result<&'a mut Offer> {
    wanted
        .offers
        .iter_mut()
        .find(|offer| offer.id == offer_id)
        .ok_or_else(|| AppError::NotFound {
            entity: "offer",
            id: offer_id.to_string(),
        })
}

fn require_open(wanted: &WantedItem, attempted: &str) -> Result<()> {
    if wanted.status == WantedStatus::Open {
        return Ok(());
    }
    Err(AppError::invalid_state(
        format!("Wanted item is {}", wanted.status),
        wanted.status,
        attempted,
    ))
}

impl Marketplace {
    /// Posts a wanted item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a blank title or negative budget.
    pub fn create_wanted(&self, user: &str, input: NewWanted) -> Result<WantedItem> {
        let title = required_text(&input.title, "title")?;
        check_price(input.max_budget)?;

        self.execute("create_wanted", |dataset, _outbox, now| {
            let id = unique_id(WANTED_PREFIX, &[user, title.as_str()], now, |candidate| {
                dataset.wanted.iter().any(|w| w.id == candidate)
            });
            let wanted = WantedItem {
                id,
                user: user.to_string(),
                title,
                description: input.description.trim().to_string(),
                max_budget: input.max_budget,
                status: WantedStatus::Open,
                offers: Vec::new(),
                accepted_offer: None,
                fulfilled_by: None,
                created_at: now,
                updated_at: now,
            };
            dataset.wanted.push(wanted.clone());
            Ok(wanted)
        })
    }

    /// Returns a wanted item with its offers.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id.
    pub fn get_wanted(&self, wanted_id: &str) -> Result<WantedItem> {
        Ok(self.snapshot()?.wanted(wanted_id)?.clone())
    }

    /// Offers to fulfil a wanted item.
    ///
    /// # Errors
    ///
    /// Fails if the wanted item is not OPEN, belongs to `actor`, or `actor`
    /// already has a pending offer on it.
    pub fn make_offer(&self, wanted_id: &str, actor: &str, input: NewOffer) -> Result<Offer> {
        let message = required_text(&input.message, "message")?;
        check_price(input.price)?;

        self.execute("make_offer", |dataset, outbox, now| {
            let wanted = dataset.wanted_mut(wanted_id)?;
            require_open(wanted, "OFFER")?;
            if wanted.user == actor {
                return Err(AppError::Validation(
                    "You cannot make an offer on your own wanted item".to_string(),
                ));
            }
            if wanted
                .offers
                .iter()
                .any(|o| o.offerer == actor && o.status == OfferStatus::Pending)
            {
                return Err(AppError::Conflict(
                    "You already have a pending offer on this item".to_string(),
                ));
            }

            let id = unique_id(OFFER_PREFIX, &[wanted_id, actor], now, |candidate| {
                wanted.offers.iter().any(|o| o.id == candidate)
            });
            let offer = Offer {
                id,
                offerer: actor.to_string(),
                message,
                offer_type: input.offer_type,
                price: match input.offer_type {
                    OfferType::Free => None,
                    OfferType::Sell | OfferType::Rent => input.price,
                },
                status: OfferStatus::Pending,
                chat_enabled: false,
                created_at: now,
            };
            wanted.offers.push(offer.clone());
            wanted.updated_at = now;

            outbox.push(
                &wanted.user,
                "OFFER_RECEIVED",
                format!("{} made an offer on \"{}\"", actor, wanted.title),
                &offer.id,
                RelatedType::Offer,
            );
            Ok(offer)
        })
    }

    /// Accepts one offer, fulfilling the wanted item and rejecting the rest.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` posted the wanted item, it is OPEN and the offer
    /// is PENDING.
    pub fn accept_offer(&self, wanted_id: &str, offer_id: &str, actor: &str) -> Result<WantedItem> {
        self.execute("accept_offer", |dataset, outbox, now| {
            let wanted = dataset.wanted_mut(wanted_id)?;
            ensure_actor(wanted.user == actor, "only the poster can accept an offer")?;
            require_open(wanted, "FULFILLED")?;

            let offer = offer_mut(wanted, offer_id)?;
            advance(&mut offer.status, OfferStatus::Accepted)?;
            offer.chat_enabled = true;
            let offerer = offer.offerer.clone();

            for other in wanted
                .offers
                .iter_mut()
                .filter(|o| o.id != offer_id && o.status == OfferStatus::Pending)
            {
                advance(&mut other.status, OfferStatus::Rejected)?;
                outbox.push(
                    &other.offerer,
                    "OFFER_REJECTED",
                    format!("Another offer was accepted for \"{}\"", wanted.title),
                    &other.id,
                    RelatedType::Offer,
                );
            }

            advance(&mut wanted.status, WantedStatus::Fulfilled)?;
            wanted.accepted_offer = Some(offer_id.to_string());
            wanted.fulfilled_by = Some(offerer.clone());
            wanted.updated_at = now;

            outbox.push(
                &offerer,
                "OFFER_ACCEPTED",
                format!("Your offer on \"{}\" was accepted", wanted.title),
                offer_id,
                RelatedType::Offer,
            );
            Ok(wanted.clone())
        })
    }

    /// Declines a pending offer.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` posted the wanted item and the offer is PENDING.
    pub fn reject_offer(&self, wanted_id: &str, offer_id: &str, actor: &str) -> Result<WantedItem> {
        self.execute("reject_offer", |dataset, outbox, now| {
            let wanted = dataset.wanted_mut(wanted_id)?;
            ensure_actor(wanted.user == actor, "only the poster can reject an offer")?;

            let offer = offer_mut(wanted, offer_id)?;
            advance(&mut offer.status, OfferStatus::Rejected)?;
            let offerer = offer.offerer.clone();
            wanted.updated_at = now;

            outbox.push(
                &offerer,
                "OFFER_REJECTED",
                format!("Your offer on \"{}\" was declined", wanted.title),
                offer_id,
                RelatedType::Offer,
            );
            Ok(wanted.clone())
        })
    }

    /// Withdraws a pending offer.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` made the offer and it is PENDING.
    pub fn cancel_offer(&self, wanted_id: &str, offer_id: &str, actor: &str) -> Result<WantedItem> {
        self.execute("cancel_offer", |dataset, _outbox, now| {
            let wanted = dataset.wanted_mut(wanted_id)?;
            let offer = offer_mut(wanted, offer_id)?;
            ensure_actor(offer.offerer == actor, "only the offerer can cancel an offer")?;
            advance(&mut offer.status, OfferStatus::Cancelled)?;
            wanted.updated_at = now;
            Ok(wanted.clone())
        })
    }

    /// Marks a wanted item fulfilled outside the offer flow.
    ///
    /// # Errors
    ///
    /// Fails unless `actor` posted it and it is not already FULFILLED.
    pub fn mark_fulfilled(&self, wanted_id: &str, actor: &str) -> Result<WantedItem> {
        self.execute("mark_fulfilled", |dataset, _outbox, now| {
            let wanted = dataset.wanted_mut(wanted_id)?;
            ensure_actor(wanted.user == actor, "only the poster can mark it fulfilled")?;
            if wanted.status == WantedStatus::Fulfilled {
                return Err(AppError::invalid_state(
                    "Wanted item is already fulfilled",
                    wanted.status,
                    WantedStatus::Fulfilled,
                ));
            }
            advance(&mut wanted.status, WantedStatus::Fulfilled)?;
            wanted.updated_at = now;
            Ok(wanted.clone())
        })
    }
}
