// Rust guideline compliant 2026-02-09

//! Item listings and lost&found posts.

use crate::error::{AppError, Result};
use crate::marketplace::{check_price, ensure_actor, required_text, Marketplace};
use serde::{Deserialize, Serialize};
use sharenet_core::fsm::advance;
use sharenet_core::identity::{unique_id, ITEM_PREFIX, POST_PREFIX, QUESTION_PREFIX};
use sharenet_core::{
    Item, ItemMode, LostFoundPost, PostStatus, PostType, Transition, VerificationQuestion,
};

/// Input for a new listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    /// One-line title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Offer mode.
    pub mode: ItemMode,
    /// Price, required for RENT and SELL.
    #[serde(default)]
    pub price: Option<f64>,
    /// Allow claims without negotiation (GIVE only).
    #[serde(default)]
    pub instant_claim: bool,
    /// Capacity of the claim queue.
    #[serde(default = "one")]
    pub max_claimers: u32,
}

fn one() -> u32 {
    1
}

/// Owner edits to a listing. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New offer mode.
    #[serde(default)]
    pub mode: Option<ItemMode>,
    /// New price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Toggle instant claims.
    #[serde(default)]
    pub instant_claim: Option<bool>,
    /// New claim queue capacity.
    #[serde(default)]
    pub max_claimers: Option<u32>,
}

/// Rules shared by new and edited listings.
fn check_listing(mode: ItemMode, price: Option<f64>, instant_claim: bool, max_claimers: u32) -> Result<()> {
    check_price(price)?;
    if mode.requires_price() && price.is_none() {
        return Err(AppError::Validation(format!(
            "price is required for {} items",
            mode
        )));
    }
    if max_claimers == 0 {
        return Err(AppError::Validation(
            "max_claimers must be at least 1".to_string(),
        ));
    }
    if instant_claim && mode != ItemMode::Give {
        return Err(AppError::Validation(
            "instant claim is only available for GIVE items".to_string(),
        ));
    }
    Ok(())
}

/// Owner-authored question with its expected answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionInput {
    /// Question text.
    pub question: String,
    /// Expected answer.
    pub answer: String,
}

/// Input for a new lost&found post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    /// Lost or found.
    pub post_type: PostType,
    /// One-line title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Where it was lost or found.
    #[serde(default)]
    pub location: String,
    /// Challenge questions in display order.
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

impl Marketplace {
    /// Lists an item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title is blank, a RENT/SELL item
    /// has no price, `max_claimers` is zero or instant claim is requested for a
    /// non-GIVE item.
    pub fn create_item(&self, owner: &str, input: NewItem) -> Result<Item> {
        let title = required_text(&input.title, "title")?;
        check_listing(input.mode, input.price, input.instant_claim, input.max_claimers)?;

        self.execute("create_item", |dataset, _outbox, now| {
            let id = unique_id(ITEM_PREFIX, &[owner, title.as_str()], now, |candidate| {
                dataset.items.iter().any(|item| item.id == candidate)
            });
            let mut item = Item::new(id, owner.to_string(), title, input.mode, now);
            item.description = input.description.trim().to_string();
            item.price = if input.mode == ItemMode::Give {
                None
            } else {
                input.price
            };
            item.instant_claim = input.instant_claim;
            item.max_claimers = input.max_claimers;
            dataset.items.push(item.clone());
            Ok(item)
        })
    }

    /// Returns a listing.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown item.
    pub fn get_item(&self, item_id: &str) -> Result<Item> {
        Ok(self.snapshot()?.item(item_id)?.clone())
    }

    /// Edits a listing owned by `actor`.
    ///
    /// A GIVE item drops its price. Capacity cannot shrink below the claims
    /// already waiting for pickup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `actor` owns the item, or
    /// [`AppError::Validation`] if the edited listing breaks a listing rule.
    pub fn update_item(&self, item_id: &str, actor: &str, update: ItemUpdate) -> Result<Item> {
        let title = update
            .title
            .as_deref()
            .map(|title| required_text(title, "title"))
            .transpose()?;

        self.execute("update_item", |dataset, _outbox, now| {
            let item = dataset.item_mut(item_id)?;
            ensure_actor(item.owner == actor, "only the owner can edit a listing")?;

            let mode = update.mode.unwrap_or(item.mode);
            let price = if mode == ItemMode::Give {
                None
            } else {
                update.price.or(item.price)
            };
            let instant_claim = update.instant_claim.unwrap_or(item.instant_claim);
            let max_claimers = update.max_claimers.unwrap_or(item.max_claimers);
            check_listing(mode, price, instant_claim, max_claimers)?;
            if (max_claimers as usize) < item.active_claims() {
                return Err(AppError::Validation(format!(
                    "max_claimers cannot drop below the {} claim(s) awaiting pickup",
                    item.active_claims()
                )));
            }

            if let Some(title) = title {
                item.title = title;
            }
            if let Some(description) = update.description {
                item.description = description.trim().to_string();
            }
            item.mode = mode;
            item.price = price;
            item.instant_claim = instant_claim;
            item.max_claimers = max_claimers;
            item.updated_at = now;
            Ok(item.clone())
        })
    }

    /// Manually opens or closes a listing.
    ///
    /// Reopening is refused while the item is committed elsewhere, so the
    /// item never carries more than one live transaction or more claims than
    /// its capacity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `actor` owns the item, or an
    /// invalid-state error when reopening an item with a transaction in
    /// progress or a full claim queue.
    pub fn set_item_availability(&self, item_id: &str, actor: &str, available: bool) -> Result<Item> {
        self.execute("set_item_availability", |dataset, _outbox, now| {
            let item = dataset.item(item_id)?;
            ensure_actor(item.owner == actor, "only the owner can change availability")?;
            if available && !item.is_available {
                let in_progress = dataset
                    .transactions
                    .iter()
                    .any(|t| t.item == item_id && !t.status.is_terminal());
                if in_progress {
                    return Err(AppError::invalid_state(
                        "Item has a transaction in progress",
                        "UNAVAILABLE",
                        "AVAILABLE",
                    ));
                }
                if item.instant_claim && item.active_claims() >= item.max_claimers as usize {
                    return Err(AppError::invalid_state(
                        "Item claim queue is full",
                        "UNAVAILABLE",
                        "AVAILABLE",
                    ));
                }
            }

            let item = dataset.item_mut(item_id)?;
            if item.is_available != available {
                item.is_available = available;
                item.updated_at = now;
            }
            Ok(item.clone())
        })
    }

    /// Creates an OPEN lost&found post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title, a question or an answer is blank.
    pub fn create_post(&self, user: &str, input: NewPost) -> Result<LostFoundPost> {
        let title = required_text(&input.title, "title")?;
        let mut questions = Vec::with_capacity(input.questions.len());
        for q in &input.questions {
            questions.push((
                required_text(&q.question, "question")?,
                required_text(&q.answer, "answer")?,
            ));
        }

        self.execute("create_post", |dataset, _outbox, now| {
            let id = unique_id(POST_PREFIX, &[user, title.as_str()], now, |candidate| {
                dataset.posts.iter().any(|post| post.id == candidate)
            });
            let verification_questions = questions
                .into_iter()
                .enumerate()
                .map(|(index, (question, answer))| {
                    let position = index.to_string();
                    VerificationQuestion {
                        id: unique_id(QUESTION_PREFIX, &[id.as_str(), position.as_str()], now, |_| false),
                        question,
                        answer: Some(answer),
                    }
                })
                .collect();

            let post = LostFoundPost {
                id,
                user: user.to_string(),
                post_type: input.post_type,
                title,
                description: input.description.trim().to_string(),
                location: input.location.trim().to_string(),
                status: PostStatus::Open,
                verification_questions,
                claims_count: 0,
                resolved_with: None,
                resolved_at: None,
                is_resolved: false,
                created_at: now,
                updated_at: now,
            };
            dataset.posts.push(post.clone());
            Ok(post)
        })
    }

    /// Returns a post as `viewer` may see it; answers are stripped for non-owners.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown post.
    pub fn get_post_detail(&self, post_id: &str, viewer: &str) -> Result<LostFoundPost> {
        let dataset = self.snapshot()?;
        let post = dataset.post(post_id)?;
        if post.user == viewer {
            Ok(post.clone())
        } else {
            Ok(post.redacted())
        }
    }

    /// Closes a post to new claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `actor` is the poster, or an
    /// invalid-state error if the post is already resolved or expired.
    pub fn expire_post(&self, post_id: &str, actor: &str) -> Result<LostFoundPost> {
        self.execute("expire_post", |dataset, _outbox, now| {
            let post = dataset.post_mut(post_id)?;
            ensure_actor(post.user == actor, "only the poster can expire a post")?;
            advance(&mut post.status, PostStatus::Expired)?;
            post.updated_at = now;
            Ok(post.clone())
        })
    }
}
