// Rust guideline compliant 2026-02-09

//! Read-side listing, filtering and pagination.

use crate::error::{AppError, Result};
use crate::marketplace::{ensure_actor, Marketplace};
use rayon::prelude::*;
use serde::Serialize;
use sharenet_core::{
    ClaimStatus, Item, ItemMode, LostFoundClaim, LostFoundPost, Offer, OfferStatus, OfferType,
    PostStatus, PostType, Request, RequestStatus, Transaction, TransactionStatus, WantedItem,
    WantedStatus,
};

const PARALLEL_THRESHOLD: usize = 1_000;

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
    /// Records across all pages.
    pub total: usize,
    /// Number of pages.
    pub pages: usize,
}

/// Page selection; `limit` falls back to the configured page size.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    /// 1-based page number; 0 is treated as 1.
    pub page: usize,
    /// Page size override.
    pub limit: Option<usize>,
}

/// Side of a transaction to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionRole {
    /// Either side.
    #[default]
    Any,
    /// Transactions where the user owns the item.
    Owner,
    /// Transactions where the user receives the item.
    Requester,
}

/// An offer together with the wanted item it was made on.
#[derive(Debug, Clone, Serialize)]
pub struct OfferSummary {
    /// Wanted item id.
    pub wanted: String,
    /// Wanted item title.
    pub wanted_title: String,
    /// Wanted item poster.
    pub wanted_owner: String,
    /// Wanted item status.
    pub wanted_status: WantedStatus,
    /// The offer itself.
    pub offer: Offer,
}

/// Slices `records` into the requested page.
pub fn paginate<T>(records: Vec<T>, page: usize, limit: usize) -> Page<T> {
    let limit = limit.max(1);
    let page = page.max(1);
    let total = records.len();
    let pages = total.div_ceil(limit);
    let items = records
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();
    Page {
        items,
        page,
        limit,
        total,
        pages,
    }
}

fn filter_records<T, P>(records: Vec<T>, predicate: P) -> Vec<T>
where
    T: Send,
    P: Fn(&T) -> bool + Sync + Send,
{
    if records.len() >= PARALLEL_THRESHOLD {
        records.into_par_iter().filter(|r| predicate(r)).collect()
    } else {
        records.into_iter().filter(|r| predicate(r)).collect()
    }
}

fn newest_first<T, F>(records: &mut [T], created_at: F)
where
    F: Fn(&T) -> i64,
{
    records.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}

impl Marketplace {
    fn page_limit(&self, request: PageRequest) -> usize {
        request.limit.unwrap_or(self.config().page_size)
    }

    /// Lists items, optionally only those still available.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_items(&self, available_only: bool, mode: Option<ItemMode>, page: PageRequest) -> Result<Page<Item>> {
        let mut items = filter_records(self.snapshot()?.items, |item: &Item| {
            (!available_only || item.is_available) && mode.map_or(true, |m| item.mode == m)
        });
        newest_first(&mut items, |item| item.created_at);
        Ok(paginate(items, page.page, self.page_limit(page)))
    }

    /// Requests sent by `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn my_requests(&self, user: &str, status: Option<RequestStatus>, page: PageRequest) -> Result<Page<Request>> {
        let mut requests = filter_records(self.snapshot()?.requests, |r: &Request| {
            r.requester == user && status.map_or(true, |s| r.status == s)
        });
        newest_first(&mut requests, |r| r.created_at);
        Ok(paginate(requests, page.page, self.page_limit(page)))
    }

    /// Requests received by `user` as owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn received_requests(&self, user: &str, status: Option<RequestStatus>, page: PageRequest) -> Result<Page<Request>> {
        let mut requests = filter_records(self.snapshot()?.requests, |r: &Request| {
            r.owner == user && status.map_or(true, |s| r.status == s)
        });
        newest_first(&mut requests, |r| r.created_at);
        Ok(paginate(requests, page.page, self.page_limit(page)))
    }

    /// Requests for one item, highest priority first, then newest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `actor` owns the item.
    pub fn item_requests(&self, item_id: &str, actor: &str, page: PageRequest) -> Result<Page<Request>> {
        let dataset = self.snapshot()?;
        let item = dataset.item(item_id)?;
        ensure_actor(item.owner == actor, "only the owner can list requests for an item")?;

        let mut requests = filter_records(dataset.requests, |r: &Request| r.item == item_id);
        requests.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(paginate(requests, page.page, self.page_limit(page)))
    }

    /// Transactions `user` takes part in.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn my_transactions(
        &self,
        user: &str,
        role: TransactionRole,
        status: Option<TransactionStatus>,
        page: PageRequest,
    ) -> Result<Page<Transaction>> {
        let mut transactions = filter_records(self.snapshot()?.transactions, |t: &Transaction| {
            let side = match role {
                TransactionRole::Any => t.is_participant(user),
                TransactionRole::Owner => t.owner == user,
                TransactionRole::Requester => t.requester == user,
            };
            side && status.map_or(true, |s| t.status == s)
        });
        newest_first(&mut transactions, |t| t.created_at);
        Ok(paginate(transactions, page.page, self.page_limit(page)))
    }

    /// Lost&found posts, answers stripped.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_posts(&self, post_type: Option<PostType>, status: Option<PostStatus>, page: PageRequest) -> Result<Page<LostFoundPost>> {
        let mut posts: Vec<LostFoundPost> = filter_records(self.snapshot()?.posts, |p: &LostFoundPost| {
            post_type.map_or(true, |t| p.post_type == t) && status.map_or(true, |s| p.status == s)
        })
        .iter()
        .map(LostFoundPost::redacted)
        .collect();
        newest_first(&mut posts, |p| p.created_at);
        Ok(paginate(posts, page.page, self.page_limit(page)))
    }

    /// Claims on a post, for its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `actor` posted it.
    pub fn post_claims(&self, post_id: &str, actor: &str, page: PageRequest) -> Result<Page<LostFoundClaim>> {
        let dataset = self.snapshot()?;
        let post = dataset.post(post_id)?;
        ensure_actor(post.user == actor, "only the poster can list its claims")?;

        let mut claims = filter_records(dataset.claims, |c: &LostFoundClaim| c.post == post_id);
        newest_first(&mut claims, |c| c.created_at);
        Ok(paginate(claims, page.page, self.page_limit(page)))
    }

    /// Claims submitted by `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn my_claims(&self, user: &str, status: Option<ClaimStatus>, page: PageRequest) -> Result<Page<LostFoundClaim>> {
        let mut claims = filter_records(self.snapshot()?.claims, |c: &LostFoundClaim| {
            c.claimant == user && status.map_or(true, |s| c.status == s)
        });
        newest_first(&mut claims, |c| c.created_at);
        Ok(paginate(claims, page.page, self.page_limit(page)))
    }

    /// Claims received on `user`'s posts.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn received_claims(&self, user: &str, status: Option<ClaimStatus>, page: PageRequest) -> Result<Page<LostFoundClaim>> {
        let mut claims = filter_records(self.snapshot()?.claims, |c: &LostFoundClaim| {
            c.post_owner == user && status.map_or(true, |s| c.status == s)
        });
        newest_first(&mut claims, |c| c.created_at);
        Ok(paginate(claims, page.page, self.page_limit(page)))
    }

    /// Offers `user` made, newest first, each with its wanted item.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn my_offers(&self, user: &str, status: Option<OfferStatus>, page: PageRequest) -> Result<Page<OfferSummary>> {
        let mut offers: Vec<OfferSummary> = self
            .snapshot()?
            .wanted
            .into_iter()
            .flat_map(|wanted| {
                wanted
                    .offers
                    .iter()
                    .filter(|o| o.offerer == user && status.map_or(true, |s| o.status == s))
                    .map(|offer| OfferSummary {
                        wanted: wanted.id.clone(),
                        wanted_title: wanted.title.clone(),
                        wanted_owner: wanted.user.clone(),
                        wanted_status: wanted.status,
                        offer: offer.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        newest_first(&mut offers, |o| o.offer.created_at);
        Ok(paginate(offers, page.page, self.page_limit(page)))
    }

    /// `user`'s wanted items that received at least one offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn received_offers(&self, user: &str, page: PageRequest) -> Result<Page<WantedItem>> {
        let mut wanted = filter_records(self.snapshot()?.wanted, |w: &WantedItem| {
            w.user == user && !w.offers.is_empty()
        });
        newest_first(&mut wanted, |w| w.created_at);
        Ok(paginate(wanted, page.page, self.page_limit(page)))
    }

    /// Wanted items, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_wanted(&self, status: Option<WantedStatus>, page: PageRequest) -> Result<Page<WantedItem>> {
        let mut wanted = filter_records(self.snapshot()?.wanted, |w: &WantedItem| {
            status.map_or(true, |s| w.status == s)
        });
        newest_first(&mut wanted, |w| w.created_at);
        Ok(paginate(wanted, page.page, self.page_limit(page)))
    }
}

fn invalid(kind: &str, value: &str) -> AppError {
    AppError::Validation(format!("Invalid {}: {}", kind, value))
}

fn normalized(value: &str) -> String {
    value.trim().to_uppercase().replace('-', "_")
}

/// Parses an item mode (`rent`, `sell`, `give`).
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown values.
pub fn parse_item_mode(value: &str) -> Result<ItemMode> {
    match normalized(value).as_str() {
        "RENT" => Ok(ItemMode::Rent),
        "SELL" => Ok(ItemMode::Sell),
        "GIVE" => Ok(ItemMode::Give),
        _ => Err(invalid("item mode", value)),
    }
}

/// Parses a request status.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown values.
pub fn parse_request_status(value: &str) -> Result<RequestStatus> {
    match normalized(value).as_str() {
        "PENDING" => Ok(RequestStatus::Pending),
        "COUNTER_OFFERED" => Ok(RequestStatus::CounterOffered),
        "ACCEPTED" => Ok(RequestStatus::Accepted),
        "REJECTED" => Ok(RequestStatus::Rejected),
        "CANCELLED" => Ok(RequestStatus::Cancelled),
        "COMPLETED" => Ok(RequestStatus::Completed),
        _ => Err(invalid("request status", value)),
    }
}

/// Parses a transaction status.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown values.
pub fn parse_transaction_status(value: &str) -> Result<TransactionStatus> {
    match normalized(value).as_str() {
        "PENDING" => Ok(TransactionStatus::Pending),
        "ACCEPTED" => Ok(TransactionStatus::Accepted),
        "AGREEMENT_PROPOSED" => Ok(TransactionStatus::AgreementProposed),
        "ACTIVE" => Ok(TransactionStatus::Active),
        "RETURN_PENDING" => Ok(TransactionStatus::ReturnPending),
        "COMPLETED" => Ok(TransactionStatus::Completed),
        "CANCELLED" => Ok(TransactionStatus::Cancelled),
        "DISPUTED" => Ok(TransactionStatus::Disputed),
        "REJECTED" => Ok(TransactionStatus::Rejected),
        _ => Err(invalid("transaction status", value)),
    }
}

/// Parses a claim status.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown values.
pub fn parse_claim_status(value: &str) -> Result<ClaimStatus> {
    match normalized(value).as_str() {
        "PENDING" => Ok(ClaimStatus::Pending),
        "VERIFICATION" => Ok(ClaimStatus::Verification),
        "VERIFIED" => Ok(ClaimStatus::Verified),
        "REJECTED" => Ok(ClaimStatus::Rejected),
        "RESOLVED" => Ok(ClaimStatus::Resolved),
        "CANCELLED" => Ok(ClaimStatus::Cancelled),
        _ => Err(invalid("claim status", value)),
    }
}

/// Parses a post type (`lost`, `found`).
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown values.
pub fn parse_post_type(value: &str) -> Result<PostType> {
    match normalized(value).as_str() {
        "LOST" => Ok(PostType::Lost),
        "FOUND" => Ok(PostType::Found),
        _ => Err(invalid("post type", value)),
    }
}

/// Parses a post status.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown values.
pub fn parse_post_status(value: &str) -> Result<PostStatus> {
    match normalized(value).as_str() {
        "OPEN" => Ok(PostStatus::Open),
        "CLAIMED" => Ok(PostStatus::Claimed),
        "VERIFIED" => Ok(PostStatus::Verified),
        "RESOLVED" => Ok(PostStatus::Resolved),
        "EXPIRED" => Ok(PostStatus::Expired),
        _ => Err(invalid("post status", value)),
    }
}

/// Parses a wanted item status.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown values.
pub fn parse_wanted_status(value: &str) -> Result<WantedStatus> {
    match normalized(value).as_str() {
        "OPEN" => Ok(WantedStatus::Open),
        "FULFILLED" => Ok(WantedStatus::Fulfilled),
        "CLOSED" => Ok(WantedStatus::Closed),
        "EXPIRED" => Ok(WantedStatus::Expired),
        _ => Err(invalid("wanted status", value)),
    }
}

/// Parses an offer status.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown values.
pub fn parse_offer_status(value: &str) -> Result<OfferStatus> {
    match normalized(value).as_str() {
        "PENDING" => Ok(OfferStatus::Pending),
        "ACCEPTED" => Ok(OfferStatus::Accepted),
        "REJECTED" => Ok(OfferStatus::Rejected),
        "CANCELLED" => Ok(OfferStatus::Cancelled),
        _ => Err(invalid("offer status", value)),
    }
}

/// Parses an offer type (`free`, `sell`, `rent`).
///
/// # Errors
///
/// Returns [`AppError::Validation`] for unknown values.
pub fn parse_offer_type(value: &str) -> Result<OfferType> {
    match normalized(value).as_str() {
        "FREE" => Ok(OfferType::Free),
        "SELL" => Ok(OfferType::Sell),
        "RENT" => Ok(OfferType::Rent),
        _ => Err(invalid("offer type", value)),
    }
}
