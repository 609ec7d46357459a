// Rust guideline compliant 2026-02-06

//! Output formatting for the ShareNet CLI.
//!
//! Every command produces a [`Reply`]: the JSON payload plus a view for
//! humans. The view is rendered as a bordered table, as borderless text, or
//! skipped entirely in favour of a JSON envelope.

use anyhow::Result;
use serde::Serialize;
use sharenet_app::{
    Acceptance, AppError, ClaimQueue, CounterResponse, ErrorEnvelope, InstantClaimReceipt,
    OfferSummary, Page, Resolution, ReturnSettlement, SuccessEnvelope, VerificationPrompt,
};
use sharenet_core::config::OutputFormat;
use sharenet_core::{
    ClaimEntry, Item, LostFoundClaim, LostFoundPost, Offer, Request, Transaction, WantedItem,
};
use tabled::{builder::Builder, settings::Style};

/// A record shown as a two-column field/value listing.
pub trait Detail {
    /// Field labels and rendered values, in display order.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// A record shown as one row of a listing.
pub trait Tabular {
    /// Column headers.
    const HEADERS: &'static [&'static str];

    /// Rendered cells, one per header.
    fn row(&self) -> Vec<String>;
}

/// Human-readable part of a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Field/value pairs of a single record.
    Fields(Vec<(String, String)>),
    /// A listing with an optional summary line.
    Rows {
        /// Column headers.
        headers: Vec<String>,
        /// Rendered rows.
        rows: Vec<Vec<String>>,
        /// Summary printed under the listing.
        footer: Option<String>,
    },
}

/// Result of one command.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Machine-readable payload.
    pub json: serde_json::Value,
    /// Human-readable view.
    pub view: View,
}

impl Reply {
    /// Builds a reply for a single record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized.
    pub fn record<T: Serialize + Detail>(value: &T) -> Result<Self> {
        Ok(Self {
            json: serde_json::to_value(value)?,
            view: View::Fields(
                value
                    .fields()
                    .into_iter()
                    .map(|(label, value)| (label.to_string(), value))
                    .collect(),
            ),
        })
    }

    /// Builds a reply for one page of a listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be serialized.
    pub fn page<T: Serialize + Tabular>(page: &Page<T>) -> Result<Self> {
        Ok(Self {
            json: serde_json::to_value(page)?,
            view: View::Rows {
                headers: T::HEADERS.iter().map(|h| h.to_string()).collect(),
                rows: page.items.iter().map(Tabular::row).collect(),
                footer: Some(format!(
                    "Page {} of {} ({} total)",
                    page.page,
                    page.pages.max(1),
                    page.total
                )),
            },
        })
    }

    /// Builds a reply for an unpaginated listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn rows<P: Serialize, T: Tabular>(payload: &P, records: &[T], footer: Option<String>) -> Result<Self> {
        Ok(Self {
            json: serde_json::to_value(payload)?,
            view: View::Rows {
                headers: T::HEADERS.iter().map(|h| h.to_string()).collect(),
                rows: records.iter().map(Tabular::row).collect(),
                footer,
            },
        })
    }

    /// Renders the reply in the requested format.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => SuccessEnvelope::new(&self.json).to_json(),
            OutputFormat::Table => render_view(&self.view, true),
            OutputFormat::Plain => render_view(&self.view, false),
        }
    }
}

fn render_view(view: &View, bordered: bool) -> String {
    match view {
        View::Fields(fields) => {
            let mut builder = Builder::default();
            for (label, value) in fields {
                builder.push_record([label.as_str(), value.as_str()]);
            }
            finish(builder, bordered)
        }
        View::Rows {
            headers,
            rows,
            footer,
        } => {
            let mut output = if rows.is_empty() {
                "Nothing found.".to_string()
            } else {
                let mut builder = Builder::default();
                builder.push_record(headers.iter().map(String::as_str));
                for row in rows {
                    builder.push_record(row.iter().map(String::as_str));
                }
                finish(builder, bordered)
            };
            if let Some(footer) = footer {
                output.push('\n');
                output.push_str(footer);
            }
            output
        }
    }
}

fn finish(builder: Builder, bordered: bool) -> String {
    let mut table = builder.build();
    if bordered {
        table.with(Style::modern());
    } else {
        table.with(Style::blank());
    }
    table.to_string()
}

/// Renders a failure; JSON mode prints an [`ErrorEnvelope`].
pub fn render_error(error: &anyhow::Error, format: OutputFormat) -> String {
    let app_error = error.chain().find_map(|cause| cause.downcast_ref::<AppError>());
    match (format, app_error) {
        (OutputFormat::Json, Some(app_error)) => ErrorEnvelope::from_error(app_error).to_json(),
        (OutputFormat::Json, None) => ErrorEnvelope::internal(format!("{:#}", error)).to_json(),
        (_, Some(app_error)) => format!("Error: {}", app_error),
        (_, None) => format!("Error: {:#}", error),
    }
}

/// Formats a unix timestamp as UTC date and time.
pub fn timestamp(seconds: i64) -> String {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

fn opt_timestamp(seconds: Option<i64>) -> String {
    seconds.map(timestamp).unwrap_or_else(|| "-".to_string())
}

fn price(value: Option<f64>) -> String {
    value.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string())
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn yes_no(value: bool) -> String {
    let word = if value { "yes" } else { "no" };
    word.to_string()
}

/// Wire name of a serde enum, e.g. `ITS_MINE`.
fn wire<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        _ => "-".to_string(),
    }
}

impl Detail for Item {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("Owner", self.owner.clone()),
            ("Mode", self.mode.to_string()),
            ("Price", price(self.price)),
            ("Available", yes_no(self.is_available)),
        ];
        if self.instant_claim {
            fields.push((
                "Claims",
                format!("{}/{}", self.active_claims(), self.max_claimers),
            ));
        }
        if !self.description.is_empty() {
            fields.push(("Description", self.description.clone()));
        }
        fields.push(("Created", timestamp(self.created_at)));
        fields
    }
}

impl Tabular for Item {
    const HEADERS: &'static [&'static str] = &["ID", "Mode", "Price", "Available", "Owner", "Title"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.mode.to_string(),
            price(self.price),
            yes_no(self.is_available),
            self.owner.clone(),
            self.title.clone(),
        ]
    }
}

impl Detail for Request {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Item", self.item.clone()),
            ("Requester", self.requester.clone()),
            ("Owner", self.owner.clone()),
            ("Status", self.status.to_string()),
            ("Type", wire(&self.request_type)),
            ("Price", price(self.proposed_price)),
            ("Duration", text(self.proposed_duration.as_deref())),
        ];
        if let Some(description) = &self.description {
            fields.push(("Message", description.clone()));
        }
        if let Some(counter) = &self.counter_offer {
            fields.push((
                "Counter offer",
                format!(
                    "{} / {} days ({})",
                    price(counter.price),
                    text(counter.duration.as_deref()),
                    wire(&counter.status)
                ),
            ));
        }
        if !self.negotiation_history.is_empty() {
            fields.push(("Negotiation", self.negotiation_history.len().to_string()));
        }
        if let Some(reason) = &self.rejection_reason {
            fields.push(("Rejection reason", reason.clone()));
        }
        if let Some(pickup) = &self.pickup_details {
            fields.push((
                "Pickup",
                format!("{} at {}", pickup.location, timestamp(pickup.proposed_time)),
            ));
            fields.push(("Pickup confirmed", opt_timestamp(pickup.confirmed_time)));
        }
        fields.push(("Created", timestamp(self.created_at)));
        fields
    }
}

impl Tabular for Request {
    const HEADERS: &'static [&'static str] = &["ID", "Item", "Status", "Requester", "Priority", "Created"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.item.clone(),
            self.status.to_string(),
            self.requester.clone(),
            self.priority.to_string(),
            timestamp(self.created_at),
        ]
    }
}

impl Detail for Transaction {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Item", self.item.clone()),
            ("Owner", self.owner.clone()),
            ("Requester", self.requester.clone()),
            ("Status", self.status.to_string()),
            ("Mode", self.mode.to_string()),
            ("Price", price(Some(self.agreed_price))),
            (
                "Duration",
                self.agreed_duration
                    .map(|d| format!("{} days", d))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Start", opt_timestamp(self.start_date)),
            ("End", opt_timestamp(self.end_date)),
            ("Returned", opt_timestamp(self.actual_return_date)),
        ];
        if let Some(terms) = &self.terms {
            fields.push(("Terms", terms.clone()));
        }
        if let Some(reason) = &self.dispute_reason {
            fields.push((
                "Dispute",
                format!("{} (by {})", reason, text(self.dispute_raised_by.as_deref())),
            ));
        }
        fields
    }
}

impl Tabular for Transaction {
    const HEADERS: &'static [&'static str] = &["ID", "Item", "Status", "Owner", "Requester", "Price"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.item.clone(),
            self.status.to_string(),
            self.owner.clone(),
            self.requester.clone(),
            price(Some(self.agreed_price)),
        ]
    }
}

impl Detail for LostFoundPost {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Type", wire(&self.post_type)),
            ("Title", self.title.clone()),
            ("Poster", self.user.clone()),
            ("Status", self.status.to_string()),
            ("Location", self.location.clone()),
            ("Claims", self.claims_count.to_string()),
        ];
        for question in &self.verification_questions {
            let rendered = match &question.answer {
                Some(answer) => format!("{} -> {}", question.question, answer),
                None => question.question.clone(),
            };
            fields.push(("Question", format!("[{}] {}", question.id, rendered)));
        }
        if let Some(winner) = &self.resolved_with {
            fields.push(("Resolved with", winner.clone()));
        }
        fields
    }
}

impl Tabular for LostFoundPost {
    const HEADERS: &'static [&'static str] = &["ID", "Type", "Status", "Claims", "Location", "Title"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            wire(&self.post_type),
            self.status.to_string(),
            self.claims_count.to_string(),
            self.location.clone(),
            self.title.clone(),
        ]
    }
}

impl Detail for LostFoundClaim {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let meetup = &self.meetup_details;
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Post", self.post.clone()),
            ("Claimant", self.claimant.clone()),
            ("Type", wire(&self.claim_type)),
            ("Status", self.status.to_string()),
            ("Score", format!("{}%", self.verification_score)),
            ("Chat", yes_no(self.chat_enabled)),
            ("Meetup", wire(&meetup.status)),
        ];
        if let Some(location) = meetup.agreed_location.as_ref().or(meetup.proposed_location.as_ref()) {
            let time = meetup.agreed_time.or(meetup.proposed_time);
            fields.push(("Meetup at", format!("{} ({})", location, opt_timestamp(time))));
        }
        for entry in &self.timeline {
            fields.push((
                "Timeline",
                format!("{} {} by {}", timestamp(entry.timestamp), entry.action, entry.by),
            ));
        }
        fields
    }
}

impl Tabular for LostFoundClaim {
    const HEADERS: &'static [&'static str] = &["ID", "Post", "Status", "Claimant", "Score"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.post.clone(),
            self.status.to_string(),
            self.claimant.clone(),
            format!("{}%", self.verification_score),
        ]
    }
}

impl Detail for WantedItem {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("Poster", self.user.clone()),
            ("Status", self.status.to_string()),
            ("Budget", price(self.max_budget)),
        ];
        for offer in &self.offers {
            fields.push((
                "Offer",
                format!(
                    "[{}] {} {} {} ({})",
                    offer.id,
                    offer.offerer,
                    wire(&offer.offer_type),
                    price(offer.price),
                    offer.status
                ),
            ));
        }
        if let Some(by) = &self.fulfilled_by {
            fields.push(("Fulfilled by", by.clone()));
        }
        fields
    }
}

impl Tabular for WantedItem {
    const HEADERS: &'static [&'static str] = &["ID", "Status", "Budget", "Offers", "Poster", "Title"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.status.to_string(),
            price(self.max_budget),
            self.offers.len().to_string(),
            self.user.clone(),
            self.title.clone(),
        ]
    }
}

impl Detail for Offer {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Offerer", self.offerer.clone()),
            ("Type", wire(&self.offer_type)),
            ("Price", price(self.price)),
            ("Status", self.status.to_string()),
            ("Message", self.message.clone()),
        ]
    }
}

impl Tabular for OfferSummary {
    const HEADERS: &'static [&'static str] = &["Offer", "Wanted", "Status", "Type", "Price", "Title"];

    fn row(&self) -> Vec<String> {
        vec![
            self.offer.id.clone(),
            self.wanted.clone(),
            self.offer.status.to_string(),
            wire(&self.offer.offer_type),
            price(self.offer.price),
            self.wanted_title.clone(),
        ]
    }
}

impl Tabular for ClaimEntry {
    const HEADERS: &'static [&'static str] = &["#", "User", "Claimed", "Status"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.user.clone(),
            timestamp(self.claimed_at),
            wire(&self.status),
        ]
    }
}

impl Detail for Acceptance {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Request", self.request.id.clone()),
            ("Status", self.request.status.to_string()),
            ("Transaction", self.transaction.id.clone()),
            ("Price", price(Some(self.transaction.agreed_price))),
        ]
    }
}

impl Detail for CounterResponse {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Request", self.request.id.clone()),
            ("Status", self.request.status.to_string()),
        ];
        if let Some(transaction) = &self.transaction {
            fields.push(("Transaction", transaction.id.clone()));
        }
        fields
    }
}

impl Detail for InstantClaimReceipt {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Item", self.item.id.clone()),
            ("Request", self.request.id.clone()),
            ("Queue position", self.request.priority.to_string()),
            ("Item available", yes_no(self.item.is_available)),
        ]
    }
}

impl Detail for ReturnSettlement {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Transaction", self.transaction.id.clone()),
            ("Status", self.transaction.status.to_string()),
            ("Outcome", self.requester_outcome.to_string()),
            (
                "Requester score",
                format!("{} ({})", self.requester_score, self.transaction.requester),
            ),
            (
                "Owner score",
                format!("{} ({})", self.owner_score, self.transaction.owner),
            ),
        ]
    }
}

impl Detail for VerificationPrompt {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Claim", self.claim.id.clone()),
            ("Status", self.claim.status.to_string()),
        ];
        for question in &self.questions {
            fields.push(("Question", format!("[{}] {}", question.id, question.question)));
        }
        fields
    }
}

impl Detail for Resolution {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Post", self.post.id.clone()),
            ("Status", self.post.status.to_string()),
        ];
        if let Some(claim) = &self.claim {
            fields.push(("Claim", claim.id.clone()));
            fields.push(("Returned to", claim.claimant.clone()));
        }
        fields.push(("Cancelled claims", self.cancelled.len().to_string()));
        fields
    }
}

/// Renders a pickup queue.
///
/// # Errors
///
/// Returns an error if the queue cannot be serialized.
pub fn claim_queue(queue: &ClaimQueue) -> Result<Reply> {
    Reply::rows(
        queue,
        &queue.entries,
        Some(format!(
            "{} of {} slots taken on {}",
            queue.entries.len(),
            queue.max_claimers,
            queue.item
        )),
    )
}
