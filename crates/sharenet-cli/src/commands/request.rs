// Rust guideline compliant 2026-02-06

//! Implementation of the `snet request` commands.

use super::{page_request, parse_time, Session};
use crate::cli::RequestAction;
use crate::output::Reply;
use anyhow::Result;
use sharenet_app::{parse_request_status, CounterTerms, NewRequest, PickupProposal};

/// Runs a request subcommand.
///
/// # Errors
///
/// Returns the failure of the underlying marketplace operation.
pub fn execute(session: &Session, action: &RequestAction) -> Result<Reply> {
    let market = session.market();
    match action {
        RequestAction::Create {
            item,
            message,
            price,
            duration,
        } => {
            let input = NewRequest {
                description: message.clone(),
                proposed_price: *price,
                proposed_duration: duration.clone(),
            };
            Reply::record(&market.create_request(item, session.actor()?, input)?)
        }
        RequestAction::Accept { id } => Reply::record(&market.accept_request(id, session.actor()?)?),
        RequestAction::Reject { id, reason } => {
            Reply::record(&market.reject_request(id, session.actor()?, reason.clone())?)
        }
        RequestAction::Cancel { id } => Reply::record(&market.cancel_request(id, session.actor()?)?),
        RequestAction::Counter {
            id,
            price,
            duration,
            message,
        } => {
            let terms = CounterTerms {
                price: *price,
                duration: duration.clone(),
                message: message.clone(),
            };
            Reply::record(&market.create_counter_offer(id, session.actor()?, terms)?)
        }
        RequestAction::Respond { id, accept, .. } => {
            Reply::record(&market.respond_to_counter_offer(id, session.actor()?, *accept)?)
        }
        RequestAction::Pickup {
            id,
            location,
            time,
            instructions,
        } => {
            let proposal = PickupProposal {
                location: location.clone(),
                proposed_time: parse_time(time)?,
                instructions: instructions.clone(),
            };
            Reply::record(&market.propose_pickup_details(id, session.actor()?, proposal)?)
        }
        RequestAction::ConfirmDetails { id } => {
            Reply::record(&market.confirm_pickup_details(id, session.actor()?)?)
        }
        RequestAction::PickedUp { id } => Reply::record(&market.confirm_pickup(id, session.actor()?)?),
        RequestAction::Mine { status, paging } => {
            let status = status.as_deref().map(parse_request_status).transpose()?;
            Reply::page(&market.my_requests(session.actor()?, status, page_request(*paging))?)
        }
        RequestAction::Received { status, paging } => {
            let status = status.as_deref().map(parse_request_status).transpose()?;
            Reply::page(&market.received_requests(session.actor()?, status, page_request(*paging))?)
        }
    }
}
