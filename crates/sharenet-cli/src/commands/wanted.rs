// Rust guideline compliant 2026-02-06

//! Implementation of the `snet wanted` commands.

use super::{page_request, Session};
use crate::cli::WantedAction;
use crate::output::Reply;
use anyhow::Result;
use sharenet_app::{parse_offer_status, parse_offer_type, parse_wanted_status, NewOffer, NewWanted};

/// Runs a wanted subcommand.
///
/// # Errors
///
/// Returns the failure of the underlying marketplace operation.
pub fn execute(session: &Session, action: &WantedAction) -> Result<Reply> {
    let market = session.market();
    match action {
        WantedAction::Create {
            title,
            description,
            budget,
        } => {
            let input = NewWanted {
                title: title.clone(),
                description: description.clone(),
                max_budget: *budget,
            };
            Reply::record(&market.create_wanted(session.actor()?, input)?)
        }
        WantedAction::Show { id } => Reply::record(&market.get_wanted(id)?),
        WantedAction::List { status, paging } => {
            let status = status.as_deref().map(parse_wanted_status).transpose()?;
            Reply::page(&market.list_wanted(status, page_request(*paging))?)
        }
        WantedAction::Offer {
            id,
            message,
            offer_type,
            price,
        } => {
            let input = NewOffer {
                message: message.clone(),
                offer_type: parse_offer_type(offer_type)?,
                price: *price,
            };
            Reply::record(&market.make_offer(id, session.actor()?, input)?)
        }
        WantedAction::Accept { id, offer } => {
            Reply::record(&market.accept_offer(id, offer, session.actor()?)?)
        }
        WantedAction::Reject { id, offer } => {
            Reply::record(&market.reject_offer(id, offer, session.actor()?)?)
        }
        WantedAction::Withdraw { id, offer } => {
            Reply::record(&market.cancel_offer(id, offer, session.actor()?)?)
        }
        WantedAction::Offers { status, paging } => {
            let status = status.as_deref().map(parse_offer_status).transpose()?;
            Reply::page(&market.my_offers(session.actor()?, status, page_request(*paging))?)
        }
        WantedAction::Received { paging } => {
            Reply::page(&market.received_offers(session.actor()?, page_request(*paging))?)
        }
        WantedAction::Fulfilled { id } => Reply::record(&market.mark_fulfilled(id, session.actor()?)?),
    }
}
