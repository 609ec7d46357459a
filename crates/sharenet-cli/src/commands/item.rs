// Rust guideline compliant 2026-02-06

//! Implementation of the `snet item` commands.

use super::{page_request, Session};
use crate::cli::ItemAction;
use crate::output::{self, Reply};
use anyhow::Result;
use sharenet_app::{parse_item_mode, ItemUpdate, NewItem};

/// Runs an item subcommand.
///
/// # Errors
///
/// Returns the failure of the underlying marketplace operation.
pub fn execute(session: &Session, action: &ItemAction) -> Result<Reply> {
    let market = session.market();
    match action {
        ItemAction::Create {
            title,
            mode,
            price,
            description,
            instant_claim,
            max_claimers,
        } => {
            let input = NewItem {
                title: title.clone(),
                description: description.clone(),
                mode: parse_item_mode(mode)?,
                price: *price,
                instant_claim: *instant_claim,
                max_claimers: *max_claimers,
            };
            Reply::record(&market.create_item(session.actor()?, input)?)
        }
        ItemAction::Show { id } => Reply::record(&market.get_item(id)?),
        ItemAction::List { all, mode, paging } => {
            let mode = mode.as_deref().map(parse_item_mode).transpose()?;
            Reply::page(&market.list_items(!all, mode, page_request(*paging))?)
        }
        ItemAction::Edit {
            id,
            title,
            description,
            mode,
            price,
            max_claimers,
        } => {
            let update = ItemUpdate {
                title: title.clone(),
                description: description.clone(),
                mode: mode.as_deref().map(parse_item_mode).transpose()?,
                price: *price,
                instant_claim: None,
                max_claimers: *max_claimers,
            };
            Reply::record(&market.update_item(id, session.actor()?, update)?)
        }
        ItemAction::Open { id } => {
            Reply::record(&market.set_item_availability(id, session.actor()?, true)?)
        }
        ItemAction::Close { id } => {
            Reply::record(&market.set_item_availability(id, session.actor()?, false)?)
        }
        ItemAction::Claim { id } => Reply::record(&market.instant_claim(id, session.actor()?)?),
        ItemAction::Queue { id } => output::claim_queue(&market.get_claim_queue(id, session.actor()?)?),
        ItemAction::Requests { id, paging } => {
            Reply::page(&market.item_requests(id, session.actor()?, page_request(*paging))?)
        }
    }
}
