// Rust guideline compliant 2026-02-06

//! Implementation of the `snet txn` commands.

use super::{page_request, parse_time, Session};
use crate::cli::TxnAction;
use crate::output::Reply;
use anyhow::Result;
use sharenet_app::{parse_transaction_status, AgreementTerms, TransactionRole};

/// Runs a transaction subcommand.
///
/// # Errors
///
/// Returns the failure of the underlying marketplace operation.
pub fn execute(session: &Session, action: &TxnAction) -> Result<Reply> {
    let market = session.market();
    match action {
        TxnAction::Show { id } => Reply::record(&market.get_transaction(id, session.actor()?)?),
        TxnAction::List {
            role,
            status,
            paging,
        } => {
            let role = match role.as_deref() {
                Some("owner") => TransactionRole::Owner,
                Some("requester") => TransactionRole::Requester,
                _ => TransactionRole::Any,
            };
            let status = status.as_deref().map(parse_transaction_status).transpose()?;
            Reply::page(&market.my_transactions(session.actor()?, role, status, page_request(*paging))?)
        }
        TxnAction::Propose {
            id,
            price,
            duration,
            terms,
            start,
            end,
        } => {
            let terms = AgreementTerms {
                agreed_price: *price,
                agreed_duration: duration.clone(),
                terms: terms.clone(),
                start_date: start.as_deref().map(parse_time).transpose()?,
                end_date: end.as_deref().map(parse_time).transpose()?,
            };
            Reply::record(&market.propose_agreement(id, session.actor()?, terms)?)
        }
        TxnAction::Confirm { id } => Reply::record(&market.confirm_agreement(id, session.actor()?)?),
        TxnAction::Return { id } => Reply::record(&market.mark_return_pending(id, session.actor()?)?),
        TxnAction::Returned { id } => Reply::record(&market.confirm_return(id, session.actor()?)?),
        TxnAction::Dispute { id, reason } => {
            Reply::record(&market.raise_dispute(id, session.actor()?, reason)?)
        }
        TxnAction::Status { id, status } => {
            let target = parse_transaction_status(status)?;
            Reply::record(&market.update_transaction_status(id, session.actor()?, target)?)
        }
    }
}
