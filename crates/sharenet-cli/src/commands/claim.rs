// Rust guideline compliant 2026-02-06

//! Implementation of the `snet claim` commands.

use super::{page_request, parse_time, Session};
use crate::cli::ClaimAction;
use crate::output::Reply;
use anyhow::Result;
use sharenet_app::{parse_claim_status, AppError, MeetupProposal};
use sharenet_core::VerificationAnswer;

/// Parses `QUESTION_ID=TEXT` answers.
fn parse_answers(raw: &[String]) -> Result<Vec<VerificationAnswer>, AppError> {
    raw.iter()
        .map(|entry| {
            let (question_id, answer) = entry.split_once('=').ok_or_else(|| {
                AppError::Validation(format!("answer '{}' must look like QUESTION_ID=TEXT", entry))
            })?;
            Ok(VerificationAnswer {
                question_id: question_id.trim().to_string(),
                answer: answer.to_string(),
            })
        })
        .collect()
}

/// Runs a claim subcommand.
///
/// # Errors
///
/// Returns the failure of the underlying marketplace operation.
pub fn execute(session: &Session, action: &ClaimAction) -> Result<Reply> {
    let market = session.market();
    match action {
        ClaimAction::Create { post, message } => {
            Reply::record(&market.create_claim(post, session.actor()?, message)?)
        }
        ClaimAction::Show { id } => Reply::record(&market.get_claim(id, session.actor()?)?),
        ClaimAction::Verify { id } => Reply::record(&market.start_verification(id, session.actor()?)?),
        ClaimAction::Answer { id, answers } => {
            let answers = parse_answers(answers)?;
            Reply::record(&market.submit_verification(id, session.actor()?, answers)?)
        }
        ClaimAction::Approve { id } => Reply::record(&market.verify_claim(id, session.actor()?)?),
        ClaimAction::Reject { id, reason } => {
            Reply::record(&market.reject_claim(id, session.actor()?, reason.clone())?)
        }
        ClaimAction::Meetup { id, location, time } => {
            let proposal = MeetupProposal {
                location: location.clone(),
                time: parse_time(time)?,
            };
            Reply::record(&market.propose_meetup(id, session.actor()?, proposal)?)
        }
        ClaimAction::AcceptMeetup { id } => Reply::record(&market.accept_meetup(id, session.actor()?)?),
        ClaimAction::Mine { status, paging } => {
            let status = status.as_deref().map(parse_claim_status).transpose()?;
            Reply::page(&market.my_claims(session.actor()?, status, page_request(*paging))?)
        }
        ClaimAction::Received { status, paging } => {
            let status = status.as_deref().map(parse_claim_status).transpose()?;
            Reply::page(&market.received_claims(session.actor()?, status, page_request(*paging))?)
        }
    }
}
