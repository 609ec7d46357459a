// Rust guideline compliant 2026-02-06

//! Implementation of the `snet post` commands.

use super::{page_request, Session};
use crate::cli::PostAction;
use crate::output::Reply;
use anyhow::Result;
use sharenet_app::{
    parse_post_status, parse_post_type, AppError, NewPost, QuestionInput,
};

/// Pairs `--question` and `--answer` values in order.
fn pair_questions(questions: &[String], answers: &[String]) -> Result<Vec<QuestionInput>, AppError> {
    if questions.len() != answers.len() {
        return Err(AppError::Validation(format!(
            "every question needs an answer ({} questions, {} answers)",
            questions.len(),
            answers.len()
        )));
    }
    Ok(questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| QuestionInput {
            question: question.clone(),
            answer: answer.clone(),
        })
        .collect())
}

/// Runs a post subcommand.
///
/// # Errors
///
/// Returns the failure of the underlying marketplace operation.
pub fn execute(session: &Session, action: &PostAction) -> Result<Reply> {
    let market = session.market();
    match action {
        PostAction::Create {
            title,
            post_type,
            description,
            location,
            question,
            answer,
        } => {
            let input = NewPost {
                post_type: parse_post_type(post_type)?,
                title: title.clone(),
                description: description.clone(),
                location: location.clone(),
                questions: pair_questions(question, answer)?,
            };
            Reply::record(&market.create_post(session.actor()?, input)?)
        }
        PostAction::Show { id } => {
            let viewer = session.actor().unwrap_or_default();
            Reply::record(&market.get_post_detail(id, viewer)?)
        }
        PostAction::List {
            post_type,
            status,
            paging,
        } => {
            let post_type = post_type.as_deref().map(parse_post_type).transpose()?;
            let status = status.as_deref().map(parse_post_status).transpose()?;
            Reply::page(&market.list_posts(post_type, status, page_request(*paging))?)
        }
        PostAction::Expire { id } => Reply::record(&market.expire_post(id, session.actor()?)?),
        PostAction::Resolve { id, claim } => match claim {
            Some(claim) => Reply::record(&market.resolve_post(id, claim, session.actor()?)?),
            None => Reply::record(&market.mark_resolved(id, session.actor()?)?),
        },
        PostAction::Claims { id, paging } => {
            Reply::page(&market.post_claims(id, session.actor()?, page_request(*paging))?)
        }
    }
}
