//! Teacher-facing question authoring: validation of a draft question with
//! its four candidate responses, and the ordered write sequence that saves
//! an accepted draft to the backend.

use crate::api::{ApiClient, ApiError};
use crate::models::NewResponse;

pub const RESPONSES_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDraft {
    pub response_text: String,
    pub is_correct: bool,
}

/// Check every rule and report all violations together, in form order.
pub fn validate(question_text: &str, responses: &[ResponseDraft]) -> Vec<String> {
    let mut errors = Vec::new();

    if question_text.trim().is_empty() {
        errors.push("Question text is required.".to_string());
    }

    for (idx, r) in responses.iter().enumerate() {
        if r.response_text.trim().is_empty() {
            errors.push(format!("Option {} must have text.", idx + 1));
        }
    }

    let correct_count = responses.iter().filter(|r| r.is_correct).count();
    if correct_count == 0 {
        errors.push("Please select exactly one correct response (none selected).".to_string());
    } else if correct_count > 1 {
        errors.push("Please select exactly one correct response (multiple selected).".to_string());
    }

    errors
}

/// Save an already-validated draft: the question first, then each response
/// tagged with the backend-assigned question id, then a wholesale cache
/// clear so every session sees the new data.
///
/// Not transactional: a response write failing mid-way leaves the question
/// (and any earlier responses) in place. The error names the failing write
/// so the teacher can see what was saved.
pub async fn save(
    api: &ApiClient,
    question_text: &str,
    responses: &[ResponseDraft],
) -> Result<(), ApiError> {
    let question = api.create_question(question_text).await?;
    tracing::info!("created question {}", question.id);

    for (idx, r) in responses.iter().enumerate() {
        let new = NewResponse {
            response_text: r.response_text.clone(),
            is_correct: r.is_correct,
            question_id: question.id,
        };
        if let Err(e) = api.create_response(&new).await {
            tracing::error!(
                "response {} of question {} failed to save, question kept: {e}",
                idx + 1,
                question.id
            );
            return Err(e);
        }
    }

    api.invalidate();
    Ok(())
}
