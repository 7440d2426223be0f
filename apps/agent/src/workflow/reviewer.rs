//! Reviewer: bar-raiser critique of a draft question.

use tracing::info;

use crate::llm_client::LanguageModel;
use crate::workflow::models::InterviewQuestion;
use crate::workflow::prompts::{REVIEWER_PROMPT_TEMPLATE, REVIEWER_SYSTEM};
use crate::workflow::{system_prompt, Step, WorkflowError};

/// Literal, case-sensitive marker the reviewer uses to accept a draft.
pub const APPROVAL_KEYWORD: &str = "APPROVE";

/// Returns the reviewer's free-text feedback for `question`.
pub async fn review_question(
    llm: &dyn LanguageModel,
    question: &InterviewQuestion,
) -> Result<String, WorkflowError> {
    let system = system_prompt(REVIEWER_SYSTEM, "");
    let prompt = REVIEWER_PROMPT_TEMPLATE.replace("{digest}", &question.digest());

    let feedback = llm
        .complete(&system, &prompt, 0.0)
        .await
        .map_err(WorkflowError::llm(Step::Review))?;

    info!(
        "Review complete: {:?}",
        feedback.chars().take(200).collect::<String>()
    );
    Ok(feedback)
}

/// Substring containment only: no case folding, no word boundaries.
pub fn is_approved(feedback: &str) -> bool {
    feedback.contains(APPROVAL_KEYWORD)
}
