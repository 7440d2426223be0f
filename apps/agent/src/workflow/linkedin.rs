//! LinkedIn post writer: batch mode only.

use crate::llm_client::LanguageModel;
use crate::workflow::models::InterviewQuestion;
use crate::workflow::prompts::{LINKEDIN_PROMPT_TEMPLATE, LINKEDIN_SYSTEM};
use crate::workflow::{system_prompt, Step, WorkflowError};

const POST_TEMPERATURE: f32 = 0.7;

/// Turns a finished question into a social post.
pub async fn write_linkedin_post(
    llm: &dyn LanguageModel,
    question: &InterviewQuestion,
) -> Result<String, WorkflowError> {
    let system = system_prompt(LINKEDIN_SYSTEM, "");
    let prompt = LINKEDIN_PROMPT_TEMPLATE.replace("{digest}", &question.digest());

    llm.complete(&system, &prompt, POST_TEMPERATURE)
        .await
        .map_err(WorkflowError::llm(Step::LinkedInPost))
}
