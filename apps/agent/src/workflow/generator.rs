//! Question Generator: writes (and rewrites) the interview question.

use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{complete_json, LanguageModel, LlmError};
use crate::workflow::models::{InterviewQuestion, SelectedPaper};
use crate::workflow::prompts::{
    GENERATOR_PROMPT_TEMPLATE, GENERATOR_SYSTEM, REFINE_PROMPT_TEMPLATE, REFINE_SYSTEM,
};
use crate::workflow::{system_prompt, Step, WorkflowError};

/// Creative steps run warmer than the planner/selector/reviewer.
const GENERATION_TEMPERATURE: f32 = 0.7;

/// Raw JSON shape the model is asked to produce.
#[derive(Debug, Deserialize)]
struct GeneratedQuestion {
    question: String,
    wrong_answer: String,
    explanation: String,
    #[serde(default)]
    citation: Option<String>,
}

/// Creation mode: first draft from the selected paper.
pub async fn generate_question(
    llm: &dyn LanguageModel,
    topic: &str,
    paper: &SelectedPaper,
) -> Result<InterviewQuestion, WorkflowError> {
    let system = system_prompt(GENERATOR_SYSTEM, JSON_ONLY_INSTRUCTION);
    let prompt = GENERATOR_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{title}", &paper.title)
        .replace("{summary}", &paper.summary)
        .replace("{url}", &paper.url);

    let question = call_generator(llm, &system, &prompt, topic, paper).await?;
    info!("Generated first draft for topic {:?}", topic);
    Ok(question)
}

/// Refinement mode: rewrites `previous` to address the reviewer's `feedback`.
pub async fn refine_question(
    llm: &dyn LanguageModel,
    topic: &str,
    paper: &SelectedPaper,
    previous: &InterviewQuestion,
    feedback: &str,
) -> Result<InterviewQuestion, WorkflowError> {
    let system = system_prompt(REFINE_SYSTEM, JSON_ONLY_INSTRUCTION);
    let prompt = REFINE_PROMPT_TEMPLATE
        .replace("{question}", &previous.question)
        .replace("{wrong_answer}", &previous.wrong_answer)
        .replace("{explanation}", &previous.explanation)
        .replace("{feedback}", feedback);

    let question = call_generator(llm, &system, &prompt, topic, paper).await?;
    info!("Refined draft for topic {:?}", topic);
    Ok(question)
}

async fn call_generator(
    llm: &dyn LanguageModel,
    system: &str,
    prompt: &str,
    topic: &str,
    paper: &SelectedPaper,
) -> Result<InterviewQuestion, WorkflowError> {
    let generated: GeneratedQuestion =
        match complete_json(llm, system, prompt, GENERATION_TEMPERATURE).await {
            Ok(generated) => generated,
            Err(LlmError::Parse(e)) => {
                warn!("Generator returned unparsable output: {}", e);
                return Err(WorkflowError::MalformedQuestion);
            }
            Err(e) => return Err(WorkflowError::llm(Step::QuestionGeneration)(e)),
        };

    if generated.question.trim().is_empty() {
        warn!("Generator returned an empty question");
        return Err(WorkflowError::MalformedQuestion);
    }

    Ok(into_question(generated, topic, paper))
}

/// Keeps the model's citation only when it actually points at the selected paper.
fn into_question(
    generated: GeneratedQuestion,
    topic: &str,
    paper: &SelectedPaper,
) -> InterviewQuestion {
    let citation = match generated.citation {
        Some(c) if c.contains(&paper.url) => c,
        _ => paper.fallback_citation(),
    };

    InterviewQuestion {
        topic: topic.to_string(),
        question: generated.question.trim().to_string(),
        wrong_answer: generated.wrong_answer.trim().to_string(),
        explanation: generated.explanation.trim().to_string(),
        citation,
    }
}
