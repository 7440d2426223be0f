// Interview question workflow.
// Planner → Researcher → Selector → Generator, then the bounded
// Generator/Reviewer refinement loop. All LLM calls go through the
// `LanguageModel` capability and all searches through `SearchProvider`.

pub mod generator;
pub mod linkedin;
pub mod models;
pub mod planner;
pub mod prompts;
pub mod refinement;
pub mod researcher;
pub mod reviewer;
pub mod selector;
pub mod sequencer;

use std::fmt;

use thiserror::Error;

use crate::llm_client::prompts::SENIORITY_BAR;
use crate::llm_client::LlmError;

pub use sequencer::{run_workflow, WorkflowOutcome};

/// The LLM-backed steps, used to label failures and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    TopicPlanning,
    QueryPlanning,
    PaperSelection,
    QuestionGeneration,
    Review,
    LinkedInPost,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::TopicPlanning => "topic planning",
            Step::QueryPlanning => "query planning",
            Step::PaperSelection => "paper selection",
            Step::QuestionGeneration => "question generation",
            Step::Review => "review",
            Step::LinkedInPost => "LinkedIn post writing",
        };
        f.write_str(label)
    }
}

/// Why a workflow run stopped without a question.
///
/// The `Display` text is user-facing: it becomes the `detail` of the JSON-RPC error.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to plan search queries for the topic. Please try again.")]
    NoQueries,

    #[error("No research papers found. Please check SERPAPI_API_KEY configuration and try again.")]
    NoPapers,

    #[error("Failed to select a suitable research paper. Please try a different topic.")]
    NoSelection,

    #[error("Failed to generate interview question from the selected paper. Please try again.")]
    MalformedQuestion,

    #[error("LLM call failed during {step}: {source}")]
    Llm {
        step: Step,
        #[source]
        source: LlmError,
    },
}

impl WorkflowError {
    pub fn llm(step: Step) -> impl FnOnce(LlmError) -> WorkflowError {
        move |source| WorkflowError::Llm { step, source }
    }
}

/// Completes a step's system prompt with the shared fragments.
pub(crate) fn system_prompt(base: &str, instruction: &str) -> String {
    let base = base.replace("{seniority}", SENIORITY_BAR);
    if instruction.is_empty() {
        base
    } else {
        format!("{base}\n\n{instruction}")
    }
}
