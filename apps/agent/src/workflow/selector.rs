//! Paper Selector: asks the LLM to pick the single best candidate.

use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{complete_json, LanguageModel, LlmError};
use crate::workflow::models::{Paper, SelectedPaper};
use crate::workflow::prompts::{SELECTOR_PROMPT_TEMPLATE, SELECTOR_SYSTEM};
use crate::workflow::{system_prompt, Step, WorkflowError};

/// Picks one paper out of `papers`.
///
/// Unparsable output, or a pick without a title or URL, is `NoSelection`.
pub async fn select_paper(
    llm: &dyn LanguageModel,
    topic: &str,
    papers: &[Paper],
) -> Result<SelectedPaper, WorkflowError> {
    if papers.is_empty() {
        return Err(WorkflowError::NoPapers);
    }

    let system = system_prompt(SELECTOR_SYSTEM, JSON_ONLY_INSTRUCTION);
    let prompt = SELECTOR_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{papers}", &render_candidates(papers));

    let selected: SelectedPaper = match complete_json(llm, &system, &prompt, 0.0).await {
        Ok(selected) => selected,
        Err(LlmError::Parse(e)) => {
            warn!("Selector returned unparsable output: {}", e);
            return Err(WorkflowError::NoSelection);
        }
        Err(e) => return Err(WorkflowError::llm(Step::PaperSelection)(e)),
    };

    if selected.title.trim().is_empty() || selected.url.trim().is_empty() {
        warn!("Selector returned a paper without title or URL");
        return Err(WorkflowError::NoSelection);
    }

    info!("Selected paper: {:?} ({})", selected.title, selected.url);
    Ok(selected)
}

fn render_candidates(papers: &[Paper]) -> String {
    papers
        .iter()
        .map(|p| format!("Title: {}\nURL: {}\nSummary: {}", p.title, p.url, p.summary))
        .collect::<Vec<_>>()
        .join("\n\n")
}
