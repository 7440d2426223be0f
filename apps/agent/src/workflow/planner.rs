//! Query Planner: turns a topic into a short list of web search queries.

use tracing::info;

use crate::llm_client::prompts::COMMA_LIST_INSTRUCTION;
use crate::llm_client::LanguageModel;
use crate::workflow::prompts::{PLANNER_PROMPT_TEMPLATE, PLANNER_SYSTEM};
use crate::workflow::{system_prompt, Step, WorkflowError};

/// Upper bound on planned queries; extra items from the model are dropped.
pub const MAX_QUERIES: usize = 5;

/// Asks the LLM for search queries about `topic`.
pub async fn plan_queries(
    llm: &dyn LanguageModel,
    topic: &str,
) -> Result<Vec<String>, WorkflowError> {
    let system = system_prompt(PLANNER_SYSTEM, COMMA_LIST_INSTRUCTION);
    let prompt = PLANNER_PROMPT_TEMPLATE.replace("{topic}", topic);

    let raw = llm
        .complete(&system, &prompt, 0.0)
        .await
        .map_err(WorkflowError::llm(Step::QueryPlanning))?;

    let queries = parse_list(&raw, MAX_QUERIES);
    if queries.is_empty() {
        return Err(WorkflowError::NoQueries);
    }

    info!("Planned {} search queries: {:?}", queries.len(), queries);
    Ok(queries)
}

/// Parses a comma- or newline-separated list from model output.
///
/// Tolerates numbering (`1.`, `2)`), bullets and surrounding quotes, drops
/// empty and duplicate items, and keeps at most `limit` entries.
pub fn parse_list(raw: &str, limit: usize) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for piece in raw.split([',', '\n']) {
        let item = clean_item(piece);
        if item.is_empty() || items.iter().any(|existing| existing == &item) {
            continue;
        }
        items.push(item);
        if items.len() == limit {
            break;
        }
    }
    items
}

fn clean_item(piece: &str) -> String {
    let mut item = piece.trim();

    // "1." / "2)" numbering
    let digits = item.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &item[digits..];
        if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            // "1.5-bit quantization" is a query, not a numbered item
            if stripped.is_empty() || stripped.starts_with(char::is_whitespace) {
                item = stripped.trim_start();
            }
        }
    }

    for bullet in ["- ", "* ", "• "] {
        if let Some(stripped) = item.strip_prefix(bullet) {
            item = stripped.trim_start();
        }
    }

    item.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_string()
}
