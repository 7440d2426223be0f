// Daily batch: plan topics, run the workflow per topic, publish one combined PDF.
// A failing topic is skipped; the batch fails only without topics or without any question.

pub mod scheduler;

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::prompts::COMMA_LIST_INSTRUCTION;
use crate::llm_client::LanguageModel;
use crate::publish::publish_questions;
use crate::render::formatter::{batch_pdf_key, linkedin_post_key};
use crate::state::AppState;
use crate::workflow::linkedin::write_linkedin_post;
use crate::workflow::models::InterviewQuestion;
use crate::workflow::planner::parse_list;
use crate::workflow::prompts::{TOPICS_PROMPT, TOPICS_SYSTEM};
use crate::workflow::{run_workflow, system_prompt, Step, WorkflowError};

pub const TOPICS_PER_BATCH: usize = 5;
const TOPIC_TEMPERATURE: f32 = 0.7;

/// What one batch run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub date: NaiveDate,
    pub topics: Vec<String>,
    pub failed_topics: Vec<String>,
    pub questions: usize,
    pub post_urls: Vec<String>,
    pub pdf_url: String,
}

/// Asks the LLM for the day's sub-topics.
pub async fn plan_topics(llm: &dyn LanguageModel) -> Result<Vec<String>, WorkflowError> {
    let system = system_prompt(TOPICS_SYSTEM, COMMA_LIST_INSTRUCTION);
    let raw = llm
        .complete(&system, TOPICS_PROMPT, TOPIC_TEMPERATURE)
        .await
        .map_err(WorkflowError::llm(Step::TopicPlanning))?;
    Ok(parse_list(&raw, TOPICS_PER_BATCH))
}

pub async fn run_batch(state: &AppState, date: NaiveDate) -> Result<BatchReport> {
    info!("Starting daily batch for {date}");

    let topics = plan_topics(state.llm.as_ref())
        .await
        .context("topic planning failed")?;
    if topics.is_empty() {
        bail!("topic planning returned no topics");
    }
    info!("Planned topics: {:?}", topics);

    let mut questions = Vec::new();
    let mut failed_topics = Vec::new();
    let mut post_urls = Vec::new();

    for (i, topic) in topics.iter().enumerate() {
        info!("[{}/{}] Processing topic {:?}", i + 1, topics.len(), topic);

        let outcome = match run_workflow(state.llm.as_ref(), state.search.as_ref(), topic).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Skipping topic {:?}: {e}", topic);
                failed_topics.push(topic.clone());
                continue;
            }
        };

        match publish_post(state, &outcome.question).await {
            Ok(url) => post_urls.push(url),
            Err(e) => warn!("LinkedIn post for {:?} not published: {e:#}", topic),
        }
        questions.push(outcome.question);
    }

    if questions.is_empty() {
        bail!("no questions were generated for {} topic(s)", topics.len());
    }

    let pdf_url = publish_questions(state, &batch_pdf_key(date), &questions)
        .await
        .context("failed to publish the daily PDF")?;
    info!("Daily PDF published: {pdf_url}");

    Ok(BatchReport {
        date,
        topics,
        failed_topics,
        questions: questions.len(),
        post_urls,
        pdf_url,
    })
}

async fn publish_post(state: &AppState, question: &InterviewQuestion) -> Result<String> {
    let post = write_linkedin_post(state.llm.as_ref(), question).await?;
    let url = state
        .store
        .upload(
            &linkedin_post_key(&question.topic),
            Bytes::from(post),
            "text/plain",
        )
        .await?;
    Ok(url)
}
