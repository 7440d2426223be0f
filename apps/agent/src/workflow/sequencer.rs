//! Step sequencer: runs the whole workflow for one topic.
//!
//! Flow: plan_queries → research_papers → select_paper → generate_question →
//!       (review_question → refine_question)* with at most MAX_ATTEMPTS drafts.
//!
//! Any step failure aborts the run; nothing is retried here (transport retries
//! live in the LLM client).

use tracing::{info, warn};

use crate::llm_client::LanguageModel;
use crate::search::SearchProvider;
use crate::workflow::generator::{generate_question, refine_question};
use crate::workflow::models::InterviewQuestion;
use crate::workflow::planner::plan_queries;
use crate::workflow::refinement::{RefinementState, ReviewVerdict, Transition};
use crate::workflow::researcher::research_papers;
use crate::workflow::reviewer::review_question;
use crate::workflow::selector::select_paper;
use crate::workflow::WorkflowError;

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct WorkflowOutcome {
    pub topic: String,
    pub question: InterviewQuestion,
    pub attempts: u32,
    pub verdict: ReviewVerdict,
}

/// Runs the workflow for `topic`.
pub async fn run_workflow(
    llm: &dyn LanguageModel,
    search: &dyn SearchProvider,
    topic: &str,
) -> Result<WorkflowOutcome, WorkflowError> {
    // Step 1: Plan search queries
    let queries = plan_queries(llm, topic).await?;

    // Step 2: Search
    let papers = research_papers(search, &queries).await?;

    // Step 3: Pick one paper
    let paper = select_paper(llm, topic, &papers).await?;

    // Step 4: First draft
    let mut state = RefinementState::new(generate_question(llm, topic, &paper).await?);

    // Step 5: Review / refine until approved or out of attempts
    let done = loop {
        let feedback = review_question(llm, state.question()).await?;
        match state.reviewed(feedback) {
            Transition::Finished(done) => break done,
            Transition::Revise(pending) => {
                info!(
                    "Draft {} not approved, regenerating with feedback",
                    pending.attempt()
                );
                let feedback = pending.feedback().unwrap_or_default();
                let question =
                    refine_question(llm, topic, &paper, pending.question(), feedback).await?;
                state = pending.revised(question);
            }
        }
    };

    match done.verdict {
        ReviewVerdict::Approved => info!("Question approved after {} attempt(s)", done.attempts),
        ReviewVerdict::Exhausted => warn!(
            "Question not approved after {} attempts; using last draft. Last feedback: {:?}",
            done.attempts,
            done.feedback.chars().take(200).collect::<String>()
        ),
    }

    Ok(WorkflowOutcome {
        topic: topic.to_string(),
        question: done.question,
        attempts: done.attempts,
        verdict: done.verdict,
    })
}
