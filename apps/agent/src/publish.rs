//! Render questions to a PDF and upload it.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::render::{format_document, DocumentRenderer, QuestionDocument, RenderError};
use crate::state::AppState;
use crate::workflow::models::InterviewQuestion;

/// Runs the renderer on the blocking pool.
pub async fn render_document(
    renderer: Arc<dyn DocumentRenderer>,
    document: QuestionDocument,
) -> Result<Bytes, RenderError> {
    tokio::task::spawn_blocking(move || renderer.render(&document))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
}

/// Formats `questions` into one document, stores it under `key` and returns its public URL.
pub async fn publish_questions(
    state: &AppState,
    key: &str,
    questions: &[InterviewQuestion],
) -> Result<String, AppError> {
    let document = format_document(questions);
    let bytes = render_document(state.renderer.clone(), document).await?;
    info!("Rendered {} question(s) into {} bytes", questions.len(), bytes.len());

    let url = state
        .store
        .upload(key, bytes, state.renderer.content_type())
        .await?;
    Ok(url)
}
