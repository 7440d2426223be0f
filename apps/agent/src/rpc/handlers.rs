use std::time::Duration;

use axum::{extract::State, Json};
use bytes::Bytes;
use chrono::Utc;
use tracing::{field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::errors::AppError;
use crate::publish::publish_questions;
use crate::render::formatter::question_pdf_key;
use crate::rpc::{parse_envelope, ChatParams, ChatResult, RpcResponse, CHAT_METHOD};
use crate::state::AppState;
use crate::workflow::run_workflow;

/// POST /api/v1/agent
/// Always answers HTTP 200; failures travel in the JSON-RPC `error` member.
pub async fn handle_agent(State(state): State<AppState>, body: Bytes) -> Json<RpcResponse> {
    let request = match parse_envelope(&body) {
        Ok(request) => request,
        Err(rejection) => {
            warn!(
                "Rejected request ({}): {}",
                rejection.error.code, rejection.error.data.detail
            );
            return Json(RpcResponse::failure(rejection.id, rejection.error));
        }
    };

    let span = info_span!(
        "agent_chat",
        run_id = %Uuid::new_v4(),
        method = CHAT_METHOD,
        conversation_id = %request.params.conversation_id,
        attempts = field::Empty,
        verdict = field::Empty,
    );
    let secs = state.config.request_timeout_secs;

    let outcome = async {
        info!(
            user_id = %request.params.metadata.user_id,
            source = %request.params.metadata.source_interface,
            "Generating question for topic {:?}",
            request.params.message
        );
        match tokio::time::timeout(Duration::from_secs(secs), answer(&state, &request.params)).await
        {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(secs)),
        }
    }
    .instrument(span)
    .await;

    match outcome {
        Ok(result) => {
            info!("Published {}", result.metadata.pdf_url);
            Json(RpcResponse::success(request.id, result))
        }
        Err(e) => Json(RpcResponse::failure(request.id, e.into_rpc_error())),
    }
}

async fn answer(state: &AppState, params: &ChatParams) -> Result<ChatResult, AppError> {
    let outcome = run_workflow(state.llm.as_ref(), state.search.as_ref(), &params.message).await?;
    Span::current()
        .record("attempts", outcome.attempts)
        .record("verdict", outcome.verdict.as_str());

    let key = question_pdf_key(&outcome.topic, Utc::now());
    let pdf_url = publish_questions(state, &key, std::slice::from_ref(&outcome.question)).await?;

    Ok(ChatResult::published(
        pdf_url,
        &outcome,
        &params.conversation_id,
    ))
}
