use thiserror::Error;

use crate::render::RenderError;
use crate::rpc::{ErrorCode, RpcError};
use crate::storage::StorageError;
use crate::workflow::WorkflowError;

/// Application-level error type for an `agent.chat` call.
/// Every variant collapses to a JSON-RPC Internal error; the `detail` tells them apart.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Failed to generate PDF: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

impl AppError {
    /// The user-facing `data.detail` string.
    pub fn detail(&self) -> String {
        match self {
            AppError::Storage(StorageError::NotConfigured) => {
                "PDF generated but failed to upload. Please check S3 configuration.".to_string()
            }
            AppError::Storage(e @ StorageError::Upload { .. }) => {
                format!("PDF generated but failed to upload: {e}")
            }
            other => other.to_string(),
        }
    }

    /// Logs the cause at the right level and builds the JSON-RPC error object.
    pub fn into_rpc_error(self) -> RpcError {
        match &self {
            AppError::Workflow(WorkflowError::Llm { step, source }) => {
                tracing::error!("LLM error during {step}: {source}");
            }
            AppError::Workflow(e) => tracing::warn!("Workflow stopped: {e}"),
            AppError::Render(e) => tracing::error!("Render error: {e}"),
            AppError::Storage(e) => tracing::error!("S3 error: {e}"),
            AppError::Timeout(secs) => tracing::error!("Request exceeded {secs}s deadline"),
        }
        RpcError::new(ErrorCode::InternalError, self.detail())
    }
}
