use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::config::Config;
use crate::rpc::CHAT_METHOD;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "interview-q-a-agent";

/// healthy, degraded (search or storage missing) or unhealthy (no LLM key).
pub fn health_status(config: &Config) -> &'static str {
    if config.openai_api_key.is_none() {
        "unhealthy"
    } else if config.serpapi_api_key.is_none() || config.storage.is_none() {
        "degraded"
    } else {
        "healthy"
    }
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": health_status(&state.config),
        "service": SERVICE_NAME
    }))
}

/// GET /
/// Static service descriptor.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "JSON-RPC 2.0",
        "endpoints": {
            "rpc": "POST /api/v1/agent",
            "health": "GET /health"
        },
        "supported_methods": [CHAT_METHOD]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;

    #[test]
    fn test_fully_configured_is_healthy() {
        assert_eq!(health_status(&test_config()), "healthy");
    }

    #[test]
    fn test_missing_search_or_storage_is_degraded() {
        let mut config = test_config();
        config.serpapi_api_key = None;
        assert_eq!(health_status(&config), "degraded");

        let mut config = test_config();
        config.storage = None;
        assert_eq!(health_status(&config), "degraded");
    }

    #[test]
    fn test_missing_llm_key_is_unhealthy() {
        let mut config = test_config();
        config.openai_api_key = None;
        config.storage = None;
        assert_eq!(health_status(&config), "unhealthy");
    }
}
