//! JSON-RPC 2.0 envelope types and request validation for `agent.chat`.

pub mod handlers;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::render::question_preview;
use crate::workflow::WorkflowOutcome;

pub const JSONRPC_VERSION: &str = "2.0";
pub const CHAT_METHOD: &str = "agent.chat";

const UNKNOWN: &str = "unknown";

/// Standard JSON-RPC 2.0 error codes used by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: ErrorData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorData {
    pub detail: String,
    /// Echo of the unknown method name on Method-not-found errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl RpcError {
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: code.message().to_string(),
            data: ErrorData {
                detail: detail.into(),
                method: None,
            },
        }
    }

    fn method_not_found(method: &str) -> Self {
        let mut err = Self::new(
            ErrorCode::MethodNotFound,
            format!("Method '{method}' not found. Supported methods: {CHAT_METHOD}"),
        );
        err.data.method = Some(method.to_string());
        err
    }
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ChatResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Value,
}

impl RpcResponse {
    pub fn success(id: Value, result: ChatResult) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// `result` of a successful `agent.chat` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    pub response: String,
    pub status: String,
    pub metadata: ChatResultMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResultMetadata {
    pub pdf_url: String,
    pub topic: String,
    pub question_preview: String,
    pub conversation_id: String,
}

impl ChatResult {
    pub fn published(pdf_url: String, outcome: &WorkflowOutcome, conversation_id: &str) -> Self {
        Self {
            response: format!("PDF generated successfully: {pdf_url}"),
            status: "success".to_string(),
            metadata: ChatResultMetadata {
                pdf_url,
                topic: outcome.topic.clone(),
                question_preview: question_preview(&outcome.question.question),
                conversation_id: conversation_id.to_string(),
            },
        }
    }
}

/// Caller context carried in `params.metadata`; only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    pub user_id: String,
    pub source_interface: String,
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self {
            user_id: UNKNOWN.to_string(),
            source_interface: UNKNOWN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatParams {
    pub conversation_id: String,
    /// The topic, trimmed.
    pub message: String,
    pub metadata: RequestMetadata,
}

/// A validated `agent.chat` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub id: Value,
    pub params: ChatParams,
}

/// A request that failed validation, with the id to echo.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub id: Value,
    pub error: RpcError,
}

impl Rejection {
    fn new(id: &Value, code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            id: id.clone(),
            error: RpcError::new(code, detail),
        }
    }
}

/// Validates a raw request body. The first failing check decides the error.
pub fn parse_envelope(body: &[u8]) -> Result<ChatRequest, Rejection> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        Rejection::new(&Value::Null, ErrorCode::ParseError, format!("Invalid JSON: {e}"))
    })?;

    let Value::Object(envelope) = value else {
        return Err(Rejection::new(
            &Value::Null,
            ErrorCode::InvalidRequest,
            "Request must be a JSON object",
        ));
    };

    // Echo the id whenever it is usable, even on later failures
    let id = match envelope.get("id") {
        Some(v @ (Value::String(_) | Value::Number(_))) => v.clone(),
        _ => Value::Null,
    };

    if envelope.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return Err(Rejection::new(
            &id,
            ErrorCode::InvalidRequest,
            "jsonrpc must be exactly \"2.0\"",
        ));
    }

    if id.is_null() {
        return Err(Rejection::new(
            &id,
            ErrorCode::InvalidRequest,
            "id is required and must be a string or number",
        ));
    }

    let method = envelope
        .get("method")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Rejection::new(
                &id,
                ErrorCode::InvalidRequest,
                "method is required and must be a string",
            )
        })?;

    if method != CHAT_METHOD {
        return Err(Rejection {
            id,
            error: RpcError::method_not_found(method),
        });
    }

    let params = parse_params(envelope.get("params"))
        .map_err(|detail| Rejection::new(&id, ErrorCode::InvalidParams, detail))?;

    Ok(ChatRequest { id, params })
}

fn parse_params(params: Option<&Value>) -> Result<ChatParams, String> {
    let Some(Value::Object(params)) = params else {
        return Err("params must be an object".to_string());
    };

    let message = required_string(params, "message")?;
    let conversation_id = required_string(params, "conversation_id")?;

    let metadata = match params.get("metadata") {
        None | Some(Value::Null) => RequestMetadata::default(),
        Some(Value::Object(meta)) => {
            let field = |key: &str| {
                meta.get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .unwrap_or(UNKNOWN)
                    .to_string()
            };
            RequestMetadata {
                user_id: field("user_id"),
                source_interface: field("source_interface"),
            }
        }
        Some(_) => return Err("metadata must be an object".to_string()),
    };

    Ok(ChatParams {
        conversation_id: conversation_id.to_string(),
        message: message.trim().to_string(),
        metadata,
    })
}

fn required_string<'a>(params: &'a Map<String, Value>, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("Missing required parameter: {key}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reject(body: Value) -> Rejection {
        parse_envelope(body.to_string().as_bytes()).unwrap_err()
    }

    fn chat(params: Value) -> Value {
        json!({"jsonrpc": "2.0", "method": "agent.chat", "params": params, "id": "req-1"})
    }

    #[test]
    fn test_valid_request_is_extracted() {
        let body = chat(json!({
            "conversation_id": "c-1",
            "message": "  machine learning ",
            "metadata": {"user_id": "u-9", "extra": true}
        }));
        let request = parse_envelope(body.to_string().as_bytes()).unwrap();

        assert_eq!(request.id, json!("req-1"));
        assert_eq!(request.params.message, "machine learning");
        assert_eq!(request.params.conversation_id, "c-1");
        assert_eq!(request.params.metadata.user_id, "u-9");
        assert_eq!(request.params.metadata.source_interface, "unknown");
    }

    #[test]
    fn test_numeric_id_is_kept_as_is() {
        let mut body = chat(json!({"conversation_id": "c", "message": "rag"}));
        body["id"] = json!(42);
        let request = parse_envelope(body.to_string().as_bytes()).unwrap();
        assert_eq!(request.id, json!(42));
    }

    #[test]
    fn test_oversized_numeric_id_is_echoed_digit_for_digit() {
        let body = r#"{"jsonrpc": "2.0", "method": "agent.chat",
            "params": {"conversation_id": "c", "message": "rag"},
            "id": 123456789012345678901234567890}"#;
        let request = parse_envelope(body.as_bytes()).unwrap();

        let response = RpcResponse::failure(
            request.id,
            RpcError::new(ErrorCode::InternalError, "boom"),
        );
        let wire = serde_json::to_string(&response).unwrap();
        assert!(
            wire.ends_with(r#""id":123456789012345678901234567890}"#),
            "id changed: {wire}"
        );
    }

    #[test]
    fn test_fractional_id_keeps_its_original_spelling() {
        let body = r#"{"jsonrpc": "2.0", "method": "agent.chat",
            "params": {"conversation_id": "c", "message": "rag"}, "id": 1.50}"#;
        let request = parse_envelope(body.as_bytes()).unwrap();
        assert_eq!(serde_json::to_string(&request.id).unwrap(), "1.50");
    }

    #[test]
    fn test_malformed_json_is_parse_error_with_null_id() {
        let rejection = parse_envelope(b"{\"jsonrpc\": \"2.0\", ").unwrap_err();
        assert_eq!(rejection.error.code, -32700);
        assert_eq!(rejection.error.message, "Parse error");
        assert!(rejection.id.is_null());
    }

    #[test]
    fn test_non_object_body_is_invalid_request() {
        let rejection = reject(json!([1, 2, 3]));
        assert_eq!(rejection.error.code, -32600);
        assert!(rejection.id.is_null());
    }

    #[test]
    fn test_wrong_version_is_invalid_request_but_echoes_id() {
        let mut body = chat(json!({"conversation_id": "c", "message": "m"}));
        body["jsonrpc"] = json!("1.0");
        let rejection = reject(body);
        assert_eq!(rejection.error.code, -32600);
        assert_eq!(rejection.id, json!("req-1"));
    }

    #[test]
    fn test_missing_or_unusable_id_is_invalid_request() {
        let mut body = chat(json!({"conversation_id": "c", "message": "m"}));
        body.as_object_mut().unwrap().remove("id");
        assert_eq!(reject(body.clone()).error.code, -32600);

        body["id"] = json!({"nested": true});
        assert_eq!(reject(body).error.code, -32600);
    }

    #[test]
    fn test_missing_method_is_invalid_request() {
        let mut body = chat(json!({"conversation_id": "c", "message": "m"}));
        body.as_object_mut().unwrap().remove("method");
        assert_eq!(reject(body).error.code, -32600);
    }

    #[test]
    fn test_unknown_method_is_method_not_found_with_echo() {
        let mut body = chat(json!({"conversation_id": "c", "message": "m"}));
        body["method"] = json!("agent.delete");
        let rejection = reject(body);
        assert_eq!(rejection.error.code, -32601);
        assert_eq!(rejection.error.data.method.as_deref(), Some("agent.delete"));
    }

    #[test]
    fn test_unknown_method_wins_over_bad_params() {
        let body = json!({"jsonrpc": "2.0", "method": "other", "params": 7, "id": 1});
        assert_eq!(reject(body).error.code, -32601);
    }

    #[test]
    fn test_param_problems_are_invalid_params() {
        let cases = [
            json!(null),
            json!("just a string"),
            json!({"conversation_id": "c"}),
            json!({"conversation_id": "c", "message": "   "}),
            json!({"message": "rag"}),
            json!({"conversation_id": 5, "message": "rag"}),
            json!({"conversation_id": "c", "message": "rag", "metadata": "web"}),
        ];
        for params in cases {
            let rejection = reject(chat(params.clone()));
            assert_eq!(rejection.error.code, -32602, "params: {params}");
            assert_eq!(rejection.id, json!("req-1"));
        }
    }

    #[test]
    fn test_error_response_shape() {
        let response = RpcResponse::failure(
            json!(7),
            RpcError::new(ErrorCode::InternalError, "boom"),
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "error": {"code": -32603, "message": "Internal error", "data": {"detail": "boom"}},
                "id": 7
            })
        );
    }
}
