use serde::Deserialize;

use crate::domain::{BeginCall, BeginCallResponse};

/// Call status reported when the response body does not carry one.
const DEFAULT_CALL_STATUS: &str = "initiated";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct BeginCallJsonResponse {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

pub fn encode_begin_call_query(request: &BeginCall) -> Vec<(String, String)> {
    vec![
        ("source".to_owned(), request.source().as_str().to_owned()),
        (
            "destination".to_owned(),
            request.destination().as_str().to_owned(),
        ),
        (
            "auto_answer".to_owned(),
            request.options().auto_answer.to_string(),
        ),
    ]
}

pub fn decode_begin_call_json_response(json: &str) -> Result<BeginCallResponse, TransportError> {
    let raw: serde_json::Value = serde_json::from_str(json)?;
    let parsed: BeginCallJsonResponse = serde_json::from_value(raw.clone())?;

    Ok(BeginCallResponse {
        session_id: parsed.session_id,
        status: parsed
            .status
            .unwrap_or_else(|| DEFAULT_CALL_STATUS.to_owned()),
        raw,
    })
}
