use serde::Deserialize;

use crate::domain::{AreaCode, AvailableNumbers, AvailableNumbersResponse};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct AvailableNumbersJsonResponse {
    #[serde(default)]
    numbers: Vec<String>,
}

pub fn encode_available_numbers_query(request: &AvailableNumbers) -> Vec<(String, String)> {
    vec![(
        AreaCode::FIELD.to_owned(),
        request.area_code().as_str().to_owned(),
    )]
}

pub fn decode_available_numbers_json_response(
    json: &str,
) -> Result<AvailableNumbersResponse, TransportError> {
    let raw: serde_json::Value = serde_json::from_str(json)?;
    let parsed: AvailableNumbersJsonResponse = serde_json::from_value(raw.clone())?;

    Ok(AvailableNumbersResponse {
        numbers: parsed.numbers,
        raw,
    })
}
