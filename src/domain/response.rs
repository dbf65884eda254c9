#[derive(Debug, Clone, PartialEq)]
/// Successful response from `begin_call`.
pub struct BeginCallResponse {
    /// Session id assigned by the switchboard, when one was returned.
    pub session_id: Option<String>,
    /// Call status reported by the switchboard; `initiated` when absent.
    pub status: String,
    /// Full response body as returned by the API.
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
/// Successful response from `numbers/available`.
pub struct AvailableNumbersResponse {
    /// Numbers available in the requested area code.
    pub numbers: Vec<String>,
    /// Full response body as returned by the API.
    pub raw: serde_json::Value,
}
