//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok"
    pub status: String,
    /// Whether storage credentials are configured
    pub configured: bool,
}

/// Request to store a JSON document.
#[derive(Debug, Deserialize)]
pub struct UploadContentRequest {
    /// Document to store
    pub data: serde_json::Value,
    /// Optional pin name
    pub name: Option<String>,
}

/// Response for a stored document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadContentResponse {
    /// CID of the stored document
    pub cid: String,
    /// Shareable gateway link
    pub gateway_url: String,
}

/// Query for the pin list.
#[derive(Debug, Deserialize)]
pub struct PinsQuery {
    /// Only pins whose CID contains this value
    pub cid: Option<String>,
}

/// Pin status for one CID.
#[derive(Debug, Serialize, Deserialize)]
pub struct PinStatusResponse {
    /// The CID queried
    pub cid: String,
    /// False when unpinned or unknown
    pub pinned: bool,
}

/// Result of an unpin request.
#[derive(Debug, Serialize, Deserialize)]
pub struct UnpinResponse {
    /// The CID unpinned
    pub cid: String,
    /// False when the service refused or could not be reached
    pub unpinned: bool,
}

/// Request for a batch of access stats.
#[derive(Debug, Deserialize)]
pub struct AccessLogsRequest {
    /// CIDs to look up, answered in this order
    pub cids: Vec<String>,
}

/// Gateway link for one CID.
#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// The CID
    pub cid: String,
    /// Public gateway URL
    pub url: String,
}
