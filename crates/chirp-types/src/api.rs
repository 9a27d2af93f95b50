use serde::{Deserialize, Serialize};

// -- Messages --

/// PATCH body. Only `messageText` is read; anything else the client
/// sends along is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchMessageRequest {
    #[serde(default)]
    pub message_text: String,
}

// -- Health --

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
