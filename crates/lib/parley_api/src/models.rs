//! Request/response models for the HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The visitor's message. A missing field is treated like an empty one.
    #[serde(default)]
    pub message: String,
}

/// Successful reply from `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Error body for every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
