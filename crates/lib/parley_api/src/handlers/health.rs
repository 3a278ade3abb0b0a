//! Liveness endpoint.

/// `GET /` — plain text liveness check, independent of upstream availability.
pub async fn health_handler() -> &'static str {
    "Chatbot backend is running successfully!"
}
