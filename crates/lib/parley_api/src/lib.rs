//! # parley_api
//!
//! HTTP API library for Parley.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use parley_core::completion::CompletionClient;
use parley_core::scheduling::SchedulingClient;

use crate::handlers::{chat, health};

/// Shared application state passed to all handlers.
///
/// Everything here is built before the listener binds and immutable
/// afterwards, including the scheduling client's token cache.
#[derive(Clone)]
pub struct AppState {
    /// Completion provider client.
    pub completion: Arc<CompletionClient>,
    /// Scheduling provider client with its startup token cache.
    pub scheduling: Arc<SchedulingClient>,
}

/// Builds the axum router with all routes and shared state.
///
/// The CORS layer allows any origin with the methods the embedding sites
/// send; preflight `OPTIONS` is answered by the layer itself.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health::health_handler))
        .route("/chat", post(chat::chat_handler))
        .layer(cors)
        .with_state(state)
}
