// @zen-component: CHAT-RelayHandler
//
//! Chat endpoint — keyword routing plus the completion relay.

use axum::Json;
use axum::extract::State;
use tracing::{debug, info};

use parley_core::booking::{self, Intent};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{ChatReply, ChatRequest};

/// `POST /chat` — answer a visitor message.
///
/// Booking and services keywords short-circuit before the completion API;
/// everything else is relayed and the first completion's text is returned
/// verbatim.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatReply>> {
    info!("received a POST request to /chat");
    debug!(body = %body.message, "request body");

    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message is required".into()));
    }

    let reply = match Intent::detect(message) {
        Intent::BookConsultation => booking_reply(&state).await?,
        Intent::Services => booking::SERVICES_REPLY.to_string(),
        Intent::Chat => state.completion.complete(message).await?,
    };

    Ok(Json(ChatReply { reply }))
}

/// Booking branch: list event types when a token is cached, otherwise the
/// static link.
async fn booking_reply(state: &AppState) -> AppResult<String> {
    if state.scheduling.bearer_token().is_none() {
        return Ok(booking::fallback_booking_reply());
    }
    let event_types = state.scheduling.list_event_types().await?;
    Ok(booking::format_event_types(&event_types))
}
