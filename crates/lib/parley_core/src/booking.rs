// @awa-component: BOOK-KeywordRouter
//
//! Keyword routing for the booking branch.
//!
//! A substring check over the lowercased message decides whether a request
//! bypasses the completion API. First match wins in declaration order;
//! everything else falls through to the relay.

use crate::scheduling::EventType;

/// Static booking link used when no scheduling token is cached.
pub const FALLBACK_BOOKING_URL: &str = "https://calendly.com/parley/consultation";

/// Canned reply for the services keyword.
pub const SERVICES_REPLY: &str = "We offer:\n\
- Website design and development\n\
- Search engine optimization\n\
- Paid advertising campaigns\n\
- Marketing automation\n\
Ask about any of these, or book a consultation to discuss your project.";

/// What a chat message is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Booking keywords: list event types, or the static link when degraded.
    BookConsultation,
    /// The services keyword: canned services list.
    Services,
    /// Everything else: relay to the completion API.
    Chat,
}

impl Intent {
    /// Detect the intent of a message by fixed substring match.
    pub fn detect(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("book a consultation") || lower.contains("schedule a call") {
            Intent::BookConsultation
        } else if lower.contains("services") {
            Intent::Services
        } else {
            Intent::Chat
        }
    }
}

/// Booking reply when no event types are available.
pub fn fallback_booking_reply() -> String {
    format!("You can book a consultation here: {FALLBACK_BOOKING_URL}")
}

/// Format the provider's event types as a booking reply.
///
/// An empty listing falls back to the static link rather than an empty reply.
pub fn format_event_types(event_types: &[EventType]) -> String {
    if event_types.is_empty() {
        return fallback_booking_reply();
    }
    let mut reply = String::from("Here are our available consultations:\n");
    for event in event_types {
        reply.push_str(&format!("- {}: {}\n", event.name, event.scheduling_url));
    }
    reply.push_str("Pick a time that works for you.");
    reply
}
