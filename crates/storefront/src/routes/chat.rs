//! Chat widget route handler.
//!
//! The widget posts each message over HTMX and appends the returned
//! fragment to the transcript. The transcript itself only exists in the
//! rendered page; reloading starts a fresh conversation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use chrono::Local;
use serde::Deserialize;
use tracing::instrument;

use crate::api::chatbot::APOLOGY;
use crate::state::AppState;

/// Chat form data.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

/// A single transcript entry.
#[derive(Clone)]
pub struct ChatMessageView {
    pub sender: &'static str,
    pub text: String,
    pub timestamp: String,
}

impl ChatMessageView {
    fn new(sender: &'static str, text: String) -> Self {
        Self {
            sender,
            text,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

/// Chat exchange fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/chat_messages.html")]
pub struct ChatMessagesTemplate {
    pub messages: Vec<ChatMessageView>,
}

/// Handle one chat exchange (HTMX).
///
/// Always returns a fragment with the user's message and a reply; bot
/// failures become the canned apology rather than an error page.
#[instrument(skip(state, form))]
pub async fn send(State(state): State<AppState>, Form(form): Form<ChatForm>) -> impl IntoResponse {
    let message = form.message.trim().to_string();
    if message.is_empty() {
        return ChatMessagesTemplate {
            messages: Vec::new(),
        };
    }

    let reply = match state.chatbot().send(&message).await {
        Ok(reply) => reply.render_text(),
        Err(e) => {
            tracing::error!(error = %e, "chatbot request failed");
            APOLOGY.to_string()
        }
    };

    ChatMessagesTemplate {
        messages: vec![
            ChatMessageView::new("user", message),
            ChatMessageView::new("bot", reply),
        ],
    }
}
