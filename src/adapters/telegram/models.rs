//! Wire types for the subset of the Bot API the client uses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EditMessageTextRequest<'a> {
    pub chat_id: &'a str,
    pub message_id: i64,
    pub text: &'a str,
}

/// Envelope every Bot API method responds with.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error_code: Option<u16>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}

/// `editMessageText` returns either the edited message or `true`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EditResult {
    Message(SentMessage),
    Flag(bool),
}
