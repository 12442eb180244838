//! Port for the chat platform messages are posted to.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat API error {code}: {description}")]
    Api { code: u16, description: String },

    /// The edit would leave the message unchanged.
    #[error("Message is not modified")]
    NotModified,

    #[error("Chat bot token is not configured")]
    MissingToken,
}

impl ChatError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { code, .. } => *code == 429 || *code >= 500,
            Self::NotModified | Self::MissingToken => false,
        }
    }
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Replace the text of an existing message.
    async fn edit_message(&self, chat_id: &str, message_id: i64, text: &str) -> Result<(), ChatError>;

    /// Post a new message and return its platform message id.
    async fn post_message(&self, chat_id: &str, text: &str) -> Result<i64, ChatError>;
}
