//! Telegram Bot API adapter implementing the [`ChatClient`](crate::domain::ports::ChatClient) port.

pub mod client;
pub mod models;

pub use client::TelegramChatClient;
