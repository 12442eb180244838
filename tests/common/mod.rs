//! Common test utilities for integration tests
//!
//! Provides a recording chat client and fixtures for seeding alert groups,
//! messages and connectors.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use telegraph::adapters::memory::InMemoryStore;
use telegraph::domain::models::{AlertGroup, ConnectorRecord, MessageHandle, MessageRole};
use telegraph::domain::ports::{ChatClient, ChatError, MessageRepository};

/// One call made against the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCall {
    Edit { chat_id: String, message_id: i64, text: String },
    Post { chat_id: String, text: String },
}

/// Chat client that records calls instead of talking to a platform.
#[derive(Default)]
pub struct RecordingChatClient {
    calls: Mutex<Vec<ChatCall>>,
    next_message_id: Mutex<i64>,
}

impl RecordingChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<(i64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ChatCall::Edit { message_id, text, .. } => Some((message_id, text)),
                ChatCall::Post { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatClient for RecordingChatClient {
    async fn edit_message(&self, chat_id: &str, message_id: i64, text: &str) -> Result<(), ChatError> {
        self.calls.lock().unwrap().push(ChatCall::Edit {
            chat_id: chat_id.to_string(),
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn post_message(&self, chat_id: &str, text: &str) -> Result<i64, ChatError> {
        self.calls.lock().unwrap().push(ChatCall::Post {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        });
        let mut next = self.next_message_id.lock().unwrap();
        *next += 1;
        Ok(1000 + *next)
    }
}

pub const CHANNEL: &str = "-1001";

/// Store holding one group of a tenant whose channel connector is configured.
pub async fn store_with_group(title: &str) -> (InMemoryStore, AlertGroup) {
    let store = InMemoryStore::new();
    let tenant = Uuid::new_v4();
    let group = AlertGroup::new(tenant, title);
    store.put_alert_group(group.clone()).await;
    store
        .put_connector(ConnectorRecord::tenant(tenant, true).with_chat_id(CHANNEL))
        .await;
    (store, group)
}

/// Post a message of `role` for `group` and return its handle.
pub async fn post(store: &InMemoryStore, group: &AlertGroup, role: MessageRole, message_id: i64) -> MessageHandle {
    let handle = MessageHandle::new(group.id, role, CHANNEL, message_id);
    store.insert_message(&handle).await.unwrap();
    handle
}

/// Setup test logging
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
