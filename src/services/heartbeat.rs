//! Heartbeat payloads for dead-man's-switch integrations.

use crate::domain::models::{HeartbeatPayload, HeartbeatPayloads, HeartbeatStatus, HeartbeatTexts};
use crate::domain::ports::{HeartbeatError, HeartbeatTextSource};

/// Builds the "expired" and "restored" payloads of an integration.
pub struct HeartbeatPayloadBuilder;

impl HeartbeatPayloadBuilder {
    /// Both payloads are always produced, even if only one is used later.
    pub fn build(
        integration: &str,
        source: &dyn HeartbeatTextSource,
    ) -> Result<HeartbeatPayloads, HeartbeatError> {
        let texts = source.heartbeat_texts(integration)?;
        Ok(Self::from_texts(&texts))
    }

    pub fn from_texts(texts: &HeartbeatTexts) -> HeartbeatPayloads {
        HeartbeatPayloads {
            expired: HeartbeatPayload::new(
                HeartbeatStatus::Firing,
                &texts.expired_title,
                &texts.expired_message,
            ),
            restored: HeartbeatPayload::new(
                HeartbeatStatus::Resolved,
                &texts.restored_title,
                &texts.restored_message,
            ),
        }
    }
}

/// Text source for integrations that group alerts by title.
///
/// Expired and restored alerts share one title so that the restored alert
/// lands in (and resolves) the group the expired alert opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleGroupingTextCreator;

impl TitleGroupingTextCreator {
    /// `grafana_alerting` -> `Grafana Alerting`
    fn display_name(integration: &str) -> String {
        integration
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect::<String>()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl HeartbeatTextSource for TitleGroupingTextCreator {
    fn heartbeat_texts(&self, integration: &str) -> Result<HeartbeatTexts, HeartbeatError> {
        let verbal = integration.trim();
        let valid = !verbal.is_empty()
            && verbal
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(HeartbeatError::UnknownIntegration(integration.to_string()));
        }

        let name = Self::display_name(verbal);
        let title = format!("{name} heartbeat");
        Ok(HeartbeatTexts {
            instruction_template: format!(
                "Send a request to the heartbeat URL of this {name} integration at least once \
                 per timeout period. When no request arrives in time an alert is raised."
            ),
            expired_title: title.clone(),
            expired_message: format!(
                "No heartbeat received from {name}. It may have stopped, or the connection \
                 between {name} and the notification service is broken."
            ),
            restored_title: title,
            restored_message: format!("Heartbeat from {name} received again. It is restored."),
        })
    }
}
