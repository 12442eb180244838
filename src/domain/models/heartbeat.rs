//! Heartbeat notification payloads in the Alertmanager webhook shape.

use serde::{Deserialize, Serialize};

/// Alertmanager alert status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeartbeatStatus {
    Firing,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatLabels {
    pub alertname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatAnnotations {
    pub message: String,
}

/// One heartbeat alert. Field order matches the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatPayload {
    #[serde(rename = "endsAt")]
    pub ends_at: String,
    pub labels: HeartbeatLabels,
    pub status: HeartbeatStatus,
    #[serde(rename = "startsAt")]
    pub starts_at: String,
    pub annotations: HeartbeatAnnotations,
    #[serde(rename = "generatorURL")]
    pub generator_url: Option<String>,
}

impl HeartbeatPayload {
    pub fn new(status: HeartbeatStatus, title: &str, message: &str) -> Self {
        Self {
            ends_at: String::new(),
            labels: HeartbeatLabels {
                alertname: title.to_string(),
            },
            status,
            starts_at: String::new(),
            annotations: HeartbeatAnnotations {
                message: message.to_string(),
            },
            generator_url: None,
        }
    }
}

/// The expired/restored pair produced for one integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatPayloads {
    pub expired: HeartbeatPayload,
    pub restored: HeartbeatPayload,
}

/// Texts a heartbeat integration is rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatTexts {
    pub instruction_template: String,
    pub expired_title: String,
    pub expired_message: String,
    pub restored_title: String,
    pub restored_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shape() {
        let payload = HeartbeatPayload::new(HeartbeatStatus::Firing, "t", "m");
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"endsAt":"","labels":{"alertname":"t"},"status":"firing","startsAt":"","annotations":{"message":"m"},"generatorURL":null}"#
        );
    }
}
