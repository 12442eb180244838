//! Implementation of the `telegraph heartbeat` command.

use anyhow::{Context, Result};

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{HeartbeatPayload, HeartbeatPayloads};
use crate::services::{HeartbeatPayloadBuilder, TitleGroupingTextCreator};

#[derive(Debug, serde::Serialize)]
pub struct HeartbeatOutput {
    pub integration: String,
    #[serde(flatten)]
    pub payloads: HeartbeatPayloads,
}

impl CommandOutput for HeartbeatOutput {
    fn to_human(&self) -> String {
        let render = |payload: &HeartbeatPayload| serde_json::to_string_pretty(payload).unwrap_or_default();
        format!(
            "Heartbeat payloads for {}\n\nExpired:\n{}\n\nRestored:\n{}",
            self.integration,
            render(&self.payloads.expired),
            render(&self.payloads.restored)
        )
    }
}

pub fn execute(integration: &str, json_mode: bool) -> Result<()> {
    let payloads = HeartbeatPayloadBuilder::build(integration, &TitleGroupingTextCreator)
        .with_context(|| format!("Failed to build heartbeat payloads for {integration}"))?;

    output(
        &HeartbeatOutput {
            integration: integration.to_string(),
            payloads,
        },
        json_mode,
    );
    Ok(())
}
