//! Renders the text of a message from the current alert group state.
//!
//! Rendering is a pure function of its inputs: an edit applied twice against
//! the same state produces the same text.

use crate::domain::models::{AlertGroup, LogRecord, MessageRole};

pub fn render_message(group: &AlertGroup, role: MessageRole, log_records: &[LogRecord]) -> String {
    match role {
        MessageRole::GroupSummary | MessageRole::PersonalCopy => render_summary(group),
        MessageRole::ActionStrip => render_actions(group),
        MessageRole::ActivityLog => render_log(group, log_records),
    }
}

fn render_summary(group: &AlertGroup) -> String {
    let mut text = format!("[{}] {}", group.status_label(), group.title);
    if let Some(root) = group.root_alert_group_id {
        text.push_str(&format!("\nAttached to alert group {root}"));
    }
    text
}

fn render_actions(group: &AlertGroup) -> String {
    if group.is_attached() {
        return "Actions: Unattach".to_string();
    }
    if group.resolved {
        return "Actions: Unresolve".to_string();
    }

    let ack = if group.acknowledged { "Unacknowledge" } else { "Acknowledge" };
    let silence = if group.silenced { "Unsilence" } else { "Silence" };
    format!("Actions: {ack} | Resolve | {silence}")
}

fn render_log(group: &AlertGroup, log_records: &[LogRecord]) -> String {
    let mut lines = vec![format!("Alert group log: {}", group.title)];
    lines.extend(
        log_records
            .iter()
            .filter(|record| record.alert_group_id == group.id)
            .map(|record| {
                format!(
                    "{} {}",
                    record.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    record.kind.describe()
                )
            }),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::LogRecordType;
    use uuid::Uuid;

    #[test]
    fn test_summary_reflects_state() {
        let mut group = AlertGroup::new(Uuid::new_v4(), "Disk full");
        assert_eq!(render_message(&group, MessageRole::GroupSummary, &[]), "[Firing] Disk full");
        group.acknowledged = true;
        assert_eq!(
            render_message(&group, MessageRole::PersonalCopy, &[]),
            "[Acknowledged] Disk full"
        );
    }

    #[test]
    fn test_action_strip() {
        let mut group = AlertGroup::new(Uuid::new_v4(), "Disk full");
        assert_eq!(
            render_message(&group, MessageRole::ActionStrip, &[]),
            "Actions: Acknowledge | Resolve | Silence"
        );
        group.silenced = true;
        assert_eq!(
            render_message(&group, MessageRole::ActionStrip, &[]),
            "Actions: Acknowledge | Resolve | Unsilence"
        );
        group.resolved = true;
        assert_eq!(render_message(&group, MessageRole::ActionStrip, &[]), "Actions: Unresolve");
    }

    #[test]
    fn test_activity_log_lists_records_in_order() {
        let group = AlertGroup::new(Uuid::new_v4(), "Disk full");
        let records = vec![
            LogRecord::new(group.id, LogRecordType::Ack),
            LogRecord::new(group.id, LogRecordType::Resolved),
            LogRecord::new(Uuid::new_v4(), LogRecordType::Silence),
        ];

        let text = render_message(&group, MessageRole::ActivityLog, &records);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("acknowledged"));
        assert!(lines[2].ends_with("resolved"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let group = AlertGroup::new(Uuid::new_v4(), "Disk full");
        let records = vec![LogRecord::new(group.id, LogRecordType::Ack)];
        for role in [MessageRole::GroupSummary, MessageRole::ActionStrip, MessageRole::ActivityLog] {
            assert_eq!(
                render_message(&group, role, &records),
                render_message(&group, role, &records)
            );
        }
    }
}
