//! The chat representative of alert groups.
//!
//! Translates alert group lifecycle events into message synchronization
//! jobs: it decides whether the tenant's chat channel is active, resolves the
//! handler for the event kind and schedules one edit per affected message.
//! Only the alert-created path may lead to a new message being posted.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::connector_gate::ConnectorGate;
use super::edit_scheduler::EditScheduler;
use super::handler_registry::{HandlerName, HandlerRegistry};
use super::message_selector::MessageSelector;
use crate::domain::errors::DomainError;
use crate::domain::models::{
    Alert, AlertGroup, EntityRef, LifecycleEvent, LogRecordType, MessageRole, RepresentativeEvent,
};
use crate::domain::ports::{
    AlertGroupRepository, ConnectorRepository, JobQueue, MessageRepository, QueueError,
};

/// Failures surfaced to the event distribution layer.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The event referenced an entity by id and the lookup found nothing.
    /// The record may not be committed yet.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Storage error: {0}")]
    Storage(#[from] DomainError),

    #[error("Failed to schedule job: {0}")]
    Scheduling(#[from] QueueError),
}

impl DispatchError {
    /// Whether redelivering the same event may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Scheduling(_) => true,
            Self::Storage(e) => matches!(e, DomainError::DatabaseError(_)),
        }
    }
}

/// Why an event was dropped without running a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// The group's channel filter disabled chat notifications.
    ChannelDisabled,
    /// No handler for the kind, or no active chat channel for the tenant.
    NotApplicable,
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    Suppressed(SuppressReason),
    /// The fallback handler ran and did nothing.
    Unhandled,
    /// This many edit jobs were enqueued.
    EditsScheduled(usize),
    /// A post job was enqueued for the alert.
    PostScheduled(Uuid),
}

impl std::fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Suppressed(SuppressReason::ChannelDisabled) => {
                f.write_str("suppressed: chat notifications disabled for the group")
            }
            Self::Suppressed(SuppressReason::NotApplicable) => {
                f.write_str("suppressed: no handler or no active chat channel")
            }
            Self::Unhandled => f.write_str("no handler for event kind"),
            Self::EditsScheduled(count) => write!(f, "{count} message edit(s) scheduled"),
            Self::PostScheduled(alert_id) => write!(f, "post scheduled for alert {alert_id}"),
        }
    }
}

impl DispatchOutcome {
    pub fn jobs_scheduled(&self) -> usize {
        match self {
            Self::Suppressed(_) | Self::Unhandled => 0,
            Self::EditsScheduled(count) => *count,
            Self::PostScheduled(_) => 1,
        }
    }
}

/// Concrete handler implementations, one per [`HandlerName`], plus the
/// required fallback for kinds without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    AlertGroupAction,
    NotFound,
}

impl Handler {
    fn for_name(name: Option<HandlerName>) -> Self {
        match name {
            Some(HandlerName::AlertGroupAction) => Self::AlertGroupAction,
            None => Self::NotFound,
        }
    }
}

pub struct Representative {
    alert_groups: Arc<dyn AlertGroupRepository>,
    gate: ConnectorGate,
    selector: MessageSelector,
    scheduler: EditScheduler,
}

impl Representative {
    pub fn new(
        alert_groups: Arc<dyn AlertGroupRepository>,
        messages: Arc<dyn MessageRepository>,
        connectors: Arc<dyn ConnectorRepository>,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            alert_groups,
            gate: ConnectorGate::new(connectors),
            selector: MessageSelector::new(messages),
            scheduler: EditScheduler::new(queue),
        }
    }

    /// Route an event to its entry point.
    pub async fn dispatch(
        &self,
        event: RepresentativeEvent,
    ) -> Result<DispatchOutcome, DispatchError> {
        match event {
            RepresentativeEvent::Action(event) => self.on_action(event).await,
            RepresentativeEvent::LogUpdated(group) => self.on_log_report_updated(group).await,
            RepresentativeEvent::AlertCreated(alert) => self.on_alert_created(alert).await,
        }
    }

    /// An alert group action (ack, resolve, silence, ...) was recorded.
    #[instrument(skip_all)]
    pub async fn on_action(
        &self,
        event: EntityRef<LifecycleEvent>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let event = self.resolve_lifecycle_event(event).await?;
        info!(
            log_record_id = %event.log_record.id,
            kind = %event.kind(),
            "representative action signal"
        );

        if !event.alert_group.notify_in_channel_enabled {
            debug!(
                alert_group_id = %event.alert_group.id,
                "skipping alert group since chat notification is disabled"
            );
            return Ok(DispatchOutcome::Suppressed(SuppressReason::ChannelDisabled));
        }

        if !self.is_applicable(&event).await? {
            debug!(
                alert_group_id = %event.alert_group.id,
                kind = %event.kind(),
                "representative is not applicable"
            );
            return Ok(DispatchOutcome::Suppressed(SuppressReason::NotApplicable));
        }

        match Self::get_handler(event.kind()) {
            Handler::AlertGroupAction => self.on_alert_group_action(&event.alert_group).await,
            Handler::NotFound => Ok(Self::on_handler_not_found(event.kind())),
        }
    }

    /// The activity log of a group changed. Not gated by event kind or
    /// connector presence, only by the group's notification setting.
    #[instrument(skip_all)]
    pub async fn on_log_report_updated(
        &self,
        alert_group: EntityRef<AlertGroup>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let alert_group = self.resolve_alert_group(alert_group).await?;
        info!(alert_group_id = %alert_group.id, "representative log report update signal");

        if !alert_group.notify_in_channel_enabled {
            debug!(
                alert_group_id = %alert_group.id,
                "skipping alert group since chat notification is disabled"
            );
            return Ok(DispatchOutcome::Suppressed(SuppressReason::ChannelDisabled));
        }

        self.refresh(alert_group.id, &MessageRole::LOG_REPORT_ROLES).await
    }

    /// A new alert arrived; schedule building its representation.
    #[instrument(skip_all)]
    pub async fn on_alert_created(
        &self,
        alert: EntityRef<Alert>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let alert = match alert {
            EntityRef::Loaded(alert) => alert,
            EntityRef::Id(id) => self
                .alert_groups
                .get_alert(id)
                .await?
                .ok_or(DispatchError::NotFound { entity: "Alert", id })?,
        };
        let alert_group = self
            .resolve_alert_group(EntityRef::Id(alert.alert_group_id))
            .await?;

        if !alert_group.notify_in_channel_enabled {
            debug!(
                alert_id = %alert.id,
                "skipping alert since chat notification is disabled"
            );
            return Ok(DispatchOutcome::Suppressed(SuppressReason::ChannelDisabled));
        }

        // Posting needs a channel; user connectors alone never provide one.
        if self.gate.tenant_chat_id(alert_group.tenant_id).await?.is_none() {
            debug!(
                alert_id = %alert.id,
                tenant_id = %alert_group.tenant_id,
                "skipping alert since the tenant has no configured chat"
            );
            return Ok(DispatchOutcome::Suppressed(SuppressReason::NotApplicable));
        }

        self.scheduler.schedule_post(alert.id)?;
        Ok(DispatchOutcome::PostScheduled(alert.id))
    }

    /// Resolve the handler for an event kind. Exactly one resolution happens
    /// per event; kinds without a handler get the no-op fallback.
    pub fn get_handler(kind: LogRecordType) -> Handler {
        let name = HandlerRegistry::resolve(kind);
        match name {
            Some(name) => info!(handler = %name, "using handler to process action signal"),
            None => info!(%kind, "no handler registered for action signal"),
        }
        Handler::for_name(name)
    }

    async fn is_applicable(&self, event: &LifecycleEvent) -> Result<bool, DispatchError> {
        if !HandlerRegistry::handles(event.kind()) {
            return Ok(false);
        }
        Ok(self
            .gate
            .is_channel_active(event.alert_group.tenant_id)
            .await?)
    }

    async fn on_alert_group_action(
        &self,
        alert_group: &AlertGroup,
    ) -> Result<DispatchOutcome, DispatchError> {
        self.refresh(alert_group.id, &MessageRole::ACTION_ROLES).await
    }

    fn on_handler_not_found(kind: LogRecordType) -> DispatchOutcome {
        info!(%kind, "handler not found, ignoring action signal");
        DispatchOutcome::Unhandled
    }

    async fn refresh(
        &self,
        alert_group_id: Uuid,
        roles: &[MessageRole],
    ) -> Result<DispatchOutcome, DispatchError> {
        let messages = self.selector.select(alert_group_id, roles).await?;
        let scheduled = self.scheduler.schedule_edits(&messages)?;
        Ok(DispatchOutcome::EditsScheduled(scheduled))
    }

    async fn resolve_lifecycle_event(
        &self,
        event: EntityRef<LifecycleEvent>,
    ) -> Result<LifecycleEvent, DispatchError> {
        match event {
            EntityRef::Loaded(event) => Ok(event),
            EntityRef::Id(id) => {
                let log_record = self
                    .alert_groups
                    .get_log_record(id)
                    .await?
                    .ok_or(DispatchError::NotFound { entity: "Log record", id })?;
                let alert_group = self
                    .resolve_alert_group(EntityRef::Id(log_record.alert_group_id))
                    .await?;
                Ok(LifecycleEvent::new(log_record, alert_group))
            }
        }
    }

    async fn resolve_alert_group(
        &self,
        alert_group: EntityRef<AlertGroup>,
    ) -> Result<AlertGroup, DispatchError> {
        match alert_group {
            EntityRef::Loaded(group) => Ok(group),
            EntityRef::Id(id) => self
                .alert_groups
                .get_alert_group(id)
                .await?
                .ok_or(DispatchError::NotFound { entity: "Alert group", id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryJobQueue, InMemoryStore};
    use crate::domain::models::{ConnectorRecord, Job, LogRecord, MessageHandle};

    struct Fixture {
        store: Arc<InMemoryStore>,
        queue: Arc<InMemoryJobQueue>,
        representative: Representative,
        group: AlertGroup,
    }

    enum Connect {
        Nothing,
        Tenant { configured: bool },
        User,
    }

    async fn fixture(notify: bool, connect: Connect) -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let queue = Arc::new(InMemoryJobQueue::new());
        let tenant = Uuid::new_v4();
        let group = AlertGroup::new(tenant, "CPU high").with_notify_in_channel(notify);
        store.put_alert_group(group.clone()).await;
        match connect {
            Connect::Nothing => {}
            Connect::Tenant { configured } => {
                store
                    .put_connector(ConnectorRecord::tenant(tenant, configured).with_chat_id("-100"))
                    .await;
            }
            Connect::User => {
                store.put_connector(ConnectorRecord::user(Uuid::new_v4(), tenant)).await;
            }
        }
        let representative =
            Representative::new(store.clone(), store.clone(), store.clone(), queue.clone());
        Fixture {
            store,
            queue,
            representative,
            group,
        }
    }

    async fn add_message(store: &InMemoryStore, group: &AlertGroup, role: MessageRole) -> MessageHandle {
        let message = MessageHandle::new(group.id, role, "-100", 1);
        store.insert_message(&message).await.unwrap();
        message
    }

    fn action(group: &AlertGroup, kind: LogRecordType) -> EntityRef<LifecycleEvent> {
        EntityRef::Loaded(LifecycleEvent::new(LogRecord::new(group.id, kind), group.clone()))
    }

    #[tokio::test]
    async fn test_action_refreshes_summary_strip_and_personal_copies() {
        let f = fixture(true, Connect::Tenant { configured: true }).await;
        let summary = add_message(&f.store, &f.group, MessageRole::GroupSummary).await;
        let strip = add_message(&f.store, &f.group, MessageRole::ActionStrip).await;
        let personal = add_message(&f.store, &f.group, MessageRole::PersonalCopy).await;
        add_message(&f.store, &f.group, MessageRole::ActivityLog).await;

        let outcome = f
            .representative
            .on_action(action(&f.group, LogRecordType::Ack))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::EditsScheduled(3));
        assert_eq!(
            f.queue.jobs(),
            vec![
                Job::EditMessage { message_id: summary.id },
                Job::EditMessage { message_id: strip.id },
                Job::EditMessage { message_id: personal.id },
            ]
        );
    }

    #[tokio::test]
    async fn test_action_suppressed_when_notification_disabled() {
        let f = fixture(false, Connect::Tenant { configured: true }).await;
        add_message(&f.store, &f.group, MessageRole::GroupSummary).await;

        let outcome = f
            .representative
            .on_action(action(&f.group, LogRecordType::Resolved))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Suppressed(SuppressReason::ChannelDisabled));
        assert!(f.queue.is_empty());
    }

    #[tokio::test]
    async fn test_action_not_applicable_without_connector() {
        let f = fixture(true, Connect::Nothing).await;
        add_message(&f.store, &f.group, MessageRole::GroupSummary).await;

        let outcome = f
            .representative
            .on_action(action(&f.group, LogRecordType::Silence))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Suppressed(SuppressReason::NotApplicable));
        assert!(f.queue.is_empty());
    }

    #[tokio::test]
    async fn test_unmapped_kind_is_not_an_error() {
        let f = fixture(true, Connect::Tenant { configured: true }).await;
        add_message(&f.store, &f.group, MessageRole::GroupSummary).await;

        let outcome = f
            .representative
            .on_action(action(&f.group, LogRecordType::Registered))
            .await
            .unwrap();

        assert_eq!(outcome.jobs_scheduled(), 0);
        assert_eq!(Representative::get_handler(LogRecordType::Registered), Handler::NotFound);
    }

    #[tokio::test]
    async fn test_action_by_id_resolves_log_record() {
        let f = fixture(true, Connect::User).await;
        add_message(&f.store, &f.group, MessageRole::GroupSummary).await;
        let record = LogRecord::new(f.group.id, LogRecordType::UnAck);
        f.store.put_log_record(record.clone()).await;

        let outcome = f
            .representative
            .on_action(EntityRef::Id(record.id))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::EditsScheduled(1));
    }

    #[tokio::test]
    async fn test_missing_log_record_is_retryable() {
        let f = fixture(true, Connect::Nothing).await;

        let err = f
            .representative
            .on_action(EntityRef::Id(Uuid::new_v4()))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::NotFound { entity: "Log record", .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_log_report_refreshes_log_and_personal_copies() {
        let f = fixture(true, Connect::Nothing).await;
        let log = add_message(&f.store, &f.group, MessageRole::ActivityLog).await;
        let personal = add_message(&f.store, &f.group, MessageRole::PersonalCopy).await;
        add_message(&f.store, &f.group, MessageRole::GroupSummary).await;

        let outcome = f
            .representative
            .on_log_report_updated(EntityRef::Id(f.group.id))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::EditsScheduled(2));
        assert_eq!(
            f.queue.jobs(),
            vec![
                Job::EditMessage { message_id: log.id },
                Job::EditMessage { message_id: personal.id },
            ]
        );
    }

    #[tokio::test]
    async fn test_alert_created_schedules_post() {
        let f = fixture(true, Connect::Tenant { configured: true }).await;
        let alert = Alert::new(f.group.id, "CPU high on web-1");
        f.store.put_alert(alert.clone()).await;

        let outcome = f
            .representative
            .on_alert_created(EntityRef::Id(alert.id))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::PostScheduled(alert.id));
        assert_eq!(f.queue.jobs(), vec![Job::PostAlert { alert_id: alert.id }]);
    }

    #[tokio::test]
    async fn test_alert_created_needs_a_tenant_chat() {
        for connect in [Connect::Nothing, Connect::User, Connect::Tenant { configured: false }] {
            let f = fixture(true, connect).await;
            let alert = Alert::new(f.group.id, "CPU high on web-1");

            let outcome = f
                .representative
                .on_alert_created(EntityRef::Loaded(alert))
                .await
                .unwrap();

            assert_eq!(outcome, DispatchOutcome::Suppressed(SuppressReason::NotApplicable));
            assert!(f.queue.is_empty());
        }
    }

    #[tokio::test]
    async fn test_alert_created_suppressed_when_disabled() {
        let f = fixture(false, Connect::Nothing).await;
        let alert = Alert::new(f.group.id, "CPU high on web-1");

        let outcome = f
            .representative
            .on_alert_created(EntityRef::Loaded(alert))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Suppressed(SuppressReason::ChannelDisabled));
        assert!(f.queue.is_empty());
    }

    #[tokio::test]
    async fn test_scheduling_failure_is_propagated() {
        let store = Arc::new(InMemoryStore::new());
        let queue = Arc::new(InMemoryJobQueue::with_capacity(0));
        let group = AlertGroup::new(Uuid::new_v4(), "db down");
        store.put_alert_group(group.clone()).await;
        add_message(&store, &group, MessageRole::ActivityLog).await;
        let representative =
            Representative::new(store.clone(), store.clone(), store.clone(), queue);

        let err = representative
            .on_log_report_updated(EntityRef::Loaded(group))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Scheduling(QueueError::Full)));
        assert!(err.is_retryable());
    }
}
