//! Dispatch scenarios against in-memory adapters.

mod common;

use std::sync::Arc;

use common::{post, store_with_group};
use telegraph::adapters::memory::{InMemoryJobQueue, InMemoryStore};
use telegraph::domain::models::{
    AlertGroup, EntityRef, Job, LifecycleEvent, LogRecord, LogRecordType, MessageRole,
    RepresentativeEvent,
};
use telegraph::services::{DispatchOutcome, Representative, SuppressReason};

fn representative(store: Arc<InMemoryStore>, queue: Arc<InMemoryJobQueue>) -> Representative {
    Representative::new(store.clone(), store.clone(), store, queue)
}

fn action(group: &AlertGroup, kind: LogRecordType) -> RepresentativeEvent {
    let record = LogRecord::new(group.id, kind);
    RepresentativeEvent::Action(EntityRef::Loaded(LifecycleEvent::new(record, group.clone())))
}

#[tokio::test]
async fn test_resolved_with_channel_disabled_schedules_nothing() {
    let (store, group) = store_with_group("Disk full").await;
    let group = group.with_notify_in_channel(false);
    store.put_alert_group(group.clone()).await;
    post(&store, &group, MessageRole::GroupSummary, 1).await;

    let store = Arc::new(store);
    let queue = Arc::new(InMemoryJobQueue::new());
    let outcome = representative(store, queue.clone())
        .dispatch(action(&group, LogRecordType::Resolved))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Suppressed(SuppressReason::ChannelDisabled));
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_resolved_edits_summaries_but_not_activity_log() {
    let (store, group) = store_with_group("Disk full").await;
    let first = post(&store, &group, MessageRole::GroupSummary, 1).await;
    post(&store, &group, MessageRole::ActivityLog, 2).await;
    let second = post(&store, &group, MessageRole::GroupSummary, 3).await;

    let store = Arc::new(store);
    let queue = Arc::new(InMemoryJobQueue::new());
    let outcome = representative(store, queue.clone())
        .dispatch(action(&group, LogRecordType::Resolved))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::EditsScheduled(2));
    assert_eq!(
        queue.jobs(),
        vec![
            Job::EditMessage { message_id: first.id },
            Job::EditMessage { message_id: second.id },
        ]
    );
}

#[tokio::test]
async fn test_log_updated_edits_activity_log_and_personal_copy() {
    let (store, group) = store_with_group("Disk full").await;
    let log = post(&store, &group, MessageRole::ActivityLog, 1).await;
    let personal = post(&store, &group, MessageRole::PersonalCopy, 2).await;
    post(&store, &group, MessageRole::GroupSummary, 3).await;

    let store = Arc::new(store);
    let queue = Arc::new(InMemoryJobQueue::new());
    let outcome = representative(store, queue.clone())
        .dispatch(RepresentativeEvent::LogUpdated(EntityRef::Id(group.id)))
        .await
        .unwrap();

    assert_eq!(outcome.jobs_scheduled(), 2);
    assert_eq!(
        queue.jobs(),
        vec![
            Job::EditMessage { message_id: log.id },
            Job::EditMessage { message_id: personal.id },
        ]
    );
}

#[tokio::test]
async fn test_every_action_kind_edits_the_action_roles() {
    for kind in LogRecordType::ALL {
        let (store, group) = store_with_group("Disk full").await;
        post(&store, &group, MessageRole::GroupSummary, 1).await;
        post(&store, &group, MessageRole::ActionStrip, 2).await;
        post(&store, &group, MessageRole::PersonalCopy, 3).await;
        post(&store, &group, MessageRole::ActivityLog, 4).await;

        let store = Arc::new(store);
        let queue = Arc::new(InMemoryJobQueue::new());
        let outcome = representative(store, queue.clone())
            .dispatch(action(&group, kind))
            .await
            .unwrap();

        let expected = match kind {
            LogRecordType::Registered
            | LogRecordType::RouteAssigned
            | LogRecordType::EscalationTriggered
            | LogRecordType::Restricted => 0,
            _ => 3,
        };
        assert_eq!(outcome.jobs_scheduled(), expected, "kind {kind}");
        assert_eq!(queue.len(), expected, "kind {kind}");
    }
}

#[tokio::test]
async fn test_dispatch_by_id_reads_committed_record() {
    let (store, group) = store_with_group("Disk full").await;
    let summary = post(&store, &group, MessageRole::GroupSummary, 1).await;
    let record = LogRecord::new(group.id, LogRecordType::Ack);
    store.put_log_record(record.clone()).await;

    let store = Arc::new(store);
    let queue = Arc::new(InMemoryJobQueue::new());
    let outcome = representative(store, queue.clone())
        .dispatch(RepresentativeEvent::Action(EntityRef::Id(record.id)))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::EditsScheduled(1));
    assert_eq!(queue.jobs(), vec![Job::EditMessage { message_id: summary.id }]);
}
