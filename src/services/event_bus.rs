//! Event bus delivering representative events, and the subscriber that
//! feeds them to the representative.
//!
//! Publishers call [`EventBus::publish`]; the representative is wired in
//! explicitly at startup through [`RepresentativeSubscriber::start`].
//!
//! Every subscriber owns a bounded queue. `publish` waits for room in each
//! of them, so a slow subscriber slows the publisher down instead of
//! missing events.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::representative::{DispatchError, DispatchOutcome, Representative};
use super::retry::backoff_policy;
use crate::domain::models::{RepresentativeEvent, RetryConfig};

/// Fan-out bus for representative events with per-subscriber backpressure.
pub struct EventBus {
    capacity: usize,
    subscribers: Mutex<Vec<mpsc::Sender<RepresentativeEvent>>>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Publish an event to every subscriber, waiting while a subscriber's
    /// queue is full. Returns how many subscribers accepted it.
    pub async fn publish(&self, event: RepresentativeEvent) -> usize {
        let senders = self.lock().clone();
        if senders.is_empty() {
            tracing::debug!(event = event.variant_name(), "no subscribers for event");
            return 0;
        }

        let mut delivered = 0;
        for sender in &senders {
            if sender.send(event.clone()).await.is_ok() {
                delivered += 1;
            }
        }
        if delivered < senders.len() {
            self.lock().retain(|sender| !sender.is_closed());
        }
        delivered
    }

    pub fn subscribe(&self) -> mpsc::Receiver<RepresentativeEvent> {
        let (sender, receiver) = mpsc::channel(self.capacity);
        self.lock().push(sender);
        receiver
    }

    /// Detach all subscribers. They still receive what is already queued.
    pub fn close(&self) {
        self.lock().clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<mpsc::Sender<RepresentativeEvent>>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Deliver one event, retrying retryable failures with exponential backoff.
pub async fn deliver(
    representative: &Representative,
    event: &RepresentativeEvent,
    retry: &RetryConfig,
) -> Result<DispatchOutcome, DispatchError> {
    backoff::future::retry(backoff_policy(retry), || async move {
        representative.dispatch(event.clone()).await.map_err(|e| {
            if e.is_retryable() {
                tracing::warn!(event = event.variant_name(), error = %e, "dispatch failed, retrying");
                backoff::Error::transient(e)
            } else {
                backoff::Error::permanent(e)
            }
        })
    })
    .await
}

/// Subscribes the representative to an [`EventBus`].
pub struct RepresentativeSubscriber {
    representative: Arc<Representative>,
    event_bus: Arc<EventBus>,
    retry: RetryConfig,
    running: Arc<AtomicBool>,
    events_dispatched: Arc<AtomicU64>,
    events_failed: Arc<AtomicU64>,
}

impl RepresentativeSubscriber {
    pub fn new(
        representative: Arc<Representative>,
        event_bus: Arc<EventBus>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            representative,
            event_bus,
            retry,
            running: Arc::new(AtomicBool::new(false)),
            events_dispatched: Arc::new(AtomicU64::new(0)),
            events_failed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start the subscriber loop. The subscription is taken before this
    /// returns, so events published afterwards are not missed. The loop ends
    /// once the bus is closed and the queue is drained, or on [`Self::stop`].
    pub fn start(&self) -> JoinHandle<()> {
        self.running.store(true, Ordering::SeqCst);

        let mut receiver = self.event_bus.subscribe();
        let representative = self.representative.clone();
        let retry = self.retry.clone();
        let running = self.running.clone();
        let events_dispatched = self.events_dispatched.clone();
        let events_failed = self.events_failed.clone();

        tokio::spawn(async move {
            while running.load(Ordering::SeqCst) {
                let event = match tokio::time::timeout(Duration::from_secs(1), receiver.recv()).await {
                    Ok(Some(event)) => event,
                    Ok(None) => {
                        tracing::info!("RepresentativeSubscriber: event bus closed, stopping");
                        break;
                    }
                    // Timeout - loop to check the running flag
                    Err(_) => continue,
                };

                match deliver(&representative, &event, &retry).await {
                    Ok(outcome) => {
                        tracing::debug!(
                            event = event.variant_name(),
                            jobs = outcome.jobs_scheduled(),
                            "event dispatched"
                        );
                        events_dispatched.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => {
                        tracing::error!(event = event.variant_name(), error = %e, "giving up on event");
                        events_failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
            running.store(false, Ordering::SeqCst);
        })
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Events dispatched successfully so far.
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    /// Events given up on after retries.
    pub fn events_failed(&self) -> u64 {
        self.events_failed.load(Ordering::Relaxed)
    }
}
