//! Implementation of the `telegraph serve` command.
//!
//! Reads newline-delimited JSON [`RepresentativeEvent`]s, publishes them on
//! the event bus and lets the subscribed representative and the worker pool
//! do the rest. Reading pauses while the subscriber's queue is full. Stops on
//! end of input or Ctrl-C, after draining.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::cli::output::{output, CommandOutput};
use crate::cli::runtime::Runtime;
use crate::domain::models::{Config, RepresentativeEvent};
use crate::services::{EventBus, JobWorkerPool, RepresentativeSubscriber};

#[derive(Debug, Default, serde::Serialize)]
pub struct ServeOutput {
    /// Events accepted by the subscriber's queue.
    pub events_published: u64,
    /// Input lines that were not a valid event.
    pub events_rejected: u64,
    /// Published events the representative gave up on after retries.
    pub events_failed: u64,
}

impl CommandOutput for ServeOutput {
    fn to_human(&self) -> String {
        format!(
            "Stopped after {} event(s), {} rejected, {} failed",
            self.events_published, self.events_rejected, self.events_failed
        )
    }
}

pub async fn run<R>(runtime: Runtime, config: &Config, input: R) -> Result<ServeOutput>
where
    R: AsyncBufRead + Unpin,
{
    let Runtime {
        representative,
        executor,
        jobs,
    } = runtime;
    let workers = JobWorkerPool::spawn(jobs, executor, config.scheduler.workers);

    let bus = Arc::new(EventBus::new(config.scheduler.event_bus_capacity));
    let subscriber = RepresentativeSubscriber::new(
        Arc::new(representative),
        bus.clone(),
        config.retry.clone(),
    );
    let subscriber_task = subscriber.start();
    tracing::info!(workers = config.scheduler.workers, "serving events");

    let mut summary = ServeOutput::default();
    let mut subscriber_gone = false;
    let mut lines = input.lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read event input")?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, shutting down");
                None
            }
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<RepresentativeEvent>(&line) {
            Ok(event) => {
                if bus.publish(event).await == 0 {
                    subscriber_gone = true;
                    break;
                }
                summary.events_published += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected malformed event");
                summary.events_rejected += 1;
            }
        }
    }

    // The subscriber drains what is queued, then releases the representative
    // and with it the job queue, which lets the workers finish.
    bus.close();
    subscriber_task.await.context("Event subscriber panicked")?;
    summary.events_failed = subscriber.events_failed();
    drop(subscriber);
    for joined in join_all(workers).await {
        joined.context("Job worker panicked")?;
    }

    if subscriber_gone {
        bail!(
            "Event subscriber stopped after {} event(s); remaining input was not processed",
            summary.events_published
        );
    }
    Ok(summary)
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let runtime = Runtime::open(config).await?;
    let summary = run(runtime, config, BufReader::new(tokio::io::stdin())).await?;
    output(&summary, json_mode);
    Ok(())
}
