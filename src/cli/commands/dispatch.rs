//! Implementation of the `action`, `log-updated` and `alert-created` commands.
//!
//! Each dispatches a single event against the database and waits for the
//! worker pool to drain the jobs it scheduled.

use anyhow::{Context, Result};
use futures::future::join_all;

use crate::cli::output::{output, CommandOutput};
use crate::cli::runtime::Runtime;
use crate::domain::models::{Config, RepresentativeEvent};
use crate::services::{DispatchOutcome, JobWorkerPool};

#[derive(Debug, serde::Serialize)]
pub struct DispatchOutput {
    pub event: &'static str,
    pub outcome: DispatchOutcome,
    pub jobs_scheduled: usize,
}

impl CommandOutput for DispatchOutput {
    fn to_human(&self) -> String {
        format!("{}: {}", self.event, self.outcome)
    }
}

/// Dispatch `event` and run its jobs to completion on `workers` workers.
pub async fn run(runtime: Runtime, event: RepresentativeEvent, workers: usize) -> Result<DispatchOutput> {
    let Runtime {
        representative,
        executor,
        jobs,
    } = runtime;
    let handles = JobWorkerPool::spawn(jobs, executor, workers);

    let name = event.variant_name();
    let result = representative.dispatch(event).await;
    // Closes the queue so workers exit once it is drained.
    drop(representative);

    for joined in join_all(handles).await {
        joined.context("Job worker panicked")?;
    }

    let outcome = result.with_context(|| format!("Failed to dispatch {name} event"))?;
    Ok(DispatchOutput {
        event: name,
        outcome,
        jobs_scheduled: outcome.jobs_scheduled(),
    })
}

pub async fn execute(event: RepresentativeEvent, config: &Config, json_mode: bool) -> Result<()> {
    let runtime = Runtime::open(config).await?;
    let result = run(runtime, event, config.scheduler.workers).await?;
    output(&result, json_mode);
    Ok(())
}
