//! One-shot `printq submit`

use anyhow::{anyhow, bail, Context, Result};
use printq_config::PrintqConfig;
use printq_core::{JobQueue, JobRecord};
use printq_execution::{
    Dispatcher, SessionConfig, SubmissionEvent, SubmissionPolicy, SubmissionWorker,
};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use super::output_sink;

/// Parse `ID,PAGES,CATEGORY,PRIORITY`
pub fn parse_job_arg(arg: &str) -> Result<JobRecord> {
    let fields: Vec<&str> = arg.split(',').collect();
    let [job_id, pages, category, priority] = fields.as_slice() else {
        bail!("Job '{}' must have the form ID,PAGES,CATEGORY,PRIORITY", arg);
    };
    JobRecord::parse(job_id, pages, category, priority)
        .with_context(|| format!("Invalid job '{}'", arg))
}

/// Build the queue to submit from `--job` arguments or a batch file
pub fn load_queue(jobs: &[String], from_file: Option<&Path>) -> Result<JobQueue> {
    let mut queue = JobQueue::new();
    match from_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            let batch = printq_ipc::decode(&text)
                .with_context(|| format!("Failed to parse batch file {:?}", path))?;
            batch.iter().for_each(|job| queue.add(*job));
        }
        None => {
            for arg in jobs {
                queue.add(parse_job_arg(arg)?);
            }
        }
    }
    Ok(queue)
}

pub async fn handle_submit(
    config: &PrintqConfig,
    jobs: &[String],
    from_file: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let mut queue = load_queue(jobs, from_file)?;

    if dry_run {
        let batch = queue.drain_all().context("Nothing to submit")?;
        print!("{}", printq_ipc::encode(&batch));
        return Ok(());
    }

    let sink = output_sink(&config.output, None).await?;
    let (worker, mut events) = SubmissionWorker::start(
        SessionConfig::from(&config.execution),
        SubmissionPolicy::from_serialize_flag(config.execution.serialize_submissions),
        sink,
    );

    let mut dispatcher = Dispatcher::with_queue(queue, worker.handle());
    let ticket = dispatcher.submit_all()?;
    drop(dispatcher);
    info!("Submitted {} jobs as {}", ticket.jobs, ticket.id);

    let outcome = wait_for_outcome(&mut events, ticket.id).await;
    worker.shutdown().await;

    match outcome? {
        SubmissionEvent::Finished { report, .. } if report.success => Ok(()),
        SubmissionEvent::Finished { report, .. } => Err(anyhow!(
            "Print processor exited with {}",
            report
                .exit_code
                .map(|code| format!("code {}", code))
                .unwrap_or_else(|| "a signal".to_string())
        )),
        SubmissionEvent::Failed { error, .. } => Err(error).context("Submission failed"),
        SubmissionEvent::Started { .. } => Err(anyhow!("Submission ended without an outcome")),
    }
}

async fn wait_for_outcome(
    events: &mut mpsc::UnboundedReceiver<SubmissionEvent>,
    submission_id: Uuid,
) -> Result<SubmissionEvent> {
    while let Some(event) = events.recv().await {
        if event.submission_id() != submission_id {
            continue;
        }
        match event {
            SubmissionEvent::Started { .. } => continue,
            outcome => return Ok(outcome),
        }
    }
    Err(anyhow!("Submission worker stopped before reporting"))
}
