//! One print processor invocation
//!
//! A [`ProcessSession`] launches the configured executable, writes a single
//! encoded batch to its standard input and closes it, and forwards every line
//! the child prints on either output stream to a sink until both streams end
//! and the child exits. Input writing and the two readers run as independent
//! tasks, so a child that produces output before it has read all its input
//! cannot stall the session.

use chrono::{DateTime, Utc};
use printq_config::ExecutionConfig;
use printq_core::Batch;
use printq_ipc::write_batch;
use printq_output::{Channel, OutputSink};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::ExecutionError;
use crate::stream::{drain_lines, DrainOutcome};

/// How to launch the print processor
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_directory: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
    /// Wall-clock limit from spawn to exit; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Time readers get to collect trailing output after a kill
    pub kill_grace_period: Duration,
}

impl SessionConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_kill_grace_period(mut self, grace: Duration) -> Self {
        self.kill_grace_period = grace;
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_directory {
            command.current_dir(dir);
        }
        command
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        ExecutionConfig::default().into()
    }
}

impl From<&ExecutionConfig> for SessionConfig {
    fn from(config: &ExecutionConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            working_directory: config.working_directory.clone(),
            env: config.env.clone(),
            timeout: config.timeout,
            kill_grace_period: config.kill_grace_period,
        }
    }
}

impl From<ExecutionConfig> for SessionConfig {
    fn from(config: ExecutionConfig) -> Self {
        (&config).into()
    }
}

/// Lifecycle of a session. States only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    Created,
    Started,
    Draining,
    Exited,
    Disposed,
}

/// Outcome of a session whose child ran to completion
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub jobs: usize,
    pub pid: Option<u32>,
    /// `None` when the child was ended by a signal
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout_lines: usize,
    pub stderr_lines: usize,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

/// A single launch of the print processor carrying one batch
pub struct ProcessSession {
    id: Uuid,
    config: SessionConfig,
    batch: Batch,
    state: SessionState,
}

enum TaskResult {
    InputClosed(std::io::Result<usize>),
    Drained(DrainOutcome),
}

#[derive(Default)]
struct StreamTally {
    stdout_lines: usize,
    stderr_lines: usize,
    write_error: Option<std::io::Error>,
    read_error: Option<(Channel, std::io::Error)>,
}

impl ProcessSession {
    pub fn new(config: SessionConfig, batch: Batch) -> Self {
        Self::with_id(Uuid::new_v4(), config, batch)
    }

    pub fn with_id(id: Uuid, config: SessionConfig, batch: Batch) -> Self {
        Self {
            id,
            config,
            batch,
            state: SessionState::Created,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// Run the child to completion, forwarding its output to `sink`.
    ///
    /// Consumes the session; a session is never restarted.
    pub async fn run(mut self, sink: Arc<dyn OutputSink>) -> Result<SessionReport, ExecutionError> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let mut child = self.config.command().spawn().map_err(|source| {
            error!(
                session_id = %self.id,
                program = %self.config.program.display(),
                "Failed to launch print processor: {}",
                source
            );
            ExecutionError::Spawn {
                program: self.config.program.display().to_string(),
                source,
            }
        })?;
        let pid = child.id();
        self.transition(SessionState::Started);
        info!(
            session_id = %self.id,
            program = %self.config.program.display(),
            pid = ?pid,
            jobs = self.batch.len(),
            "Session started"
        );

        let mut tasks = JoinSet::new();
        if let Some(stdout) = child.stdout.take() {
            let sink = sink.clone();
            let id = self.id;
            tasks.spawn(async move {
                TaskResult::Drained(drain_lines(stdout, Channel::Stdout, id, sink).await)
            });
        }
        if let Some(stderr) = child.stderr.take() {
            let sink = sink.clone();
            let id = self.id;
            tasks.spawn(async move {
                TaskResult::Drained(drain_lines(stderr, Channel::Stderr, id, sink).await)
            });
        }
        if let Some(stdin) = child.stdin.take() {
            let batch = self.batch.clone();
            tasks.spawn(async move { TaskResult::InputClosed(write_batch(stdin, &batch).await) });
        }
        self.transition(SessionState::Draining);

        let mut tally = StreamTally::default();
        let waited = match self.config.timeout {
            None => {
                collect(&mut tasks, &mut tally).await;
                Some(child.wait().await)
            }
            Some(limit) => tokio::time::timeout(limit, async {
                collect(&mut tasks, &mut tally).await;
                child.wait().await
            })
            .await
            .ok(),
        };

        let Some(waited) = waited else {
            let limit = self.config.timeout.unwrap_or_default();
            warn!(session_id = %self.id, ?limit, "Session timed out; killing child");
            if let Err(e) = child.start_kill() {
                warn!("Failed to kill session {}: {}", self.id, e);
            }
            let grace = self.config.kill_grace_period;
            if tokio::time::timeout(grace, collect(&mut tasks, &mut tally))
                .await
                .is_err()
            {
                warn!(
                    "Output of session {} still open {:?} after kill; abandoning readers",
                    self.id, grace
                );
                tasks.shutdown().await;
            }
            if let Err(e) = child.wait().await {
                warn!("Failed to reap session {}: {}", self.id, e);
            }
            self.transition(SessionState::Exited);
            self.transition(SessionState::Disposed);
            return Err(ExecutionError::Timeout {
                session_id: self.id,
                limit,
                stdout_lines: tally.stdout_lines,
                stderr_lines: tally.stderr_lines,
            });
        };

        let status: ExitStatus = match waited {
            Ok(status) => status,
            Err(source) => {
                error!("Failed to wait for session {}: {}", self.id, source);
                self.transition(SessionState::Disposed);
                return Err(ExecutionError::Wait {
                    session_id: self.id,
                    source,
                });
            }
        };
        self.transition(SessionState::Exited);
        let duration = clock.elapsed();
        info!(
            session_id = %self.id,
            exit_code = ?status.code(),
            stdout_lines = tally.stdout_lines,
            stderr_lines = tally.stderr_lines,
            "Session exited with {} after {:?}",
            status,
            duration
        );
        self.transition(SessionState::Disposed);

        if let Some(source) = tally.write_error {
            warn!("Session {} did not accept its batch: {}", self.id, source);
            return Err(ExecutionError::InputWrite {
                session_id: self.id,
                exit_code: status.code(),
                source,
            });
        }
        if let Some((channel, source)) = tally.read_error {
            warn!("Session {} lost its {}: {}", self.id, channel, source);
            return Err(ExecutionError::OutputRead {
                session_id: self.id,
                channel,
                exit_code: status.code(),
                source,
            });
        }

        Ok(SessionReport {
            session_id: self.id,
            jobs: self.batch.len(),
            pid,
            exit_code: status.code(),
            success: status.success(),
            stdout_lines: tally.stdout_lines,
            stderr_lines: tally.stderr_lines,
            started_at,
            duration,
        })
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session {}: {:?} -> {:?}", self.id, self.state, next);
        debug_assert!(next > self.state);
        self.state = next;
    }
}

/// Wait for every writer and reader task, recording what they report.
/// Safe to cancel and resume: finished tasks are tallied as they complete.
async fn collect(tasks: &mut JoinSet<TaskResult>, tally: &mut StreamTally) {
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(TaskResult::InputClosed(Ok(bytes))) => {
                debug!("Batch written ({} bytes), input closed", bytes);
            }
            Ok(TaskResult::InputClosed(Err(e))) => {
                tally.write_error = Some(e);
            }
            Ok(TaskResult::Drained(outcome)) => {
                match outcome.channel {
                    Channel::Stdout => tally.stdout_lines = outcome.lines,
                    Channel::Stderr => tally.stderr_lines = outcome.lines,
                }
                // the first failure wins
                if let Some(e) = outcome.read_error.filter(|_| tally.read_error.is_none()) {
                    tally.read_error = Some((outcome.channel, e));
                }
            }
            Err(e) => {
                warn!("Session stream task failed: {}", e);
            }
        }
    }
}
