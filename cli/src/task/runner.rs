//! # Task Runner
//!
//! File: cli/src/task/runner.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! A `Runner` executes a single non-interactive command inside a container
//! once, capturing its combined output and exit status rather than streaming
//! it to the host terminal. Two transports are supported:
//!
//! - **Sdk**: drives the Docker Engine API directly via `bollard`'s
//!   exec-create/exec-start pair, accumulating output into a buffer instead
//!   of copying to host stdio.
//! - **Subprocess**: shells out to `docker exec`, for environments where the
//!   Engine API socket isn't reachable but the CLI is on `PATH`.
//!
//! Interruption is staged: a graceful step first, then a forceful step if the
//! command hasn't exited. The two transports signal different processes and
//! so resolve this differently:
//!
//! - The SDK transport's exec has no native "kill this exec" endpoint in the
//!   Docker Engine API, so its graceful step execs a `kill -INT <pid>` into
//!   the same container against the pid bollard reports via `inspect_exec`,
//!   and its forceful step execs `kill -KILL <pid>`.
//! - The Subprocess transport's `docker exec` client runs as a host process,
//!   so signalling it is a direct, local operation: the spawned
//!   `tokio::process::Child` is kept in `RunnerState` and signalled
//!   directly, never by execing a second `kill` inside the container (the
//!   container's PID namespace has no relationship to this host process).
use crate::core::error::{Result, ShellmuxError};
use anyhow::{anyhow, Context};
use bollard::exec::{CreateExecOptions, StartExecResults};
use futures_util::StreamExt;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument, warn};

use crate::common::docker::connect::connect_docker;

/// Lifecycle status of a `Runner`, per SPEC_FULL.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerStatus {
    NotStarted,
    Processing,
    Done,
    Failed,
}

impl std::fmt::Display for RunnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunnerStatus::NotStarted => "NOT_STARTED",
            RunnerStatus::Processing => "PROCESSING",
            RunnerStatus::Done => "DONE",
            RunnerStatus::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Which mechanism a `Runner` uses to execute its command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Sdk,
    Subprocess,
}

struct RunnerState {
    status: RunnerStatus,
    output: String,
    exit_code: Option<i64>,
    exec_id: Option<String>,
    pid: Option<i64>,
    /// The Subprocess transport's locally-spawned `docker exec` client.
    /// Shared so `send_signal` can signal it directly without a second
    /// `docker exec ... kill` into the container's own PID namespace.
    child: Option<Arc<AsyncMutex<Child>>>,
}

/// A one-shot, non-interactive command execution inside a container.
pub struct Runner {
    id: String,
    container: String,
    command: Vec<String>,
    transport: Transport,
    state: Mutex<RunnerState>,
}

impl Runner {
    pub fn new(container: &str, command: Vec<String>, transport: Transport) -> Arc<Runner> {
        Arc::new(Runner {
            id: uuid::Uuid::new_v4().to_string(),
            container: container.to_string(),
            command,
            transport,
            state: Mutex::new(RunnerState {
                status: RunnerStatus::NotStarted,
                output: String::new(),
                exit_code: None,
                exec_id: None,
                pid: None,
                child: None,
            }),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> RunnerStatus {
        self.state.lock().unwrap().status
    }

    /// The output accumulated so far; readable at any point in the runner's
    /// life, including after it reaches `DONE`/`FAILED` (no auto-eviction).
    pub fn output(&self) -> String {
        self.state.lock().unwrap().output.clone()
    }

    pub fn exit_code(&self) -> Option<i64> {
        self.state.lock().unwrap().exit_code
    }

    /// Starts the command. Idempotent in the sense that calling this more
    /// than once on a runner already past `NOT_STARTED` is a no-op.
    #[instrument(skip(self))]
    pub async fn start(self: &Arc<Self>) -> Result<()> {
        {
            let mut state = self.state.lock().unwrap();
            if state.status != RunnerStatus::NotStarted {
                return Ok(());
            }
            state.status = RunnerStatus::Processing;
        }

        let result = match self.transport {
            Transport::Sdk => self.start_sdk().await,
            Transport::Subprocess => self.start_subprocess().await,
        };

        let mut state = self.state.lock().unwrap();
        match result {
            Ok((exit_code, output)) => {
                state.output = output;
                state.exit_code = Some(exit_code);
                state.status = if exit_code == 0 {
                    RunnerStatus::Done
                } else {
                    RunnerStatus::Failed
                };
            }
            Err(e) => {
                state.output.push_str(&format!("\n{:#}", e));
                state.status = RunnerStatus::Failed;
            }
        }
        Ok(())
    }

    async fn start_sdk(self: &Arc<Self>) -> Result<(i64, String)> {
        let docker = connect_docker().await?;

        let exec_options = CreateExecOptions {
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            attach_stdin: Some(false),
            tty: Some(false),
            cmd: Some(self.command.clone()),
            ..Default::default()
        };

        let created = docker
            .create_exec(&self.container, exec_options)
            .await
            .map_err(|e| match e {
                bollard::errors::Error::DockerResponseServerError { status_code: 404, .. } => {
                    anyhow!(ShellmuxError::ContainerNotFound {
                        name: self.container.clone()
                    })
                }
                _ => anyhow!(ShellmuxError::DockerApi { source: e }),
            })
            .context("failed to create exec instance for task")?;

        self.state.lock().unwrap().exec_id = Some(created.id.clone());

        let start_result = docker
            .start_exec(&created.id, None)
            .await
            .map_err(|e| anyhow!(ShellmuxError::DockerApi { source: e }))
            .context("failed to start task exec instance")?;

        let mut accumulated = String::new();
        if let StartExecResults::Attached { mut output, .. } = start_result {
            while let Some(chunk) = output.next().await {
                match chunk {
                    Ok(log_output) => accumulated.push_str(&String::from_utf8_lossy(&log_output.into_bytes())),
                    Err(e) => {
                        warn!(task_id = %self.id, error = %e, "error reading task exec output");
                        break;
                    }
                }
            }
        }

        let inspect = docker
            .inspect_exec(&created.id)
            .await
            .map_err(|e| anyhow!(ShellmuxError::DockerApi { source: e }))
            .context("failed to inspect task exec instance")?;
        self.state.lock().unwrap().pid = inspect.pid;

        Ok((inspect.exit_code.unwrap_or(-1), accumulated))
    }

    async fn start_subprocess(self: &Arc<Self>) -> Result<(i64, String)> {
        let mut cmd = Command::new("docker");
        cmd.arg("exec").arg(&self.container).args(&self.command);
        cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(ShellmuxError::Io)?;
        self.state.lock().unwrap().pid = child.id().map(|p| p as i64);

        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let shared_child = Arc::new(AsyncMutex::new(child));
        self.state.lock().unwrap().child = Some(shared_child.clone());

        // Drained concurrently: reading stdout to EOF before touching stderr
        // (or vice versa) deadlocks once the unread pipe's OS buffer fills.
        let stdout_fut = async {
            if let Some(mut stdout) = stdout {
                stdout.read_to_end(&mut stdout_buf).await.map_err(ShellmuxError::Io)?;
            }
            Ok::<_, ShellmuxError>(())
        };
        let stderr_fut = async {
            if let Some(mut stderr) = stderr {
                stderr.read_to_end(&mut stderr_buf).await.map_err(ShellmuxError::Io)?;
            }
            Ok::<_, ShellmuxError>(())
        };
        let (stdout_res, stderr_res) = tokio::join!(stdout_fut, stderr_fut);
        stdout_res?;
        stderr_res?;

        let status = shared_child.lock().await.wait().await.map_err(ShellmuxError::Io)?;
        let mut combined = String::from_utf8_lossy(&stdout_buf).to_string();
        combined.push_str(&String::from_utf8_lossy(&stderr_buf));
        Ok((status.code().unwrap_or(-1) as i64, combined))
    }

    /// Requests a graceful stop (SIGINT), then escalates to a forceful one
    /// (SIGKILL) after `grace` elapses if the task hasn't finished.
    #[instrument(skip(self))]
    pub async fn stop(self: &Arc<Self>, grace: std::time::Duration) -> Result<()> {
        self.send_signal("INT").await?;
        tokio::time::sleep(grace).await;
        if self.status() == RunnerStatus::Processing {
            self.send_signal("KILL").await?;
        }
        Ok(())
    }

    async fn send_signal(&self, signal: &str) -> Result<()> {
        match self.transport {
            Transport::Sdk => {
                let pid = self.state.lock().unwrap().pid;
                let Some(pid) = pid else {
                    debug!(task_id = %self.id, "no pid recorded yet, nothing to signal");
                    return Ok(());
                };
                let docker = connect_docker().await?;
                let options = CreateExecOptions {
                    attach_stdout: Some(true),
                    attach_stderr: Some(true),
                    cmd: Some(vec!["kill".into(), format!("-{}", signal), pid.to_string()]),
                    ..Default::default()
                };
                let created = docker
                    .create_exec(&self.container, options)
                    .await
                    .map_err(|e| anyhow!(ShellmuxError::DockerApi { source: e }))
                    .context("failed to create signal-delivery exec")?;
                docker
                    .start_exec(&created.id, None)
                    .await
                    .map_err(|e| anyhow!(ShellmuxError::DockerApi { source: e }))
                    .context("failed to start signal-delivery exec")?;
                info!(task_id = %self.id, signal, pid, "delivered signal via secondary exec");
                Ok(())
            }
            Transport::Subprocess => {
                let child = self.state.lock().unwrap().child.clone();
                let Some(child) = child else {
                    debug!(task_id = %self.id, "no child handle yet, nothing to signal");
                    return Ok(());
                };
                let mut guard = child.lock().await;
                if signal == "KILL" || cfg!(not(unix)) {
                    guard.start_kill().map_err(ShellmuxError::Io)?;
                } else {
                    let Some(pid) = guard.id() else {
                        debug!(task_id = %self.id, "child already reaped, nothing to signal");
                        return Ok(());
                    };
                    interrupt_child(pid)?;
                }
                info!(task_id = %self.id, signal, "delivered signal directly to local child");
                Ok(())
            }
        }
    }
}

#[cfg(unix)]
fn interrupt_child(pid: u32) -> Result<()> {
    let ret = unsafe { libc::kill(pid as libc::pid_t, libc::SIGINT) };
    if ret != 0 {
        return Err(anyhow!(ShellmuxError::Io(std::io::Error::last_os_error())));
    }
    Ok(())
}

#[cfg(not(unix))]
fn interrupt_child(_pid: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_status_display() {
        assert_eq!(RunnerStatus::NotStarted.to_string(), "NOT_STARTED");
        assert_eq!(RunnerStatus::Done.to_string(), "DONE");
    }

    #[test]
    fn test_new_runner_starts_not_started() {
        let runner = Runner::new("my-container", vec!["echo".into(), "hi".into()], Transport::Subprocess);
        assert_eq!(runner.status(), RunnerStatus::NotStarted);
        assert_eq!(runner.output(), "");
        assert_eq!(runner.exit_code(), None);
    }
}
