//! # Shell Pipe
//!
//! File: cli/src/shell/pipe.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! A `Pipe` wraps one interactive child process (a local shell, or a
//! `docker exec` into a running container) behind a PTY, with a background
//! reader thread draining its output into a shared, mutex-guarded buffer.
//! Commands are written with a freshly generated completion marker
//! (`shell::marker`) appended; callers detect completion by watching for
//! that marker in the drained output.
//!
//! ## Architecture
//!
//! `PipeInner` holds everything the reader thread and callers both touch
//! (`output_buffer`, `read_cursor`, `output_queue`, `status`, `marker`,
//! `last_command`) behind a single `std::sync::Mutex` — the contention this
//! creates is bounded by one reader thread plus whichever caller thread is
//! currently issuing a tool call against this pipe, which is low enough that
//! a single mutex is preferable to finer-grained locking here.
use crate::core::config::RuntimeConfig;
use crate::core::error::{Result, ShellmuxError};
use crate::shell::marker::{self, ShellType};
use anyhow::{anyhow, Context};
use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use regex::Regex;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

const READ_CHUNK_BYTES: usize = 1024;
const DEFAULT_ROWS: u16 = 24;
const DEFAULT_COLS: u16 = 80;

/// Lifecycle state of a `Pipe`, per SPEC_FULL.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeStatus {
    Ready,
    Processing,
    Completed,
    Failed,
    TimedOut,
}

impl std::fmt::Display for PipeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PipeStatus::Ready => "READY",
            PipeStatus::Processing => "PROCESSING",
            PipeStatus::Completed => "COMPLETED",
            PipeStatus::Failed => "FAILED",
            PipeStatus::TimedOut => "TIMED_OUT",
        };
        f.write_str(s)
    }
}

/// One event yielded by `stream_output`.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Partial { content: String, marker_id: String },
    Completion { content: String, marker_id: String },
}

struct PipeInner {
    output_buffer: String,
    read_cursor: usize,
    output_queue: VecDeque<String>,
    status: PipeStatus,
    marker: String,
    marker_pattern: Regex,
    last_command: String,
    shell_type: ShellType,
    reader_alive: bool,
}

/// An interactive child process wrapped in a PTY, with a background reader
/// and a completion-marker protocol layered on top of its raw output stream.
pub struct Pipe {
    id: String,
    inner: Mutex<PipeInner>,
    writer: Mutex<Box<dyn Write + Send>>,
    child: Mutex<Box<dyn Child + Send + Sync>>,
    stop_signal: Arc<AtomicBool>,
    reader_handle: Mutex<Option<std::thread::JoinHandle<()>>>,
}

impl Pipe {
    /// Spawns `cmd` under a PTY, waits for its initial prompt to match
    /// `shell_type`'s prompt pattern, and starts the background reader.
    ///
    /// `cmd` is split on whitespace; the first token is the program, the
    /// rest are its arguments (matching how `docker exec -i ... bash` or a
    /// bare `bash` invocation would be built).
    #[instrument(skip(cmd))]
    pub fn spawn(cmd: &str, shell_type: ShellType, prompt_timeout: Duration) -> Result<Arc<Pipe>> {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows: DEFAULT_ROWS,
                cols: DEFAULT_COLS,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| anyhow!(ShellmuxError::Pty(e.to_string())))?;

        let mut tokens = cmd.split_whitespace();
        let program = tokens.next().unwrap_or("bash");
        let mut builder = CommandBuilder::new(program);
        builder.args(tokens);

        let child = pair
            .slave
            .spawn_command(builder)
            .map_err(|e| anyhow!(ShellmuxError::Pty(format!("failed to spawn '{}': {}", cmd, e))))?;
        drop(pair.slave);

        let writer = pair
            .master
            .take_writer()
            .map_err(|e| anyhow!(ShellmuxError::Pty(e.to_string())))?;
        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| anyhow!(ShellmuxError::Pty(e.to_string())))?;

        let id = uuid::Uuid::new_v4().to_string();
        let inner = PipeInner {
            output_buffer: String::new(),
            read_cursor: 0,
            output_queue: VecDeque::new(),
            status: PipeStatus::Ready,
            marker: String::new(),
            marker_pattern: marker::MARKER_PATTERN.clone(),
            last_command: String::new(),
            shell_type,
            reader_alive: true,
        };

        let pipe = Arc::new(Pipe {
            id: id.clone(),
            inner: Mutex::new(inner),
            writer: Mutex::new(writer),
            child: Mutex::new(child),
            stop_signal: Arc::new(AtomicBool::new(false)),
            reader_handle: Mutex::new(None),
        });

        let handle = spawn_reader_thread(Arc::clone(&pipe), reader);
        *pipe.reader_handle.lock().unwrap() = Some(handle);

        pipe.wait_for_prompt(shell_type, prompt_timeout)?;
        info!(pipe_id = %id, "pipe ready");
        Ok(pipe)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn wait_for_prompt(&self, shell_type: ShellType, timeout: Duration) -> Result<()> {
        let pattern = Regex::new(shell_type.prompt_pattern())
            .context("dialect prompt pattern failed to compile")?;
        let deadline = Instant::now() + timeout;
        loop {
            {
                let inner = self.inner.lock().unwrap();
                if pattern.is_match(&inner.output_buffer) {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                warn!(pipe_id = %self.id, "timed out waiting for initial prompt, proceeding anyway");
                return Ok(());
            }
            std::thread::sleep(Duration::from_millis(20));
        }
    }

    /// Regenerates the marker, composes the command per the dialect's
    /// protocol, writes it to the child, and marks the pipe `PROCESSING`.
    #[instrument(skip(self, command))]
    pub fn write(&self, command: &str, shell_type: ShellType) -> Result<()> {
        {
            let inner = self.inner.lock().unwrap();
            if inner.status == PipeStatus::Processing {
                return Err(anyhow!("pipe '{}' is already processing a command", self.id));
            }
        }

        let new_marker = marker::generate_marker();
        let lines = marker::compose_command(command, shell_type, &new_marker);

        {
            let mut writer = self.writer.lock().unwrap();
            for line in &lines {
                writer
                    .write_all(line.as_bytes())
                    .map_err(ShellmuxError::Io)?;
                writer.write_all(b"\r\n").map_err(ShellmuxError::Io)?;
            }
            writer.flush().map_err(ShellmuxError::Io)?;
        }

        let mut inner = self.inner.lock().unwrap();
        inner.marker = new_marker;
        inner.last_command = command.to_string();
        inner.shell_type = shell_type;
        inner.status = PipeStatus::Processing;
        Ok(())
    }

    /// Blocks (with a `marker_tick` poll) until the current marker appears in
    /// the output, `overall_timeout` elapses, or the pipe is otherwise done,
    /// returning the cleaned text observed either since `read_cursor` or, if
    /// `include_past`, from the start of `output_buffer`. Transitions the
    /// pipe to `FAILED` and returns `ShellmuxError::Eof` if the reader thread
    /// has died; transitions it to `TIMED_OUT` (returning whatever partial
    /// output was observed) if `overall_timeout` elapses first.
    #[instrument(skip(self))]
    pub fn read_until_marker(&self, overall_timeout: Duration, include_past: bool) -> Result<String> {
        let cfg = RuntimeConfig::load();
        let deadline = Instant::now() + overall_timeout;

        loop {
            let (slice, marker, shell_type, found, reader_alive) = {
                let mut inner = self.inner.lock().unwrap();
                let start = if include_past { 0 } else { inner.read_cursor };
                let slice = inner.output_buffer[start..].to_string();
                let found = !inner.marker.is_empty() && slice.contains(&inner.marker);
                if found {
                    inner.read_cursor = inner.output_buffer.len();
                    inner.status = PipeStatus::Completed;
                }
                (slice, inner.marker.clone(), inner.shell_type, found, inner.reader_alive)
            };

            let cleaned = marker::strip_markers(&slice, shell_type);

            if found {
                return Ok(cleaned.trim().to_string());
            }
            if !reader_alive {
                let mut inner = self.inner.lock().unwrap();
                inner.status = PipeStatus::Failed;
                return Err(anyhow!(ShellmuxError::Eof));
            }
            if Instant::now() >= deadline {
                let mut inner = self.inner.lock().unwrap();
                inner.read_cursor = inner.output_buffer.len();
                inner.status = PipeStatus::TimedOut;
                let _ = marker;
                return Ok(cleaned.trim().to_string());
            }
            std::thread::sleep(cfg.marker_tick);
        }
    }

    /// Drains `output_queue`, yielding a `StreamEvent` per queued chunk; a
    /// chunk containing the current marker is reported as `Completion` and
    /// transitions the pipe to `COMPLETED`. Terminates on `overall_timeout`,
    /// transitioning the pipe to `TIMED_OUT`, or when the reader thread has
    /// died, transitioning it to `FAILED`.
    #[instrument(skip(self))]
    pub fn stream_output(&self, overall_timeout: Duration) -> Result<Vec<StreamEvent>> {
        let cfg = RuntimeConfig::load();
        let deadline = Instant::now() + overall_timeout;
        let mut events = Vec::new();

        loop {
            let (chunks, marker, shell_type, reader_alive) = {
                let mut inner = self.inner.lock().unwrap();
                let chunks: Vec<String> = inner.output_queue.drain(..).collect();
                (chunks, inner.marker.clone(), inner.shell_type, inner.reader_alive)
            };

            for chunk in chunks {
                if !marker.is_empty() && chunk.contains(&marker) {
                    let cleaned = marker::strip_markers(&chunk, shell_type);
                    events.push(StreamEvent::Completion {
                        content: cleaned.trim().to_string(),
                        marker_id: marker.clone(),
                    });
                    let mut inner = self.inner.lock().unwrap();
                    inner.status = PipeStatus::Completed;
                    return Ok(events);
                }
                for line in chunk.lines() {
                    let marker_id = marker::MARKER_PATTERN
                        .find(line)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_else(|| marker.clone());
                    let cleaned = marker::strip_markers(line, shell_type);
                    if !cleaned.is_empty() {
                        events.push(StreamEvent::Partial { content: cleaned, marker_id });
                    }
                }
            }

            if !reader_alive {
                let mut inner = self.inner.lock().unwrap();
                inner.status = PipeStatus::Failed;
                return Ok(events);
            }
            if Instant::now() >= deadline {
                let mut inner = self.inner.lock().unwrap();
                inner.status = PipeStatus::TimedOut;
                return Ok(events);
            }
            std::thread::sleep(cfg.read_tick);
        }
    }

    /// Current lifecycle status.
    pub fn status(&self) -> PipeStatus {
        self.inner.lock().unwrap().status
    }

    /// Sends SIGINT to the child. Non-blocking; swallows signal-delivery
    /// failures and reports them as `Ok(false)` per §4.3/§7's propagation
    /// policy for interrupts.
    #[instrument(skip(self))]
    pub fn interrupt(&self) -> bool {
        match send_signal_to_child(&self.child, Signal::Interrupt) {
            Ok(()) => true,
            Err(e) => {
                warn!(pipe_id = %self.id, error = %e, "interrupt failed");
                false
            }
        }
    }

    /// Sets the stop signal, attempts a graceful `exit` in the pipe's last
    /// known dialect, then force-terminates the child. Safe to call more
    /// than once.
    #[instrument(skip(self))]
    pub fn close(&self) {
        if self.stop_signal.swap(true, Ordering::SeqCst) {
            return;
        }
        let shell_type = self.inner.lock().unwrap().shell_type;
        let exit_cmd = match shell_type {
            ShellType::PowerShell => "exit\r\n",
            _ => "exit\r\n",
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.write_all(exit_cmd.as_bytes());
            let _ = writer.flush();
        }
        let _ = send_signal_to_child(&self.child, Signal::Terminate);
        crate::shell::registry::remove(&self.id);
    }

    /// Sequenced OS-detection probe per SPEC_FULL.md §4.2.
    #[instrument(skip(self))]
    pub fn detect_os(&self) -> String {
        match self.probe_os() {
            Ok(os) => os,
            Err(e) => format!("unknown: {}", e),
        }
    }

    fn probe_os(&self) -> Result<String> {
        self.write("cat /etc/os-release", ShellType::Bash)?;
        let release = self.read_until_marker(Duration::from_secs(3), false)?;
        if let Some(id_line) = release.lines().find(|l| l.starts_with("ID=")) {
            let value = id_line.trim_start_matches("ID=").trim_matches('"');
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }

        self.write("ver", ShellType::PowerShell)?;
        let ver = self.read_until_marker(Duration::from_secs(3), false)?;
        if ver.contains("Windows") {
            return Ok("windows".to_string());
        }

        self.write("uname -s", ShellType::Bash)?;
        let uname_s = self.read_until_marker(Duration::from_secs(3), false)?;
        if uname_s.contains("Darwin") {
            return Ok("darwin".to_string());
        }

        self.write("uname -a", ShellType::Bash)?;
        self.read_until_marker(Duration::from_secs(3), false)
    }
}

impl Drop for Pipe {
    fn drop(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
    }
}

fn spawn_reader_thread(pipe: Arc<Pipe>, mut reader: Box<dyn Read + Send>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut buf = [0u8; READ_CHUNK_BYTES];
        loop {
            if pipe.stop_signal.load(Ordering::SeqCst) {
                break;
            }
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    let chunk = String::from_utf8_lossy(&buf[..n]).to_string();
                    let mut inner = pipe.inner.lock().unwrap();
                    inner.output_buffer.push_str(&chunk);
                    inner.output_queue.push_back(chunk);
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    std::thread::sleep(Duration::from_millis(20));
                }
                Err(_) => break,
            }
        }
        debug!(pipe_id = %pipe.id, "reader thread exiting");
        pipe.inner.lock().unwrap().reader_alive = false;
    })
}

enum Signal {
    Interrupt,
    Terminate,
}

#[cfg(unix)]
fn send_signal_to_child(child: &Mutex<Box<dyn Child + Send + Sync>>, signal: Signal) -> Result<()> {
    let mut guard = child.lock().unwrap();
    let pid = guard
        .process_id()
        .ok_or_else(|| anyhow!(ShellmuxError::InterruptFailed("no pid available".to_string())))?;
    let sig = match signal {
        Signal::Interrupt => libc::SIGINT,
        Signal::Terminate => libc::SIGTERM,
    };
    let rc = unsafe { libc::kill(pid as i32, sig) };
    if rc != 0 {
        return Err(anyhow!(ShellmuxError::InterruptFailed(format!(
            "kill({}, {}) failed",
            pid, sig
        ))));
    }
    let _ = guard.try_wait();
    Ok(())
}

#[cfg(not(unix))]
fn send_signal_to_child(child: &Mutex<Box<dyn Child + Send + Sync>>, signal: Signal) -> Result<()> {
    // portable-pty exposes only a forceful kill on non-Unix platforms; a
    // graceful interrupt is not available, so both signal kinds force-kill.
    let _ = signal;
    let mut guard = child.lock().unwrap();
    guard
        .kill()
        .map_err(|e| anyhow!(ShellmuxError::InterruptFailed(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_status_display() {
        assert_eq!(PipeStatus::Ready.to_string(), "READY");
        assert_eq!(PipeStatus::TimedOut.to_string(), "TIMED_OUT");
    }
}
