//! # Shell Tool Handlers
//!
//! File: cli/src/tools/shell_tools.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Tool-surface handlers for the Shell Session Multiplexer: `create_shell`,
//! `run_command`, `read_output`, `read_output_from_queue`,
//! `read_output_streaming`, `check_pipe_status`, `interrupt_pipe_execution`,
//! `detect_os`.
use crate::core::config::RuntimeConfig;
use crate::core::error::Result;
use crate::shell::marker::ShellType;
use crate::shell::pipe::Pipe;
use crate::shell::registry;
use crate::tools::schema::{optional_bool, optional_secs, optional_str, require_str, ToolDef};
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub fn definitions() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "create_shell",
            description: "Spawn an interactive shell behind a PTY and return its pipe id.",
            argument_schema: json!({
                "type": "object",
                "properties": {
                    "cmd": {"type": "string", "description": "Shell program to spawn; defaults to the host's native shell"},
                    "timeout": {"type": "number", "description": "Seconds to wait for the initial prompt", "default": 5}
                }
            }),
            handler: create_shell,
        },
        ToolDef {
            name: "run_command",
            description: "Write a command to a pipe, appending a fresh completion marker.",
            argument_schema: json!({
                "type": "object",
                "properties": {
                    "pipe_id": {"type": "string"},
                    "command": {"type": "string"},
                    "shell_type": {"type": "string", "default": "BASH"}
                },
                "required": ["pipe_id", "command"]
            }),
            handler: run_command,
        },
        ToolDef {
            name: "read_output",
            description: "Block until the current marker appears in a pipe's output, or until timeout.",
            argument_schema: json!({
                "type": "object",
                "properties": {
                    "pipe_id": {"type": "string"},
                    "timeout": {"type": "number", "default": 5},
                    "include_past": {"type": "boolean", "default": false}
                },
                "required": ["pipe_id"]
            }),
            handler: read_output,
        },
        ToolDef {
            name: "read_output_from_queue",
            description: "Drain a pipe's output queue and join the chunks with newlines.",
            argument_schema: json!({
                "type": "object",
                "properties": {
                    "pipe_id": {"type": "string"},
                    "timeout": {"type": "number", "default": 5}
                },
                "required": ["pipe_id"]
            }),
            handler: read_output_from_queue,
        },
        ToolDef {
            name: "read_output_streaming",
            description: "Drain a pipe's output queue as a list of {type, content, marker_id} events.",
            argument_schema: json!({
                "type": "object",
                "properties": {
                    "pipe_id": {"type": "string"},
                    "timeout": {"type": "number", "default": 5}
                },
                "required": ["pipe_id"]
            }),
            handler: read_output_streaming,
        },
        ToolDef {
            name: "check_pipe_status",
            description: "Return a pipe's current lifecycle status.",
            argument_schema: json!({
                "type": "object",
                "properties": {"pipe_id": {"type": "string"}},
                "required": ["pipe_id"]
            }),
            handler: check_pipe_status,
        },
        ToolDef {
            name: "interrupt_pipe_execution",
            description: "Send SIGINT to a pipe's child process.",
            argument_schema: json!({
                "type": "object",
                "properties": {"pipe_id": {"type": "string"}},
                "required": ["pipe_id"]
            }),
            handler: interrupt_pipe_execution,
        },
        ToolDef {
            name: "detect_os",
            description: "Probe a pipe's child to determine which OS it is running on.",
            argument_schema: json!({
                "type": "object",
                "properties": {"pipe_id": {"type": "string"}},
                "required": ["pipe_id"]
            }),
            handler: detect_os,
        },
    ]
}

fn default_shell() -> &'static str {
    if cfg!(windows) {
        "powershell"
    } else {
        "bash"
    }
}

fn create_shell(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let cmd = optional_str(&args, "cmd", default_shell()).to_string();
        let timeout_secs = optional_secs(&args, "timeout", 5.0);
        let shell_type = if cmd.contains("powershell") {
            ShellType::PowerShell
        } else {
            ShellType::Bash
        };
        let cfg = RuntimeConfig::load();
        let prompt_timeout = if timeout_secs > 0.0 {
            Duration::from_secs_f64(timeout_secs)
        } else {
            cfg.prompt_timeout
        };
        let pipe = tokio::task::spawn_blocking(move || Pipe::spawn(&cmd, shell_type, prompt_timeout))
            .await
            .map_err(|e| anyhow::anyhow!("pipe spawn task panicked: {}", e))??;
        let id = pipe.id().to_string();
        registry::insert(pipe);
        Ok(json!(id))
    })
}

fn run_command(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let pipe_id = require_str(&args, "pipe_id")?;
        let command = require_str(&args, "command")?;
        let shell_type: ShellType = optional_str(&args, "shell_type", "BASH").parse()?;
        let pipe = registry::get(pipe_id)?;
        pipe.write(command, shell_type)?;
        Ok(json!(true))
    })
}

fn read_output(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let pipe_id = require_str(&args, "pipe_id")?;
        let timeout_secs = optional_secs(&args, "timeout", 5.0);
        let include_past = optional_bool(&args, "include_past", false);
        let pipe = registry::get(pipe_id)?;
        let timeout = Duration::from_secs_f64(timeout_secs);
        let text = tokio::task::spawn_blocking(move || pipe.read_until_marker(timeout, include_past))
            .await
            .map_err(|e| anyhow::anyhow!("read task panicked: {}", e))??;
        Ok(json!(text))
    })
}

fn read_output_from_queue(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let pipe_id = require_str(&args, "pipe_id")?;
        let timeout_secs = optional_secs(&args, "timeout", 5.0);
        let pipe = registry::get(pipe_id)?;
        let timeout = Duration::from_secs_f64(timeout_secs);
        let events = tokio::task::spawn_blocking(move || pipe.stream_output(timeout))
            .await
            .map_err(|e| anyhow::anyhow!("stream task panicked: {}", e))??;
        let joined = events
            .into_iter()
            .map(|event| match event {
                crate::shell::pipe::StreamEvent::Partial { content, .. } => content,
                crate::shell::pipe::StreamEvent::Completion { content, .. } => content,
            })
            .collect::<Vec<_>>()
            .join("\n");
        Ok(json!(joined))
    })
}

fn read_output_streaming(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let pipe_id = require_str(&args, "pipe_id")?;
        let timeout_secs = optional_secs(&args, "timeout", 5.0);
        let pipe = registry::get(pipe_id)?;
        let timeout = Duration::from_secs_f64(timeout_secs);
        let events = tokio::task::spawn_blocking(move || pipe.stream_output(timeout))
            .await
            .map_err(|e| anyhow::anyhow!("stream task panicked: {}", e))??;
        let rendered: Vec<Value> = events
            .into_iter()
            .map(|event| match event {
                crate::shell::pipe::StreamEvent::Partial { content, marker_id } => json!({
                    "type": "partial_output",
                    "content": content,
                    "marker_id": marker_id,
                }),
                crate::shell::pipe::StreamEvent::Completion { content, marker_id } => json!({
                    "type": "completion",
                    "content": content,
                    "command_marker_id": marker_id,
                }),
            })
            .collect();
        Ok(json!(rendered))
    })
}

fn check_pipe_status(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let pipe_id = require_str(&args, "pipe_id")?;
        let pipe = registry::get(pipe_id)?;
        Ok(json!(pipe.status().to_string()))
    })
}

fn interrupt_pipe_execution(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let pipe_id = require_str(&args, "pipe_id")?;
        let pipe = registry::get(pipe_id)?;
        pipe.interrupt();
        Ok(Value::Null)
    })
}

fn detect_os(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let pipe_id = require_str(&args, "pipe_id")?;
        let pipe = registry::get(pipe_id)?;
        let os = tokio::task::spawn_blocking(move || pipe.detect_os())
            .await
            .map_err(|e| anyhow::anyhow!("detect_os task panicked: {}", e))?;
        Ok(json!(os))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shell_matches_platform() {
        let expected = if cfg!(windows) { "powershell" } else { "bash" };
        assert_eq!(default_shell(), expected);
    }

    #[tokio::test]
    async fn test_run_command_unknown_pipe_errors() {
        let args = json!({"pipe_id": "missing", "command": "echo hi"});
        let result = run_command(args).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_check_pipe_status_unknown_pipe_errors() {
        let args = json!({"pipe_id": "missing"});
        let result = check_pipe_status(args).await;
        assert!(result.is_err());
    }
}
