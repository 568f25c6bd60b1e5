//! # Task Tool Handlers
//!
//! File: cli/src/tools/task_tools.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Tool-surface handlers for the Container Task Runner: `run_task`,
//! `get_task_runner_output`, `check_task_runner_status`, `stop_task_runner`.
use crate::core::config::RuntimeConfig;
use crate::core::error::Result;
use crate::task::registry;
use crate::task::runner::{Runner, Transport};
use crate::tools::schema::{optional_bool, require_str, ToolDef};
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;

pub fn definitions() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "run_task",
            description: "Execute a one-shot non-interactive command inside a named container.",
            argument_schema: json!({
                "type": "object",
                "properties": {
                    "container_name": {"type": "string"},
                    "command": {"type": "array", "items": {"type": "string"}},
                    "use_sdk": {"type": "boolean", "default": true}
                },
                "required": ["container_name", "command"]
            }),
            handler: run_task,
        },
        ToolDef {
            name: "get_task_runner_output",
            description: "Return everything a runner has emitted so far.",
            argument_schema: json!({
                "type": "object",
                "properties": {"runner_id": {"type": "string"}},
                "required": ["runner_id"]
            }),
            handler: get_task_runner_output,
        },
        ToolDef {
            name: "check_task_runner_status",
            description: "Return a runner's current lifecycle status.",
            argument_schema: json!({
                "type": "object",
                "properties": {"runner_id": {"type": "string"}},
                "required": ["runner_id"]
            }),
            handler: check_task_runner_status,
        },
        ToolDef {
            name: "stop_task_runner",
            description: "Interrupt a running task, escalating from SIGINT to SIGKILL.",
            argument_schema: json!({
                "type": "object",
                "properties": {"runner_id": {"type": "string"}},
                "required": ["runner_id"]
            }),
            handler: stop_task_runner,
        },
    ]
}

fn command_tokens(args: &Value) -> Result<Vec<String>> {
    match args.get("command") {
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()),
        Some(Value::String(s)) => Ok(s.split_whitespace().map(String::from).collect()),
        _ => Ok(Vec::new()),
    }
}

fn run_task(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let container_name = require_str(&args, "container_name")?.to_string();
        let command = command_tokens(&args)?;
        let use_sdk = optional_bool(&args, "use_sdk", true);
        let transport = if use_sdk { Transport::Sdk } else { Transport::Subprocess };

        let runner = Runner::new(&container_name, command, transport);
        registry::insert(runner.clone());

        let background = runner.clone();
        tokio::spawn(async move {
            let _ = background.start().await;
        });

        Ok(json!(runner.id().to_string()))
    })
}

fn get_task_runner_output(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let runner_id = require_str(&args, "runner_id")?;
        let runner = registry::get(runner_id)?;
        Ok(json!(runner.output()))
    })
}

fn check_task_runner_status(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let runner_id = require_str(&args, "runner_id")?;
        let runner = registry::get(runner_id)?;
        Ok(json!(runner.status().to_string()))
    })
}

fn stop_task_runner(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let runner_id = require_str(&args, "runner_id")?;
        let runner = registry::get(runner_id)?;
        let cfg = RuntimeConfig::load();
        let outcome = runner.stop(cfg.force_kill_timeout).await;
        match outcome {
            Ok(()) => Ok(json!(format!(
                "Stop requested for task '{}'; status is now {}.",
                runner_id,
                runner.status()
            ))),
            Err(e) => Ok(json!(format!("Failed to stop task '{}': {:#}", runner_id, e))),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tokens_from_array() {
        let args = json!({"command": ["sh", "-c", "echo hi"]});
        let tokens = command_tokens(&args).unwrap();
        assert_eq!(tokens, vec!["sh", "-c", "echo hi"]);
    }

    #[test]
    fn test_command_tokens_from_string() {
        let args = json!({"command": "echo hi"});
        let tokens = command_tokens(&args).unwrap();
        assert_eq!(tokens, vec!["echo", "hi"]);
    }

    #[tokio::test]
    async fn test_get_task_runner_output_unknown_errors() {
        let args = json!({"runner_id": "missing"});
        let result = get_task_runner_output(args).await;
        assert!(result.is_err());
    }
}
