//! # Task Command Group
//!
//! File: cli/src/commands/task.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Operator-facing CLI surface over the Container Task Runner, routed
//! through the same `ToolDispatcher` the stdio agent protocol uses.
use crate::core::error::Result;
use crate::tools::ToolDispatcher;
use clap::{Args, Subcommand};
use serde_json::json;

#[derive(Args, Debug)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommand,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Execute a one-shot command inside a named container.
    Run {
        container_name: String,
        command: Vec<String>,
        #[arg(long)]
        subprocess: bool,
    },
    /// Print everything a task has emitted so far.
    Output { runner_id: String },
    /// Print a task's current lifecycle status.
    Status { runner_id: String },
    /// Interrupt a running task, escalating from SIGINT to SIGKILL.
    Stop { runner_id: String },
}

pub async fn handle_task(args: TaskArgs) -> Result<()> {
    let dispatcher = ToolDispatcher::with_default_tools();

    let (tool, tool_args) = match args.command {
        TaskCommand::Run { container_name, command, subprocess } => {
            ("run_task", json!({"container_name": container_name, "command": command, "use_sdk": !subprocess}))
        }
        TaskCommand::Output { runner_id } => ("get_task_runner_output", json!({"runner_id": runner_id})),
        TaskCommand::Status { runner_id } => ("check_task_runner_status", json!({"runner_id": runner_id})),
        TaskCommand::Stop { runner_id } => ("stop_task_runner", json!({"runner_id": runner_id})),
    };

    let result = dispatcher.call(tool, tool_args).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
