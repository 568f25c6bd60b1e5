//! # Shell Command Group
//!
//! File: cli/src/commands/shell.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Operator-facing CLI surface over the Shell Session Multiplexer. Each
//! subcommand builds the same JSON arguments the stdio tool protocol would
//! carry and drives them through `ToolDispatcher`, so the CLI and the agent
//! protocol exercise identical code paths.
use crate::core::error::Result;
use crate::tools::ToolDispatcher;
use clap::{Args, Subcommand};
use serde_json::json;

#[derive(Args, Debug)]
pub struct ShellArgs {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Spawn a new interactive shell pipe.
    Create {
        /// Shell program to spawn; defaults to the host's native shell.
        cmd: Option<String>,
        #[arg(long, default_value_t = 5.0)]
        timeout: f64,
    },
    /// Write a command to an existing pipe.
    Run {
        pipe_id: String,
        command: String,
        #[arg(long, default_value = "BASH")]
        shell_type: String,
    },
    /// Block until the pipe's current marker appears, or timeout.
    Read {
        pipe_id: String,
        #[arg(long, default_value_t = 5.0)]
        timeout: f64,
        #[arg(long)]
        include_past: bool,
    },
    /// Print a pipe's current lifecycle status.
    Status { pipe_id: String },
    /// Send SIGINT to a pipe's child process.
    Interrupt { pipe_id: String },
    /// Probe a pipe's child to determine which OS it is running on.
    DetectOs { pipe_id: String },
}

pub async fn handle_shell(args: ShellArgs) -> Result<()> {
    let dispatcher = ToolDispatcher::with_default_tools();

    let (tool, tool_args) = match args.command {
        ShellCommand::Create { cmd, timeout } => ("create_shell", json!({"cmd": cmd, "timeout": timeout})),
        ShellCommand::Run { pipe_id, command, shell_type } => {
            ("run_command", json!({"pipe_id": pipe_id, "command": command, "shell_type": shell_type}))
        }
        ShellCommand::Read { pipe_id, timeout, include_past } => {
            ("read_output", json!({"pipe_id": pipe_id, "timeout": timeout, "include_past": include_past}))
        }
        ShellCommand::Status { pipe_id } => ("check_pipe_status", json!({"pipe_id": pipe_id})),
        ShellCommand::Interrupt { pipe_id } => ("interrupt_pipe_execution", json!({"pipe_id": pipe_id})),
        ShellCommand::DetectOs { pipe_id } => ("detect_os", json!({"pipe_id": pipe_id})),
    };

    let result = dispatcher.call(tool, tool_args).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
