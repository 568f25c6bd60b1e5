//! # Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `shellmux` CLI. It
//! handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! Each top-level command group (`shell`, `task`, `docker`, `serve`) is a
//! variant in the `Commands` enum, mapped to a handler function in its
//! respective module. All errors are propagated to this level for
//! consistent handling.
//!
//! ## Examples
//!
//! ```bash
//! # Spawn an interactive bash pipe
//! shellmux shell create bash
//!
//! # Run the tool surface as a stdio JSON protocol for an agent
//! shellmux serve
//! ```
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;
mod shell;
mod task;
mod tools;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "shellmux",
    about = "Shell session multiplexer and container task runner for LLM-driven Docker operation",
    long_about = "Spawns PTY-backed interactive shells and one-shot container tasks, addressable\n\
                  by id through a small tool surface reachable both as a CLI and as a\n\
                  line-delimited JSON protocol on stdio.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "sh")]
    Shell(commands::shell::ShellArgs),
    #[command(alias = "t")]
    Task(commands::task::TaskArgs),
    #[command(alias = "d")]
    Docker(commands::docker::DockerArgs),
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Shell(args) => commands::shell::handle_shell(args).await,
        Commands::Task(args) => commands::task::handle_task(args).await,
        Commands::Docker(args) => commands::docker::handle_docker(args).await,
        Commands::Serve(args) => commands::serve::handle_serve(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn shellmux_cmd() -> Command {
        Command::cargo_bin("shellmux").expect("failed to find shellmux binary for testing")
    }

    #[test]
    fn test_main_help_flag() {
        shellmux_cmd().arg("--help").assert().success();
    }

    #[test]
    fn test_main_version_flag() {
        shellmux_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_serve_list_tools() {
        shellmux_cmd()
            .args(["serve", "--list-tools"])
            .assert()
            .success()
            .stdout(predicate::str::contains("create_shell"));
    }
}
