//! # Docker Command Group
//!
//! File: cli/src/commands/docker.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Operator-facing CLI surface over the Docker Facade, routed through the
//! same `ToolDispatcher` the stdio agent protocol uses.
use crate::core::error::Result;
use crate::tools::ToolDispatcher;
use clap::{Args, Subcommand};
use serde_json::json;

#[derive(Args, Debug)]
pub struct DockerArgs {
    #[command(subcommand)]
    pub command: DockerCommand,
}

#[derive(Subcommand, Debug)]
pub enum DockerCommand {
    /// Create and start a container from an image.
    Run {
        image: String,
        name: String,
        #[arg(long = "port")]
        ports: Vec<String>,
    },
    /// List containers.
    Ps {
        #[arg(long, default_value_t = true)]
        all: bool,
    },
    /// Pull an image from its registry.
    Pull { image: String },
    /// List locally available images.
    Images {
        #[arg(long)]
        repo: Option<String>,
    },
    /// Start a stopped container.
    Start { name: String },
    /// Stop a running container.
    Stop { name: String },
    /// Create a container without starting it.
    Create {
        image: String,
        #[arg(long)]
        name: Option<String>,
    },
}

pub async fn handle_docker(args: DockerArgs) -> Result<()> {
    let dispatcher = ToolDispatcher::with_default_tools();

    let (tool, tool_args) = match args.command {
        DockerCommand::Run { image, name, ports } => {
            ("run_container", json!({"image": image, "name": name, "ports": ports}))
        }
        DockerCommand::Ps { all } => ("list_available_containers", json!({"all": all})),
        DockerCommand::Pull { image } => ("pull_image", json!({"image": image})),
        DockerCommand::Images { repo } => ("get_list_of_images", json!({"repo": repo})),
        DockerCommand::Start { name } => ("start_container", json!({"name": name})),
        DockerCommand::Stop { name } => ("stop_container", json!({"name": name})),
        DockerCommand::Create { image, name } => ("create_container", json!({"image": image, "name": name})),
    };

    let result = dispatcher.call(tool, tool_args).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
