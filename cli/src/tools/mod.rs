//! # Tool Surface
//!
//! File: cli/src/tools/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! The externally addressable tool surface an upstream LLM agent drives over
//! a line-delimited JSON protocol on stdio (see `commands::serve`), and that
//! an operator can exercise directly via the `shell`/`task`/`docker` CLI
//! command groups.
pub mod docker_tools;
pub mod schema;
pub mod shell_tools;
pub mod task_tools;

pub use schema::{ToolDef, ToolDispatcher};
