//! # Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Aggregates the top-level command groups exposed by the CLI binary. Each
//! group defines its own `clap::Args` struct and `handle_*` entry point,
//! mirroring the operations on the tool surface (`crate::tools`).
//!
//! ## Command Groups
//!
//! - `shell`: Shell Session Multiplexer operations (`create`, `run`, `read`, `status`, `interrupt`, `detect-os`).
//! - `task`: Container Task Runner operations (`run`, `output`, `status`, `stop`).
//! - `docker`: Docker Facade operations (`run`, `ps`, `pull`, `images`, `start`, `stop`, `create`).
//! - `serve`: runs the tool surface as a line-delimited JSON protocol on stdio, for the upstream agent.
pub mod docker;
pub mod serve;
pub mod shell;
pub mod task;
