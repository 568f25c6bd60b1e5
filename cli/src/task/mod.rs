//! # Task Module Interface
//!
//! File: cli/src/task/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! The Container Task Runner: one-shot, non-interactive command execution
//! inside a container, addressed by id through `registry`.
pub mod registry;
pub mod runner;

pub use runner::{Runner, RunnerStatus, Transport};
