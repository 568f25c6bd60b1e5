//! # Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! This module serves as the root and organizational entry point for shared,
//! cross-cutting utilities used by the shell pipe, task runner, and tool
//! surface: Docker daemon interaction and terminal UI helpers.
//!
//! ## Architecture
//!
//! - **`docker`**: The main interface for interacting with the Docker daemon via the `bollard` crate. Handles images, containers, lifecycle, and state.
//! - **`ui`**: *(Placeholder)* Intended for terminal UI enhancements like progress bars and tables.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::docker;
//! use crate::core::error::Result;
//!
//! # async fn run_example() -> Result<()> {
//! let exists = docker::state::container_exists("my-app").await?;
//! # Ok(())
//! # }
//! ```

/// Core utilities for interacting with the Docker daemon (images, containers).
pub mod docker;
/// (Placeholder) Utilities for terminal user interface elements.
pub mod ui;
