//! # DevRS UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module serves as a **placeholder** for future user interface (UI) utilities
//! designed to enhance the command-line experience of DevRS. The intent is to
//! centralize components for displaying information clearly and potentially interacting
//! with the user in a more sophisticated way than simple `println!`.
//!
//! **Note:** Currently, the submodules and functionality described below are **not implemented**.
//!
//! ## Planned Architecture
//!
//! The module is intended to be organized into submodules based on UI element type:
//!
//! - **`progress`**: Would contain utilities for displaying progress bars or spinners
//!   during long-running operations (like Docker builds or large file copies). Might use
//!   crates like `indicatif`.
//! - **`tables`**: Would provide functions to format and display data in neat, aligned
//!   tabular layouts in the terminal. Could use crates like `comfy-table` or `cli-table`.
//!   Useful for commands like `devrs container status` or `devrs blueprint list`.
//! - **`prompts`**: Would include tools for interactive user input beyond simple line reading,
//!   such as confirmation prompts (`[y/N]`), multiple-choice selections, or password input.
//!   Could leverage crates like `dialoguer`.
//!
//! ## Planned Usage
//!
//! Once implemented, various commands could utilize these UI elements:
//!
//! ```rust
//! // Conceptual Usage (Module Not Yet Implemented)
//! # mod progress { pub fn create_progress_bar(_len: u64) -> MockProgressBar { MockProgressBar } pub struct MockProgressBar; impl MockProgressBar { pub fn inc(&self, _d: u64) {} pub fn finish_with_message(&self, _s: &str) {} } }
//! # mod tables { pub fn display_table(_h: &[&str], _r: &[Vec<String>]) {} }
//! # mod prompts { pub fn confirm(_q: &str) -> anyhow::Result<bool> { Ok(true) } }
//! // use crate::common::ui::{progress, tables, prompts}; // Would import from implemented submodules
//! use crate::core::error::Result;
//!
//! # fn run_example() -> Result<()> {
//! // Example: Show progress during a build
//! // let total_steps = 100;
//! // let pb = progress::create_progress_bar(total_steps);
//! // for i in 0..total_steps {
//! //    // ... perform build step ...
//! //    pb.inc(1);
//! // }
//! // pb.finish_with_message("Build complete!");
//!
//! // Example: Display container status in a table
//! // let headers = vec!["ID", "Name", "Status"];
//! // let rows = vec![
//! //     vec!["abc1".to_string(), "app1".to_string(), "Running".to_string()],
//! //     vec!["def2".to_string(), "db1".to_string(), "Exited".to_string()],
//! // ];
//! // tables::display_table(&headers, &rows);
//!
//! // Example: Confirm a destructive action
//! // if prompts::confirm("Are you sure you want to remove image 'xyz'?")? {
//! //    println!("Proceeding with removal...");
//! // } else {
//! //    println!("Aborted.");
//! // }
//! # Ok(())
//! # }
//! ```
//!
//! Currently, this module only defines the basic structure.

// pub mod progress; // Future submodule placeholder
// pub mod tables;   // Future submodule placeholder
// pub mod prompts;  // Future submodule placeholder
