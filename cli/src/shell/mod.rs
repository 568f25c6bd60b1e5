//! # Shell Module Interface
//!
//! File: cli/src/shell/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! The Shell Session Multiplexer: a PTY-backed interactive pipe per
//! conversation thread, addressed by id through `registry`, with completion
//! detected via the `marker` protocol.
pub mod marker;
pub mod pipe;
pub mod registry;

pub use marker::ShellType;
pub use pipe::{Pipe, PipeStatus, StreamEvent};
