//! # Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! This module defines the error types used throughout the shell/task runtime.
//! It provides a consistent approach to error management with detailed error
//! information and context.
//!
//! ## Architecture
//!
//! - `ShellmuxError`: a custom error enum using `thiserror` for specific error types.
//! - `Result<T>`: a type alias for `anyhow::Result<T>` for flexible propagation.
//!
//! Callers that need to branch on a specific failure kind (rather than just
//! display it) downcast via `anyhow::Error::downcast_ref::<ShellmuxError>()`.
//!
//! ## Examples
//!
//! ```rust
//! match result {
//!     Ok(value) => println!("Success: {}", value),
//!     Err(e) if e.downcast_ref::<ShellmuxError>().map_or(false, |se| matches!(se, ShellmuxError::NotFound { .. })) => {
//!         println!("Unknown pipe or runner id");
//!     },
//!     Err(e) => return Err(e),
//! }
//! ```
use thiserror::Error;

/// Error type covering the shell pipe, task runner, and Docker facade.
#[derive(Error, Debug)]
pub enum ShellmuxError {
    #[error("no pipe or runner registered under id '{id}'")]
    NotFound { id: String },

    #[error("timed out after {0:?} waiting for completion marker")]
    Timeout(std::time::Duration),

    #[error("child process closed its output unexpectedly")]
    Eof,

    #[error("unknown shell type: '{0}'")]
    UnknownShell(String),

    #[error("failed to interrupt process: {0}")]
    InterruptFailed(String),

    #[error("Docker daemon is not reachable: {0}")]
    DockerUnavailable(String),

    #[error("Docker operation failed: {0}")]
    DockerOperationFailed(String),

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("container '{name}' not found")]
    ContainerNotFound { name: String },

    #[error("image '{name}' not found")]
    ImageNotFound { name: String },

    #[error("container '{name}' is running; stop it first or pass force")]
    ContainerRunning { name: String },

    #[error("image '{name}' is in use by one or more containers")]
    ImageInUse { name: String },

    #[error("PTY error: {0}")]
    Pty(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("argument parsing error: {0}")]
    ArgumentParsing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Type alias for `Result` using `anyhow::Error` for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let not_found = ShellmuxError::NotFound {
            id: "abc123".into(),
        };
        assert_eq!(
            not_found.to_string(),
            "no pipe or runner registered under id 'abc123'"
        );

        let unknown_shell = ShellmuxError::UnknownShell("fish".into());
        assert_eq!(unknown_shell.to_string(), "unknown shell type: 'fish'");

        let container_running = ShellmuxError::ContainerRunning {
            name: "web-1".into(),
        };
        assert_eq!(
            container_running.to_string(),
            "container 'web-1' is running; stop it first or pass force"
        );
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = anyhow::anyhow!(ShellmuxError::Eof);
        assert!(matches!(
            err.downcast_ref::<ShellmuxError>(),
            Some(ShellmuxError::Eof)
        ));
    }
}
