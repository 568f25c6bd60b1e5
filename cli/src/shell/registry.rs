//! # Pipe Registry
//!
//! File: cli/src/shell/registry.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Process-wide, concurrency-safe map from pipe id to the live `Pipe`. Every
//! tool-surface operation that names a pipe (`run_command`, `read_output`,
//! `interrupt_pipe_execution`, ...) looks it up here first.
use crate::core::error::{Result, ShellmuxError};
use crate::shell::pipe::Pipe;
use anyhow::anyhow;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

static REGISTRY: Lazy<Mutex<HashMap<String, Arc<Pipe>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Registers a newly spawned pipe under its own id.
pub fn insert(pipe: Arc<Pipe>) {
    REGISTRY.lock().unwrap().insert(pipe.id().to_string(), pipe);
}

/// Looks up a pipe by id.
///
/// # Errors
///
/// `ShellmuxError::NotFound` if no pipe with that id is registered.
pub fn get(id: &str) -> Result<Arc<Pipe>> {
    REGISTRY
        .lock()
        .unwrap()
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!(ShellmuxError::NotFound { id: id.to_string() }))
}

/// Removes a pipe from the registry, if present. Called by `Pipe::close`.
pub fn remove(id: &str) -> Option<Arc<Pipe>> {
    REGISTRY.lock().unwrap().remove(id)
}

/// Lists the ids of all currently registered pipes.
pub fn list_ids() -> Vec<String> {
    REGISTRY.lock().unwrap().keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::marker::ShellType;
    use std::time::Duration;

    #[test]
    fn test_get_missing_returns_not_found() {
        let result = get("does-not-exist");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err
            .downcast_ref::<ShellmuxError>()
            .is_some_and(|e| matches!(e, ShellmuxError::NotFound { .. })));
    }

    #[test]
    fn test_insert_get_remove_roundtrip() {
        // `Pipe::spawn` requires an actual child process, so this test exercises
        // only the map's insert/get/remove behavior directly against a real
        // `Pipe` built from a trivial `/bin/true` so the reader thread exits fast.
        let spawned = Pipe::spawn("true", ShellType::Bash, Duration::from_millis(50));
        if let Ok(pipe) = spawned {
            let id = pipe.id().to_string();
            insert(Arc::clone(&pipe));
            assert!(get(&id).is_ok());
            remove(&id);
            assert!(get(&id).is_err());
        }
    }
}
