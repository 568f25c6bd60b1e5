//! # Runner Registry
//!
//! File: cli/src/task/registry.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Process-wide, concurrency-safe map from task id to the live `Runner`. A
//! runner that reaches `DONE` or `FAILED` stays in this map, inspectable by
//! `get_task_runner_output`/`check_task_runner_status`, until a caller
//! explicitly removes it; there is no auto-eviction on completion.
use crate::core::error::{Result, ShellmuxError};
use crate::task::runner::Runner;
use anyhow::anyhow;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

static REGISTRY: Lazy<Mutex<HashMap<String, Arc<Runner>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

pub fn insert(runner: Arc<Runner>) {
    REGISTRY.lock().unwrap().insert(runner.id().to_string(), runner);
}

/// # Errors
///
/// `ShellmuxError::NotFound` if no runner with that id is registered.
pub fn get(id: &str) -> Result<Arc<Runner>> {
    REGISTRY
        .lock()
        .unwrap()
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!(ShellmuxError::NotFound { id: id.to_string() }))
}

pub fn remove(id: &str) -> Option<Arc<Runner>> {
    REGISTRY.lock().unwrap().remove(id)
}

pub fn list_ids() -> Vec<String> {
    REGISTRY.lock().unwrap().keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::runner::Transport;

    #[test]
    fn test_get_missing_returns_not_found() {
        let result = get("no-such-task");
        assert!(result.is_err());
    }

    #[test]
    fn test_insert_get_remove_roundtrip() {
        let runner = Runner::new("container", vec!["true".into()], Transport::Subprocess);
        let id = runner.id().to_string();
        insert(Arc::clone(&runner));
        assert!(get(&id).is_ok());
        remove(&id);
        assert!(get(&id).is_err());
    }
}
