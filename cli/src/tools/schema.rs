//! # Tool Dispatch Table
//!
//! File: cli/src/tools/schema.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! The tool surface is a flat table of `{name, description, argument schema,
//! handler}` entries (`ToolDef`) plus a dispatch routine (`ToolDispatcher`)
//! that resolves a tool name to its handler and (de)serializes JSON
//! arguments/results at the boundary. This replaces a polymorphic
//! wrapped-callable design with a plain data table, matched against at
//! dispatch time rather than through dynamic dispatch per call site.
use crate::core::error::{Result, ShellmuxError};
use anyhow::anyhow;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// A handler takes the tool's JSON arguments and returns its JSON result.
pub type Handler = fn(Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// One entry in the tool surface.
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub argument_schema: Value,
    pub handler: Handler,
}

/// Resolves tool names to handlers and invokes them with JSON arguments.
pub struct ToolDispatcher {
    tools: HashMap<&'static str, ToolDef>,
}

impl ToolDispatcher {
    pub fn new(defs: Vec<ToolDef>) -> Self {
        let tools = defs.into_iter().map(|d| (d.name, d)).collect();
        ToolDispatcher { tools }
    }

    /// Builds the dispatcher with every tool defined across `shell_tools`,
    /// `task_tools`, and `docker_tools`.
    pub fn with_default_tools() -> Self {
        let mut defs = Vec::new();
        defs.extend(super::shell_tools::definitions());
        defs.extend(super::task_tools::definitions());
        defs.extend(super::docker_tools::definitions());
        Self::new(defs)
    }

    pub fn list(&self) -> Vec<&ToolDef> {
        let mut defs: Vec<&ToolDef> = self.tools.values().collect();
        defs.sort_by_key(|d| d.name);
        defs
    }

    /// Looks up `name` and invokes its handler with `args`.
    ///
    /// # Errors
    ///
    /// Returns an error if no tool is registered under `name`; otherwise
    /// propagates whatever the handler itself returns.
    pub async fn call(&self, name: &str, args: Value) -> Result<Value> {
        let def = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow!(ShellmuxError::ArgumentParsing(format!("unknown tool '{}'", name))))?;
        (def.handler)(args).await
    }
}

/// Extracts a required string field from a JSON arguments object.
pub fn require_str<'a>(args: &'a Value, field: &str) -> Result<&'a str> {
    args.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!(ShellmuxError::ArgumentParsing(format!("missing required field '{}'", field))))
}

/// Extracts an optional string field, falling back to `default` if absent.
pub fn optional_str<'a>(args: &'a Value, field: &str, default: &'a str) -> &'a str {
    args.get(field).and_then(Value::as_str).unwrap_or(default)
}

/// Extracts an optional numeric field as an `f64` of seconds, falling back to `default`.
pub fn optional_secs(args: &Value, field: &str, default: f64) -> f64 {
    args.get(field).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts an optional boolean field, falling back to `default`.
pub fn optional_bool(args: &Value, field: &str, default: bool) -> bool {
    args.get(field).and_then(Value::as_bool).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_str_present() {
        let args = json!({"pipe_id": "abc"});
        assert_eq!(require_str(&args, "pipe_id").unwrap(), "abc");
    }

    #[test]
    fn test_require_str_missing() {
        let args = json!({});
        assert!(require_str(&args, "pipe_id").is_err());
    }

    #[test]
    fn test_optional_str_default() {
        let args = json!({});
        assert_eq!(optional_str(&args, "cmd", "bash"), "bash");
    }

    #[test]
    fn test_optional_secs_default() {
        let args = json!({});
        assert_eq!(optional_secs(&args, "timeout", 5.0), 5.0);
    }
}
