//! # Docker Tool Handlers
//!
//! File: cli/src/tools/docker_tools.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Tool-surface handlers for the Docker Facade: `run_container`,
//! `list_available_containers`, `pull_image`, `get_list_of_images`,
//! `start_container`, `stop_container`, `create_container`. Every handler
//! here returns the uniform `{success, output, error}` envelope rather than
//! letting a Docker error escape, per §4.5 and §7's facade propagation
//! policy.
use crate::common::docker::{images, lifecycle, operations, state, MountSpec};
use crate::core::error::Result;
use crate::tools::schema::{optional_bool, optional_str, require_str, ToolDef};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

pub fn definitions() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "run_container",
            description: "Create and start a container from an image.",
            argument_schema: json!({
                "type": "object",
                "properties": {
                    "image": {"type": "string"},
                    "name": {"type": "string"},
                    "ports": {"type": "array", "items": {"type": "string"}},
                    "detach": {"type": "boolean", "default": true}
                },
                "required": ["image", "name"]
            }),
            handler: run_container,
        },
        ToolDef {
            name: "list_available_containers",
            description: "List containers with id/name/status/image tags.",
            argument_schema: json!({
                "type": "object",
                "properties": {"all": {"type": "boolean", "default": true}}
            }),
            handler: list_available_containers,
        },
        ToolDef {
            name: "pull_image",
            description: "Pull an image from its registry.",
            argument_schema: json!({
                "type": "object",
                "properties": {"image": {"type": "string"}},
                "required": ["image"]
            }),
            handler: pull_image,
        },
        ToolDef {
            name: "get_list_of_images",
            description: "List locally available images.",
            argument_schema: json!({
                "type": "object",
                "properties": {
                    "repo": {"type": "string"},
                    "all": {"type": "boolean", "default": true}
                }
            }),
            handler: get_list_of_images,
        },
        ToolDef {
            name: "start_container",
            description: "Start a stopped container.",
            argument_schema: json!({
                "type": "object",
                "properties": {"name": {"type": "string"}},
                "required": ["name"]
            }),
            handler: start_container,
        },
        ToolDef {
            name: "stop_container",
            description: "Stop a running container.",
            argument_schema: json!({
                "type": "object",
                "properties": {"name": {"type": "string"}},
                "required": ["name"]
            }),
            handler: stop_container,
        },
        ToolDef {
            name: "create_container",
            description: "Create a container without starting it.",
            argument_schema: json!({
                "type": "object",
                "properties": {
                    "image": {"type": "string"},
                    "name": {"type": "string"}
                },
                "required": ["image"]
            }),
            handler: create_container,
        },
    ]
}

fn envelope(result: Result<Value>) -> Value {
    match result {
        Ok(output) => json!({"success": true, "output": output, "error": Value::Null}),
        Err(e) => json!({"success": false, "output": "", "error": format!("{:#}", e)}),
    }
}

fn run_container(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let image = require_str(&args, "image")?.to_string();
        let name = require_str(&args, "name")?.to_string();
        let ports: Vec<String> = args
            .get("ports")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(|v| v.as_str().map(String::from)).collect())
            .unwrap_or_default();
        let detach = optional_bool(&args, "detach", true);

        let result = operations::run_container(
            &image,
            &name,
            &ports,
            &[],
            &HashMap::new(),
            None,
            detach,
            false,
            None,
        )
        .await
        .map(|_| json!(format!("container '{}' started", name)));

        Ok(envelope(result))
    })
}

fn list_available_containers(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let all = optional_bool(&args, "all", true);
        let result = state::list_containers(all, None).await.map(|containers| {
            let rows: Vec<Value> = containers
                .into_iter()
                .map(|c| {
                    json!({
                        "id": c.id,
                        "names": c.names,
                        "status": c.status,
                        "image": c.image,
                    })
                })
                .collect();
            json!(rows)
        });
        Ok(envelope(result))
    })
}

fn pull_image(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let image = require_str(&args, "image")?.to_string();
        let result = operations::pull_image(&image).await.map(|_| json!(image.clone()));
        Ok(envelope(result))
    })
}

fn get_list_of_images(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let all = optional_bool(&args, "all", true);
        let repo = optional_str(&args, "repo", "");
        let mut filters = HashMap::new();
        if !repo.is_empty() {
            filters.insert("reference".to_string(), vec![repo.to_string()]);
        }
        let filter_arg = if filters.is_empty() { None } else { Some(filters) };

        let result = images::list_images(all, filter_arg).await.map(|imgs| {
            let rows: Vec<Value> = imgs
                .into_iter()
                .map(|i| {
                    json!({
                        "id": i.id,
                        "repo_tags": i.repo_tags,
                        "size": i.size,
                    })
                })
                .collect();
            json!(rows)
        });
        Ok(envelope(result))
    })
}

fn start_container(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let name = require_str(&args, "name")?.to_string();
        let result = lifecycle::start_container(&name)
            .await
            .map(|_| json!(format!("container '{}' started", name)));
        Ok(envelope(result))
    })
}

fn stop_container(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let name = require_str(&args, "name")?.to_string();
        let result = lifecycle::stop_container(&name, None)
            .await
            .map(|_| json!(format!("container '{}' stopped", name)));
        Ok(envelope(result))
    })
}

fn create_container(args: Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>> {
    Box::pin(async move {
        let image = require_str(&args, "image")?.to_string();
        let name = args.get("name").and_then(Value::as_str).map(String::from);
        let mounts: Vec<MountSpec> = Vec::new();

        let result = operations::create_container(&image, name.as_deref(), &mounts, &HashMap::new(), None, None)
            .await
            .map(|response| json!(response.id));
        Ok(envelope(result))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_ok() {
        let v = envelope(Ok(json!("done")));
        assert_eq!(v["success"], json!(true));
        assert_eq!(v["output"], json!("done"));
    }

    #[test]
    fn test_envelope_err() {
        let v = envelope(Err(anyhow::anyhow!("boom")));
        assert_eq!(v["success"], json!(false));
        assert!(v["error"].as_str().unwrap().contains("boom"));
    }
}
