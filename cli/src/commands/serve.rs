//! # Serve Command
//!
//! File: cli/src/commands/serve.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Runs the tool surface as a line-delimited JSON protocol on stdio: each
//! line of stdin is a request `{"id": <any>, "tool": <name>, "args": {...}}`;
//! each line written to stdout is the matching response
//! `{"id": <same>, "result": <value>}` or `{"id": <same>, "error": <string>}`.
//! Diagnostic logging goes to stderr so stdout stays a clean protocol
//! stream, matching the reference CLI's `-v`/`RUST_LOG` logging conventions.
use crate::core::error::Result;
use crate::tools::ToolDispatcher;
use clap::Args;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, warn};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// List the available tools and exit, instead of serving requests.
    #[arg(long)]
    pub list_tools: bool,
}

#[derive(Deserialize, Debug)]
struct ToolRequest {
    id: Value,
    tool: String,
    #[serde(default)]
    args: Value,
}

pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    let dispatcher = ToolDispatcher::with_default_tools();

    if args.list_tools {
        let listing: Vec<Value> = dispatcher
            .list()
            .into_iter()
            .map(|def| json!({"name": def.name, "description": def.description, "argument_schema": def.argument_schema}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    while let Some(line) = lines.next_line().await.map_err(crate::core::error::ShellmuxError::Io)? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ToolRequest>(&line) {
            Ok(request) => {
                debug!(tool = %request.tool, "dispatching tool request");
                match dispatcher.call(&request.tool, request.args).await {
                    Ok(result) => json!({"id": request.id, "result": result}),
                    Err(e) => {
                        warn!(tool = %request.tool, error = %e, "tool call failed");
                        json!({"id": request.id, "error": format!("{:#}", e)})
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "failed to parse tool request line");
                json!({"id": Value::Null, "error": format!("invalid request: {}", e)})
            }
        };

        let mut line_out = serde_json::to_string(&response)?;
        line_out.push('\n');
        stdout
            .write_all(line_out.as_bytes())
            .await
            .map_err(crate::core::error::ShellmuxError::Io)?;
        stdout.flush().await.map_err(crate::core::error::ShellmuxError::Io)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_request_parses_without_args() {
        let request: ToolRequest = serde_json::from_str(r#"{"id": 1, "tool": "check_pipe_status"}"#).unwrap();
        assert_eq!(request.tool, "check_pipe_status");
        assert_eq!(request.args, Value::Null);
    }
}
