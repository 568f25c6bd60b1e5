//! # Marker Protocol
//!
//! File: cli/src/shell/marker.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! Defines, per shell dialect, how to append a unique completion sentinel to
//! a command and how to recognise it in output. This module is stateless:
//! every function here is a pure transformation over a `ShellType`, a
//! command string, and a freshly generated marker.
use crate::core::error::{Result, ShellmuxError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// A shell dialect a pipe can be driving at any point in its life.
///
/// A single pipe may drift between dialects over its lifetime (e.g. a
/// PowerShell host pipe running `docker exec -i ... bash`); `run_command`
/// always carries the dialect explicitly rather than relying on the pipe to
/// infer it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellType {
    Bash,
    PowerShell,
    Postgresql,
    Mysql,
    Redis,
    Mongo,
    Python,
}

impl ShellType {
    pub const ALL: [ShellType; 7] = [
        ShellType::Bash,
        ShellType::PowerShell,
        ShellType::Postgresql,
        ShellType::Mysql,
        ShellType::Redis,
        ShellType::Mongo,
        ShellType::Python,
    ];

    /// The template used to echo the completion marker in this dialect, with
    /// `{marker}` substituted for the literal marker token.
    pub fn echo_marker(self, marker: &str) -> String {
        match self {
            ShellType::Bash => format!("echo {} ", marker),
            ShellType::PowerShell => format!("Write-Host {} ", marker),
            ShellType::Postgresql => format!("select '{}'; ", marker),
            ShellType::Mysql => format!("select '{}'; ", marker),
            ShellType::Redis => format!("ECHO \"{}\" ", marker),
            ShellType::Mongo => format!("print(\"{}\"); ", marker),
            ShellType::Python => format!("print(\"{}\"); ", marker),
        }
    }

    /// The statement terminator appended to a non-empty command before the
    /// echo-marker is appended, unless the command already ends with it.
    pub fn terminator(self) -> &'static str {
        match self {
            ShellType::Redis => " ",
            _ => ";",
        }
    }

    /// The regex matching this dialect's initial shell prompt, used by
    /// `Pipe::spawn` to detect that the child is ready for its first command.
    pub fn prompt_pattern(self) -> &'static str {
        match self {
            ShellType::PowerShell => r"> $",
            ShellType::Postgresql => r"postgres=[#>]",
            ShellType::Mysql => r"mysql>",
            ShellType::Bash | ShellType::Redis | ShellType::Mongo | ShellType::Python => {
                r"[\$#>] $"
            }
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShellType::Bash => "BASH",
            ShellType::PowerShell => "POWERSHELL",
            ShellType::Postgresql => "POSTGRESQL",
            ShellType::Mysql => "MYSQL",
            ShellType::Redis => "REDIS",
            ShellType::Mongo => "MONGO",
            ShellType::Python => "PYTHON",
        };
        f.write_str(s)
    }
}

impl FromStr for ShellType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BASH" => Ok(ShellType::Bash),
            "POWERSHELL" => Ok(ShellType::PowerShell),
            "POSTGRESQL" => Ok(ShellType::Postgresql),
            "MYSQL" => Ok(ShellType::Mysql),
            "REDIS" => Ok(ShellType::Redis),
            "MONGO" => Ok(ShellType::Mongo),
            "PYTHON" => Ok(ShellType::Python),
            other => Err(anyhow::anyhow!(ShellmuxError::UnknownShell(other.to_string()))),
        }
    }
}

/// Matches any marker this process could ever generate: the literal
/// `MARKER_` prefix followed by exactly 8 lowercase hex characters.
pub static MARKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"MARKER_[a-f0-9]{8}").expect("marker pattern is a valid regex"));

/// Generates a fresh completion marker, unique within the lifetime of the
/// process with overwhelming probability (8 hex chars drawn from a v4 UUID).
pub fn generate_marker() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("MARKER_{}", &raw[..8])
}

/// One line of text to be written to the child, in order.
pub type CommandLines = Vec<String>;

/// Composes the line(s) to send to the child for `command` in dialect
/// `shell_type`, given a freshly generated `marker`.
///
/// Redis cannot compose two statements on one line, so its echo-marker is
/// sent as a second, separate line. Every other dialect appends the
/// dialect's terminator (unless already present) and the echo-marker to the
/// same line as the command. An empty command sends only the echo-marker.
pub fn compose_command(command: &str, shell_type: ShellType, marker: &str) -> CommandLines {
    let echo = shell_type.echo_marker(marker);

    if shell_type == ShellType::Redis {
        let mut lines = Vec::new();
        if !command.is_empty() {
            lines.push(command.to_string());
        }
        lines.push(echo.trim_end().to_string());
        return lines;
    }

    if command.is_empty() {
        return vec![echo.trim_end().to_string()];
    }

    let terminator = shell_type.terminator();
    let needs_terminator = !command.trim_end().ends_with(terminator);
    let mut line = command.to_string();
    if needs_terminator {
        line.push_str(terminator);
    }
    line.push(' ');
    line.push_str(echo.trim_end());
    vec![line]
}

/// Strips every echo-marker template (for the given dialect) and every raw
/// marker token from `text`, as `read_until_marker`/`stream_output` do
/// before handing cleaned output back to a caller.
pub fn strip_markers(text: &str, shell_type: ShellType) -> String {
    let echo_template = shell_type.echo_marker("MARKER_[a-f0-9]{8}");
    let escaped_prefix = regex::escape(echo_template.split("MARKER_").next().unwrap_or(""));
    let escaped_suffix = regex::escape(echo_template.split("[a-f0-9]{8}").last().unwrap_or(""));
    let echo_re = Regex::new(&format!(
        "{}MARKER_[a-f0-9]{{8}}{}",
        escaped_prefix, escaped_suffix
    ))
    .unwrap_or_else(|_| MARKER_PATTERN.clone());

    let without_echo = echo_re.replace_all(text, "");
    MARKER_PATTERN.replace_all(&without_echo, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_marker_matches_pattern() {
        let marker = generate_marker();
        assert!(MARKER_PATTERN.is_match(&marker));
        assert_eq!(marker.len(), "MARKER_".len() + 8);
    }

    #[test]
    fn test_generate_marker_is_unique_enough() {
        let a = generate_marker();
        let b = generate_marker();
        assert_ne!(a, b);
    }

    #[test]
    fn test_compose_command_bash() {
        let lines = compose_command("echo hello", ShellType::Bash, "MARKER_deadbeef");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "echo hello; echo MARKER_deadbeef");
    }

    #[test]
    fn test_compose_command_bash_already_terminated() {
        let lines = compose_command("echo hello;", ShellType::Bash, "MARKER_deadbeef");
        assert_eq!(lines[0], "echo hello; echo MARKER_deadbeef");
    }

    #[test]
    fn test_compose_command_empty() {
        let lines = compose_command("", ShellType::Bash, "MARKER_deadbeef");
        assert_eq!(lines, vec!["echo MARKER_deadbeef".to_string()]);
    }

    #[test]
    fn test_compose_command_redis_is_two_lines() {
        let lines = compose_command("PING", ShellType::Redis, "MARKER_deadbeef");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "PING");
        assert_eq!(lines[1], "ECHO \"MARKER_deadbeef\"");
    }

    #[test]
    fn test_compose_command_powershell() {
        let lines = compose_command("Write-Host hi", ShellType::PowerShell, "MARKER_cafebabe");
        assert_eq!(lines[0], "Write-Host hi; Write-Host MARKER_cafebabe");
    }

    #[test]
    fn test_strip_markers_removes_echo_and_raw_marker() {
        let marker = "MARKER_abcdef01";
        let raw = format!("hello\necho {}\n{}\n", marker, marker);
        let cleaned = strip_markers(&raw, ShellType::Bash);
        assert!(!MARKER_PATTERN.is_match(&cleaned));
        assert!(cleaned.contains("hello"));
    }

    #[test]
    fn test_shell_type_from_str_roundtrip() {
        for st in ShellType::ALL {
            let s = st.to_string();
            let parsed: ShellType = s.parse().unwrap();
            assert_eq!(parsed, st);
        }
    }

    #[test]
    fn test_shell_type_from_str_unknown() {
        let result: Result<ShellType> = "fish".parse();
        assert!(result.is_err());
    }
}
