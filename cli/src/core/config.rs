//! # Runtime Configuration
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!
//! ## Overview
//!
//! The shell/task runtime is tuned by a handful of operational knobs rather
//! than a layered project configuration file: prompt-detection timeout, the
//! reader and marker poll intervals, the default force-kill grace period, and
//! an optional Docker endpoint override. Each is read from an environment
//! variable with a builtin default, and the whole set is loaded once at
//! startup into a `RuntimeConfig`.
//!
//! ## Architecture
//!
//! `RuntimeConfig::load` never fails: a malformed environment variable is
//! logged at `warn` and the builtin default is used in its place, since a
//! bad tunable should degrade gracefully rather than block startup.
use std::env;
use std::time::Duration;
use tracing::warn;

/// Operational tunables for the shell/task runtime, sourced from the environment.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Override for the Docker Engine endpoint. `None` uses the platform default
    /// (`unix:///var/run/docker.sock` on Linux, the `docker_engine` named pipe on Windows).
    pub docker_host: Option<String>,
    /// How long to wait for the first shell prompt after spawning a pipe.
    pub prompt_timeout: Duration,
    /// Poll interval for the pipe's background reader loop.
    pub read_tick: Duration,
    /// Poll interval used by `read_until_marker` while waiting for completion.
    pub marker_tick: Duration,
    /// Default grace period between a graceful interrupt and a forceful kill.
    pub force_kill_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            docker_host: None,
            prompt_timeout: Duration::from_millis(3000),
            read_tick: Duration::from_millis(100),
            marker_tick: Duration::from_millis(50),
            force_kill_timeout: Duration::from_millis(3000),
        }
    }
}

impl RuntimeConfig {
    /// Loads tunables from the environment, falling back to defaults for any
    /// variable that is unset or fails to parse.
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            docker_host: env::var("SHELLMUX_DOCKER_HOST").ok(),
            prompt_timeout: env_duration_ms("SHELLMUX_PROMPT_TIMEOUT_MS", defaults.prompt_timeout),
            read_tick: env_duration_ms("SHELLMUX_READ_TICK_MS", defaults.read_tick),
            marker_tick: env_duration_ms("SHELLMUX_MARKER_TICK_MS", defaults.marker_tick),
            force_kill_timeout: env_duration_ms(
                "SHELLMUX_FORCE_KILL_TIMEOUT_MS",
                defaults.force_kill_timeout,
            ),
        }
    }
}

fn env_duration_ms(var: &str, default: Duration) -> Duration {
    match env::var(var) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!("{} is not a valid integer millisecond count: '{}', using default", var, raw);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.prompt_timeout, Duration::from_millis(3000));
        assert_eq!(cfg.marker_tick, Duration::from_millis(50));
        assert!(cfg.docker_host.is_none());
    }

    #[test]
    fn test_env_duration_ms_falls_back_on_garbage() {
        std::env::set_var("SHELLMUX_TEST_DURATION", "not-a-number");
        let d = env_duration_ms("SHELLMUX_TEST_DURATION", Duration::from_millis(42));
        assert_eq!(d, Duration::from_millis(42));
        std::env::remove_var("SHELLMUX_TEST_DURATION");
    }

    #[test]
    fn test_env_duration_ms_parses_valid_value() {
        std::env::set_var("SHELLMUX_TEST_DURATION_2", "250");
        let d = env_duration_ms("SHELLMUX_TEST_DURATION_2", Duration::from_millis(42));
        assert_eq!(d, Duration::from_millis(250));
        std::env::remove_var("SHELLMUX_TEST_DURATION_2");
    }
}
