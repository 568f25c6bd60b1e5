//! # Core Docker Operations
//!
//! File: cli/src/common/docker/operations.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module implements the Docker Facade's container/image lifecycle
//! primitives used by the task runner and `commands::docker`: pulling images,
//! creating a container without starting it, and creating-and-starting a
//! container in one call.
//!
//! ## Architecture
//!
//! Key functions provided:
//! - **`pull_image`**: Streams a `docker pull`-equivalent via `bollard::Docker::create_image`,
//!   logging progress and surfacing the final error (if any) reported by the registry.
//! - **`create_container`**: Creates a container without starting it, for callers
//!   (e.g. the task runner's SDK transport) that need an id before the first exec.
//! - **`run_container`**: Creates and starts a container in one call, for `commands::docker run`.
//!
//! All three utilize the shared `connect::connect_docker` helper and map `bollard`
//! errors onto `ShellmuxError`.
use crate::core::error::{Result, ShellmuxError};
use anyhow::{anyhow, Context};
use bollard::{
    container::{Config as ContainerConfig, CreateContainerOptions, StartContainerOptions},
    image::CreateImageOptions,
    models::{ContainerCreateResponse, HostConfig, Mount, MountTypeEnum, PortBinding},
};
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use std::default::Default;
use tracing::{debug, error, info, warn};

use super::connect::connect_docker;
use super::state::container_exists;

/// A host-to-container bind mount.
#[derive(Debug, Clone)]
pub struct MountSpec {
    pub host: String,
    pub container: String,
    pub readonly: bool,
}

/// Pulls an image from its configured registry, streaming progress to the logs.
///
/// # Arguments
///
/// * `image` - Image reference including tag (e.g. `"python:3.12-slim"`).
///
/// # Errors
///
/// Returns `ShellmuxError::DockerOperationFailed` if the registry reports a
/// pull error, or `ShellmuxError::DockerApi` for transport-level failures.
pub async fn pull_image(image: &str) -> Result<()> {
    let docker = connect_docker().await?;
    info!("Pulling image '{}'...", image);

    let options = Some(CreateImageOptions {
        from_image: image.to_string(),
        ..Default::default()
    });

    let mut stream = docker.create_image(options, None, None);
    while let Some(result) = stream.next().await {
        match result {
            Ok(info) => {
                if let Some(err) = info.error {
                    error!("Pull error for '{}': {}", image, err);
                    return Err(anyhow!(ShellmuxError::DockerOperationFailed(format!(
                        "pulling image '{}' failed: {}",
                        image, err
                    ))));
                }
                if let Some(status) = info.status {
                    debug!("Pull status for '{}': {}", image, status);
                }
            }
            Err(e) => {
                return Err(anyhow!(ShellmuxError::DockerApi { source: e }))
                    .context(format!("failed to pull image '{}'", image));
            }
        }
    }

    info!("Image '{}' pulled successfully.", image);
    Ok(())
}

/// Creates (but does not start) a container, returning the id bollard assigned.
///
/// Used by the task runner's SDK transport, which creates one container per
/// task invocation and execs into it once it is running.
#[allow(clippy::too_many_arguments)]
pub async fn create_container(
    image: &str,
    name: Option<&str>,
    mounts: &[MountSpec],
    env_vars: &HashMap<String, String>,
    workdir: Option<&str>,
    command: Option<Vec<String>>,
) -> Result<ContainerCreateResponse> {
    let docker = connect_docker().await?;

    let bollard_mounts = convert_mounts_to_bollard(mounts)?;
    let host_config = HostConfig {
        mounts: if bollard_mounts.is_empty() {
            None
        } else {
            Some(bollard_mounts)
        },
        ..Default::default()
    };

    let env_list: Vec<String> = env_vars.iter().map(|(k, v)| format!("{}={}", k, v)).collect();

    let config = ContainerConfig {
        image: Some(image.to_string()),
        env: if env_list.is_empty() { None } else { Some(env_list) },
        cmd: command,
        working_dir: workdir.map(String::from),
        host_config: Some(host_config),
        tty: Some(true),
        open_stdin: Some(true),
        ..Default::default()
    };

    let create_options = name.map(|n| CreateContainerOptions {
        name: n.to_string(),
        platform: None,
    });

    docker
        .create_container(create_options, config)
        .await
        .map_err(|e| anyhow!(ShellmuxError::DockerApi { source: e }))
        .context("failed to create container")
}

/// Creates and starts a new Docker container in one call.
///
/// Used by `commands::docker run`. Refuses to overwrite an existing container
/// with the same name, returning `ShellmuxError::DockerOperationFailed`.
#[allow(clippy::too_many_arguments)]
pub async fn run_container(
    image: &str,
    name: &str,
    ports: &[String],
    mounts: &[MountSpec],
    env_vars: &HashMap<String, String>,
    workdir: Option<&str>,
    detach: bool,
    auto_remove: bool,
    command: Option<Vec<String>>,
) -> Result<()> {
    let docker = connect_docker().await?;

    let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
    let mut exposed_ports: HashMap<String, HashMap<(), ()>> = HashMap::new();

    for mapping in ports {
        if let Some((host_part, container_part)) = mapping.split_once(':') {
            let (container_port, proto) = if let Some((port, protocol)) = container_part.split_once('/') {
                (port, format!("/{}", protocol.to_lowercase()))
            } else {
                (container_part, "/tcp".to_string())
            };
            let container_port_proto = format!("{}{}", container_port, proto);

            exposed_ports.insert(container_port_proto.clone(), HashMap::new());

            let binding = PortBinding {
                host_ip: None,
                host_port: Some(host_part.to_string()),
            };
            port_bindings
                .entry(container_port_proto)
                .or_default()
                .get_or_insert_with(Vec::new)
                .push(binding);
        } else {
            warn!("Ignoring invalid port mapping format: {}", mapping);
        }
    }

    let bollard_mounts = convert_mounts_to_bollard(mounts).context("failed to prepare container mounts")?;

    let host_config = HostConfig {
        port_bindings: if port_bindings.is_empty() { None } else { Some(port_bindings) },
        auto_remove: Some(auto_remove),
        mounts: if bollard_mounts.is_empty() { None } else { Some(bollard_mounts) },
        ..Default::default()
    };

    let env_list: Vec<String> = env_vars.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    let attach_streams = !detach;

    let config = ContainerConfig {
        image: Some(image.to_string()),
        env: if env_list.is_empty() { None } else { Some(env_list) },
        cmd: command,
        working_dir: workdir.map(String::from),
        exposed_ports: if exposed_ports.is_empty() { None } else { Some(exposed_ports) },
        host_config: Some(host_config),
        attach_stdout: Some(attach_streams),
        attach_stderr: Some(attach_streams),
        attach_stdin: Some(attach_streams),
        open_stdin: Some(attach_streams),
        tty: Some(attach_streams),
        ..Default::default()
    };

    if container_exists(name).await? {
        error!("Container named '{}' already exists.", name);
        return Err(anyhow!(ShellmuxError::DockerOperationFailed(format!(
            "container named '{}' already exists",
            name
        ))));
    }

    info!("Creating container '{}' from image '{}'", name, image);
    let create_options = Some(CreateContainerOptions {
        name: name.to_string(),
        platform: None,
    });
    let container_info = docker
        .create_container(create_options, config)
        .await
        .map_err(|e| anyhow!(ShellmuxError::DockerApi { source: e }))
        .with_context(|| format!("failed to create container '{}'", name))?;

    info!("Starting container '{}' (ID: {})", name, container_info.id);
    docker
        .start_container(name, None::<StartContainerOptions<String>>)
        .await
        .map_err(|e| anyhow!(ShellmuxError::DockerApi { source: e }))
        .with_context(|| format!("failed to start container '{}'", name))?;

    info!("Container '{}' started successfully.", name);
    Ok(())
}

/// Converts `MountSpec` entries into `bollard::models::Mount` entries.
///
/// Validates that host paths are absolute and container paths are absolute
/// and non-empty.
fn convert_mounts_to_bollard(mounts: &[MountSpec]) -> Result<Vec<Mount>> {
    let mut bollard_mounts = Vec::new();
    for mc in mounts {
        let host_path = std::path::Path::new(&mc.host);
        if !host_path.is_absolute() {
            return Err(anyhow!(ShellmuxError::Config(format!(
                "host path '{}' for mount must be absolute",
                mc.host
            ))));
        }
        if mc.container.is_empty() || !mc.container.starts_with('/') {
            return Err(anyhow!(ShellmuxError::Config(format!(
                "container path '{}' for mount must be absolute and non-empty",
                mc.container
            ))));
        }

        bollard_mounts.push(Mount {
            target: Some(mc.container.clone()),
            source: Some(mc.host.clone()),
            typ: Some(MountTypeEnum::BIND),
            read_only: Some(mc.readonly),
            consistency: None,
            bind_options: None,
            volume_options: None,
            tmpfs_options: None,
        });
    }
    Ok(bollard_mounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_mounts_to_bollard_valid() {
        let mounts = vec![
            MountSpec {
                host: "/home/user/code".into(),
                container: "/code".into(),
                readonly: false,
            },
            MountSpec {
                host: "/etc/config.toml".into(),
                container: "/app/config.toml".into(),
                readonly: true,
            },
        ];
        let result = convert_mounts_to_bollard(&mounts);
        assert!(result.is_ok());
        let bollard_mounts = result.unwrap();
        assert_eq!(bollard_mounts.len(), 2);
        assert_eq!(bollard_mounts[0].source.as_deref(), Some("/home/user/code"));
        assert_eq!(bollard_mounts[0].target.as_deref(), Some("/code"));
        assert_eq!(bollard_mounts[0].read_only, Some(false));
        assert_eq!(bollard_mounts[1].read_only, Some(true));
    }

    #[test]
    fn test_convert_mounts_to_bollard_non_absolute_host() {
        let mounts = vec![MountSpec {
            host: "relative/path".into(),
            container: "/code".into(),
            readonly: false,
        }];
        let result = convert_mounts_to_bollard(&mounts);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must be absolute"));
    }

    #[test]
    fn test_convert_mounts_to_bollard_invalid_container_path() {
        let mounts = vec![MountSpec {
            host: "/absolute/host".into(),
            container: "relative".into(),
            readonly: false,
        }];
        let result = convert_mounts_to_bollard(&mounts);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must be absolute and non-empty"));
    }
}
