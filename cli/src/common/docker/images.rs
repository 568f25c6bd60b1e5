//! # Docker Image Operations
//!
//! File: cli/src/common/docker/images.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/devrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module provides functions for interacting with Docker images stored
//! locally on the Docker host, via the `bollard` crate.
//!
//! ## Architecture
//!
//! - **`list_images`**: Fetches a list of local images, optionally including
//!   intermediate layers or applying filters.
//!
//! All functions handle communication with the Docker daemon via the
//! `connect_docker` helper and map potential Docker API errors to
//! `ShellmuxError` variants for consistent error handling across the
//! application.
use crate::core::error::{ShellmuxError, Result}; // Use standard Result and custom Error
use anyhow::anyhow; // For error context wrapping
use bollard::{
    image::ListImagesOptions, // Options struct for list_images
    models::ImageSummary,     // Response struct element for list_images
};
use std::collections::HashMap; // For list_images filters
use tracing::{info, instrument}; // Logging utilities

// Use the shared connection helper from the sibling module.
use super::connect::connect_docker;

/// Lists Docker images available locally on the Docker host.
///
/// Allows filtering based on various criteria supported by the Docker API
/// (e.g., `dangling=true`, `label=key=value`). Also supports listing
/// intermediate image layers if `all` is set to true.
///
/// # Arguments
///
/// * `all` - If `true`, includes intermediate image layers in the results. If `false`, only shows top-level images.
/// * `filters` - An optional `HashMap` specifying Docker API filters. Keys are filter names (e.g., "dangling", "label", "reference"),
///   and values are vectors of strings representing the filter values.
///
/// # Returns
///
/// * `Result<Vec<ImageSummary>>` - A vector containing summary information for each image matching the criteria.
///
/// # Errors
///
/// * `ShellmuxError::DockerApi` - For errors during communication with the Docker daemon.
#[instrument(skip(all, filters))] // Tracing span, skipping potentially large filters map
pub async fn list_images(
    all: bool,
    filters: Option<HashMap<String, Vec<String>>>,
) -> Result<Vec<ImageSummary>> {
    // Establish connection to Docker daemon.
    let docker = connect_docker().await?;
    // Prepare options for the list_images API call.
    let options = Some(ListImagesOptions {
        all,                                  // Include intermediate layers?
        filters: filters.unwrap_or_default(), // Use provided filters or an empty map.
        ..Default::default()                  // Use defaults for other options (e.g., digests).
    });

    // Log the action being taken.
    info!(
        "Listing images (All: {}, Filters: {:?})...",
        all,
        options.as_ref().map(|o| &o.filters) // Log filters for debugging if present.
    );

    // Call the bollard list_images function and map potential errors.
    docker
        .list_images(options)
        .await
        .map_err(|e| anyhow!(ShellmuxError::DockerApi { source: e }).context("Failed to list images"))
}
