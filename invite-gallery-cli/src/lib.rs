//! invite-gallery CLI library

#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use invite_gallery::config::GalleryConfig;
use std::path::Path;

/// Load configuration from `path`, or from the standard locations
///
/// # Errors
///
/// Returns an error if any present configuration source is invalid.
pub fn load_config(path: Option<&Path>) -> Result<GalleryConfig> {
    match path {
        Some(path) => GalleryConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => GalleryConfig::load().context("Failed to load configuration"),
    }
}
