//! On-disk public directory fixture
//!
//! Lays out `data.json`, three template documents and one file outside the
//! public root, then builds [`AppState`] pointing at it.

use crate::catalog::{FileTemplateSource, Template, TemplateData};
use crate::config::{Environment, GalleryConfig};
use crate::state::AppState;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Contents written outside the public root
pub const SECRET: &str = "top secret";

/// A temporary public directory with a catalog and template documents
pub struct GalleryFixture {
    temp: TempDir,
}

impl GalleryFixture {
    /// Three templates, `T01` through `T03`
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be written
    #[must_use]
    pub fn new() -> Self {
        let fixture = Self::empty();
        fixture.write_catalog(&Self::templates());
        for template in Self::templates() {
            fixture.write_document(&template.url, &format!("<h1>{}</h1>", template.title));
        }
        fixture
    }

    /// Public directory with no catalog or documents
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be written
    #[must_use]
    pub fn empty() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp.path().join("public")).expect("Failed to create public dir");
        fs::write(temp.path().join("secret.html"), SECRET).expect("Failed to write secret");
        Self { temp }
    }

    /// Records written by [`GalleryFixture::new`]
    #[must_use]
    pub fn templates() -> Vec<Template> {
        (1..=3)
            .map(|id| {
                Template::new(
                    id,
                    format!("T{id:02}"),
                    format!("/templates/T{id:02}/index.html"),
                    format!("/images/T{id:02}.png"),
                )
            })
            .collect()
    }

    /// Root of the static tree
    #[must_use]
    pub fn public_dir(&self) -> PathBuf {
        self.temp.path().join("public")
    }

    /// Path of the catalog document
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.public_dir().join("data.json")
    }

    /// Replace the catalog document
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written
    pub fn write_catalog(&self, templates: &[Template]) {
        let data = TemplateData {
            templates: templates.to_vec(),
        };
        let json = serde_json::to_string(&data).expect("Failed to serialize catalog");
        fs::write(self.data_path(), json).expect("Failed to write catalog");
    }

    /// Write `contents` at the root-relative `url`
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written
    pub fn write_document(&self, url: &str, contents: &str) {
        let path = self.public_dir().join(url.trim_start_matches('/'));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create template dir");
        }
        fs::write(path, contents).expect("Failed to write template");
    }

    /// Configuration rooted at this fixture
    #[must_use]
    pub fn config(&self, environment: Environment) -> GalleryConfig {
        let mut config = GalleryConfig::default();
        config.server.environment = environment;
        config.catalog.data_path = self.data_path();
        config.catalog.preload = false;
        config.templates.public_dir = self.public_dir();
        config
    }

    /// Application state reading this fixture's catalog
    #[must_use]
    pub fn state(&self, environment: Environment) -> AppState {
        AppState::with_source(
            self.config(environment),
            Arc::new(FileTemplateSource::new(self.data_path())),
        )
    }
}

impl Default for GalleryFixture {
    fn default() -> Self {
        Self::new()
    }
}
