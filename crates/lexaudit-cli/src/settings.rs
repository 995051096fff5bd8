use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// CLI settings, merged from an optional file and `LEXAUDIT__*`
/// environment variables.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub thresholds: Option<Thresholds>,
}

/// Grade threshold overrides; mirrors `GradeThresholds` in the core.
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    pub medium: u32,
    pub high: u32,
}

pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }
    let config = builder
        .add_source(
            Environment::with_prefix("LEXAUDIT")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("failed to load settings")?;
    config
        .try_deserialize()
        .context("invalid settings structure")
}
