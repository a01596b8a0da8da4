//! Configuration file support for supply-trace.
//!
//! Provides YAML-based configuration through `supply-trace.config.yml` files,
//! including data structures, file loading, and validation. Command-line
//! flags always take precedence over values from the file.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::application::dto::OutputFormat;
use crate::shared::security::{read_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use crate::traceability::domain::TraversalDirection;
use crate::traceability::services::BackEdgePolicy;

pub const CONFIG_FILENAME: &str = "supply-trace.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub direction: Option<String>,
    pub organization_id: Option<String>,
    pub api_url: Option<String>,
    pub max_nodes: Option<usize>,
    pub back_edges: Option<String>,
    pub viewport: Option<ViewportConfig>,
    pub format: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Canvas size used for the layout hint.
#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct ViewportConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ConfigFile {
    pub fn direction(&self) -> Result<Option<TraversalDirection>> {
        parse_field("direction", self.direction.as_deref())
    }

    pub fn back_edges(&self) -> Result<Option<BackEdgePolicy>> {
        parse_field("back_edges", self.back_edges.as_deref())
    }

    pub fn format(&self) -> Result<Option<OutputFormat>> {
        parse_field("format", self.format.as_deref())
    }

    pub fn viewport_width(&self) -> Option<f64> {
        self.viewport.and_then(|v| v.width)
    }

    pub fn viewport_height(&self) -> Option<f64> {
        self.viewport.and_then(|v| v.height)
    }
}

fn parse_field<T: FromStr<Err = String>>(name: &str, value: Option<&str>) -> Result<Option<T>> {
    value
        .map(|raw| {
            T::from_str(raw).map_err(|e| {
                anyhow::anyhow!(
                    "Invalid config: {}: {}\n\n💡 Hint: Fix or remove the '{}' entry in {}.",
                    name,
                    e,
                    name,
                    CONFIG_FILENAME
                )
            })
        })
        .transpose()
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file", MAX_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    config.direction()?;
    config.back_edges()?;
    config.format()?;

    if config.max_nodes == Some(0) {
        bail!(
            "Invalid config: max_nodes must be at least 1.\n\n\
             💡 Hint: Remove max_nodes to use the default cap."
        );
    }

    if matches!(config.organization_id.as_deref(), Some(id) if id.trim().is_empty()) {
        bail!(
            "Invalid config: organization_id must not be empty.\n\n\
             💡 Hint: Remove organization_id if you do not want foreign products flagged."
        );
    }

    for (name, value) in [
        ("viewport.width", config.viewport_width()),
        ("viewport.height", config.viewport_height()),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                bail!(
                    "Invalid config: {} must be a non-negative number, got {}.\n\n\
                     💡 Hint: Use the canvas size in pixels (e.g. 1200).",
                    name,
                    v
                );
            }
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
