// src/config.rs
//! Global configuration for one generation run.
//!
//! `AnalysisConfig` is a plain struct built by the caller (CLI flags merged
//! over an optional `sonargen.toml` overlay) and treated as immutable input
//! for the duration of the run.

use crate::error::{GenError, Result};
use crate::project::Property;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional local configuration overlay.
pub const CONFIG_FILE_NAME: &str = "sonargen.toml";

#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub sonar_project_key: String,
    pub sonar_project_name: String,
    pub sonar_project_version: String,
    pub sonar_output_dir: PathBuf,
    /// Target SonarQube version, gating the multi-value encoding strategy.
    pub sonar_qube_version: Option<String>,
    /// Solution-level settings written verbatim at the top of the file.
    pub global_settings: Vec<Property>,
}

impl AnalysisConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if the project key or the output directory is empty.
    pub fn validate(&self) -> Result<()> {
        if self.sonar_project_key.trim().is_empty() {
            return Err(GenError::Config("project key must not be empty".into()));
        }
        if self.sonar_output_dir.as_os_str().is_empty() {
            return Err(GenError::Config("output directory must not be empty".into()));
        }
        Ok(())
    }
}

/// Shape of `sonargen.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct SonargenToml {
    #[serde(default)]
    pub project: ProjectSection,
    /// Extra global properties, written in key order.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectSection {
    pub key: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Loads the overlay from `dir`, if present. A missing file is not an
/// error; a malformed one is.
pub fn load_overlay(dir: &Path) -> Result<Option<SonargenToml>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path).map_err(|e| GenError::io(e, &path))?;
    let parsed = toml::from_str(&contents)
        .map_err(|e| GenError::Config(format!("{}: {e}", path.display())))?;
    Ok(Some(parsed))
}

impl SonargenToml {
    /// Fills unset fields of `config` from the overlay; explicit values
    /// (CLI flags) always win. Overlay properties are appended after any
    /// settings already present.
    pub fn apply_to(self, config: &mut AnalysisConfig) {
        if config.sonar_project_key.is_empty() {
            if let Some(key) = self.project.key {
                config.sonar_project_key = key;
            }
        }
        if config.sonar_project_name.is_empty() {
            if let Some(name) = self.project.name {
                config.sonar_project_name = name;
            }
        }
        if config.sonar_project_version.is_empty() {
            if let Some(version) = self.project.version {
                config.sonar_project_version = version;
            }
        }
        for (id, value) in self.properties {
            config.global_settings.push(Property { id, value });
        }
    }
}
