// src/conflict.rs
//! Detection of pre-existing `sonar-project.properties` files.
//!
//! A manually maintained properties file sitting next to the generated one
//! would silently override settings at analysis time, so generation refuses
//! to proceed and reports every offending directory at once.

use crate::error::{GenError, Result};
use crate::project::ProjectData;
use std::path::{Path, PathBuf};

/// Well-known name of the conflict sentinel file.
pub const SONAR_PROPERTIES_FILE_NAME: &str = "sonar-project.properties";

/// Checks every valid project's base directory, plus the invocation
/// directory, for a pre-existing properties file.
///
/// # Errors
/// Returns `GenError::PropertiesFileConflict` listing every directory that
/// contains one.
pub fn validate(invocation_dir: &Path, projects: &[ProjectData]) -> Result<()> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    for project in projects.iter().filter(|p| p.is_valid()) {
        if let Some(dir) = project.record.base_dir() {
            if !candidates.iter().any(|c| c.as_path() == dir) {
                candidates.push(dir.to_path_buf());
            }
        }
    }
    if !candidates.iter().any(|c| c.as_path() == invocation_dir) {
        candidates.push(invocation_dir.to_path_buf());
    }

    let offending: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|dir| dir.join(SONAR_PROPERTIES_FILE_NAME).is_file())
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(GenError::PropertiesFileConflict(offending))
    }
}
