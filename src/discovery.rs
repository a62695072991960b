// src/discovery.rs
//! Discovery of project record files under the build output directory.
//!
//! The external build step drops one `project-info.json` per compiled
//! project. Records are collected in sorted path order so repeated runs
//! over the same tree produce identical properties files.

use crate::error::{GenError, Result};
use crate::project::ProjectRecord;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Well-known name of a per-project record file.
pub const PROJECT_INFO_FILE_NAME: &str = "project-info.json";

/// Walks `dir` and deserializes every record file found.
///
/// # Errors
/// Returns an error if the walk fails or any record file is unreadable or
/// malformed. A missing record file is not possible here; an empty result
/// simply means no projects were built.
pub fn collect_records(dir: &Path) -> Result<Vec<ProjectRecord>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == PROJECT_INFO_FILE_NAME {
            paths.push(entry.path().to_path_buf());
        }
    }
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        records.push(read_record(&path)?);
    }
    Ok(records)
}

fn read_record(path: &Path) -> Result<ProjectRecord> {
    let contents = fs::read_to_string(path).map_err(|e| GenError::io(e, path))?;
    serde_json::from_str(&contents).map_err(|e| GenError::MalformedRecord {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
