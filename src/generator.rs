// src/generator.rs
//! Pipeline orchestration for one generation run.
//!
//! Strictly sequential: classify every record, gate on pre-existing
//! properties files, then accumulate one module block per valid project and
//! flush to a single buffer. Persisting the buffer and the summary report
//! is left to the caller.

use crate::config::AnalysisConfig;
use crate::conflict;
use crate::error::{GenError, Result};
use crate::logger::Logger;
use crate::project::{ProjectData, ProjectRecord};
use crate::validity::classify;
use crate::writer::PropertiesWriter;
use std::path::{Path, PathBuf};

/// Result of a completed generation run.
#[derive(Debug)]
pub struct GenerationOutcome {
    /// The full properties file contents.
    pub contents: String,
    /// Every input record with its computed status, in input order.
    pub projects: Vec<ProjectData>,
}

/// Runs the full pipeline over the given records.
///
/// # Errors
/// Fails on a properties-file conflict (listing every offending directory),
/// when no valid projects remain after classification, or when the writer
/// is misused.
pub fn generate(
    config: &AnalysisConfig,
    records: Vec<ProjectRecord>,
    invocation_dir: &Path,
    logger: &mut dyn Logger,
) -> Result<GenerationOutcome> {
    let projects = classify(records, logger);

    conflict::validate(invocation_dir, &projects)?;

    let valid_count = projects.iter().filter(|p| p.is_valid()).count();
    if valid_count == 0 {
        logger.error("No analysable projects were found");
        return Err(GenError::NoProjectsToAnalyze);
    }
    logger.debug(&format!(
        "Writing {valid_count} of {} projects to the properties file",
        projects.len()
    ));

    let project_base_dir = compute_project_base_dir(&projects, invocation_dir);

    let mut writer = PropertiesWriter::new(config, logger);
    for project in projects.iter().filter(|p| p.is_valid()) {
        writer.write_settings_for_project(project)?;
        writer.write_analyzer_output_paths(project)?;
    }
    writer.write_sonar_project_info(&project_base_dir)?;
    writer.write_global_settings(&config.global_settings)?;
    let contents = writer.flush()?;

    Ok(GenerationOutcome { contents, projects })
}

/// The deepest directory containing every valid project's base directory;
/// falls back to the invocation directory when there is none.
fn compute_project_base_dir(projects: &[ProjectData], invocation_dir: &Path) -> PathBuf {
    let mut dirs = projects
        .iter()
        .filter(|p| p.is_valid())
        .filter_map(|p| p.record.base_dir());

    let Some(first) = dirs.next() else {
        return invocation_dir.to_path_buf();
    };

    let mut ancestor = first.to_path_buf();
    for dir in dirs {
        while !dir.starts_with(&ancestor) {
            if !ancestor.pop() {
                return invocation_dir.to_path_buf();
            }
        }
    }
    ancestor
}
