// src/report.rs
//! Human-readable classification summary.
//!
//! One line per project, grouped by validity status and project kind, so an
//! operator can see at a glance which projects were excluded, invalid, or
//! contributed to the analysis. Pure formatting; no decision logic.

use crate::config::AnalysisConfig;
use crate::error::{GenError, Result};
use crate::project::{ProjectData, ProjectKind};
use crate::validity::ValidityStatus;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// Fixed name of the summary report inside the output directory.
pub const REPORT_FILE_NAME: &str = "ProjectInfo.log";

/// Statuses in report order.
const STATUS_ORDER: [ValidityStatus; 6] = [
    ValidityStatus::ExcludeFlagSet,
    ValidityStatus::InvalidGuid,
    ValidityStatus::DuplicateGuid,
    ValidityStatus::InvalidFileList,
    ValidityStatus::NoFilesToAnalyze,
    ValidityStatus::Valid,
];

/// Builds the report text: one labeled section per (status, kind) group
/// with a count, and one line per project inside it.
#[must_use]
pub fn build_report(projects: &[ProjectData]) -> String {
    let mut out = String::new();
    for status in STATUS_ORDER {
        for kind in [ProjectKind::Product, ProjectKind::Test] {
            let members: Vec<&ProjectData> = projects
                .iter()
                .filter(|p| p.status == status && p.record.kind == kind)
                .collect();
            let _ = writeln!(
                out,
                "{} {} projects: {}",
                kind_label(kind),
                status.label(),
                members.len()
            );
            for project in members {
                let _ = writeln!(out, "    {}", project.record.full_path.display());
            }
            let _ = writeln!(out);
        }
    }
    out
}

/// Writes the report to its well-known name inside the output directory
/// and returns the path written.
///
/// # Errors
/// Returns an I/O error if the file cannot be written.
pub fn write_summary_report(
    config: &AnalysisConfig,
    projects: &[ProjectData],
) -> Result<PathBuf> {
    let path = config.sonar_output_dir.join(REPORT_FILE_NAME);
    fs::write(&path, build_report(projects)).map_err(|e| GenError::io(e, &path))?;
    Ok(path)
}

fn kind_label(kind: ProjectKind) -> &'static str {
    match kind {
        ProjectKind::Product => "Product",
        ProjectKind::Test => "Test",
    }
}
