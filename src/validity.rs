// src/validity.rs
//! Classification of project records into validity statuses.
//!
//! Each record is evaluated once through a fixed predicate chain; the
//! resulting status is immutable and consumed by both the properties
//! generator (only `Valid` records contribute) and the summary report
//! (all records, for diagnostics).

use crate::logger::Logger;
use crate::project::{AnalysisResultKind, ProjectData, ProjectRecord};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidityStatus {
    Valid,
    /// The record's exclude flag was set.
    ExcludeFlagSet,
    /// The identifier is not a well-formed, non-nil UUID.
    InvalidGuid,
    /// The same identifier appears on more than one record.
    DuplicateGuid,
    /// No files-to-analyze result, or the list resolved to zero files.
    NoFilesToAnalyze,
    /// The files-to-analyze list could not be read, or the project base
    /// directory could not be computed.
    InvalidFileList,
}

impl ValidityStatus {
    /// Human-readable label used by the summary report.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ValidityStatus::Valid => "valid",
            ValidityStatus::ExcludeFlagSet => "excluded",
            ValidityStatus::InvalidGuid => "invalid GUID",
            ValidityStatus::DuplicateGuid => "duplicate GUID",
            ValidityStatus::NoFilesToAnalyze => "no files to analyze",
            ValidityStatus::InvalidFileList => "unreadable file list",
        }
    }
}

/// Classifies every record, preserving input order.
///
/// Per-record evaluation runs first; afterwards any identifier held by more
/// than one record has all of its records overwritten to `DuplicateGuid`,
/// even ones that were independently valid.
pub fn classify(records: Vec<ProjectRecord>, logger: &mut dyn Logger) -> Vec<ProjectData> {
    let mut projects: Vec<ProjectData> = records.into_iter().map(|r| evaluate(r, logger)).collect();

    let mut by_guid: HashMap<Uuid, usize> = HashMap::new();
    for project in &projects {
        if let Some(guid) = project.record.parsed_guid() {
            *by_guid.entry(guid).or_insert(0) += 1;
        }
    }

    for project in &mut projects {
        let Some(guid) = project.record.parsed_guid() else {
            continue;
        };
        if by_guid.get(&guid).copied().unwrap_or(0) > 1 {
            logger.warn(&format!(
                "Duplicate project GUID {} found in {}; the project will not be analyzed",
                project.guid_key(),
                project.record.full_path.display()
            ));
            project.status = ValidityStatus::DuplicateGuid;
        }
    }

    projects
}

fn evaluate(record: ProjectRecord, logger: &mut dyn Logger) -> ProjectData {
    if record.exclude {
        logger.debug(&format!(
            "Skipping excluded project {}",
            record.full_path.display()
        ));
        return ProjectData::new(record, ValidityStatus::ExcludeFlagSet);
    }

    if record.parsed_guid().is_none() {
        logger.warn(&format!(
            "Project {} has an invalid GUID \"{}\" and will not be analyzed",
            record.full_path.display(),
            record.project_guid
        ));
        return ProjectData::new(record, ValidityStatus::InvalidGuid);
    }

    if record.base_dir().is_none() {
        logger.warn(&format!(
            "Could not compute a base directory for project {}",
            record.full_path.display()
        ));
        return ProjectData::new(record, ValidityStatus::InvalidFileList);
    }

    let Some(list) = record.find_result(AnalysisResultKind::FilesToAnalyze) else {
        return ProjectData::new(record, ValidityStatus::NoFilesToAnalyze);
    };

    let files = match read_file_list(&list.location) {
        Ok(files) => files,
        Err(message) => {
            logger.warn(&message);
            return ProjectData::new(record, ValidityStatus::InvalidFileList);
        }
    };

    if files.is_empty() {
        return ProjectData::new(record, ValidityStatus::NoFilesToAnalyze);
    }

    let mut project = ProjectData::new(record, ValidityStatus::Valid);
    project.module_files = files;
    project
}

/// Reads a files-to-analyze list: one path per line, blank lines skipped.
fn read_file_list(path: &std::path::Path) -> Result<Vec<PathBuf>, String> {
    let contents = fs::read_to_string(path).map_err(|e| {
        format!(
            "Could not read the file list {}: {e}; the project will not be analyzed",
            path.display()
        )
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
