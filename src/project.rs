// src/project.rs
//! Data model for per-project analysis records.
//!
//! One `ProjectRecord` is produced by the external build/discovery step for
//! every compiled project unit. The generation pipeline wraps each record in
//! a `ProjectData` carrying its computed validity and resolved file sets.

use crate::validity::ValidityStatus;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Fallback source encoding when a record does not carry one.
pub const DEFAULT_SOURCE_ENCODING: &str = "utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    Product,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisResultKind {
    /// Path to a text file listing the files to analyze, one per line.
    FilesToAnalyze,
    /// Path to a code coverage report produced during the build.
    CoverageReport,
}

/// One (result-kind, location) pair attached to a project record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub kind: AnalysisResultKind,
    pub location: PathBuf,
}

/// A key/value setting passed through verbatim to the properties file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub value: String,
}

/// Metadata describing one compiled project unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub project_guid: String,
    pub project_name: String,
    pub kind: ProjectKind,
    /// Absolute path to the project definition file. Its parent directory
    /// is the project's base directory.
    pub full_path: PathBuf,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub analysis_results: Vec<AnalysisResult>,
    #[serde(default)]
    pub analysis_settings: Vec<Property>,
    /// Analyzer output directories reported by the build, if any.
    #[serde(default)]
    pub analyzer_out_paths: Vec<PathBuf>,
    #[serde(default)]
    pub exclude: bool,
}

impl ProjectRecord {
    /// Parses the record's identifier as a well-formed, non-nil UUID.
    #[must_use]
    pub fn parsed_guid(&self) -> Option<Uuid> {
        Uuid::parse_str(self.project_guid.trim())
            .ok()
            .filter(|u| !u.is_nil())
    }

    /// The project's base directory (parent of the definition file).
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.full_path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// First analysis result of the given kind, in record order.
    #[must_use]
    pub fn find_result(&self, kind: AnalysisResultKind) -> Option<&AnalysisResult> {
        self.analysis_results.iter().find(|r| r.kind == kind)
    }

    /// Source encoding for output: lowercased, defaulting to utf-8.
    #[must_use]
    pub fn source_encoding(&self) -> String {
        self.encoding
            .as_deref()
            .map_or_else(|| DEFAULT_SOURCE_ENCODING.to_string(), str::to_lowercase)
    }
}

/// A record plus everything the pipeline computed about it. Owned by one
/// generation run and discarded after flush.
#[derive(Debug, Clone)]
pub struct ProjectData {
    pub record: ProjectRecord,
    pub status: ValidityStatus,
    /// Files resolved from the record's files-to-analyze list.
    pub module_files: Vec<PathBuf>,
    /// Roslyn-style analyzer output directories reported by the build.
    pub analyzer_out_paths: Vec<PathBuf>,
}

impl ProjectData {
    #[must_use]
    pub fn new(record: ProjectRecord, status: ValidityStatus) -> Self {
        let analyzer_out_paths = record.analyzer_out_paths.clone();
        Self {
            record,
            status,
            module_files: Vec::new(),
            analyzer_out_paths,
        }
    }

    /// The module key prefix: the identifier in uppercase hyphenated form.
    ///
    /// Only meaningful for records whose identifier parsed; invalid records
    /// never reach the writer.
    #[must_use]
    pub fn guid_key(&self) -> String {
        self.record
            .parsed_guid()
            .map_or_else(|| self.record.project_guid.clone(), |u| {
                u.to_string().to_uppercase()
            })
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status == ValidityStatus::Valid
    }
}
