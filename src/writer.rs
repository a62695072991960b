// src/writer.rs
//! Write-once accumulator for the generated properties file.
//!
//! One `PropertiesWriter` owns the output buffer for one generation run.
//! It accepts writes while open; `flush` appends the trailing
//! `sonar.modules=` line, returns the buffer, and makes every further
//! operation an illegal-state error. All physical line endings are CRLF,
//! which is what the consumer's parser expects for continuations.
//!
//! The writer never touches the filesystem; persisting the buffer is the
//! caller's responsibility.

use crate::config::AnalysisConfig;
use crate::error::{GenError, Result};
use crate::escape::{encode_multi_value, escape, CRLF};
use crate::logger::Logger;
use crate::project::{ProjectData, ProjectKind, Property};
use std::path::{Path, PathBuf};

pub struct PropertiesWriter<'a> {
    config: &'a AnalysisConfig,
    logger: &'a mut dyn Logger,
    buffer: String,
    /// Module identifiers in write order; drives both the `mod{N}` working
    /// directory ordinals and the final `sonar.modules=` line.
    module_keys: Vec<String>,
    flushed: bool,
}

impl<'a> PropertiesWriter<'a> {
    #[must_use]
    pub fn new(config: &'a AnalysisConfig, logger: &'a mut dyn Logger) -> Self {
        Self {
            config,
            logger,
            buffer: String::new(),
            module_keys: Vec::new(),
            flushed: false,
        }
    }

    /// Appends one escaped `key=value` line per global setting. Callable
    /// repeatedly before flush; each call appends.
    ///
    /// # Errors
    /// Returns `GenError::WriterFlushed` after `flush`.
    pub fn write_global_settings(&mut self, settings: &[Property]) -> Result<()> {
        self.ensure_open()?;
        for setting in settings {
            self.append_line(&setting.id, &setting.value);
        }
        Ok(())
    }

    /// Appends the solution-level project identity block and the top-level
    /// working directory.
    ///
    /// # Errors
    /// Returns `GenError::WriterFlushed` after `flush`.
    pub fn write_sonar_project_info(&mut self, project_base_dir: &Path) -> Result<()> {
        self.ensure_open()?;
        let key = self.config.sonar_project_key.clone();
        let name = self.config.sonar_project_name.clone();
        let version = self.config.sonar_project_version.clone();
        let working_dir = self.config.sonar_output_dir.join(".sonar");
        self.append_line("sonar.projectKey", &key);
        self.append_line("sonar.projectName", &name);
        self.append_line("sonar.projectVersion", &version);
        self.append_line(
            "sonar.working.directory",
            &working_dir.display().to_string(),
        );
        self.append_line(
            "sonar.projectBaseDir",
            &project_base_dir.display().to_string(),
        );
        Ok(())
    }

    /// Appends one module block for a project: key, name, base directory,
    /// source encoding, source/test file lists, working directory, and any
    /// project-scoped settings.
    ///
    /// # Errors
    /// Returns `GenError::WriterFlushed` after `flush`.
    pub fn write_settings_for_project(&mut self, project: &ProjectData) -> Result<()> {
        self.ensure_open()?;

        let guid = project.guid_key();
        let record = &project.record;

        let project_key = format!("{}:{guid}", self.config.sonar_project_key);
        self.append_module_line(&guid, "sonar.projectKey", &project_key);
        self.append_module_line(&guid, "sonar.projectName", &record.project_name);

        let base_dir = record
            .base_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.append_module_line(&guid, "sonar.projectBaseDir", &base_dir);
        self.append_module_line(&guid, "sonar.sourceEncoding", &record.source_encoding());

        match record.kind {
            ProjectKind::Product => {
                self.write_file_list(&guid, "sonar.sources", &project.module_files);
            }
            ProjectKind::Test => {
                // Test modules carry no sources; the key is still emitted
                // so the consumer sees an explicit empty value.
                self.buffer.push_str(&format!("{guid}.sonar.sources={CRLF}"));
                self.write_file_list(&guid, "sonar.tests", &project.module_files);
            }
        }
        self.buffer.push_str(CRLF);

        let ordinal = self.module_keys.len();
        let working_dir = self.module_working_dir(ordinal);
        self.append_module_line(
            &guid,
            "sonar.working.directory",
            &working_dir.display().to_string(),
        );

        for setting in &record.analysis_settings {
            let key = format!("{guid}.{}", setting.id);
            self.append_line(&key, &setting.value);
        }

        self.module_keys.push(guid);
        Ok(())
    }

    /// Appends the analyzer output path property for the project's
    /// language, when the language maps to a known analyzer.
    ///
    /// # Errors
    /// Returns `GenError::WriterFlushed` after `flush`.
    pub fn write_analyzer_output_paths(&mut self, project: &ProjectData) -> Result<()> {
        self.ensure_open()?;
        if project.analyzer_out_paths.is_empty() {
            return Ok(());
        }

        let Some(analyzer) = analyzer_id(project.record.language.as_deref()) else {
            self.logger.debug(&format!(
                "No analyzer is known for language {:?}; skipping analyzer output paths for {}",
                project.record.language,
                project.record.full_path.display()
            ));
            return Ok(());
        };

        let guid = project.guid_key();
        let key = format!("sonar.{analyzer}.analyzer.projectOutPaths");
        let paths: Vec<String> = project
            .analyzer_out_paths
            .iter()
            .map(|p| escape(&p.display().to_string()))
            .collect();
        let encoded = encode_multi_value(
            &paths,
            self.config.sonar_qube_version.as_deref(),
            self.logger,
        );
        self.buffer
            .push_str(&format!("{guid}.{key}=\\{CRLF}{encoded}{CRLF}"));
        Ok(())
    }

    /// Transitions Open → Flushed and returns the accumulated buffer with
    /// the trailing `sonar.modules=` line appended.
    ///
    /// # Errors
    /// Returns `GenError::WriterFlushed` on a second call.
    pub fn flush(&mut self) -> Result<String> {
        self.ensure_open()?;
        self.flushed = true;
        self.buffer
            .push_str(&format!("sonar.modules={}{CRLF}{CRLF}", self.module_keys.join(",")));
        Ok(std::mem::take(&mut self.buffer))
    }

    /// Module identifiers written so far, in write order.
    #[must_use]
    pub fn module_keys(&self) -> &[String] {
        &self.module_keys
    }

    fn ensure_open(&self) -> Result<()> {
        if self.flushed {
            return Err(GenError::WriterFlushed);
        }
        Ok(())
    }

    fn module_working_dir(&self, ordinal: usize) -> PathBuf {
        self.config
            .sonar_output_dir
            .join(".sonar")
            .join(format!("mod{ordinal}"))
    }

    fn append_line(&mut self, key: &str, value: &str) {
        self.buffer.push_str(&format!("{key}={}{CRLF}", escape(value)));
    }

    fn append_module_line(&mut self, guid: &str, key: &str, value: &str) {
        self.buffer
            .push_str(&format!("{guid}.{key}={}{CRLF}", escape(value)));
    }

    /// Writes one file-list property. Non-empty lists open with a `\`
    /// continuation so the first path starts on its own physical line.
    fn write_file_list(&mut self, guid: &str, key: &str, files: &[PathBuf]) {
        if files.is_empty() {
            self.buffer.push_str(&format!("{guid}.{key}={CRLF}"));
            return;
        }
        let paths: Vec<String> = files
            .iter()
            .map(|p| escape(&p.display().to_string()))
            .collect();
        let encoded = encode_multi_value(
            &paths,
            self.config.sonar_qube_version.as_deref(),
            self.logger,
        );
        self.buffer
            .push_str(&format!("{guid}.{key}=\\{CRLF}{encoded}{CRLF}"));
    }
}

/// Maps a record's language to the analyzer id used in property keys.
fn analyzer_id(language: Option<&str>) -> Option<&'static str> {
    match language? {
        "C#" | "cs" | "csharp" => Some("cs"),
        "VB" | "vb" | "vbnet" => Some("vbnet"),
        _ => None,
    }
}
