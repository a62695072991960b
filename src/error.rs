// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("properties writer already flushed")]
    WriterFlushed,

    #[error("a sonar-project.properties file already exists in: {}", format_dirs(.0))]
    PropertiesFileConflict(Vec<PathBuf>),

    #[error("no analysable projects were found; the properties file will not be generated")]
    NoProjectsToAnalyze,

    #[error("malformed project record {path}: {message}")]
    MalformedRecord { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file walk error: {0}")]
    Walk(String),
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for GenError {
    fn from(e: walkdir::Error) -> Self {
        GenError::Walk(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenError>;

fn format_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// Allow `?` on std::io::Error by converting to GenError::Io with unknown path.
impl From<std::io::Error> for GenError {
    fn from(source: std::io::Error) -> Self {
        GenError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl GenError {
    /// Attaches a concrete path to a bare I/O error.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        GenError::Io {
            source,
            path: path.into(),
        }
    }
}
