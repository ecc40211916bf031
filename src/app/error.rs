use std::path::PathBuf;
use thiserror::Error;

/// A root folder that cannot be traversed.
#[derive(Debug, Error)]
pub enum RootError {
    #[error("{path} does not exist: {source}")]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no valid root folders ({} rejected)", .rejected.len())]
    NoValidRoots { rejected: Vec<RootError> },

    #[error("failed to read presets file {path}: {source}")]
    PresetRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse presets file {path}: {source}")]
    PresetParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// One file that was selected but could not be read. Never aborts a run.
#[derive(Debug, Error)]
#[error("failed to read {label}: {source}")]
pub struct FileReadError {
    pub label: String,
    pub path: PathBuf,
    pub source: std::io::Error,
}

#[derive(Debug, Error)]
#[error("failed to write output file {path}: {source}")]
pub struct OutputWriteError {
    pub path: PathBuf,
    pub source: std::io::Error,
}
