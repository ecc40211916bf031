use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use crate::app::error::FileReadError;

/// Name of the single output artifact, written to the working directory.
pub const OUTPUT_FILE_NAME: &str = "collected_code.txt";

/// Directory names pruned from every traversal.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".idea", ".venv", "venv", "__pycache__", ".env"];

/// Extensions (no dot, lowercase) collected when `--all-files` is not given.
pub const DEFAULT_LANGUAGES: &[&str] = &["py", "java", "c", "h", "cpp", "cc", "cxx", "hpp"];

/// Represents the configuration after merging presets and CLI args, before
/// the root folders have been checked.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub roots: Vec<PathBuf>,
    pub exclude_dirs: Vec<String>,
    pub exclude_langs: Vec<String>,
    pub all_files: bool,
    /// Name of the preset that was merged in, if any.
    pub preset: Option<String>,
}

/// Validated traversal settings. Every root exists and is a directory.
#[derive(Debug, Clone)]
pub struct TraversalConfig {
    pub roots: Vec<PathBuf>,
    /// Defaults merged with user names; matched against the exact directory name.
    pub exclude_dirs: BTreeSet<String>,
    pub collect_all: bool,
    /// Normalized: no leading dot, lowercase. Applies even when `collect_all` is set.
    pub exclude_extensions: BTreeSet<String>,
    pub languages: LanguageFilter,
}

/// Extension allow-list consulted only when `collect_all` is false.
#[derive(Debug, Clone)]
pub struct LanguageFilter {
    extensions: HashSet<String>,
}

impl LanguageFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn admits(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }
}

impl Default for LanguageFilter {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGES)
    }
}

/// Represents a single file selected during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Root-qualified relative path with `/` separators, e.g. `project/src/main.py`.
    pub label: String,
}

/// Summary of one run.
#[derive(Debug)]
pub struct CollectionResult {
    pub written: usize,
    pub failures: Vec<FileReadError>,
    pub output_path: PathBuf,
}
