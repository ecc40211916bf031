use crate::app::models::{FileEntry, TraversalConfig};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Selects the files to collect from every configured root folder.
pub struct Scanner {
    config: TraversalConfig,
    skip: Option<PathBuf>,
}

impl Scanner {
    pub fn new(config: TraversalConfig) -> Self {
        Self { config, skip: None }
    }

    /// Never select `path`, even if it matches every filter.
    pub fn skip_file(mut self, path: &Path) -> Self {
        let resolved = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => fs::canonicalize(parent)
                .map(|dir| dir.join(name))
                .unwrap_or_else(|_| path.to_path_buf()),
            _ => path.to_path_buf(),
        };
        self.skip = Some(resolved);
        self
    }

    /// Walks the roots in configured order, top-down, siblings sorted by name.
    ///
    /// The sequence is lazy and holds no state between calls: every call starts
    /// a fresh walk of the filesystem. Symlinked directories are not descended.
    pub fn scan(&self) -> impl Iterator<Item = FileEntry> + '_ {
        self.config
            .roots
            .iter()
            .flat_map(move |root| self.scan_root(root))
    }

    fn scan_root<'s>(&'s self, root: &'s Path) -> impl Iterator<Item = FileEntry> + 's {
        log::info!("Processing directory: {}", root.display());

        let excluded = self.config.exclude_dirs.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| !is_excluded_dir(entry, &excluded))
            .build();

        walker.filter_map(move |result| match result {
            Ok(entry) => self.process_entry(root, &entry),
            Err(err) => {
                log::warn!("Error walking entry: {}", err);
                None
            }
        })
    }

    fn process_entry(&self, root: &Path, entry: &DirEntry) -> Option<FileEntry> {
        let file_type = entry.file_type()?;
        let path = entry.path();

        // Regular files, plus links that do not lead to a directory
        if !file_type.is_file() && !(file_type.is_symlink() && !path.is_dir()) {
            return None;
        }

        if self.skip.as_deref() == Some(path) {
            log::debug!("Skipping output file {}", path.display());
            return None;
        }

        let extension = extension_of(&entry.file_name().to_string_lossy());
        if !is_selected(&self.config, &extension) {
            return None;
        }

        Some(FileEntry {
            path: path.to_path_buf(),
            label: label_for(root, path)?,
        })
    }
}

/// Lowercased text after the last `.` of a file name; empty when there is none.
/// A single leading dot (`.bashrc`) does not start an extension.
pub fn extension_of(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Excluded extensions win over everything, including `collect_all`.
fn is_selected(config: &TraversalConfig, extension: &str) -> bool {
    if config.exclude_extensions.contains(extension) {
        return false;
    }
    config.collect_all || config.languages.admits(extension)
}

fn is_excluded_dir(entry: &DirEntry, excluded: &BTreeSet<String>) -> bool {
    // The root itself is always walked, whatever its name
    entry.depth() > 0
        && entry.file_type().is_some_and(|ft| ft.is_dir())
        && excluded.contains(entry.file_name().to_string_lossy().as_ref())
}

/// `path` relative to the parent of `root`, joined with `/`.
///
/// A root without a final component (`/`, `C:\`) is prefixed with its own
/// display form instead of a name, so `/` yields `/etc/hosts`.
fn label_for(root: &Path, path: &Path) -> Option<String> {
    let relative = diff_paths(path, root)?;
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    let prefix = match root.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => root
            .to_string_lossy()
            .trim_end_matches(['/', '\\'])
            .to_string(),
    };
    Some(format!("{}/{}", prefix, relative))
}
