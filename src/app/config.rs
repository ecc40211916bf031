use crate::app::cli::Cli;
use crate::app::error::{ConfigurationError, RootError};
use crate::app::models::{LanguageFilter, RuntimeConfig, TraversalConfig, DEFAULT_EXCLUDE_DIRS};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    exclude: Option<Vec<String>>,
    exclude_langs: Option<Vec<String>>,
    all_files: Option<bool>,
}

/// Root folders split into the usable config and the rejected ones.
#[derive(Debug)]
pub struct ValidatedConfig {
    pub config: TraversalConfig,
    pub rejected: Vec<RootError>,
}

fn presets_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(
        home.join(".config")
            .join("collect_code")
            .join("presets.toml"),
    )
}

fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>, ConfigurationError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigurationError::PresetRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parsed: PresetsFile =
        toml::from_str(&content).map_err(|e| ConfigurationError::PresetParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Vec<String>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    combined.extend(cli_vec);
    // Deduplicate while keeping order
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Merges the matching preset (if any) with the CLI arguments.
pub fn resolve_config(
    cli: Cli,
    project_name: Option<&str>,
) -> Result<RuntimeConfig, ConfigurationError> {
    let presets = match presets_path() {
        Some(path) => load_presets_file(&path)?,
        None => {
            log::debug!("Could not determine home directory, presets disabled");
            HashMap::new()
        }
    };
    Ok(merge_with_presets(cli, project_name, &presets))
}

fn merge_with_presets(
    cli: Cli,
    project_name: Option<&str>,
    presets: &HashMap<String, PresetConfig>,
) -> RuntimeConfig {
    // Determine preset to use: CLI flag > Auto-detect > None
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    match (cli.preset.as_deref(), preset_key) {
        (Some(key), _) if !presets.contains_key(key) => {
            log::warn!("Preset '{}' not found, using command-line options only", key);
        }
        (None, Some(key)) if presets.contains_key(key) => {
            log::info!("Applying preset '{}' (matches current directory name)", key);
        }
        _ => {}
    }
    let applied = preset_key
        .filter(|k| presets.contains_key(*k))
        .map(String::from);

    RuntimeConfig {
        roots: cli.folders,
        exclude_dirs: merge_vecs(preset.exclude, cli.exclude),
        exclude_langs: merge_vecs(preset.exclude_langs, cli.exclude_langs),
        all_files: cli.all_files || preset.all_files.unwrap_or(false),
        preset: applied,
    }
}

/// Strips surrounding whitespace and a leading dot, lowercases, drops blanks.
pub fn normalize_extensions<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|ext| {
            let ext = ext.as_ref().trim();
            ext.strip_prefix('.').unwrap_or(ext).to_lowercase()
        })
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn check_root(path: &Path) -> Result<PathBuf, RootError> {
    let resolved = fs::canonicalize(path).map_err(|e| RootError::NotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !resolved.is_dir() {
        return Err(RootError::NotADirectory { path: resolved });
    }
    Ok(resolved)
}

/// Checks every root folder before any file I/O. Invalid roots are returned
/// alongside the config; the build fails only when none remain.
pub fn build_traversal(runtime: RuntimeConfig) -> Result<ValidatedConfig, ConfigurationError> {
    let mut roots = Vec::new();
    let mut rejected = Vec::new();

    for root in &runtime.roots {
        match check_root(root) {
            Ok(resolved) => roots.push(resolved),
            Err(err) => rejected.push(err),
        }
    }

    if roots.is_empty() {
        return Err(ConfigurationError::NoValidRoots { rejected });
    }

    let exclude_dirs = DEFAULT_EXCLUDE_DIRS
        .iter()
        .map(|name| name.to_string())
        .chain(runtime.exclude_dirs)
        .collect();

    Ok(ValidatedConfig {
        config: TraversalConfig {
            roots,
            exclude_dirs,
            collect_all: runtime.all_files,
            exclude_extensions: normalize_extensions(&runtime.exclude_langs),
            languages: LanguageFilter::default(),
        },
        rejected,
    })
}
