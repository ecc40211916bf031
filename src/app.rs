// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;

use self::cli::Cli;
use self::config::{build_traversal, resolve_config};
use self::error::ConfigurationError;
use self::formatter::write_collection;
use self::models::{CollectionResult, OUTPUT_FILE_NAME};
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<CollectionResult> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Identify working directory & project name (used for preset auto-detection)
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_name = current_dir.file_name().and_then(|n| n.to_str());

    // 3. Resolve configuration: presets + CLI, then validate root folders
    let runtime = resolve_config(args, project_name)?;
    log::info!(
        "Starting code collection from {} directories...",
        runtime.roots.len()
    );

    let validated = build_traversal(runtime).inspect_err(|err| {
        if let ConfigurationError::NoValidRoots { rejected } = err {
            for root in rejected {
                log::error!("{}", root);
            }
        }
    })?;
    for rejected in &validated.rejected {
        log::warn!("{}, skipping", rejected);
    }
    let config = validated.config;
    log::debug!("Excluded directories: {:?}", config.exclude_dirs);
    log::debug!("Excluded extensions: {:?}", config.exclude_extensions);
    log::debug!("Collecting all files: {}", config.collect_all);

    // 4. Scan lazily while writing; the output file itself is never collected
    let output_path = current_dir.join(OUTPUT_FILE_NAME);
    let scanner = Scanner::new(config).skip_file(&output_path);
    let result = write_collection(scanner.scan(), &output_path)?;

    // 5. Report
    log::info!(
        "Collected {} file(s) into {} ({} failed)",
        result.written,
        result.output_path.display(),
        result.failures.len()
    );

    Ok(result)
}
