use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Collect code from multiple directories into collected_code.txt \
             (Python, Java, C, C++ by default; all files with --all-files)"
)]
pub struct Cli {
    /// One or more directory paths to collect code from
    #[arg(required = true, num_args = 1..)]
    pub folders: Vec<PathBuf>,

    /// Directory names to exclude (beyond default: .idea, .venv, venv, __pycache__, .env)
    #[arg(long, num_args = 0..)]
    pub exclude: Vec<String>,

    /// Comma-separated file extensions to exclude (e.g., 'py,java' or '.py,.java')
    #[arg(long, value_delimiter = ',')]
    pub exclude_langs: Vec<String>,

    /// Include all files (not just default language files); --exclude-langs still applies
    #[arg(long)]
    pub all_files: bool,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}
