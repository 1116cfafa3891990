//! Command-line argument definitions.
use clap::Parser;
use std::path::PathBuf;

/// Version reported by `--version`: the `git describe` output captured by
/// `build.rs`, or the crate version for builds outside a checkout.
const VERSION: &str = match option_env!("AQUA_SYNC_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point for the aqua registry synchroniser.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "aqua-sync",
    about = "Add github_release packages from an aqua registry to a TOML package config",
    version = VERSION
)]
pub struct Cli {
    /// Path to the aqua registry checkout (must contain aqua-policy.yaml)
    pub aqua_registry: PathBuf,

    /// Path to the TOML config file to update in place
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Preview the merge without writing the config file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Warn about and skip registry files that fail to parse instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,
}
