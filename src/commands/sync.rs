//! Sync command: validate inputs, scan the registry, merge, write.
use anyhow::{Context as _, Result};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::merge::{self, MergeOutcome};
use crate::config::{ConfigDocument, render, validation, writer};
use crate::error::{AquaSyncError, ValidationError};
use crate::logging::{Log, Logger};
use crate::registry::{self, POLICY_FILE, ScanOptions};

/// What a completed run did, rendered as the one-line summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    /// Target config path as given on the command line.
    pub config: PathBuf,
    /// Number of package entries in the output.
    pub packages: usize,
    /// Number of entries added from the registry.
    pub added: usize,
    /// Whether the file was left untouched.
    pub dry_run: bool,
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            write!(
                f,
                "Would update {} with {} packages ({} new)",
                self.config.display(),
                self.packages,
                self.added
            )
        } else {
            write!(
                f,
                "Updated {} with {} packages",
                self.config.display(),
                self.packages
            )
        }
    }
}

/// Check the registry root and the target config before touching anything.
///
/// Returns the resolved registry root.
///
/// # Errors
///
/// Returns an error if the registry directory does not exist, lacks
/// `aqua-policy.yaml`, or the config file does not exist.
pub fn validate_inputs(aqua_registry: &Path, config: &Path) -> Result<PathBuf, ValidationError> {
    if !aqua_registry.is_dir() {
        return Err(ValidationError::MissingDirectory(aqua_registry.to_path_buf()));
    }
    let root = std::fs::canonicalize(aqua_registry).unwrap_or_else(|_| aqua_registry.to_path_buf());
    if !root.join(POLICY_FILE).is_file() {
        return Err(ValidationError::MissingMarker {
            root,
            marker: POLICY_FILE,
        });
    }
    if !config.is_file() {
        return Err(ValidationError::MissingConfig(config.to_path_buf()));
    }
    Ok(root)
}

/// The merged config, rendered and ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    /// Merge result, including the sorted document.
    pub outcome: MergeOutcome,
    /// Serialized document.
    pub contents: String,
}

/// Validate the inputs, scan the registry and merge it into the config
/// without writing anything.
///
/// # Errors
///
/// Returns an error if validation fails or a registry file or the config
/// cannot be read or parsed.
pub fn plan(args: &Cli, log: &dyn Log) -> Result<SyncPlan, AquaSyncError> {
    let root = validate_inputs(&args.aqua_registry, &args.config)?;

    log.stage("Scanning aqua registry");
    log.info(&format!("root: {}", root.display()));
    let opts = ScanOptions {
        skip_invalid: args.skip_invalid,
    };
    let scan = registry::scan(&root, opts, log)?;
    log.info(&format!(
        "found {} github_release packages in {} files",
        scan.identifiers.len(),
        scan.files_scanned
    ));

    log.stage("Loading configuration");
    let document = ConfigDocument::load(&args.config)?;
    log.info(&format!("{} existing packages", document.packages.len()));
    for warning in validation::validate_all(&document) {
        log.warn(&warning.to_string());
    }

    log.stage("Merging");
    let outcome = merge::merge(document, &scan.identifiers);
    report_merge(&outcome, log);

    let contents = render::render(&outcome.document);
    Ok(SyncPlan { outcome, contents })
}

/// Run the sync command: [`plan`], then replace the config unless this is a
/// dry run.
///
/// # Errors
///
/// Returns an error if planning fails or the config cannot be written.
pub fn run(args: &Cli, log: &Logger) -> Result<SyncSummary> {
    let SyncPlan { outcome, contents } = plan(args, log)?;
    let summary = SyncSummary {
        config: args.config.clone(),
        packages: outcome.document.packages.len(),
        added: outcome.added,
        dry_run: args.dry_run,
    };

    if args.dry_run {
        log.dry_run(&format!(
            "would write {} bytes to {}",
            contents.len(),
            args.config.display()
        ));
    } else {
        log.stage("Writing configuration");
        writer::write_atomic(&args.config, &contents)
            .with_context(|| format!("writing {}", args.config.display()))?;
    }

    let warnings = log.warning_count();
    if warnings > 0 {
        log.info(&format!("{warnings} warning(s)"));
    }
    Ok(summary)
}

fn report_merge(outcome: &MergeOutcome, log: &dyn Log) {
    log.info(&format!("{} kept, {} added", outcome.kept, outcome.added));
    if outcome.duplicates_dropped > 0 {
        log.debug(&format!("{} duplicate entries dropped", outcome.duplicates_dropped));
    }
    if outcome.missing_repository > 0 {
        log.debug(&format!(
            "{} entries without repository dropped",
            outcome.missing_repository
        ));
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn registry_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(POLICY_FILE), "").unwrap();
        dir
    }

    #[test]
    fn summary_display() {
        let summary = SyncSummary {
            config: PathBuf::from("config.toml"),
            packages: 12,
            added: 3,
            dry_run: false,
        };
        assert_eq!(summary.to_string(), "Updated config.toml with 12 packages");
        let dry = SyncSummary {
            dry_run: true,
            ..summary
        };
        assert_eq!(
            dry.to_string(),
            "Would update config.toml with 12 packages (3 new)"
        );
    }

    #[test]
    fn validate_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = validate_inputs(&missing, &dir.path().join("config.toml")).unwrap_err();
        assert!(matches!(err, ValidationError::MissingDirectory(ref p) if *p == missing));
    }

    #[test]
    fn validate_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "").unwrap();
        let err = validate_inputs(&file, &file).unwrap_err();
        assert!(matches!(err, ValidationError::MissingDirectory(_)));
    }

    #[test]
    fn validate_missing_marker() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();
        let err = validate_inputs(dir.path(), &config).unwrap_err();
        assert!(matches!(err, ValidationError::MissingMarker { .. }));
        assert!(err.to_string().ends_with("does not contain aqua-policy.yaml"));
    }

    #[test]
    fn validate_missing_config() {
        let root = registry_root();
        let config = root.path().join("config.toml");
        let err = validate_inputs(root.path(), &config).unwrap_err();
        assert!(matches!(err, ValidationError::MissingConfig(ref p) if *p == config));
    }

    #[test]
    fn validate_returns_resolved_root() {
        let root = registry_root();
        let config = root.path().join("config.toml");
        std::fs::write(&config, "").unwrap();
        let resolved = validate_inputs(root.path(), &config).unwrap();
        assert_eq!(resolved, std::fs::canonicalize(root.path()).unwrap());
    }
}
