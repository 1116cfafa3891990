//! Aqua registry scanner.
//!
//! Walks `<root>/pkgs` for `registry.yaml` files and collects the canonical
//! `owner/name` identifier of every `github_release` package they declare.
//! Traversal is read-only and visits files in sorted order so logs are stable
//! across runs.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::RegistryError;
use crate::logging::Log;

/// Subdirectory of the registry root that holds package definitions.
pub const PKGS_DIR: &str = "pkgs";

/// File name of a package definition file.
pub const REGISTRY_FILE: &str = "registry.yaml";

/// Marker file that identifies the root of an aqua registry checkout.
pub const POLICY_FILE: &str = "aqua-policy.yaml";

/// The only package `type` this tool imports.
pub const GITHUB_RELEASE: &str = "github_release";

/// Top-level key of a registry file holding the package list.
const PACKAGES_KEY: &str = "packages";

/// One `registry.yaml` document. Everything except `packages` is ignored.
#[derive(Debug, Default)]
pub struct RegistryFile {
    /// Package definitions; absent or `null` when the file declares none.
    pub packages: Option<Vec<SourceEntry>>,
}

/// A single package definition from a registry file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceEntry {
    /// Package kind, e.g. `github_release` or `http`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// GitHub owner of the repository.
    #[serde(default)]
    pub repo_owner: Option<String>,
    /// GitHub repository name.
    #[serde(default)]
    pub repo_name: Option<String>,
}

impl SourceEntry {
    /// Whether this entry passes the selection predicate.
    #[must_use]
    pub fn is_github_release(&self) -> bool {
        self.kind.as_deref() == Some(GITHUB_RELEASE)
    }

    /// Canonical `owner/name` identifier, or `None` when either half is
    /// missing or empty.
    #[must_use]
    pub fn identifier(&self) -> Option<String> {
        let owner = self.repo_owner.as_deref().filter(|s| !s.is_empty())?;
        let name = self.repo_name.as_deref().filter(|s| !s.is_empty())?;
        Some(format!("{owner}/{name}"))
    }
}

/// Options controlling how a scan treats bad input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Log and skip registry files that cannot be read or parsed instead of
    /// failing the whole scan.
    pub skip_invalid: bool,
}

/// Result of scanning a registry: the identifiers plus bookkeeping counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Unique `owner/name` identifiers of every selected package.
    pub identifiers: BTreeSet<String>,
    /// Number of `registry.yaml` files visited.
    pub files_scanned: usize,
    /// Files that were empty or had no `packages` list.
    pub files_without_packages: usize,
    /// Files skipped because they failed to read or parse.
    pub files_invalid: usize,
    /// `github_release` entries with a usable identifier (before dedup).
    pub selected: usize,
    /// `github_release` entries skipped for a missing owner or name.
    pub skipped_incomplete: usize,
}

/// Scan the registry rooted at `root`.
///
/// A missing `pkgs` directory yields an empty report.
///
/// # Errors
///
/// Returns an error if the directory walk fails, or if a registry file cannot
/// be read or parsed and `opts.skip_invalid` is not set.
pub fn scan(root: &Path, opts: ScanOptions, log: &dyn Log) -> Result<ScanReport, RegistryError> {
    let mut report = ScanReport::default();
    for path in find_registry_files(&root.join(PKGS_DIR))? {
        report.files_scanned += 1;
        let file = match load_registry_file(&path) {
            Ok(file) => file,
            Err(e) if opts.skip_invalid => {
                let reason = std::error::Error::source(&e)
                    .map_or_else(String::new, |source| format!(": {source}"));
                log.warn(&format!("skipping invalid registry file: {e}{reason}"));
                report.files_invalid += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        let Some(packages) = file.packages else {
            report.files_without_packages += 1;
            continue;
        };
        for entry in packages.iter().filter(|e| e.is_github_release()) {
            if let Some(id) = entry.identifier() {
                report.selected += 1;
                report.identifiers.insert(id);
            } else {
                report.skipped_incomplete += 1;
            }
        }
    }

    log.debug(&format!(
        "{} registry files, {} without packages, {} invalid",
        report.files_scanned, report.files_without_packages, report.files_invalid
    ));
    log.debug(&format!(
        "{} github_release entries, {} incomplete",
        report.selected, report.skipped_incomplete
    ));
    Ok(report)
}

/// Collect every `registry.yaml` beneath `pkgs_dir`, sorted by path.
fn find_registry_files(pkgs_dir: &Path) -> Result<Vec<PathBuf>, RegistryError> {
    if !pkgs_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(pkgs_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == REGISTRY_FILE {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Read and parse one registry file.
///
/// Only a top-level mapping with a `packages` key declares packages. An empty
/// document, any other top-level value, or a mapping without `packages`
/// parses as a file without packages.
fn load_registry_file(path: &Path) -> Result<RegistryFile, RegistryError> {
    let parse_err = |source| RegistryError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Option<serde_yaml::Value> = serde_yaml::from_str(&content).map_err(parse_err)?;
    let Some(serde_yaml::Value::Mapping(mut document)) = document else {
        return Ok(RegistryFile::default());
    };
    let Some(packages) = document.remove(PACKAGES_KEY) else {
        return Ok(RegistryFile::default());
    };
    Ok(RegistryFile {
        packages: serde_yaml::from_value(packages).map_err(parse_err)?,
    })
}
