//! Fold scanned identifiers into a [`ConfigDocument`].
//!
//! Merge semantics:
//! - Existing entries are unique per [`DedupKey`]; the first one in file
//!   order wins and later duplicates are dropped.
//! - Entries without a `repository` are dropped.
//! - A scanned identifier is added as a bare entry unless an entry with the
//!   same repository (case-insensitive) and no `name` already exists. A named
//!   entry does not cover its repository.
//! - The result is sorted by repository (case-insensitive), then name, with a
//!   missing name ordered before an empty one.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::{ConfigDocument, ConfigEntry};

/// Identity of a package entry for duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    repository: String,
    name: Option<String>,
}

impl DedupKey {
    /// Key of an existing entry.
    #[must_use]
    pub fn of(entry: &ConfigEntry) -> Self {
        Self {
            repository: entry.repository.to_lowercase(),
            name: entry.name.clone(),
        }
    }

    /// Key a freshly scanned identifier would occupy.
    #[must_use]
    pub fn bare(identifier: &str) -> Self {
        Self {
            repository: identifier.to_lowercase(),
            name: None,
        }
    }
}

/// The merged document plus what happened to get there.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Document with deduplicated, sorted packages.
    pub document: ConfigDocument,
    /// Existing entries carried over.
    pub kept: usize,
    /// Existing entries dropped as duplicates of an earlier entry.
    pub duplicates_dropped: usize,
    /// Existing entries dropped for lacking a repository.
    pub missing_repository: usize,
    /// Bare entries added from the scan.
    pub added: usize,
}

/// Merge `identifiers` into `document`.
///
/// Iteration order of `identifiers` only matters when two of them differ
/// solely by case: the first one seen is kept.
#[must_use]
pub fn merge<I, S>(document: ConfigDocument, identifiers: I) -> MergeOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ConfigDocument {
        settings,
        packages,
        unknown,
    } = document;

    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(packages.len());
    let mut entries: Vec<ConfigEntry> = Vec::with_capacity(packages.len());
    let mut duplicates_dropped = 0;
    let mut missing_repository = 0;

    for entry in packages {
        if !entry.has_repository() {
            missing_repository += 1;
            continue;
        }
        if seen.insert(DedupKey::of(&entry)) {
            entries.push(entry);
        } else {
            duplicates_dropped += 1;
        }
    }
    let kept = entries.len();

    for identifier in identifiers {
        let identifier = identifier.as_ref();
        if identifier.is_empty() {
            continue;
        }
        if seen.insert(DedupKey::bare(identifier)) {
            entries.push(ConfigEntry::bare(identifier));
        }
    }
    let added = entries.len() - kept;

    entries.sort_by(compare_entries);

    MergeOutcome {
        document: ConfigDocument {
            settings,
            packages: entries,
            unknown,
        },
        kept,
        duplicates_dropped,
        missing_repository,
        added,
    }
}

/// Output order: repository (case-insensitive), then name with a missing
/// name treated as `""` and placed before an explicit `""`.
fn compare_entries(a: &ConfigEntry, b: &ConfigEntry) -> Ordering {
    a.repository
        .to_lowercase()
        .cmp(&b.repository.to_lowercase())
        .then_with(|| {
            let a_name = a.name.as_deref().unwrap_or_default();
            let b_name = b.name.as_deref().unwrap_or_default();
            a_name.cmp(b_name)
        })
        .then_with(|| a.name.is_some().cmp(&b.name.is_some()))
}
