//! Non-fatal checks on the target config before it is merged.
use std::collections::HashSet;
use std::fmt;

use super::merge::DedupKey;
use super::{ConfigDocument, ConfigEntry, PACKAGES_TABLE};

/// Source label attached to every warning about the target config.
const SOURCE: &str = "config";

/// A validation warning detected while loading the target config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration source (always `config` for the target file).
    pub source: String,
    /// The specific item or section that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Build a warning from its parts.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.source, self.item, self.message)
    }
}

/// Trait for configuration validators.
///
/// Validators never fail; they only describe what the merge is about to
/// drop or carry over in a questionable shape.
pub trait ConfigValidator {
    /// Validate the document and return any warnings found.
    fn validate(&self, document: &ConfigDocument) -> Vec<ValidationWarning>;

    /// Return a human-readable name for this validator.
    fn name(&self) -> &'static str;
}

/// Checks individual `[[packages]]` entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackagesValidator;

impl ConfigValidator for PackagesValidator {
    fn validate(&self, document: &ConfigDocument) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for (index, entry) in document.packages.iter().enumerate() {
            if !entry.has_repository() {
                warnings.push(ValidationWarning::new(
                    SOURCE,
                    format!("{PACKAGES_TABLE}[{index}]"),
                    "missing repository; entry will be dropped",
                ));
                continue;
            }
            if !is_owner_repo(&entry.repository) {
                warnings.push(ValidationWarning::new(
                    SOURCE,
                    describe(entry),
                    "repository should have the form owner/repo",
                ));
            }
            if !seen.insert(DedupKey::of(entry)) {
                warnings.push(ValidationWarning::new(
                    SOURCE,
                    describe(entry),
                    "duplicate entry; only the first occurrence is kept",
                ));
            }
        }
        warnings
    }

    fn name(&self) -> &'static str {
        "packages"
    }
}

/// Checks the top-level layout of the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutValidator;

impl ConfigValidator for LayoutValidator {
    fn validate(&self, document: &ConfigDocument) -> Vec<ValidationWarning> {
        document
            .unknown
            .keys()
            .map(|key| {
                ValidationWarning::new(
                    SOURCE,
                    key.clone(),
                    "unsupported top-level key; it will not be written back",
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "layout"
    }
}

/// Run every validator over `document`.
#[must_use]
pub fn validate_all(document: &ConfigDocument) -> Vec<ValidationWarning> {
    let validators: [&dyn ConfigValidator; 2] = [&LayoutValidator, &PackagesValidator];
    validators
        .iter()
        .flat_map(|v| v.validate(document))
        .collect()
}

/// `true` when `repository` is exactly `owner/repo` with both parts non-empty.
fn is_owner_repo(repository: &str) -> bool {
    repository
        .split_once('/')
        .is_some_and(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
}

fn describe(entry: &ConfigEntry) -> String {
    entry.name.as_ref().map_or_else(
        || entry.repository.clone(),
        |name| format!("{} ({name})", entry.repository),
    )
}
