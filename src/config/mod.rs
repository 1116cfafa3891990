//! Target config model: an optional `[conda]` settings table plus a list of
//! `[[packages]]` entries.
//!
//! The document is loaded with [`toml_loader`], folded together with the
//! registry scan by [`merge`], checked by [`validation`], serialized by
//! [`render`] and written back by [`writer`].

pub mod merge;
pub mod render;
pub mod toml_loader;
pub mod validation;
pub mod writer;

use std::path::Path;

use serde::{Deserialize, Deserializer, de::Error as _};

use crate::error::ConfigError;

/// Name of the settings table passed through unmodified.
pub const SETTINGS_TABLE: &str = "conda";

/// Name of the array of package tables.
pub const PACKAGES_TABLE: &str = "packages";

/// The whole target config.
///
/// Deserialized through a plain [`toml::Table`] so every value, dates and
/// times included, keeps its TOML type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    /// Opaque `[conda]` settings, in file order.
    pub settings: Option<toml::Table>,

    /// Package entries in file order (sorted after a merge).
    pub packages: Vec<ConfigEntry>,

    /// Any other top-level keys. They are reported, never written back.
    pub unknown: toml::Table,
}

impl ConfigDocument {
    /// Load the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        toml_loader::load_config(path)
    }

    /// Split a parsed top-level table into settings, packages and the rest.
    ///
    /// # Errors
    ///
    /// Returns a message if `conda` is not a table, `packages` is not an
    /// array of tables, or an entry has a mistyped `repository` or `name`.
    pub fn from_table(table: toml::Table) -> Result<Self, String> {
        let mut document = Self::default();
        for (key, value) in table {
            match key.as_str() {
                SETTINGS_TABLE => match value {
                    toml::Value::Table(settings) => document.settings = Some(settings),
                    other => return Err(type_mismatch(SETTINGS_TABLE, "table", &other)),
                },
                PACKAGES_TABLE => match value {
                    toml::Value::Array(items) => {
                        for (index, item) in items.into_iter().enumerate() {
                            let at = format!("{PACKAGES_TABLE}[{index}]");
                            let entry = match item {
                                toml::Value::Table(entry) => {
                                    ConfigEntry::from_table(entry).map_err(|e| format!("{at}: {e}"))?
                                }
                                other => return Err(type_mismatch(&at, "table", &other)),
                            };
                            document.packages.push(entry);
                        }
                    }
                    other => return Err(type_mismatch(PACKAGES_TABLE, "array of tables", &other)),
                },
                _ => {
                    document.unknown.insert(key, value);
                }
            }
        }
        Ok(document)
    }
}

impl<'de> Deserialize<'de> for ConfigDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let table = toml::Table::deserialize(deserializer)?;
        Self::from_table(table).map_err(D::Error::custom)
    }
}

/// Key of the canonical identifier inside a package table.
const REPOSITORY_KEY: &str = "repository";

/// Key of the optional discriminator inside a package table.
const NAME_KEY: &str = "name";

/// One `[[packages]]` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigEntry {
    /// Canonical `owner/name` identifier; empty when the table has none.
    pub repository: String,

    /// Optional discriminator allowing several entries per repository.
    pub name: Option<String>,

    /// Every other field, preserved verbatim in file order.
    pub extra: toml::Table,
}

impl ConfigEntry {
    /// A bare entry carrying only `repository`.
    #[must_use]
    pub fn bare(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            name: None,
            extra: toml::Table::new(),
        }
    }

    /// Build an entry from one package table, keeping the other fields in
    /// their original order.
    ///
    /// # Errors
    ///
    /// Returns a message if `repository` or `name` is not a string.
    pub fn from_table(table: toml::Table) -> Result<Self, String> {
        let mut entry = Self::default();
        for (key, value) in table {
            match key.as_str() {
                REPOSITORY_KEY => entry.repository = expect_string(&key, value)?,
                NAME_KEY => entry.name = Some(expect_string(&key, value)?),
                _ => {
                    entry.extra.insert(key, value);
                }
            }
        }
        Ok(entry)
    }

    /// Whether the entry names a repository at all.
    #[must_use]
    pub fn has_repository(&self) -> bool {
        !self.repository.is_empty()
    }
}

fn expect_string(key: &str, value: toml::Value) -> Result<String, String> {
    match value {
        toml::Value::String(s) => Ok(s),
        other => Err(type_mismatch(key, "string", &other)),
    }
}

fn type_mismatch(key: &str, expected: &str, found: &toml::Value) -> String {
    format!("`{key}` must be a {expected}, found {}", found.type_str())
}
