//! Domain-specific error types for the synchroniser.
//!
//! Internal modules return typed errors (e.g., [`RegistryError`],
//! [`ConfigError`]) while the command layer converts them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! AquaSyncError
//! ├── Validation(ValidationError) — missing directory, marker or config file
//! ├── Registry(RegistryError)     — walking and parsing registry.yaml files
//! └── Config(ConfigError)         — reading, parsing and writing the TOML config
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the synchroniser.
#[derive(Error, Debug)]
pub enum AquaSyncError {
    /// Up-front argument validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The aqua registry could not be scanned.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The target config could not be loaded or written.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors detected before any file is scanned or written.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The registry path does not name a directory.
    #[error("Directory '{}' does not exist", .0.display())]
    MissingDirectory(PathBuf),

    /// The registry directory lacks its marker file.
    #[error("'{}' does not contain {marker}", .root.display())]
    MissingMarker {
        /// Resolved registry root.
        root: PathBuf,
        /// File name that was expected at the root.
        marker: &'static str,
    },

    /// The target config file does not exist.
    #[error("Config file '{}' does not exist", .0.display())]
    MissingConfig(PathBuf),
}

/// Errors that arise while scanning the aqua registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Directory traversal failed.
    #[error("Failed to walk registry directory")]
    Walk(#[from] walkdir::Error),

    /// A registry file could not be read.
    #[error("Failed to read registry file {}", .path.display())]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A registry file is not valid YAML for the expected shape.
    #[error("Failed to parse registry file {}", .path.display())]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Errors that arise from loading or writing the target config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {}", .path.display())]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the expected shape.
    #[error("Failed to parse TOML config {}", .path.display())]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The staging file could not be created or written.
    #[error("Failed to write config file {}", .path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The staged file could not be moved over the target.
    #[error("Failed to replace config file {}", .path.display())]
    Persist {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ValidationError
    // -----------------------------------------------------------------------

    #[test]
    fn missing_directory_display() {
        let e = ValidationError::MissingDirectory(PathBuf::from("/no/such/registry"));
        assert_eq!(e.to_string(), "Directory '/no/such/registry' does not exist");
    }

    #[test]
    fn missing_marker_display() {
        let e = ValidationError::MissingMarker {
            root: PathBuf::from("/src/aqua"),
            marker: "aqua-policy.yaml",
        };
        assert_eq!(e.to_string(), "'/src/aqua' does not contain aqua-policy.yaml");
    }

    #[test]
    fn missing_config_display() {
        let e = ValidationError::MissingConfig(PathBuf::from("config.toml"));
        assert_eq!(e.to_string(), "Config file 'config.toml' does not exist");
    }

    #[test]
    fn validation_error_is_transparent() {
        let e: AquaSyncError = ValidationError::MissingConfig(PathBuf::from("c.toml")).into();
        assert_eq!(e.to_string(), "Config file 'c.toml' does not exist");
    }

    // -----------------------------------------------------------------------
    // RegistryError / ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn registry_parse_names_the_file() {
        let source = serde_yaml::from_str::<Vec<String>>("{").expect_err("invalid yaml");
        let e = RegistryError::Parse {
            path: PathBuf::from("pkgs/foo/bar/registry.yaml"),
            source,
        };
        assert!(e.to_string().contains("pkgs/foo/bar/registry.yaml"));
    }

    #[test]
    fn config_read_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Read {
            path: PathBuf::from("config.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("config.toml"));
    }

    #[test]
    fn aqua_sync_error_from_config_error() {
        let e: AquaSyncError = ConfigError::Persist {
            path: PathBuf::from("config.toml"),
            source: io::Error::other("cross-device link"),
        }
        .into();
        assert_eq!(e.to_string(), "Failed to replace config file config.toml");
    }

    #[test]
    fn source_is_carried_by_the_chain_not_the_message() {
        let source = serde_yaml::from_str::<Vec<String>>("{").expect_err("invalid yaml");
        let detail = source.to_string();
        let e: AquaSyncError = RegistryError::Parse {
            path: PathBuf::from("registry.yaml"),
            source,
        }
        .into();
        assert!(!e.to_string().contains(&detail));
        let chained = format!("{:#}", anyhow::Error::from(e));
        assert_eq!(chained.matches(&detail).count(), 1);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<AquaSyncError>();
        assert_send_sync::<ValidationError>();
        assert_send_sync::<RegistryError>();
        assert_send_sync::<ConfigError>();
    }

    #[test]
    fn registry_error_converts_to_anyhow() {
        let e = RegistryError::Read {
            path: PathBuf::from("registry.yaml"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
