// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed aqua registry plus target config and a
// fluent builder so each integration test can set up an isolated environment
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Output};

use aqua_sync_cli::cli::Cli;
use aqua_sync_cli::commands::sync::{self, SyncSummary};
use aqua_sync_cli::logging::Logger;

/// Render a `registry.yaml` body declaring one package per `(type, owner, name)`.
pub fn registry_yaml(packages: &[(&str, &str, &str)]) -> String {
    let mut out = String::from("packages:\n");
    for (kind, owner, name) in packages {
        out.push_str(&format!(
            "  - type: {kind}\n    repo_owner: {owner}\n    repo_name: {name}\n"
        ));
    }
    out
}

/// An isolated registry checkout and config file backed by a
/// [`tempfile::TempDir`].
pub struct RegistryFixture {
    /// Temporary directory holding `aqua-registry/` and `config.toml`.
    pub dir: tempfile::TempDir,
}

impl RegistryFixture {
    /// Create an empty registry (with its marker file) and an empty config.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let registry = dir.path().join("aqua-registry");
        std::fs::create_dir_all(registry.join("pkgs")).expect("create pkgs dir");
        std::fs::write(registry.join("aqua-policy.yaml"), "").expect("write marker");
        std::fs::write(dir.path().join("config.toml"), "").expect("write config");
        Self { dir }
    }

    /// Path to the registry root.
    pub fn registry(&self) -> PathBuf {
        self.dir.path().join("aqua-registry")
    }

    /// Path to the target config.
    pub fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Current contents of the target config.
    pub fn read_config(&self) -> String {
        std::fs::read_to_string(self.config()).expect("read config")
    }

    /// Write `content` to `pkgs/<rel>/registry.yaml`.
    pub fn with_registry_file(self, rel: &str, content: &str) -> Self {
        let path = self.registry().join("pkgs").join(rel).join("registry.yaml");
        std::fs::create_dir_all(path.parent().expect("registry file parent"))
            .expect("create registry dir");
        std::fs::write(path, content).expect("write registry file");
        self
    }

    /// Overwrite the target config.
    pub fn with_config(self, content: &str) -> Self {
        std::fs::write(self.config(), content).expect("write config");
        self
    }

    /// CLI arguments pointing at this fixture.
    pub fn args(&self) -> Cli {
        Cli {
            aqua_registry: self.registry(),
            config: self.config(),
            verbose: false,
            dry_run: false,
            skip_invalid: false,
        }
    }

    /// Run the sync command in-process with default options.
    pub fn sync(&self) -> anyhow::Result<SyncSummary> {
        sync::run(&self.args(), &Logger::new())
    }

    /// Run the built binary with the given arguments.
    pub fn run_binary<I, S>(args: I) -> Output
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(env!("CARGO_BIN_EXE_aqua-sync"))
            .args(args)
            .output()
            .expect("spawn aqua-sync")
    }
}
