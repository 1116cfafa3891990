//! Aqua registry synchronisation engine.
//!
//! Scans an [aqua](https://aquaproj.github.io/) registry checkout for
//! `github_release` packages and folds them into a TOML package config
//! (`[conda]` settings plus `[[packages]]` entries), deduplicating and
//! sorting the result before rewriting the file in place.
//!
//! The public API is organised into four layers:
//!
//! - **[`registry`]** — walk `pkgs/**/registry.yaml` and collect `owner/name` identifiers
//! - **[`config`]** — load, validate, merge, render and atomically write the target config
//! - **[`commands`]** — the `sync` orchestration used by the binary
//! - **[`logging`]** — tracing-backed console logger
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
