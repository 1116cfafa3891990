//! Top-level command orchestration.
//!
//! The binary has a single operation, [`sync`]; it lives here so the
//! validation, scan, merge and write sequence is testable without a process.
pub mod sync;
