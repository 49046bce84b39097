//! Core infrastructure for mockgen.
//!
//! This crate provides language-agnostic infrastructure:
//! - Host interfaces the scaffold engine consumes (program structure,
//!   element factory, naming conventions, import organization)
//! - The test-scaffold synthesis engine
//! - Text edits, content hashes and unified diff rendering
//! - Error types and error codes
//! - JSON output types for CLI responses

pub mod edit;
pub mod error;
pub mod host;
pub mod output;
pub mod scaffold;
pub mod text;
pub mod types;
