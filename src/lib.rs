//! Mockgen - Mockito test scaffold generator.
//!
//! This crate provides the CLI binary and library facade for mockgen.
//!
//! ## Modules
//!
//! - `cli` - The generate command
//! - `config` - Options for a generate run

pub mod cli;
pub mod config;

// Re-export core types for convenience
pub use mockgen_core::error::{MockgenError, OutputErrorCode};
pub use mockgen_core::output::{ErrorInfo, ErrorResponse, GenerateResponse, SCHEMA_VERSION};
pub use mockgen_core::scaffold::{ScaffoldOutcome, ScaffoldReport, ScaffoldSynthesizer};

// Re-export the Java host adapter
pub use mockgen_java;
