//! JSON output types and serialization for CLI responses.
//!
//! ## Design Principles
//!
//! 1. **Status first:** Every response has `status` as first field
//! 2. **Deterministic:** Same input -> same output (field order, array ordering)
//! 3. **Nullable vs absent:** Explicit `null` for "no value"; absent field means "not applicable"
//! 4. **Versioned:** Schema version in response enables forward compatibility

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::edit::TextEdit;
use crate::error::{MockgenError, OutputErrorCode};
use crate::scaffold::{InsertedField, ScaffoldOutcome, ScaffoldReport};

pub use crate::types::Location;

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Error Response
// ============================================================================

/// Error details for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Error-specific structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Where the error occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl ErrorInfo {
    /// Create from a MockgenError.
    pub fn from_error(err: &MockgenError) -> Self {
        let code = OutputErrorCode::from(err).code();
        let message = err.to_string();

        let (details, location) = match err {
            MockgenError::FileNotFound { path } => {
                (Some(serde_json::json!({ "path": path })), None)
            }
            MockgenError::Parse { location, .. } => (None, Some(location.clone())),
            MockgenError::NoTestClass { file } => {
                (Some(serde_json::json!({ "file": file })), None)
            }
            MockgenError::ApplyError { file, .. } => {
                let details = file.as_ref().map(|f| serde_json::json!({ "file": f }));
                (details, None)
            }
            _ => (None, None),
        };

        ErrorInfo {
            code,
            message,
            details,
            location,
        }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error details.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from an error.
    pub fn from_error(err: &MockgenError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

// ============================================================================
// Generate Response
// ============================================================================

/// Response for the generate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Workspace-relative path of the test file.
    pub file: String,
    /// Fully-qualified test class name.
    pub test_class: Option<String>,
    /// Fully-qualified subject class name.
    pub subject: Option<String>,
    /// Terminal state of the scaffold pass.
    pub outcome: ScaffoldOutcome,
    /// Fields inserted, mocks first.
    pub inserted_fields: Vec<InsertedField>,
    /// Whether the setUp method was inserted.
    pub setup_method: bool,
    /// Imports added.
    pub imports_added: Vec<String>,
    /// Whether the changes were written to disk.
    pub applied: bool,
    /// Text edits in application order.
    pub edits: Vec<TextEdit>,
    /// Unified diff of the change (empty when nothing changed).
    pub unified_diff: String,
}

impl GenerateResponse {
    /// Build a response from a scaffold report and the unit's edits.
    pub fn new(
        file: impl Into<String>,
        report: &ScaffoldReport,
        edits: Vec<TextEdit>,
        unified_diff: String,
        applied: bool,
    ) -> Self {
        GenerateResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            file: file.into(),
            test_class: report.test_class.clone(),
            subject: report.subject.clone(),
            outcome: report.outcome,
            inserted_fields: report.inserted_fields().cloned().collect(),
            setup_method: report.setup_method,
            imports_added: report.imports.clone(),
            applied,
            edits,
            unified_diff,
        }
    }

    /// Brief human-readable summary, one line per change.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for field in &self.inserted_fields {
            lines.push(format!(
                "+ @{} {} {}",
                field.annotation, field.type_name, field.name
            ));
        }
        if self.setup_method {
            lines.push("+ setUp()".to_string());
        }
        for import in &self.imports_added {
            lines.push(format!("+ import {}", import));
        }
        if lines.is_empty() {
            lines.push(format!("{}: up to date ({})", self.file, self.outcome.as_str()));
        } else {
            let verb = if self.applied { "updated" } else { "would update" };
            lines.insert(0, format!("{} {} ({})", verb, self.file, self.outcome.as_str()));
        }
        lines.join("\n")
    }
}

// ============================================================================
// Emission
// ============================================================================

/// Emit a response as pretty JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================
