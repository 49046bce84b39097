//! CLI front door.
//!
//! [`run_generate`] drives one scaffold pass over a test file:
//!
//! 1. Read the test file and hash its content
//! 2. Index the project roots, then the library roots
//! 3. Parse the test file and run the synthesizer
//! 4. Unless this is a dry run, write the result back, refusing when the
//!    file changed on disk since it was read
//!
//! ## Error Handling
//!
//! All failures are `MockgenError`s with stable error codes. Recoverable
//! scaffold conditions are not errors: they come back as the response's
//! `outcome`, with whatever edits were made before the pass stopped.

use std::fs;

use tracing::{debug, info};

use mockgen_core::edit::ContentHash;
use mockgen_core::error::MockgenError;
use mockgen_core::output::GenerateResponse;
use mockgen_core::scaffold::{ScaffoldOutcome, ScaffoldSynthesizer};
use mockgen_java::{ClassIndex, JavaCompilationUnit, JavaImportOrganizer, JavaProject, Origin};

use crate::config::GenerateOptions;

/// Scaffold the test file named by `options`.
pub fn run_generate(options: &GenerateOptions) -> Result<GenerateResponse, MockgenError> {
    let path = options.test_file_path();
    let file = options.display_path();
    if !path.is_file() {
        return Err(MockgenError::file_not_found(file));
    }

    let source = fs::read_to_string(&path)
        .map_err(|e| MockgenError::internal(format!("failed to read {}: {}", file, e)))?;
    let read_hash = ContentHash::compute(source.as_bytes());

    let project = JavaProject::new(build_index(options)?);
    let mut unit = JavaCompilationUnit::parse(file.as_str(), source, project.index())?;
    let report = ScaffoldSynthesizer::new(&project).synthesize(&mut unit, &JavaImportOrganizer)?;

    if report.outcome == ScaffoldOutcome::NoTestClass {
        return Err(MockgenError::NoTestClass { file });
    }

    let mut applied = false;
    if unit.is_modified() && !options.dry_run {
        let current = fs::read(&path).map_err(|e| {
            MockgenError::apply(format!("failed to re-read file: {}", e), file.as_str())
        })?;
        if ContentHash::compute(&current) != read_hash {
            return Err(MockgenError::apply(
                "file changed on disk since it was read",
                file.as_str(),
            ));
        }
        fs::write(&path, unit.source()).map_err(|e| {
            MockgenError::apply(format!("failed to write file: {}", e), file.as_str())
        })?;
        applied = true;
        info!(file = %file, edits = unit.edits().len(), "wrote scaffold");
    }

    let mut response = GenerateResponse::new(
        file.as_str(),
        &report,
        unit.edits().to_vec(),
        unit.diff(),
        applied,
    );
    response.imports_added = unit.added_imports().to_vec();
    Ok(response)
}

/// Index project roots before library roots so a class declared in both
/// keeps its project origin.
fn build_index(options: &GenerateOptions) -> Result<ClassIndex, MockgenError> {
    let mut index = ClassIndex::new();
    for root in options.project_roots() {
        index.add_root(&root, Origin::Project)?;
    }
    for root in options.library_roots() {
        index.add_root(&root, Origin::Library)?;
    }
    debug!(classes = index.len(), "class index ready");
    Ok(index)
}
