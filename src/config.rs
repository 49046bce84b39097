//! Options for a generate run.
//!
//! Built by the CLI from its arguments; library callers construct them
//! directly. Relative paths resolve against the workspace root.

use std::path::{Path, PathBuf};

/// Inputs to [`crate::cli::run_generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Workspace root. Relative paths below resolve against it.
    pub workspace: PathBuf,
    /// The test file to scaffold.
    pub test_file: PathBuf,
    /// Project source roots. Empty means the workspace itself.
    pub source_roots: Vec<PathBuf>,
    /// Library source roots, visible only to whole-path lookups.
    pub library_roots: Vec<PathBuf>,
    /// Compute the edits without writing the file.
    pub dry_run: bool,
}

impl GenerateOptions {
    /// Options for scaffolding `test_file` with the workspace as the only
    /// project root.
    pub fn new(workspace: impl Into<PathBuf>, test_file: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            workspace: workspace.into(),
            test_file: test_file.into(),
            source_roots: Vec::new(),
            library_roots: Vec::new(),
            dry_run: false,
        }
    }

    /// Resolve `path` against the workspace root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// The test file as an absolute (workspace-joined) path.
    pub fn test_file_path(&self) -> PathBuf {
        self.resolve(&self.test_file)
    }

    /// Project source roots, resolved.
    pub fn project_roots(&self) -> Vec<PathBuf> {
        if self.source_roots.is_empty() {
            return vec![self.workspace.clone()];
        }
        self.source_roots.iter().map(|r| self.resolve(r)).collect()
    }

    /// Library source roots, resolved.
    pub fn library_roots(&self) -> Vec<PathBuf> {
        self.library_roots.iter().map(|r| self.resolve(r)).collect()
    }

    /// Path of the test file as reported in output: relative to the
    /// workspace when it lies inside it.
    pub fn display_path(&self) -> String {
        let path = self.test_file_path();
        let shown = path.strip_prefix(&self.workspace).unwrap_or(&path);
        shown.to_string_lossy().replace('\\', "/")
    }
}
