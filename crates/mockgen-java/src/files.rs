//! Java file collection utilities.
//!
//! Provides source-root discovery for building the class index.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use walkdir::WalkDir;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for file operations.
#[derive(Debug, Error)]
pub enum FileError {
    /// File or directory not found.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

// ============================================================================
// File Collection
// ============================================================================

/// Directory names never descended into.
const EXCLUDED_DIRS: &[&str] = &["build", "out", "target", "node_modules"];

/// Collect Java files by walking a source root.
///
/// Skips hidden directories (`.git`, `.gradle`, `.idea`, ...) and build
/// output directories. Returns `(relative_path, content)` tuples sorted by
/// path, so index construction is deterministic.
///
/// # Example
///
/// ```ignore
/// let files = collect_java_files(Path::new("src/main/java"))?;
/// for (path, content) in files {
///     println!("Found: {} ({} bytes)", path, content.len());
/// }
/// ```
pub fn collect_java_files(root: &Path) -> FileResult<Vec<(String, String)>> {
    if !root.is_dir() {
        return Err(FileError::NotFound {
            path: root.display().to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        // Filter on root-relative paths only; the root itself may live in a
        // hidden temp directory.
        let rel_path = match path.strip_prefix(root) {
            Ok(p) => p,
            Err(_) => continue,
        };

        if rel_path.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            name.starts_with('.') || EXCLUDED_DIRS.contains(&name.as_ref())
        }) {
            continue;
        }

        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "java") {
            let content = fs::read_to_string(path)?;
            files.push((rel_path.to_string_lossy().replace('\\', "/"), content));
        }
    }

    files.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn collects_java_files_sorted() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b/B.java", "class B {}");
        write(dir.path(), "a/A.java", "class A {}");
        write(dir.path(), "a/notes.txt", "not java");

        let files = collect_java_files(dir.path()).unwrap();
        let paths: Vec<_> = files.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["a/A.java", "b/B.java"]);
        assert_eq!(files[0].1, "class A {}");
    }

    #[test]
    fn skips_hidden_and_build_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/A.java", "class A {}");
        write(dir.path(), ".git/B.java", "class B {}");
        write(dir.path(), "build/C.java", "class C {}");
        write(dir.path(), "target/D.java", "class D {}");

        let files = collect_java_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "src/A.java");
    }

    #[test]
    fn missing_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = collect_java_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, FileError::NotFound { .. }));
    }
}
