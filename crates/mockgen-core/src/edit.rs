//! Text edits, content hashes and unified diff rendering.
//!
//! Compilation units record every insertion they perform as a [`TextEdit`].
//! Edits are recorded in application order; each offset is relative to the
//! text as it was just before that edit was applied.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hash type for content verification (SHA-256, stored as hex string for JSON compatibility).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
    /// Compute SHA-256 hash of the given bytes, returning hex-encoded string.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        ContentHash(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Byte offsets into file content.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u64,
    /// End byte offset (exclusive).
    pub end: u64,
}

impl Span {
    /// Zero-length span at `offset`.
    pub fn empty_at(offset: u64) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Kind of text edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// An import declaration.
    Import,
    /// A field declaration.
    Field,
    /// A method declaration.
    Method,
}

/// One insertion performed on a compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    /// What was inserted.
    pub kind: EditKind,
    /// Insertion point (empty span) in the text before this edit.
    pub span: Span,
    /// Inserted text.
    pub new_text: String,
    /// 1-indexed line of the insertion point.
    pub line: u32,
    /// 1-indexed column of the insertion point.
    pub col: u32,
}

/// Render a unified diff between two versions of a file.
///
/// Lines are aligned greedily: an old line is matched against the next
/// occurrence of the same line in the new text, and any new lines skipped
/// over are additions. An old line with no later match is a deletion. Hunks
/// carry no context lines. Returns an empty string when nothing changed.
pub fn unified_diff(file: &str, old: &str, new: &str) -> String {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    let mut hunks: Vec<Hunk> = Vec::new();
    let mut o = 0usize;
    let mut n = 0usize;

    while o < old_lines.len() || n < new_lines.len() {
        if o < old_lines.len() && n < new_lines.len() && old_lines[o] == new_lines[n] {
            o += 1;
            n += 1;
            continue;
        }

        let mut hunk = Hunk::at(o, n);
        if o < old_lines.len() {
            match new_lines[n..].iter().position(|line| *line == old_lines[o]) {
                Some(skip) => {
                    hunk.added.extend_from_slice(&new_lines[n..n + skip]);
                    n += skip;
                }
                None => {
                    hunk.removed.push(old_lines[o]);
                    o += 1;
                }
            }
        } else {
            hunk.added.extend_from_slice(&new_lines[n..]);
            n = new_lines.len();
        }
        push_hunk(&mut hunks, hunk);
    }

    if hunks.is_empty() {
        return String::new();
    }

    let mut diff = String::new();
    diff.push_str(&format!("--- a/{}\n", file));
    diff.push_str(&format!("+++ b/{}\n", file));
    for hunk in &hunks {
        hunk.render(&mut diff);
    }
    diff
}

/// A change block: `removed` old lines starting at `old_start` replaced by
/// `added` new lines starting at `new_start` (both 0-indexed).
struct Hunk<'a> {
    old_start: usize,
    new_start: usize,
    removed: Vec<&'a str>,
    added: Vec<&'a str>,
}

impl<'a> Hunk<'a> {
    fn at(old_start: usize, new_start: usize) -> Self {
        Hunk {
            old_start,
            new_start,
            removed: Vec::new(),
            added: Vec::new(),
        }
    }

    fn old_end(&self) -> usize {
        self.old_start + self.removed.len()
    }

    fn new_end(&self) -> usize {
        self.new_start + self.added.len()
    }

    fn render(&self, out: &mut String) {
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            range(self.old_start, self.removed.len()),
            range(self.new_start, self.added.len())
        ));
        for line in &self.removed {
            out.push_str(&format!("-{}\n", line));
        }
        for line in &self.added {
            out.push_str(&format!("+{}\n", line));
        }
    }
}

/// Merge with the previous hunk when they touch.
fn push_hunk<'a>(hunks: &mut Vec<Hunk<'a>>, hunk: Hunk<'a>) {
    if let Some(last) = hunks.last_mut() {
        if last.old_end() == hunk.old_start && last.new_end() == hunk.new_start {
            last.removed.extend(hunk.removed);
            last.added.extend(hunk.added);
            return;
        }
    }
    hunks.push(hunk);
}

/// Unified diff range: 1-indexed start, and for empty ranges the line
/// before the change.
fn range(start: usize, len: usize) -> String {
    if len == 0 {
        format!("{},0", start)
    } else {
        format!("{},{}", start + 1, len)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod content_hash_tests {
        use super::*;

        #[test]
        fn same_bytes_same_hash() {
            assert_eq!(ContentHash::compute(b"class A {}"), ContentHash::compute(b"class A {}"));
        }

        #[test]
        fn different_bytes_different_hash() {
            assert_ne!(ContentHash::compute(b"class A {}"), ContentHash::compute(b"class B {}"));
        }

        #[test]
        fn hash_is_hex_sha256() {
            let hash = ContentHash::compute(b"");
            assert_eq!(hash.0.len(), 64);
            assert_eq!(
                hash.to_string(),
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
            );
        }
    }

    mod span_tests {
        use super::*;

        #[test]
        fn empty_at_has_zero_length() {
            let span = Span::empty_at(12);
            assert_eq!((span.start, span.end), (12, 12));
            assert_eq!(span.to_string(), "12..12");
        }
    }

    mod diff_tests {
        use super::*;

        #[test]
        fn identical_text_has_empty_diff() {
            assert!(unified_diff("A.java", "a\nb\n", "a\nb\n").is_empty());
        }

        #[test]
        fn pure_insertion() {
            let diff = unified_diff("A.java", "a\nb\n", "a\nx\ny\nb\n");
            assert_eq!(diff, "--- a/A.java\n+++ b/A.java\n@@ -1,0 +2,2 @@\n+x\n+y\n");
        }

        #[test]
        fn insertion_at_end() {
            let diff = unified_diff("A.java", "a\n", "a\nz\n");
            assert!(diff.contains("@@ -1,0 +2,1 @@\n+z\n"));
        }

        #[test]
        fn split_line_is_replace() {
            let diff = unified_diff("A.java", "class A {}\n", "class A {\n    int x;\n}\n");
            assert!(diff.contains("@@ -1,1 +1,3 @@"));
            assert!(diff.contains("-class A {}\n"));
            assert!(diff.contains("+class A {\n+    int x;\n+}\n"));
        }

        #[test]
        fn separate_insertions_make_separate_hunks() {
            let diff = unified_diff("A.java", "a\nb\nc\n", "a\nx\nb\nc\ny\n");
            assert_eq!(diff.matches("@@ -").count(), 2);
        }
    }
}
