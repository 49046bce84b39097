//! Class index over project and library source roots.
//!
//! The index answers fully-qualified name lookups for the scaffold engine.
//! Every indexed class remembers whether it came from a project root or a
//! library root, which is what [`SearchScope`] filters on.
//!
//! When two files declare the same fully-qualified name, the first one
//! indexed wins. Callers add project roots before library roots so project
//! sources shadow library copies.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use mockgen_core::host::SearchScope;

use crate::class::JavaClass;
use crate::error::{JavaError, JavaResult};
use crate::files::collect_java_files;
use crate::parser::{parse_java, JavaFile};
use crate::resolve::KnownClasses;

/// Where an indexed class came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A project source root.
    Project,
    /// A library source root.
    Library,
}

impl Origin {
    fn visible_in(self, scope: SearchScope) -> bool {
        self == Origin::Project || scope.includes_libraries()
    }
}

#[derive(Debug)]
struct IndexedClass {
    file: usize,
    /// Path of the declaration within its file (`Outer.Inner`).
    path: String,
    origin: Origin,
}

/// Fully-qualified name index of parsed Java sources.
#[derive(Debug, Default)]
pub struct ClassIndex {
    files: Vec<JavaFile>,
    classes: BTreeMap<String, IndexedClass>,
}

impl ClassIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `source` and index every type it declares. Returns the number
    /// of classes added.
    pub fn add_source(&mut self, path: &str, source: &str, origin: Origin) -> JavaResult<usize> {
        let file = parse_java(source).map_err(|e| JavaError::parse(path, source, e))?;
        let file_id = self.files.len();

        let mut added = 0;
        for (type_path, _) in file.all_types() {
            let fqn = file.qualify(&type_path);
            if self.classes.contains_key(&fqn) {
                debug!(class = %fqn, file = path, "duplicate class ignored");
                continue;
            }
            self.classes.insert(
                fqn,
                IndexedClass {
                    file: file_id,
                    path: type_path,
                    origin,
                },
            );
            added += 1;
        }

        self.files.push(file);
        Ok(added)
    }

    /// Index every Java file under `root`. Files that fail to parse are
    /// skipped with a warning. Returns the number of classes added.
    pub fn add_root(&mut self, root: &Path, origin: Origin) -> JavaResult<usize> {
        let files = collect_java_files(root)?;
        let mut added = 0;
        for (path, content) in &files {
            match self.add_source(path, content, origin) {
                Ok(n) => added += n,
                Err(err) => warn!(root = %root.display(), error = %err, "skipping unparsable file"),
            }
        }
        debug!(root = %root.display(), files = files.len(), classes = added, ?origin, "indexed source root");
        Ok(added)
    }

    /// Number of indexed classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Is the index empty?
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Is `fqn` indexed and visible in `scope`?
    pub fn contains(&self, fqn: &str, scope: SearchScope) -> bool {
        self.classes
            .get(fqn)
            .is_some_and(|c| c.origin.visible_in(scope))
    }

    /// Origin of an indexed class.
    pub fn origin(&self, fqn: &str) -> Option<Origin> {
        self.classes.get(fqn).map(|c| c.origin)
    }

    /// Class handle for `fqn` if it is visible in `scope`.
    pub fn class(&self, fqn: &str, scope: SearchScope) -> Option<JavaClass> {
        let entry = self.classes.get(fqn)?;
        if !entry.origin.visible_in(scope) {
            return None;
        }
        let file = self.files.get(entry.file)?;
        let decl = file.find_type(&entry.path)?;
        Some(JavaClass::from_decl(file, &entry.path, decl, self))
    }
}

impl KnownClasses for ClassIndex {
    fn is_known_class(&self, fqn: &str) -> bool {
        self.classes.contains_key(fqn)
    }
}
