//! Java compilation unit: a source file that accepts scaffold edits.
//!
//! Edits are applied as text insertions. After each insertion the file is
//! re-parsed, so later reads and insertion points always reflect the current
//! text. An insertion that would leave the file unparsable is rolled back
//! and rejected.
//!
//! # Layout
//!
//! - Fields go after the last existing field, or at the top of the class
//!   body when there is none.
//! - Methods go at the end of the class body, separated by a blank line.
//! - Members are indented like the existing members (four spaces past the
//!   class when the body is empty).
//!
//! # Type References
//!
//! Resolved types are written with simple names and imported as needed.
//! The qualified name is kept when the simple name is already taken by a
//! different import or by a type declared in the file. Unresolved types are
//! written exactly as their canonical text.

use std::path::Path;

use tracing::debug;

use mockgen_core::edit::{unified_diff, EditKind, Span, TextEdit};
use mockgen_core::host::{ClassHandle, CompilationUnit, HostError, HostResult, SemanticType};
use mockgen_core::text::{byte_offset_to_position, line_start, next_line_start};

use crate::class::JavaClass;
use crate::error::{JavaError, JavaResult};
use crate::imports::{import_insertion, needs_import};
use crate::index::ClassIndex;
use crate::parser::{parse_java, JavaFile, TypeDecl, TypeKind};
use crate::project::{JavaField, JavaMethod};
use crate::types::{ClassSegment, TypeExpr};

const DEFAULT_INDENT: &str = "    ";

/// A parsed Java source file with its pending edits.
#[derive(Debug)]
pub struct JavaCompilationUnit<'p> {
    path: String,
    original: String,
    source: String,
    file: JavaFile,
    index: &'p ClassIndex,
    edits: Vec<TextEdit>,
    added_imports: Vec<String>,
}

impl<'p> JavaCompilationUnit<'p> {
    /// Parse `source`, read from `path`. Types are resolved against `index`.
    pub fn parse(
        path: impl Into<String>,
        source: impl Into<String>,
        index: &'p ClassIndex,
    ) -> JavaResult<Self> {
        let path = path.into();
        let source = source.into();
        let file = parse_java(&source).map_err(|e| JavaError::parse(&path, &source, e))?;
        Ok(JavaCompilationUnit {
            path,
            original: source.clone(),
            source,
            file,
            index,
            edits: Vec::new(),
            added_imports: Vec::new(),
        })
    }

    /// Path the unit was read from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Edits applied so far, in order.
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Imports added so far, including those added for type references.
    pub fn added_imports(&self) -> &[String] {
        &self.added_imports
    }

    /// Has any edit been applied?
    pub fn is_modified(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Unified diff from the original text to the current text.
    pub fn diff(&self) -> String {
        unified_diff(&self.path, &self.original, &self.source)
    }

    /// Add a single-type import unless the class is already visible.
    /// Returns `true` when an import declaration was inserted.
    pub fn ensure_import(&mut self, fqn: &str) -> HostResult<bool> {
        let valid = !fqn.is_empty() && fqn.split('.').all(|s| !s.is_empty());
        if !valid {
            return Err(HostError::InvalidElement {
                message: format!("'{}' is not a class name", fqn),
            });
        }
        if !needs_import(&self.file, fqn) {
            return Ok(false);
        }
        let (offset, text) = import_insertion(&self.file, &self.source, fqn);
        self.insert(EditKind::Import, offset, text)?;
        self.added_imports.push(fqn.to_string());
        debug!(import = fqn, "added import");
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------------

    fn insert(&mut self, kind: EditKind, offset: usize, text: String) -> HostResult<()> {
        let (line, col) = byte_offset_to_position(&self.source, offset);
        self.source.insert_str(offset, &text);
        match parse_java(&self.source) {
            Ok(file) => self.file = file,
            Err(err) => {
                self.source.replace_range(offset..offset + text.len(), "");
                return Err(HostError::Rejected {
                    message: format!("edit would break {}: {}", self.path, err),
                });
            }
        }
        self.edits.push(TextEdit {
            kind,
            span: Span::empty_at(offset as u64),
            new_text: text,
            line,
            col,
        });
        Ok(())
    }

    /// Path within the file of the declaration `class` addresses.
    fn class_path(&self, class: &JavaClass) -> HostResult<String> {
        let fqn = class.qualified_name().unwrap_or_default();
        self.file
            .all_types()
            .into_iter()
            .map(|(path, _)| path)
            .find(|path| self.file.qualify(path) == fqn)
            .ok_or(HostError::ForeignClass { class: fqn })
    }

    fn decl(&self, path: &str) -> HostResult<&TypeDecl> {
        self.file
            .find_type(path)
            .ok_or_else(|| HostError::ForeignClass {
                class: self.file.qualify(path),
            })
    }

    fn handle(&self, path: &str, decl: &TypeDecl) -> JavaClass {
        JavaClass::from_decl(&self.file, path, decl, self.index)
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    fn line_indent(&self, offset: usize) -> &str {
        let start = line_start(&self.source, offset);
        let line = &self.source[start..];
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..width]
    }

    /// Are the body braces on one line (`class A {}`)?
    fn is_single_line(&self, decl: &TypeDecl) -> bool {
        line_start(&self.source, decl.body_close) <= decl.body_open
    }

    fn member_indent(&self, decl: &TypeDecl) -> String {
        let class_indent = self.line_indent(decl.start);
        match decl.first_member {
            Some(first) if line_start(&self.source, first) > decl.body_open => {
                self.line_indent(first).to_string()
            }
            _ => format!("{}{}", class_indent, DEFAULT_INDENT),
        }
    }

    // ------------------------------------------------------------------------
    // Type References
    // ------------------------------------------------------------------------

    /// Source text for `ty`, adding imports for the classes it names.
    fn type_reference(&mut self, ty: &SemanticType) -> HostResult<String> {
        if !ty.is_resolved() {
            return Ok(ty.canonical_text().to_string());
        }
        let Ok(expr) = TypeExpr::parse(ty.canonical_text()) else {
            return Ok(ty.canonical_text().to_string());
        };

        let mut needed: Vec<String> = Vec::new();
        let text = expr.render(", ", &mut |segments: &[ClassSegment]| {
            self.class_reference(segments, &mut needed)
        });
        for fqn in needed {
            self.ensure_import(&fqn)?;
        }
        Ok(text)
    }

    /// Shortest unambiguous spelling of a qualified class name. Pushes the
    /// top-level class onto `needed` when the spelling requires an import.
    fn class_reference(&self, segments: &[ClassSegment], needed: &mut Vec<String>) -> String {
        let names: Vec<&str> = segments.iter().map(|s| s.name.as_str()).collect();
        let qualified = names.join(".");
        // packages are lowercase by convention; the first capitalized
        // segment starts the class name
        let Some(class_at) = names
            .iter()
            .position(|n| n.chars().next().is_some_and(char::is_uppercase))
        else {
            return qualified;
        };
        if class_at == 0 {
            return qualified;
        }

        let package = names[..class_at].join(".");
        let top_level = names[..=class_at].join(".");
        let simple = names[class_at];
        let short = names[class_at..].join(".");

        let taken_by_import = self.file.imports.iter().any(|i| {
            !i.is_static && !i.on_demand && i.simple_name() == simple && i.path != top_level
        });
        let taken_by_local = self
            .file
            .all_types()
            .iter()
            .any(|(path, decl)| decl.name == simple && self.file.qualify(path) != top_level);
        let taken_by_pending = needed
            .iter()
            .any(|n| n.rsplit('.').next() == Some(simple) && *n != top_level);
        if taken_by_import || taken_by_local || taken_by_pending {
            return qualified;
        }

        let in_scope = package == "java.lang"
            || package == self.file.package_name()
            || !needs_import(&self.file, &top_level);
        if !in_scope && !needed.contains(&top_level) {
            needed.push(top_level);
        }
        short
    }

    /// Insert a member block at the top of the class body.
    fn insert_at_body_start(&mut self, kind: EditKind, path: &str, block: String) -> HostResult<()> {
        let decl = self.decl(path)?;
        if self.is_single_line(decl) {
            let closing_indent = self.line_indent(decl.start).to_string();
            let offset = decl.body_close;
            return self.insert(kind, offset, format!("\n{}{}", block, closing_indent));
        }
        let offset = next_line_start(&self.source, decl.body_open);
        let text = if decl.first_member.is_some() {
            format!("{}\n", block)
        } else {
            block
        };
        self.insert(kind, offset, text)
    }
}

fn indent_block(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                "\n".to_string()
            } else {
                format!("{}{}\n", indent, line)
            }
        })
        .collect()
}

impl<'p> CompilationUnit for JavaCompilationUnit<'p> {
    type Class = JavaClass;
    type Field = JavaField;
    type Method = JavaMethod;

    fn top_level_classes(&self) -> Vec<JavaClass> {
        self.file
            .types
            .iter()
            .map(|decl| self.handle(&decl.name, decl))
            .collect()
    }

    /// The class named after the file, else the first top-level class.
    fn test_class(&self) -> Option<JavaClass> {
        let stem = Path::new(&self.path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let classes = || self.file.types.iter().filter(|d| d.kind == TypeKind::Class);
        let decl = classes()
            .find(|d| d.name == stem)
            .or_else(|| classes().next())
            .or_else(|| self.file.types.first())?;
        Some(self.handle(&decl.name, decl))
    }

    fn add_field(&mut self, class: &JavaClass, field: JavaField) -> HostResult<()> {
        let path = self.class_path(class)?;
        let type_text = self.type_reference(&field.ty)?;

        let decl = self.decl(&path)?;
        let indent = self.member_indent(decl);
        let mut block = String::new();
        for annotation in &field.annotations {
            block.push_str(&format!("{}@{}\n", indent, annotation));
        }
        block.push_str(&format!("{}private {} {};\n", indent, type_text, field.name));

        let last_field_end = decl.fields.last().map(|f| f.end);
        let body_close = decl.body_close;
        let class_indent = self.line_indent(decl.start).to_string();
        if self.is_single_line(decl) {
            return self.insert_at_body_start(EditKind::Field, &path, block);
        }
        let Some(last_field_end) = last_field_end else {
            return self.insert_at_body_start(EditKind::Field, &path, block);
        };

        let offset = next_line_start(&self.source, last_field_end);
        if offset <= body_close {
            self.insert(EditKind::Field, offset, block)
        } else {
            // last field shares its line with the closing brace
            let text = format!("\n{}{}", block, class_indent);
            self.insert(EditKind::Field, body_close, text)
        }
    }

    fn add_method(&mut self, class: &JavaClass, method: JavaMethod) -> HostResult<()> {
        let path = self.class_path(class)?;
        let decl = self.decl(&path)?;
        let block = indent_block(&method.text, &self.member_indent(decl));
        if self.is_single_line(decl) {
            return self.insert_at_body_start(EditKind::Method, &path, block);
        }

        let separator = if decl.first_member.is_some() { "\n" } else { "" };
        let body_close = decl.body_close;
        let class_indent = self.line_indent(decl.start).to_string();
        let close_line = line_start(&self.source, body_close);
        if self.source[close_line..body_close].trim().is_empty() {
            let text = format!("{}{}", separator, block);
            self.insert(EditKind::Method, close_line, text)
        } else {
            // content before the closing brace on its line
            let text = format!("\n{}{}{}", separator, block, class_indent);
            self.insert(EditKind::Method, body_close, text)
        }
    }
}
