// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Java type expressions.
//!
//! A [`TypeExpr`] is the syntactic form of a type as written in source:
//! `int`, `String[]`, `java.util.Map.Entry<K, V>`, `? extends Number`.
//! Resolution (turning written names into fully-qualified ones) happens in
//! [`crate::resolve`]; this module only parses and prints.

use std::fmt;

use crate::lexer::{tokenize, Cursor, TokenKind};
use crate::parser::SyntaxError;

/// Java primitive type keywords (`void` included for method returns).
pub const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Is `name` a primitive type keyword?
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

/// One dot-separated segment of a class type, with its type arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSegment {
    /// Identifier (package, outer class or class name).
    pub name: String,
    /// Type arguments written on this segment; empty for raw types and the
    /// diamond.
    pub args: Vec<TypeExpr>,
}

impl ClassSegment {
    /// Segment without type arguments.
    pub fn plain(name: impl Into<String>) -> Self {
        ClassSegment {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// Wildcard bound direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// `? extends T`
    Extends,
    /// `? super T`
    Super,
}

/// The element type of a [`TypeExpr`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBase {
    /// Primitive keyword.
    Primitive(String),
    /// Class or interface type, possibly qualified.
    Class(Vec<ClassSegment>),
    /// Type argument wildcard.
    Wildcard(Option<(BoundKind, Box<TypeExpr>)>),
}

/// A type as written in Java source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    /// Element type.
    pub base: TypeBase,
    /// Array dimensions (varargs count as one).
    pub dims: usize,
}

impl TypeExpr {
    /// Class type from a dotted name, without type arguments.
    pub fn class(dotted: &str) -> Self {
        TypeExpr {
            base: TypeBase::Class(dotted.split('.').map(ClassSegment::plain).collect()),
            dims: 0,
        }
    }

    /// Parse a complete type expression, e.g. a canonical type text.
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        let tokens = tokenize(text)?;
        let mut cursor = Cursor::new(&tokens, text.len());
        let ty = parse_type(&mut cursor)?;
        if !cursor.at_end() {
            return Err(cursor.error("unexpected trailing input after type"));
        }
        Ok(ty)
    }

    /// The class segments, if this is a class type.
    pub fn class_segments(&self) -> Option<&[ClassSegment]> {
        match &self.base {
            TypeBase::Class(segments) => Some(segments),
            _ => None,
        }
    }

    /// Dotted name of a class type without type arguments.
    pub fn raw_name(&self) -> Option<String> {
        self.class_segments().map(|segments| {
            segments
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(".")
        })
    }

    /// Element type of an array (`self` for non-arrays).
    pub fn element(&self) -> TypeExpr {
        TypeExpr {
            base: self.base.clone(),
            dims: 0,
        }
    }

    /// Print the type, letting `class_name` choose how each class type's
    /// segments are written. Type arguments are printed recursively with the
    /// same callback; `separator` goes between arguments.
    pub fn render<F>(&self, separator: &str, class_name: &mut F) -> String
    where
        F: FnMut(&[ClassSegment]) -> String,
    {
        let mut out = match &self.base {
            TypeBase::Primitive(name) => name.clone(),
            TypeBase::Wildcard(None) => "?".to_string(),
            TypeBase::Wildcard(Some((kind, bound))) => {
                let keyword = match kind {
                    BoundKind::Extends => "extends",
                    BoundKind::Super => "super",
                };
                format!("? {} {}", keyword, bound.render(separator, class_name))
            }
            TypeBase::Class(segments) => {
                // Arguments of every segment print after the name, so
                // `Outer<A>.Inner` becomes `Outer.Inner<A>`.
                let mut text = class_name(segments);
                let args: Vec<String> = segments
                    .iter()
                    .flat_map(|s| s.args.iter())
                    .map(|arg| arg.render(separator, class_name))
                    .collect();
                if !args.is_empty() {
                    text.push('<');
                    text.push_str(&args.join(separator));
                    text.push('>');
                }
                text
            }
        };
        for _ in 0..self.dims {
            out.push_str("[]");
        }
        out
    }
}

impl fmt::Display for TypeExpr {
    /// Source-like form with every segment and argument in place.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = match &self.base {
            TypeBase::Primitive(name) => name.clone(),
            TypeBase::Wildcard(None) => "?".to_string(),
            TypeBase::Wildcard(Some((BoundKind::Extends, bound))) => format!("? extends {}", bound),
            TypeBase::Wildcard(Some((BoundKind::Super, bound))) => format!("? super {}", bound),
            TypeBase::Class(segments) => segments
                .iter()
                .map(|segment| {
                    if segment.args.is_empty() {
                        segment.name.clone()
                    } else {
                        let args: Vec<String> = segment.args.iter().map(|a| a.to_string()).collect();
                        format!("{}<{}>", segment.name, args.join(","))
                    }
                })
                .collect::<Vec<_>>()
                .join("."),
        };
        for _ in 0..self.dims {
            out.push_str("[]");
        }
        f.write_str(&out)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a type at the cursor. Leading type annotations are skipped.
pub fn parse_type(cursor: &mut Cursor<'_, '_>) -> Result<TypeExpr, SyntaxError> {
    skip_annotations(cursor)?;

    let base = if cursor.eat_punct('?') {
        let bound = if cursor.eat_ident("extends") {
            Some((BoundKind::Extends, Box::new(parse_type(cursor)?)))
        } else if cursor.eat_ident("super") {
            Some((BoundKind::Super, Box::new(parse_type(cursor)?)))
        } else {
            None
        };
        TypeBase::Wildcard(bound)
    } else {
        let first = cursor.expect_ident()?;
        if is_primitive(first) {
            TypeBase::Primitive(first.to_string())
        } else {
            let mut segments = vec![ClassSegment::plain(first)];
            loop {
                if cursor.is_punct('<') {
                    let args = parse_type_args(cursor)?;
                    if let Some(last) = segments.last_mut() {
                        last.args = args;
                    }
                }
                let continues = cursor.is_punct('.')
                    && cursor
                        .peek_at(1)
                        .is_some_and(|t| t.is_punct('@') || t.kind == TokenKind::Ident);
                if !continues {
                    break;
                }
                cursor.bump();
                skip_annotations(cursor)?;
                segments.push(ClassSegment::plain(cursor.expect_ident()?));
            }
            TypeBase::Class(segments)
        }
    };

    let mut dims = 0;
    loop {
        skip_annotations(cursor)?;
        if cursor.is_punct('[') && cursor.peek_at(1).is_some_and(|t| t.is_punct(']')) {
            cursor.bump();
            cursor.bump();
            dims += 1;
        } else {
            break;
        }
    }

    Ok(TypeExpr { base, dims })
}

/// Parse `<...>` type arguments. The diamond yields an empty list.
fn parse_type_args(cursor: &mut Cursor<'_, '_>) -> Result<Vec<TypeExpr>, SyntaxError> {
    cursor.expect_punct('<')?;
    let mut args = Vec::new();
    if cursor.eat_punct('>') {
        return Ok(args);
    }
    loop {
        args.push(parse_type(cursor)?);
        if cursor.eat_punct(',') {
            continue;
        }
        cursor.expect_punct('>')?;
        return Ok(args);
    }
}

/// Skip annotations at the cursor and return their names as written.
pub fn skip_annotations(cursor: &mut Cursor<'_, '_>) -> Result<Vec<String>, SyntaxError> {
    let mut names = Vec::new();
    while cursor.is_punct('@') && !cursor.peek_at(1).is_some_and(|t| t.is_ident("interface")) {
        cursor.bump();
        let mut name = cursor.expect_ident()?.to_string();
        while cursor.is_punct('.') && cursor.peek_at(1).is_some_and(|t| t.kind == TokenKind::Ident) {
            cursor.bump();
            name.push('.');
            name.push_str(cursor.expect_ident()?);
        }
        if cursor.is_punct('(') {
            cursor.skip_balanced('(', ')')?;
        }
        names.push(name);
    }
    Ok(names)
}
