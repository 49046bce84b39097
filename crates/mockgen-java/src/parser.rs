// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Declaration-level Java parser.
//!
//! Parses the outline of a compilation unit: package, imports, type
//! declarations and their members (fields, constructors, methods, nested
//! types). Method bodies, initializers and enum constant bodies are skipped
//! as balanced token groups; nothing below the declaration level is
//! modeled.
//!
//! Every declaration keeps byte offsets into the source so that callers can
//! insert text relative to existing members.

use thiserror::Error;

use crate::lexer::{tokenize, Cursor, TokenKind};
use crate::types::{parse_type, skip_annotations, TypeExpr};

/// A syntax error at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// What went wrong.
    pub message: String,
    /// Byte offset of the offending token.
    pub offset: usize,
}

impl SyntaxError {
    /// Create a syntax error.
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        SyntaxError {
            message: message.into(),
            offset,
        }
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// `package a.b;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDecl {
    /// Dotted package name.
    pub name: String,
    /// Offset just past the terminating `;`.
    pub end: usize,
}

/// `import [static] a.b.C[.*];`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Imported name without `.*`.
    pub path: String,
    /// `import static`.
    pub is_static: bool,
    /// Ends in `.*`.
    pub on_demand: bool,
    /// Offset of the `import` keyword.
    pub start: usize,
    /// Offset just past the terminating `;`.
    pub end: usize,
}

impl ImportDecl {
    /// Last segment of a single-type import.
    pub fn simple_name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }
}

/// Type declaration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// `class`
    Class,
    /// `interface`
    Interface,
    /// `enum`
    Enum,
    /// `record`
    Record,
    /// `@interface`
    Annotation,
}

/// A class, interface, enum, record or annotation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Simple name.
    pub name: String,
    /// Declaration keyword.
    pub kind: TypeKind,
    /// Annotations as written.
    pub annotations: Vec<String>,
    /// Offset of the first annotation or modifier.
    pub start: usize,
    /// Offset of the body's `{`.
    pub body_open: usize,
    /// Offset of the body's `}`.
    pub body_close: usize,
    /// Offset of the first member, if any.
    pub first_member: Option<usize>,
    /// Fields, one entry per declarator.
    pub fields: Vec<FieldDecl>,
    /// Constructors.
    pub constructors: Vec<ConstructorDecl>,
    /// Methods.
    pub methods: Vec<MethodDecl>,
    /// Member types.
    pub nested: Vec<TypeDecl>,
}

/// One field declarator. `int a, b;` yields two entries sharing a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Identifier.
    pub name: String,
    /// Declared type, including array brackets written after the name.
    pub ty: TypeExpr,
    /// Annotations as written.
    pub annotations: Vec<String>,
    /// Modifier keywords.
    pub modifiers: Vec<String>,
    /// Offset of the first annotation, modifier or type token.
    pub start: usize,
    /// Offset just past the terminating `;`.
    pub end: usize,
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    /// Identifier.
    pub name: String,
    /// Declared type; varargs add one dimension.
    pub ty: TypeExpr,
}

/// A constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
    /// Annotations as written.
    pub annotations: Vec<String>,
    /// Formal parameters.
    pub params: Vec<ParamDecl>,
    /// Declaration start.
    pub start: usize,
    /// Offset just past the body.
    pub end: usize,
}

/// A method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Identifier.
    pub name: String,
    /// Annotations as written.
    pub annotations: Vec<String>,
    /// Formal parameters.
    pub params: Vec<ParamDecl>,
    /// Declaration start.
    pub start: usize,
    /// Offset just past the body or `;`.
    pub end: usize,
}

/// A parsed compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaFile {
    /// Package declaration.
    pub package: Option<PackageDecl>,
    /// Imports in source order.
    pub imports: Vec<ImportDecl>,
    /// Top-level types in source order.
    pub types: Vec<TypeDecl>,
}

impl JavaFile {
    /// Package name; empty for the default package.
    pub fn package_name(&self) -> &str {
        self.package.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    /// Qualify a name declared in this file with the package.
    pub fn qualify(&self, name: &str) -> String {
        match self.package_name() {
            "" => name.to_string(),
            package => format!("{}.{}", package, name),
        }
    }

    /// Find a type by its dotted path within the file (`Outer.Inner`).
    pub fn find_type(&self, path: &str) -> Option<&TypeDecl> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.types.iter().find(|t| t.name == first)?;
        for part in parts {
            current = current.nested.iter().find(|t| t.name == part)?;
        }
        Some(current)
    }

    /// Every type declared in the file as `(path within file, decl)`, outer
    /// types before their members.
    pub fn all_types(&self) -> Vec<(String, &TypeDecl)> {
        fn walk<'f>(prefix: &str, decl: &'f TypeDecl, out: &mut Vec<(String, &'f TypeDecl)>) {
            let path = if prefix.is_empty() {
                decl.name.clone()
            } else {
                format!("{}.{}", prefix, decl.name)
            };
            out.push((path.clone(), decl));
            for nested in &decl.nested {
                walk(&path, nested, out);
            }
        }
        let mut out = Vec::new();
        for decl in &self.types {
            walk("", decl, &mut out);
        }
        out
    }
}

// ============================================================================
// Parser
// ============================================================================

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "native",
    "synchronized",
    "transient",
    "volatile",
    "strictfp",
    "default",
    "sealed",
];

#[derive(Debug, Default)]
struct Modifiers {
    annotations: Vec<String>,
    keywords: Vec<String>,
}

impl Modifiers {
    fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.keywords.is_empty()
    }
}

/// Parse a Java compilation unit.
pub fn parse_java(source: &str) -> Result<JavaFile, SyntaxError> {
    let tokens = tokenize(source)?;
    let mut cursor = Cursor::new(&tokens, source.len());
    let mut file = JavaFile::default();

    while !cursor.at_end() {
        if cursor.eat_punct(';') {
            continue;
        }
        let start = cursor.offset();
        let modifiers = parse_modifiers(&mut cursor)?;

        if cursor.is_ident("package") && file.package.is_none() && file.types.is_empty() {
            cursor.bump();
            let name = parse_qualified_name(&mut cursor)?;
            cursor.expect_punct(';')?;
            file.package = Some(PackageDecl {
                name,
                end: cursor.prev_end(),
            });
            continue;
        }

        if cursor.is_ident("import") && modifiers.is_empty() {
            file.imports.push(parse_import(&mut cursor)?);
            continue;
        }

        if cursor.is_ident("module") || cursor.is_ident("open") {
            // module-info.java declares no types
            break;
        }

        file.types.push(parse_type_decl(&mut cursor, start, modifiers)?);
    }

    Ok(file)
}

fn parse_modifiers(cursor: &mut Cursor<'_, '_>) -> Result<Modifiers, SyntaxError> {
    let mut modifiers = Modifiers::default();
    loop {
        if cursor.is_punct('@') {
            if cursor.peek_at(1).is_some_and(|t| t.is_ident("interface")) {
                break;
            }
            modifiers.annotations.extend(skip_annotations(cursor)?);
        } else if cursor
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Ident && MODIFIERS.contains(&t.text))
        {
            if let Some(token) = cursor.bump() {
                modifiers.keywords.push(token.text.to_string());
            }
        } else if cursor.is_ident("non")
            && cursor.peek_at(1).is_some_and(|t| t.is_punct('-'))
            && cursor.peek_at(2).is_some_and(|t| t.is_ident("sealed"))
        {
            cursor.bump();
            cursor.bump();
            cursor.bump();
            modifiers.keywords.push("non-sealed".to_string());
        } else {
            break;
        }
    }
    Ok(modifiers)
}

fn parse_qualified_name(cursor: &mut Cursor<'_, '_>) -> Result<String, SyntaxError> {
    let mut name = cursor.expect_ident()?.to_string();
    while cursor.is_punct('.') && cursor.peek_at(1).is_some_and(|t| t.kind == TokenKind::Ident) {
        cursor.bump();
        name.push('.');
        name.push_str(cursor.expect_ident()?);
    }
    Ok(name)
}

fn parse_import(cursor: &mut Cursor<'_, '_>) -> Result<ImportDecl, SyntaxError> {
    let start = cursor.offset();
    cursor.bump();
    let is_static = cursor.eat_ident("static");
    let path = parse_qualified_name(cursor)?;
    let on_demand = if cursor.eat_punct('.') {
        cursor.expect_punct('*')?;
        true
    } else {
        false
    };
    cursor.expect_punct(';')?;
    Ok(ImportDecl {
        path,
        is_static,
        on_demand,
        start,
        end: cursor.prev_end(),
    })
}

fn parse_type_decl(
    cursor: &mut Cursor<'_, '_>,
    start: usize,
    modifiers: Modifiers,
) -> Result<TypeDecl, SyntaxError> {
    let kind = if cursor.eat_ident("class") {
        TypeKind::Class
    } else if cursor.eat_ident("interface") {
        TypeKind::Interface
    } else if cursor.eat_ident("enum") {
        TypeKind::Enum
    } else if cursor.eat_ident("record") {
        TypeKind::Record
    } else if cursor.is_punct('@') && cursor.peek_at(1).is_some_and(|t| t.is_ident("interface")) {
        cursor.bump();
        cursor.bump();
        TypeKind::Annotation
    } else {
        return Err(cursor.error("expected type declaration"));
    };
    let name = cursor.expect_ident()?.to_string();

    // type parameters, record header, extends/implements/permits
    while !cursor.is_punct('{') {
        if cursor.at_end() {
            return Err(cursor.error(format!("expected body of '{}'", name)));
        }
        if cursor.is_punct('(') {
            cursor.skip_balanced('(', ')')?;
        } else if cursor.is_punct('<') {
            cursor.skip_balanced('<', '>')?;
        } else {
            cursor.bump();
        }
    }

    let body_open = cursor.offset();
    cursor.bump();

    let mut decl = TypeDecl {
        name,
        kind,
        annotations: modifiers.annotations,
        start,
        body_open,
        body_close: body_open,
        first_member: None,
        fields: Vec::new(),
        constructors: Vec::new(),
        methods: Vec::new(),
        nested: Vec::new(),
    };

    if kind == TypeKind::Enum {
        let constants_start = cursor.offset();
        skip_enum_constants(cursor)?;
        if cursor.prev_end() > constants_start {
            decl.first_member = Some(constants_start);
        }
    }

    loop {
        if cursor.at_end() {
            return Err(SyntaxError::new(
                format!("unclosed body of '{}'", decl.name),
                body_open,
            ));
        }
        if cursor.is_punct('}') {
            decl.body_close = cursor.offset();
            cursor.bump();
            return Ok(decl);
        }
        if cursor.eat_punct(';') {
            continue;
        }
        let member_start = cursor.offset();
        decl.first_member.get_or_insert(member_start);
        parse_member(cursor, &mut decl, member_start)?;
    }
}

fn parse_member(
    cursor: &mut Cursor<'_, '_>,
    decl: &mut TypeDecl,
    start: usize,
) -> Result<(), SyntaxError> {
    let modifiers = parse_modifiers(cursor)?;

    if cursor.is_punct('{') {
        // instance or static initializer
        return cursor.skip_balanced('{', '}');
    }

    let starts_type = cursor.is_ident("class")
        || cursor.is_ident("interface")
        || cursor.is_ident("enum")
        || (cursor.is_ident("record") && cursor.peek_at(1).is_some_and(|t| t.kind == TokenKind::Ident))
        || (cursor.is_punct('@') && cursor.peek_at(1).is_some_and(|t| t.is_ident("interface")));
    if starts_type {
        let nested = parse_type_decl(cursor, start, modifiers)?;
        decl.nested.push(nested);
        return Ok(());
    }

    if cursor.is_punct('<') {
        cursor.skip_balanced('<', '>')?;
    }

    if cursor.is_ident(&decl.name) && cursor.peek_at(1).is_some_and(|t| t.is_punct('(')) {
        cursor.bump();
        let params = parse_params(cursor)?;
        while !cursor.is_punct('{') {
            if cursor.at_end() {
                return Err(cursor.error("expected constructor body"));
            }
            cursor.bump();
        }
        cursor.skip_balanced('{', '}')?;
        decl.constructors.push(ConstructorDecl {
            annotations: modifiers.annotations,
            params,
            start,
            end: cursor.prev_end(),
        });
        return Ok(());
    }

    if decl.kind == TypeKind::Record
        && cursor.is_ident(&decl.name)
        && cursor.peek_at(1).is_some_and(|t| t.is_punct('{'))
    {
        // compact canonical constructor
        cursor.bump();
        return cursor.skip_balanced('{', '}');
    }

    let ty = parse_type(cursor)?;
    let name = cursor.expect_ident()?.to_string();

    if cursor.is_punct('(') {
        let params = parse_params(cursor)?;
        skip_method_tail(cursor)?;
        decl.methods.push(MethodDecl {
            name,
            annotations: modifiers.annotations,
            params,
            start,
            end: cursor.prev_end(),
        });
        return Ok(());
    }

    let first_field = decl.fields.len();
    let mut name = name;
    loop {
        let mut field_ty = ty.clone();
        field_ty.dims += skip_dims(cursor);
        if cursor.eat_punct('=') {
            skip_initializer(cursor)?;
        }
        decl.fields.push(FieldDecl {
            name,
            ty: field_ty,
            annotations: modifiers.annotations.clone(),
            modifiers: modifiers.keywords.clone(),
            start,
            end: start,
        });
        if cursor.eat_punct(',') {
            name = cursor.expect_ident()?.to_string();
            continue;
        }
        cursor.expect_punct(';')?;
        break;
    }
    let end = cursor.prev_end();
    for field in &mut decl.fields[first_field..] {
        field.end = end;
    }
    Ok(())
}

fn parse_params(cursor: &mut Cursor<'_, '_>) -> Result<Vec<ParamDecl>, SyntaxError> {
    cursor.expect_punct('(')?;
    let mut params = Vec::new();
    if cursor.eat_punct(')') {
        return Ok(params);
    }
    loop {
        parse_modifiers(cursor)?;
        let mut ty = parse_type(cursor)?;
        skip_annotations(cursor)?;
        if cursor.is_punct('.')
            && cursor.peek_at(1).is_some_and(|t| t.is_punct('.'))
            && cursor.peek_at(2).is_some_and(|t| t.is_punct('.'))
        {
            cursor.bump();
            cursor.bump();
            cursor.bump();
            ty.dims += 1;
        }
        let mut name = cursor.expect_ident()?.to_string();
        // receiver parameter `Outer.this`
        while cursor.eat_punct('.') {
            name = cursor.expect_ident()?.to_string();
        }
        ty.dims += skip_dims(cursor);
        if name != "this" {
            params.push(ParamDecl { name, ty });
        }
        if cursor.eat_punct(',') {
            continue;
        }
        cursor.expect_punct(')')?;
        return Ok(params);
    }
}

fn skip_dims(cursor: &mut Cursor<'_, '_>) -> usize {
    let mut dims = 0;
    while cursor.is_punct('[') && cursor.peek_at(1).is_some_and(|t| t.is_punct(']')) {
        cursor.bump();
        cursor.bump();
        dims += 1;
    }
    dims
}

/// Skip `throws ...`, an annotation element default and the body or `;`.
fn skip_method_tail(cursor: &mut Cursor<'_, '_>) -> Result<(), SyntaxError> {
    loop {
        if cursor.eat_punct(';') {
            return Ok(());
        }
        if cursor.is_punct('{') {
            cursor.skip_balanced('{', '}')?;
            // `default { ... };` in annotation types
            cursor.eat_punct(';');
            return Ok(());
        }
        if cursor.at_end() {
            return Err(cursor.error("expected method body"));
        }
        if cursor.is_punct('(') {
            cursor.skip_balanced('(', ')')?;
        } else {
            cursor.bump();
        }
    }
}

/// Skip a field initializer up to the `;` or the `,` that starts the next
/// declarator. A comma at nesting depth zero only ends the initializer when
/// it is followed by `name =`, `name,`, `name;` or `name[`; otherwise it
/// belongs to a generic argument list such as `new HashMap<A, B>()`.
fn skip_initializer(cursor: &mut Cursor<'_, '_>) -> Result<(), SyntaxError> {
    let start = cursor.offset();
    let mut depth = 0usize;
    loop {
        let Some(token) = cursor.peek() else {
            return Err(SyntaxError::new("unterminated field initializer", start));
        };
        if depth == 0 {
            if token.is_punct(';') {
                return Ok(());
            }
            if token.is_punct(',') && starts_declarator(cursor) {
                return Ok(());
            }
        }
        if token.is_punct('(') || token.is_punct('[') || token.is_punct('{') {
            depth += 1;
        } else if token.is_punct(')') || token.is_punct(']') || token.is_punct('}') {
            depth = depth
                .checked_sub(1)
                .ok_or_else(|| SyntaxError::new("unbalanced field initializer", token.start))?;
        }
        cursor.bump();
    }
}

fn starts_declarator(cursor: &Cursor<'_, '_>) -> bool {
    cursor.peek_at(1).is_some_and(|t| t.kind == TokenKind::Ident)
        && cursor.peek_at(2).is_some_and(|t| {
            t.is_punct('=') || t.is_punct(',') || t.is_punct(';') || t.is_punct('[')
        })
}

/// Skip enum constants up to and including the `;` that ends them, or up to
/// (excluding) the closing `}` of the enum body.
fn skip_enum_constants(cursor: &mut Cursor<'_, '_>) -> Result<(), SyntaxError> {
    let start = cursor.offset();
    let mut depth = 0usize;
    loop {
        let Some(token) = cursor.peek() else {
            return Err(SyntaxError::new("unterminated enum constants", start));
        };
        if depth == 0 {
            if token.is_punct(';') {
                cursor.bump();
                return Ok(());
            }
            if token.is_punct('}') {
                return Ok(());
            }
        }
        if token.is_punct('(') || token.is_punct('{') {
            depth += 1;
        } else if token.is_punct(')') || token.is_punct('}') {
            depth = depth.saturating_sub(1);
        }
        cursor.bump();
    }
}

// ============================================================================
// Tests
// ============================================================================
