//! Java variable naming conventions.
//!
//! Suggests identifiers for a type the way Java code conventionally names
//! variables: the decapitalized class name first, followed by shorter
//! candidates built from its trailing camel-case words.
//!
//! | Type                   | Suggestions                        |
//! |------------------------|------------------------------------|
//! | `java.util.Random`     | `random`                           |
//! | `a.b.HttpClient`       | `httpClient`, `client`             |
//! | `a.b.HTTPClient`       | `hTTPClient`, `client`             |
//! | `java.lang.String[]`   | `strings`                          |
//! | `int`                  | `i`                                |
//! | `java.lang.Class<?>`   | `aClass`                           |

use mockgen_core::host::{SemanticType, VariableKind};

use crate::types::{TypeBase, TypeExpr};

/// Java keywords and literals that cannot be identifiers.
pub const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null", "_",
];

/// Is `name` a reserved word?
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Is `name` usable as a Java identifier?
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !is_keyword(name)
}

/// Candidate variable names for `ty`, best first. Never empty.
pub fn suggest_names(_kind: VariableKind, ty: &SemanticType) -> Vec<String> {
    let (base_name, plural) = match TypeExpr::parse(ty.canonical_text()) {
        Ok(expr) => match base_name(&expr) {
            NameBase::Primitive(name) if expr.dims == 0 => {
                return vec![name.chars().take(1).collect()];
            }
            NameBase::Primitive(name) | NameBase::Class(name) => (name, expr.dims > 0),
        },
        Err(_) => (ty.simple_name().to_string(), false),
    };

    let words = camel_words(&base_name);
    let mut candidates: Vec<String> = Vec::new();
    for start in 0..words.len() {
        let mut name = decapitalize(&words[start..].concat());
        if plural {
            name = pluralize(&name);
        }
        let name = escape_keyword(name);
        if is_identifier(&name) && !candidates.contains(&name) {
            candidates.push(name);
        }
    }

    if candidates.is_empty() {
        candidates.push(if plural { "values" } else { "value" }.to_string());
    }
    candidates
}

enum NameBase {
    Primitive(String),
    Class(String),
}

fn base_name(expr: &TypeExpr) -> NameBase {
    match &expr.base {
        TypeBase::Primitive(name) => NameBase::Primitive(name.clone()),
        TypeBase::Class(segments) => {
            NameBase::Class(segments.last().map(|s| s.name.clone()).unwrap_or_default())
        }
        TypeBase::Wildcard(Some((_, bound))) => base_name(bound),
        TypeBase::Wildcard(None) => NameBase::Class("Object".to_string()),
    }
}

/// Split at lower-to-upper transitions: `HttpClient` → `Http`, `Client`;
/// `HTTPClient` → `HTTP`, `Client`; `URL2Path` → `URL2`, `Path`.
fn camel_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        let boundary = i > 0
            && c.is_uppercase()
            && (chars[i - 1].is_lowercase()
                || chars[i - 1].is_ascii_digit()
                || chars.get(i + 1).is_some_and(|n| n.is_lowercase()) && chars[i - 1].is_uppercase());
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Lowercase the first character only.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn pluralize(name: &str) -> String {
    if name.ends_with('s') || name.ends_with('x') || name.ends_with("ch") || name.ends_with("sh") {
        format!("{}es", name)
    } else if let Some(stem) = name.strip_suffix('y') {
        if stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            format!("{}s", name)
        } else {
            format!("{}ies", stem)
        }
    } else {
        format!("{}s", name)
    }
}

/// `class` → `aClass`, `interface` → `anInterface`.
fn escape_keyword(name: String) -> String {
    if !is_keyword(&name) {
        return name;
    }
    let article = if name.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    let mut chars = name.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{}{}", article, capitalized)
}
