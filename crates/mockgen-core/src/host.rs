//! Host interfaces and the data model they exchange.
//!
//! The scaffold engine never parses or prints source code itself. Everything
//! it knows about the program comes through the traits in this module, which
//! a language adapter (e.g. `mockgen-java`) implements:
//!
//! | Trait                     | Role                                              |
//! |---------------------------|---------------------------------------------------|
//! | [`ProgramStructureService`] | Resolves fully-qualified names to class handles |
//! | [`ElementFactory`]        | Builds field and method nodes                     |
//! | [`NamingService`]         | Suggests variable names for a type                |
//! | [`CompilationUnit`]       | One source file; accepts appended members         |
//! | [`ImportOrganizer`]       | Idempotently adds class imports to a unit         |
//!
//! # Ownership
//!
//! Class handles and nodes belong to the host. The engine only holds them for
//! the duration of one invocation and hands created nodes back to the unit,
//! which takes ownership on insertion.
//!
//! # Type Equality
//!
//! [`SemanticType`] compares and hashes by canonical text only. Whether the
//! host managed to resolve the type is carried along for rendering but never
//! takes part in equality.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Scopes and Kinds
// ============================================================================

/// Search scope for class lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Everything indexed: project sources and libraries.
    All,
    /// Project sources only.
    Project,
}

impl SearchScope {
    /// Whether classes that come from libraries are visible in this scope.
    pub fn includes_libraries(&self) -> bool {
        matches!(self, SearchScope::All)
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchScope::All => write!(f, "all"),
            SearchScope::Project => write!(f, "project"),
        }
    }
}

/// Kind of variable a name is suggested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Instance or static field.
    Field,
    /// Method or constructor parameter.
    Parameter,
    /// Local variable.
    Local,
}

// ============================================================================
// Semantic Type
// ============================================================================

/// A type expression as seen by the host.
///
/// The canonical text is stable, fully-qualified and keeps generic
/// arguments, e.g. `java.util.List<java.lang.String>`.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct SemanticType {
    canonical: String,
    resolved: bool,
}

impl SemanticType {
    /// A type the host resolved to a known declaration (or a primitive).
    pub fn resolved(canonical: impl Into<String>) -> Self {
        SemanticType {
            canonical: canonical.into(),
            resolved: true,
        }
    }

    /// A type whose declaration the host could not find.
    pub fn unresolved(canonical: impl Into<String>) -> Self {
        SemanticType {
            canonical: canonical.into(),
            resolved: false,
        }
    }

    /// Canonical text of the type.
    pub fn canonical_text(&self) -> &str {
        &self.canonical
    }

    /// Whether the host resolved the type.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Simple name of the raw type: generic arguments, array brackets and
    /// the package/outer-class qualifier are dropped.
    ///
    /// `java.util.Map<K, V>` → `Map`, `a.b.Outer.Inner[]` → `Inner`.
    pub fn simple_name(&self) -> &str {
        let raw = self
            .canonical
            .split(['<', '['])
            .next()
            .unwrap_or(&self.canonical)
            .trim();
        raw.rsplit('.').next().unwrap_or(raw)
    }
}

impl PartialEq for SemanticType {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Hash for SemanticType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// A declared field of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared identifier.
    pub name: String,
    /// Declared type.
    pub ty: SemanticType,
}

/// A constructor or method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Declared identifier (informational).
    pub name: String,
    /// Parameter type.
    pub ty: SemanticType,
}

/// A declared constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorDescriptor {
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Annotation names as written (`Inject`, `javax.inject.Inject`, ...).
    pub annotations: Vec<String>,
}

impl ConstructorDescriptor {
    /// Check for an annotation by simple name, ignoring any qualifier the
    /// source used.
    pub fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.rsplit('.').next() == Some(simple_name))
    }
}

/// An addressable class, either inside a compilation unit or on the search
/// path.
pub trait ClassHandle {
    /// Fully-qualified name; `None` for classes that have none.
    fn qualified_name(&self) -> Option<String>;

    /// Fields declared directly in the class, in declaration order.
    fn declared_fields(&self) -> &[FieldDescriptor];

    /// Names of methods declared directly in the class.
    fn declared_method_names(&self) -> Vec<&str>;

    /// Constructors in declaration order.
    fn constructors(&self) -> &[ConstructorDescriptor];
}

// ============================================================================
// Host Errors
// ============================================================================

/// Errors raised by the host while building or inserting elements.
///
/// The engine never recovers from these; they are propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Text handed to the element factory is not a valid element.
    #[error("invalid element text: {message}")]
    InvalidElement { message: String },

    /// The class handle does not address a class of this unit.
    #[error("class not found in compilation unit: {class}")]
    ForeignClass { class: String },

    /// The host refused the edit.
    #[error("edit rejected: {message}")]
    Rejected { message: String },
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

// ============================================================================
// Host Services
// ============================================================================

/// Resolves names against the indexed program.
pub trait ProgramStructureService {
    /// Class handle produced by lookups.
    type Class: ClassHandle;

    /// Find a class by fully-qualified name; `None` when it is not visible in
    /// `scope`.
    fn find_class(&self, fqn: &str, scope: SearchScope) -> Option<Self::Class>;

    /// Build a type reference for `fqn`. When the class is not visible in
    /// `scope` the reference is returned unresolved (dangling) rather than
    /// failing.
    fn type_by_name(&self, fqn: &str, scope: SearchScope) -> SemanticType;
}

/// Host naming conventions.
pub trait NamingService {
    /// Candidate identifiers for a variable of type `ty`, best first.
    /// Hosts return at least one candidate.
    fn suggest_variable_names(&self, kind: VariableKind, ty: &SemanticType) -> Vec<String>;
}

/// A freshly created field node that has not been inserted yet.
pub trait FieldNode {
    /// Attach an annotation, written with its simple name.
    fn add_annotation(&mut self, simple_name: &str);
}

/// Creates detached element nodes.
pub trait ElementFactory {
    /// Field node type.
    type Field: FieldNode;
    /// Method node type.
    type Method;

    /// Create a `private` field declaration.
    fn create_field(&self, name: &str, ty: &SemanticType) -> HostResult<Self::Field>;

    /// Parse a complete method declaration (annotations included).
    fn create_method_from_text(&self, text: &str) -> HostResult<Self::Method>;
}

/// A single source file viewed through the host.
pub trait CompilationUnit {
    /// Class handle for classes of this unit.
    type Class: ClassHandle;
    /// Field nodes accepted by [`CompilationUnit::add_field`].
    type Field;
    /// Method nodes accepted by [`CompilationUnit::add_method`].
    type Method;

    /// Top-level classes in declaration order.
    fn top_level_classes(&self) -> Vec<Self::Class>;

    /// The class treated as the unit test class. Defaults to the first
    /// top-level class.
    fn test_class(&self) -> Option<Self::Class> {
        self.top_level_classes().into_iter().next()
    }

    /// Append a field to `class`. Later reads through the unit reflect it.
    fn add_field(&mut self, class: &Self::Class, field: Self::Field) -> HostResult<()>;

    /// Append a method to `class`. Later reads through the unit reflect it.
    fn add_method(&mut self, class: &Self::Class, method: Self::Method) -> HostResult<()>;
}

/// Adds class imports to a compilation unit.
pub trait ImportOrganizer<U: ?Sized> {
    /// Import `fqn` into `unit`. Idempotent; returns `true` when an import
    /// was actually added.
    fn add_class_import(&self, unit: &mut U, fqn: &str) -> HostResult<bool>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    mod semantic_type_tests {
        use super::*;

        #[test]
        fn equality_ignores_resolution() {
            let a = SemanticType::resolved("a.b.Foo");
            let b = SemanticType::unresolved("a.b.Foo");
            assert_eq!(a, b);

            let mut set = HashSet::new();
            set.insert(a);
            assert!(set.contains(&b));
        }

        #[test]
        fn simple_name_strips_qualifier_generics_and_arrays() {
            assert_eq!(SemanticType::resolved("java.util.Random").simple_name(), "Random");
            assert_eq!(
                SemanticType::resolved("java.util.Map<java.lang.String, a.B>").simple_name(),
                "Map"
            );
            assert_eq!(SemanticType::resolved("a.b.Outer.Inner[]").simple_name(), "Inner");
            assert_eq!(SemanticType::resolved("int").simple_name(), "int");
        }

        #[test]
        fn display_is_canonical_text() {
            let ty = SemanticType::resolved("java.util.List<java.lang.String>");
            assert_eq!(ty.to_string(), "java.util.List<java.lang.String>");
        }
    }

    mod descriptor_tests {
        use super::*;

        #[test]
        fn has_annotation_matches_simple_and_qualified() {
            let ctor = ConstructorDescriptor {
                parameters: vec![],
                annotations: vec!["javax.inject.Inject".to_string()],
            };
            assert!(ctor.has_annotation("Inject"));

            let ctor = ConstructorDescriptor {
                parameters: vec![],
                annotations: vec!["Inject".to_string()],
            };
            assert!(ctor.has_annotation("Inject"));
            assert!(!ctor.has_annotation("Named"));
        }

        #[test]
        fn has_annotation_is_case_sensitive() {
            let ctor = ConstructorDescriptor {
                parameters: vec![],
                annotations: vec!["inject".to_string(), "Injected".to_string()],
            };
            assert!(!ctor.has_annotation("Inject"));
        }
    }

    #[test]
    fn search_scope_library_visibility() {
        assert!(SearchScope::All.includes_libraries());
        assert!(!SearchScope::Project.includes_libraries());
        assert_eq!(SearchScope::Project.to_string(), "project");
    }
}
