//! The Java host: program structure, naming and element factory services
//! over a [`ClassIndex`].

use mockgen_core::host::{
    ElementFactory, FieldNode, HostError, HostResult, NamingService, ProgramStructureService,
    SearchScope, SemanticType, VariableKind,
};

use crate::class::JavaClass;
use crate::index::ClassIndex;
use crate::naming::{is_identifier, suggest_names};
use crate::parser::parse_java;
use crate::types::TypeExpr;

/// Host services for one indexed project.
#[derive(Debug)]
pub struct JavaProject {
    index: ClassIndex,
}

impl JavaProject {
    /// Wrap a populated index.
    pub fn new(index: ClassIndex) -> Self {
        JavaProject { index }
    }

    /// The underlying class index.
    pub fn index(&self) -> &ClassIndex {
        &self.index
    }
}

impl ProgramStructureService for JavaProject {
    type Class = JavaClass;

    fn find_class(&self, fqn: &str, scope: SearchScope) -> Option<JavaClass> {
        self.index.class(fqn, scope)
    }

    fn type_by_name(&self, fqn: &str, scope: SearchScope) -> SemanticType {
        if self.index.contains(fqn, scope) {
            SemanticType::resolved(fqn)
        } else {
            SemanticType::unresolved(fqn)
        }
    }
}

impl NamingService for JavaProject {
    fn suggest_variable_names(&self, kind: VariableKind, ty: &SemanticType) -> Vec<String> {
        suggest_names(kind, ty)
    }
}

// ============================================================================
// Element Factory
// ============================================================================

/// A detached `private` field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaField {
    /// Identifier.
    pub name: String,
    /// Declared type.
    pub ty: SemanticType,
    /// Annotation simple names, in the order added.
    pub annotations: Vec<String>,
}

impl FieldNode for JavaField {
    fn add_annotation(&mut self, simple_name: &str) {
        if !self.annotations.iter().any(|a| a == simple_name) {
            self.annotations.push(simple_name.to_string());
        }
    }
}

/// A detached method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaMethod {
    /// Method name.
    pub name: String,
    /// Declaration text, unindented, without trailing whitespace.
    pub text: String,
}

impl ElementFactory for JavaProject {
    type Field = JavaField;
    type Method = JavaMethod;

    fn create_field(&self, name: &str, ty: &SemanticType) -> HostResult<JavaField> {
        if !is_identifier(name) {
            return Err(HostError::InvalidElement {
                message: format!("'{}' is not a valid field name", name),
            });
        }
        TypeExpr::parse(ty.canonical_text()).map_err(|e| HostError::InvalidElement {
            message: format!("'{}' is not a valid type: {}", ty.canonical_text(), e),
        })?;
        Ok(JavaField {
            name: name.to_string(),
            ty: ty.clone(),
            annotations: Vec::new(),
        })
    }

    fn create_method_from_text(&self, text: &str) -> HostResult<JavaMethod> {
        let wrapped = format!("class __Method {{\n{}\n}}\n", text);
        let file = parse_java(&wrapped).map_err(|e| HostError::InvalidElement {
            message: e.message,
        })?;

        let decl = match file.types.as_slice() {
            [decl] => decl,
            _ => {
                return Err(HostError::InvalidElement {
                    message: "method text spans more than one declaration".to_string(),
                })
            }
        };
        let only_method = decl.methods.len() == 1
            && decl.fields.is_empty()
            && decl.constructors.is_empty()
            && decl.nested.is_empty();
        if !only_method {
            return Err(HostError::InvalidElement {
                message: "text is not a single method declaration".to_string(),
            });
        }

        Ok(JavaMethod {
            name: decl.methods[0].name.clone(),
            text: text.trim_end().to_string(),
        })
    }
}
