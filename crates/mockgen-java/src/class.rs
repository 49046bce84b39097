//! Class handles built from parsed declarations.

use mockgen_core::host::{
    ClassHandle, ConstructorDescriptor, FieldDescriptor, ParameterDescriptor,
};

use crate::parser::{JavaFile, TypeDecl};
use crate::resolve::{KnownClasses, TypeResolver};

/// A snapshot of one class declaration with every type resolved.
///
/// Handles are detached from the source they were built from: a handle
/// taken before an edit keeps describing the class as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaClass {
    qualified_name: String,
    fields: Vec<FieldDescriptor>,
    methods: Vec<String>,
    constructors: Vec<ConstructorDescriptor>,
}

impl JavaClass {
    /// Build a handle for `decl`, found at `path` (`Outer.Inner`) in `file`.
    pub fn from_decl<K>(file: &JavaFile, path: &str, decl: &TypeDecl, known: &K) -> Self
    where
        K: KnownClasses + ?Sized,
    {
        let resolver = TypeResolver::new(file, known);
        JavaClass {
            qualified_name: file.qualify(path),
            fields: decl
                .fields
                .iter()
                .map(|f| FieldDescriptor {
                    name: f.name.clone(),
                    ty: resolver.semantic_type(&f.ty),
                })
                .collect(),
            methods: decl.methods.iter().map(|m| m.name.clone()).collect(),
            constructors: decl
                .constructors
                .iter()
                .map(|c| ConstructorDescriptor {
                    parameters: c
                        .params
                        .iter()
                        .map(|p| ParameterDescriptor {
                            name: p.name.clone(),
                            ty: resolver.semantic_type(&p.ty),
                        })
                        .collect(),
                    annotations: c.annotations.clone(),
                })
                .collect(),
        }
    }

    /// Simple name of the class.
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

impl ClassHandle for JavaClass {
    fn qualified_name(&self) -> Option<String> {
        Some(self.qualified_name.clone())
    }

    fn declared_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn declared_method_names(&self) -> Vec<&str> {
        self.methods.iter().map(String::as_str).collect()
    }

    fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }
}
