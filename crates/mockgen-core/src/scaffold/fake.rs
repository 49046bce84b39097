//! In-memory host used by the engine's unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::host::{
    ClassHandle, CompilationUnit, ConstructorDescriptor, ElementFactory, FieldDescriptor,
    FieldNode, HostError, HostResult, ImportOrganizer, NamingService, ParameterDescriptor,
    ProgramStructureService, SearchScope, SemanticType, VariableKind,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeClass {
    fqn: String,
    fields: Vec<FieldDescriptor>,
    methods: Vec<String>,
    constructors: Vec<ConstructorDescriptor>,
}

impl FakeClass {
    pub(crate) fn new(fqn: &str) -> Self {
        FakeClass {
            fqn: fqn.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn with_field(mut self, name: &str, ty: &str) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.to_string(),
            ty: SemanticType::resolved(ty),
        });
        self
    }

    pub(crate) fn with_method(mut self, name: &str) -> Self {
        self.methods.push(name.to_string());
        self
    }

    pub(crate) fn with_constructor(mut self, annotations: &[&str], params: &[&str]) -> Self {
        self.constructors.push(ConstructorDescriptor {
            parameters: params
                .iter()
                .enumerate()
                .map(|(i, ty)| ParameterDescriptor {
                    name: format!("p{}", i),
                    ty: SemanticType::resolved(*ty),
                })
                .collect(),
            annotations: annotations.iter().map(|a| a.to_string()).collect(),
        });
        self
    }
}

impl ClassHandle for FakeClass {
    fn qualified_name(&self) -> Option<String> {
        Some(self.fqn.clone())
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

#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    classes: HashMap<String, (FakeClass, bool)>,
    lookups: RefCell<Vec<(String, SearchScope)>>,
    type_lookups: RefCell<Vec<(String, SearchScope)>>,
    reject_methods: bool,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        FakeHost::default()
    }

    pub(crate) fn with_class(mut self, class: FakeClass) -> Self {
        self.classes.insert(class.fqn.clone(), (class, false));
        self
    }

    pub(crate) fn with_library_class(mut self, class: FakeClass) -> Self {
        self.classes.insert(class.fqn.clone(), (class, true));
        self
    }

    pub(crate) fn rejecting_methods(mut self) -> Self {
        self.reject_methods = true;
        self
    }

    pub(crate) fn lookups(&self) -> Vec<(String, SearchScope)> {
        self.lookups.borrow().clone()
    }

    pub(crate) fn type_lookups(&self) -> Vec<(String, SearchScope)> {
        self.type_lookups.borrow().clone()
    }

    fn visible(&self, fqn: &str, scope: SearchScope) -> Option<&FakeClass> {
        self.classes
            .get(fqn)
            .filter(|(_, library)| !library || scope.includes_libraries())
            .map(|(class, _)| class)
    }
}

impl ProgramStructureService for FakeHost {
    type Class = FakeClass;

    fn find_class(&self, fqn: &str, scope: SearchScope) -> Option<FakeClass> {
        self.lookups.borrow_mut().push((fqn.to_string(), scope));
        self.visible(fqn, scope).cloned()
    }

    fn type_by_name(&self, fqn: &str, scope: SearchScope) -> SemanticType {
        self.type_lookups.borrow_mut().push((fqn.to_string(), scope));
        match self.visible(fqn, scope) {
            Some(_) => SemanticType::resolved(fqn),
            None => SemanticType::unresolved(fqn),
        }
    }
}

impl NamingService for FakeHost {
    fn suggest_variable_names(&self, _kind: VariableKind, ty: &SemanticType) -> Vec<String> {
        let simple = ty.simple_name();
        let mut chars = simple.chars();
        match chars.next() {
            Some(first) => vec![first.to_lowercase().chain(chars).collect()],
            None => vec![],
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FakeField {
    pub(crate) name: String,
    pub(crate) ty: SemanticType,
    pub(crate) annotations: Vec<String>,
}

impl FieldNode for FakeField {
    fn add_annotation(&mut self, simple_name: &str) {
        self.annotations.push(simple_name.to_string());
    }
}

impl ElementFactory for FakeHost {
    type Field = FakeField;
    type Method = String;

    fn create_field(&self, name: &str, ty: &SemanticType) -> HostResult<FakeField> {
        Ok(FakeField {
            name: name.to_string(),
            ty: ty.clone(),
            annotations: Vec::new(),
        })
    }

    fn create_method_from_text(&self, text: &str) -> HostResult<String> {
        if self.reject_methods {
            return Err(HostError::Rejected {
                message: "write access denied".to_string(),
            });
        }
        if !text.contains('(') {
            return Err(HostError::InvalidElement {
                message: text.to_string(),
            });
        }
        Ok(text.to_string())
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeUnit {
    class: Option<FakeClass>,
    pub(crate) fields: Vec<FakeField>,
    pub(crate) methods: Vec<String>,
    pub(crate) imports: Vec<String>,
}

impl FakeUnit {
    pub(crate) fn empty() -> Self {
        FakeUnit::default()
    }

    pub(crate) fn with_class(class: FakeClass) -> Self {
        FakeUnit {
            class: Some(class),
            ..Default::default()
        }
    }

    /// `@Annotation canonical.Type name` per inserted field.
    pub(crate) fn field_summaries(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| format!("@{} {} {}", f.annotations.join(" @"), f.ty, f.name))
            .collect()
    }

    fn class_mut(&mut self, class: &FakeClass) -> HostResult<&mut FakeClass> {
        match self.class.as_mut() {
            Some(own) if own.fqn == class.fqn => Ok(own),
            _ => Err(HostError::ForeignClass {
                class: class.fqn.clone(),
            }),
        }
    }
}

impl CompilationUnit for FakeUnit {
    type Class = FakeClass;
    type Field = FakeField;
    type Method = String;

    fn top_level_classes(&self) -> Vec<FakeClass> {
        self.class.iter().cloned().collect()
    }

    fn add_field(&mut self, class: &FakeClass, field: FakeField) -> HostResult<()> {
        let own = self.class_mut(class)?;
        own.fields.push(FieldDescriptor {
            name: field.name.clone(),
            ty: field.ty.clone(),
        });
        self.fields.push(field);
        Ok(())
    }

    fn add_method(&mut self, class: &FakeClass, method: String) -> HostResult<()> {
        let name = method
            .split('(')
            .next()
            .and_then(|head| head.split_whitespace().last())
            .unwrap_or_default()
            .to_string();
        self.class_mut(class)?.methods.push(name);
        self.methods.push(method);
        Ok(())
    }
}

pub(crate) struct FakeImports;

impl ImportOrganizer<FakeUnit> for FakeImports {
    fn add_class_import(&self, unit: &mut FakeUnit, fqn: &str) -> HostResult<bool> {
        if unit.imports.iter().any(|i| i == fqn) {
            return Ok(false);
        }
        unit.imports.push(fqn.to_string());
        Ok(true)
    }
}
