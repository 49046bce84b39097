//! What a synthesis run did.

use serde::{Deserialize, Serialize};

/// Terminal state of a synthesis run.
///
/// Only [`ScaffoldOutcome::Generated`] and [`ScaffoldOutcome::UpToDate`]
/// describe a full pass. The others name the recoverable condition that cut
/// the pass short; edits made before that point (e.g. the subject field
/// when the subject cannot be resolved) are still reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaffoldOutcome {
    /// The unit declares no class to scaffold.
    NoTestClass,
    /// The test class name does not end with the test suffix.
    NameNotDerivable,
    /// The subject class is not on the search path.
    SubjectNotFound,
    /// No constructor of the subject is annotated with `Inject`.
    NoInjectableConstructor,
    /// Mocks and subject were processed; at least one edit was made.
    Generated,
    /// Mocks and subject were processed; nothing was missing.
    UpToDate,
}

impl ScaffoldOutcome {
    /// Stable snake_case name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaffoldOutcome::NoTestClass => "no_test_class",
            ScaffoldOutcome::NameNotDerivable => "name_not_derivable",
            ScaffoldOutcome::SubjectNotFound => "subject_not_found",
            ScaffoldOutcome::NoInjectableConstructor => "no_injectable_constructor",
            ScaffoldOutcome::Generated => "generated",
            ScaffoldOutcome::UpToDate => "up_to_date",
        }
    }
}

/// A field inserted into the test class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertedField {
    /// Field identifier.
    pub name: String,
    /// Canonical text of the field type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Annotation simple name.
    pub annotation: String,
}

/// Summary of one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldReport {
    /// Fully-qualified name of the test class.
    pub test_class: Option<String>,
    /// Fully-qualified name of the subject.
    pub subject: Option<String>,
    /// Terminal state.
    pub outcome: ScaffoldOutcome,
    /// `@Mock` fields inserted, in constructor-parameter order.
    pub mocks: Vec<InsertedField>,
    /// The `@InjectMocks` field, when inserted.
    pub subject_field: Option<InsertedField>,
    /// Whether the `setUp` method was inserted.
    pub setup_method: bool,
    /// Imports newly added to the unit.
    pub imports: Vec<String>,
}

impl ScaffoldReport {
    pub(crate) fn new(outcome: ScaffoldOutcome) -> Self {
        ScaffoldReport {
            test_class: None,
            subject: None,
            outcome,
            mocks: Vec::new(),
            subject_field: None,
            setup_method: false,
            imports: Vec::new(),
        }
    }

    /// Whether the run edited the unit.
    pub fn changed(&self) -> bool {
        !self.mocks.is_empty()
            || self.subject_field.is_some()
            || self.setup_method
            || !self.imports.is_empty()
    }

    /// All inserted fields in insertion order.
    pub fn inserted_fields(&self) -> impl Iterator<Item = &InsertedField> {
        self.mocks.iter().chain(self.subject_field.iter())
    }
}
