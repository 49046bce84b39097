//! Test-scaffold synthesis.
//!
//! Populates a unit test class with the boilerplate a Mockito test needs:
//! one `@Mock` field per constructor-injected collaborator of the subject,
//! an `@InjectMocks` field holding the subject, and a `setUp` method that
//! initializes the mocks and constructs the subject from them.
//!
//! The pipeline, leaves first:
//!
//! 1. [`derive_subject_fqn`] maps `a.b.FooTest` to `a.b.Foo`
//! 2. [`ClassResolver`] resolves the subject through the host
//! 3. [`FieldNameSuggester`] names each collaborator field (`mRandom`)
//! 4. [`ScaffoldSynthesizer`] merges everything into the test class
//!
//! Running the synthesizer twice on the same unit yields no further edits.

mod naming;
mod report;
mod resolve;
mod synth;

#[cfg(test)]
mod fake;

pub use naming::{derive_subject_fqn, FieldNameSuggester};
pub use report::{InsertedField, ScaffoldOutcome, ScaffoldReport};
pub use resolve::ClassResolver;
pub use synth::{setup_method_text, ScaffoldSynthesizer};

/// Suffix that turns a subject class name into its test class name.
pub const TEST_CLASS_NAME_SUFFIX: &str = "Test";

/// Identifier of the field holding the subject.
pub const UNDER_TEST_FIELD_NAME: &str = "mUnderTest";

/// Fully-qualified name of Mockito's `@Mock`.
pub const MOCK_ANNOTATION_QUALIFIED_NAME: &str = "org.mockito.Mock";

/// Simple name of Mockito's `@Mock`.
pub const MOCK_ANNOTATION_SHORT_NAME: &str = "Mock";

/// Fully-qualified name of Mockito's `@InjectMocks`.
pub const INJECT_MOCKS_ANNOTATION_QUALIFIED_NAME: &str = "org.mockito.InjectMocks";

/// Simple name of Mockito's `@InjectMocks`.
pub const INJECT_MOCKS_ANNOTATION_SHORT_NAME: &str = "InjectMocks";

/// Fully-qualified name of JUnit's `@Before`.
pub const BEFORE_ANNOTATION_QUALIFIED_NAME: &str = "org.junit.Before";

/// Simple name of JUnit's `@Before`.
pub const BEFORE_ANNOTATION_SHORT_NAME: &str = "Before";

/// Annotation marking the subject's injection constructor.
pub const INJECT_ANNOTATION_SHORT_NAME: &str = "Inject";

/// Name of the generated setup method.
pub const SETUP_METHOD_NAME: &str = "setUp";

/// Prefix for member field names.
pub const FIELD_NAME_PREFIX: &str = "m";
