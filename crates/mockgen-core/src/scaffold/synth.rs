//! The scaffold synthesizer: merges mocks, subject and setup into a test class.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::host::{
    ClassHandle, CompilationUnit, ConstructorDescriptor, ElementFactory, FieldNode,
    HostResult, ImportOrganizer, NamingService, ProgramStructureService, SearchScope,
};

use super::naming::{derive_subject_fqn, FieldNameSuggester};
use super::report::{InsertedField, ScaffoldOutcome, ScaffoldReport};
use super::resolve::{is_plausible_fqn, ClassResolver};
use super::{
    BEFORE_ANNOTATION_QUALIFIED_NAME, BEFORE_ANNOTATION_SHORT_NAME,
    INJECT_ANNOTATION_SHORT_NAME, INJECT_MOCKS_ANNOTATION_QUALIFIED_NAME,
    INJECT_MOCKS_ANNOTATION_SHORT_NAME, MOCK_ANNOTATION_QUALIFIED_NAME,
    MOCK_ANNOTATION_SHORT_NAME, SETUP_METHOD_NAME, UNDER_TEST_FIELD_NAME,
};

/// Source text of the generated setup method.
///
/// ```
/// use mockgen_core::scaffold::setup_method_text;
///
/// let text = setup_method_text("Foo", &["mRandom".to_string(), "mList".to_string()]);
/// assert!(text.contains("mUnderTest = new Foo(mRandom, mList);"));
/// ```
pub fn setup_method_text(subject_simple_name: &str, arguments: &[String]) -> String {
    format!(
        "@{before}\npublic void {setup}() {{\n    initMocks(this);\n\n    {field} = new {subject}({args});\n}}\n",
        before = BEFORE_ANNOTATION_SHORT_NAME,
        setup = SETUP_METHOD_NAME,
        field = UNDER_TEST_FIELD_NAME,
        subject = subject_simple_name,
        args = arguments.join(", "),
    )
}

/// Populates a test class with Mockito boilerplate.
///
/// Stateless across invocations. Each call snapshots the declared field
/// types of the test class first and only inserts what is missing, so a
/// second call on the same unit is a no-op.
///
/// Mock fields use the dedup-by-type policy: a constructor parameter whose
/// type already has a field (declared before the run, or inserted earlier in
/// the same run) gets no new field, and the setup method passes the existing
/// field instead. Distinct types that suggest the same identifier get a
/// numeric suffix (`mList`, `mList2`).
#[derive(Debug)]
pub struct ScaffoldSynthesizer<'h, H: ?Sized> {
    host: &'h H,
    resolver: ClassResolver<'h, H>,
    suggester: FieldNameSuggester<'h, H>,
}

impl<'h, H> ScaffoldSynthesizer<'h, H>
where
    H: ProgramStructureService + ElementFactory + NamingService + ?Sized,
{
    /// Create a synthesizer over the host services.
    pub fn new(host: &'h H) -> Self {
        ScaffoldSynthesizer {
            host,
            resolver: ClassResolver::new(host),
            suggester: FieldNameSuggester::new(host),
        }
    }

    /// Run one synthesis pass over `unit`.
    ///
    /// Recoverable conditions (no derivable name, unresolved subject, no
    /// injection constructor) end the pass early and are reported through
    /// [`ScaffoldReport::outcome`]. Host errors are returned unchanged.
    pub fn synthesize<U, I>(&self, unit: &mut U, imports: &I) -> HostResult<ScaffoldReport>
    where
        U: CompilationUnit<Field = H::Field, Method = H::Method>,
        I: ImportOrganizer<U> + ?Sized,
    {
        let Some(test_class) = unit.test_class() else {
            debug!("compilation unit declares no class");
            return Ok(ScaffoldReport::new(ScaffoldOutcome::NoTestClass));
        };

        let existing_types: HashSet<String> = test_class
            .declared_fields()
            .iter()
            .map(|field| field.ty.canonical_text().to_string())
            .collect();

        let mut report = ScaffoldReport::new(ScaffoldOutcome::UpToDate);
        report.test_class = test_class.qualified_name();

        let subject_fqn = match report.test_class.as_deref().and_then(derive_subject_fqn) {
            Some(fqn) if is_plausible_fqn(fqn) => fqn.to_string(),
            _ => {
                debug!(test_class = ?report.test_class, "no subject name derivable");
                report.outcome = ScaffoldOutcome::NameNotDerivable;
                return Ok(report);
            }
        };
        report.subject = Some(subject_fqn.clone());

        let short_circuit = self.insert_mocks(unit, imports, &test_class, &subject_fqn, &mut report)?;

        if !existing_types.contains(&subject_fqn) {
            self.insert_under_test_field(unit, imports, &test_class, &subject_fqn, &mut report)?;
        } else {
            debug!(subject = %subject_fqn, "subject field already declared");
        }

        report.outcome = match short_circuit {
            Some(outcome) => outcome,
            None if report.changed() => ScaffoldOutcome::Generated,
            None => ScaffoldOutcome::UpToDate,
        };
        info!(
            outcome = report.outcome.as_str(),
            mocks = report.mocks.len(),
            setup = report.setup_method,
            "scaffold pass finished"
        );
        Ok(report)
    }

    /// Mock fields, setup method and the `@Mock` import.
    ///
    /// Returns the outcome that cut the phase short, if any.
    fn insert_mocks<U, I>(
        &self,
        unit: &mut U,
        imports: &I,
        test_class: &U::Class,
        subject_fqn: &str,
        report: &mut ScaffoldReport,
    ) -> HostResult<Option<ScaffoldOutcome>>
    where
        U: CompilationUnit<Field = H::Field, Method = H::Method>,
        I: ImportOrganizer<U> + ?Sized,
    {
        let Some(subject) = self.resolver.resolve(subject_fqn, SearchScope::All) else {
            debug!(subject = %subject_fqn, "subject not on the search path");
            return Ok(Some(ScaffoldOutcome::SubjectNotFound));
        };

        let Some(constructor) = injection_constructor(subject.constructors()) else {
            debug!(subject = %subject_fqn, "no injection constructor");
            return Ok(Some(ScaffoldOutcome::NoInjectableConstructor));
        };

        // canonical type -> field name, first declaration wins
        let mut known: HashMap<String, String> = HashMap::new();
        // identifiers in use; distinct types may suggest the same name
        let mut taken: HashSet<String> = HashSet::new();
        taken.insert(UNDER_TEST_FIELD_NAME.to_string());
        for field in test_class.declared_fields() {
            known
                .entry(field.ty.canonical_text().to_string())
                .or_insert_with(|| field.name.clone());
            taken.insert(field.name.clone());
        }

        let mut added_mocks = false;
        for parameter in &constructor.parameters {
            let canonical = parameter.ty.canonical_text();
            if known.contains_key(canonical) {
                debug!(ty = %canonical, "mock type already declared");
                continue;
            }

            let name = unique_field_name(self.suggester.mock_field_name(&parameter.ty), &taken);
            taken.insert(name.clone());
            let mut field = self.host.create_field(&name, &parameter.ty)?;
            field.add_annotation(MOCK_ANNOTATION_SHORT_NAME);
            unit.add_field(test_class, field)?;
            debug!(field = %name, ty = %canonical, "inserted mock field");

            known.insert(canonical.to_string(), name.clone());
            report.mocks.push(InsertedField {
                name,
                type_name: canonical.to_string(),
                annotation: MOCK_ANNOTATION_SHORT_NAME.to_string(),
            });
            added_mocks = true;
        }

        if test_class
            .declared_method_names()
            .contains(&SETUP_METHOD_NAME)
        {
            debug!("setUp already declared");
        } else {
            let arguments: Vec<String> = constructor
                .parameters
                .iter()
                .map(|parameter| {
                    known
                        .get(parameter.ty.canonical_text())
                        .cloned()
                        .unwrap_or_else(|| self.suggester.suggest(&parameter.ty))
                })
                .collect();
            let subject_name = subject
                .qualified_name()
                .as_deref()
                .map(simple_class_name)
                .unwrap_or_else(|| simple_class_name(subject_fqn))
                .to_string();

            let text = setup_method_text(&subject_name, &arguments);
            let method = self.host.create_method_from_text(&text)?;
            unit.add_method(test_class, method)?;
            report.setup_method = true;
            self.add_import(unit, imports, BEFORE_ANNOTATION_QUALIFIED_NAME, report)?;
        }

        if added_mocks {
            self.add_import(unit, imports, MOCK_ANNOTATION_QUALIFIED_NAME, report)?;
        }
        Ok(None)
    }

    fn insert_under_test_field<U, I>(
        &self,
        unit: &mut U,
        imports: &I,
        test_class: &U::Class,
        subject_fqn: &str,
        report: &mut ScaffoldReport,
    ) -> HostResult<()>
    where
        U: CompilationUnit<Field = H::Field, Method = H::Method>,
        I: ImportOrganizer<U> + ?Sized,
    {
        let ty = self.resolver.project_type_reference(subject_fqn);
        let mut field = self.host.create_field(UNDER_TEST_FIELD_NAME, &ty)?;
        field.add_annotation(INJECT_MOCKS_ANNOTATION_SHORT_NAME);
        unit.add_field(test_class, field)?;
        debug!(subject = %subject_fqn, resolved = ty.is_resolved(), "inserted subject field");

        report.subject_field = Some(InsertedField {
            name: UNDER_TEST_FIELD_NAME.to_string(),
            type_name: ty.canonical_text().to_string(),
            annotation: INJECT_MOCKS_ANNOTATION_SHORT_NAME.to_string(),
        });
        self.add_import(unit, imports, INJECT_MOCKS_ANNOTATION_QUALIFIED_NAME, report)
    }

    fn add_import<U, I>(
        &self,
        unit: &mut U,
        imports: &I,
        fqn: &str,
        report: &mut ScaffoldReport,
    ) -> HostResult<()>
    where
        I: ImportOrganizer<U> + ?Sized,
    {
        if imports.add_class_import(unit, fqn)? {
            report.imports.push(fqn.to_string());
        }
        Ok(())
    }
}

/// The first constructor, in declaration order, annotated `Inject`.
fn injection_constructor(constructors: &[ConstructorDescriptor]) -> Option<&ConstructorDescriptor> {
    constructors
        .iter()
        .find(|ctor| ctor.has_annotation(INJECT_ANNOTATION_SHORT_NAME))
}

/// `base`, or `base` with the smallest numeric suffix from 2 up that is not
/// in `taken`.
fn unique_field_name(base: String, taken: &HashSet<String>) -> String {
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn simple_class_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

// ============================================================================
// Tests
// ============================================================================
