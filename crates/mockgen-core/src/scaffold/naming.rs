//! Name derivation: subject names from test names, field names from types.

use crate::host::{NamingService, SemanticType, VariableKind};

use super::{FIELD_NAME_PREFIX, TEST_CLASS_NAME_SUFFIX};

/// Derive the subject's fully-qualified name from the test class's.
///
/// Strips the `Test` suffix, case-sensitively, from the whole qualified name:
/// `a.b.FooTest` → `a.b.Foo`. A name equal to `Test` yields the empty
/// string; callers treat that as absent.
pub fn derive_subject_fqn(test_class_fqn: &str) -> Option<&str> {
    test_class_fqn.strip_suffix(TEST_CLASS_NAME_SUFFIX)
}

/// Turns types into `m`-prefixed member field names.
///
/// The host's naming service supplies the base name; the only mutation is
/// capitalizing its first character and prepending `m`.
#[derive(Debug)]
pub struct FieldNameSuggester<'h, N: ?Sized> {
    naming: &'h N,
}

impl<'h, N: NamingService + ?Sized> FieldNameSuggester<'h, N> {
    /// Create a suggester backed by the host naming service.
    pub fn new(naming: &'h N) -> Self {
        FieldNameSuggester { naming }
    }

    /// Suggest a member field name for `ty`.
    ///
    /// `java.util.Random` → `mRandom`; a host candidate `hTTPClient` →
    /// `mHTTPClient`.
    pub fn suggest(&self, ty: &SemanticType) -> String {
        let candidate = self
            .naming
            .suggest_variable_names(VariableKind::Field, ty)
            .into_iter()
            .next()
            .unwrap_or_else(|| decapitalize(ty.simple_name()));
        prefixed(&candidate)
    }

    /// Name for a `@Mock` field of type `ty`.
    pub fn mock_field_name(&self, ty: &SemanticType) -> String {
        decapitalize(&self.suggest(ty))
    }
}

/// `random` → `mRandom`.
fn prefixed(candidate: &str) -> String {
    format!("{}{}", FIELD_NAME_PREFIX, capitalize(candidate))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedNames(Vec<&'static str>);

    impl NamingService for FixedNames {
        fn suggest_variable_names(&self, _kind: VariableKind, _ty: &SemanticType) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    mod derive_tests {
        use super::*;

        #[test]
        fn strips_suffix_from_qualified_name() {
            assert_eq!(derive_subject_fqn("a.b.FooTest"), Some("a.b.Foo"));
            assert_eq!(derive_subject_fqn("FooTest"), Some("Foo"));
        }

        #[test]
        fn bare_test_yields_empty_prefix() {
            assert_eq!(derive_subject_fqn("Test"), Some(""));
        }

        #[test]
        fn other_conventions_are_not_derivable() {
            assert_eq!(derive_subject_fqn("a.b.FooSpec"), None);
            assert_eq!(derive_subject_fqn("a.b.FooTests"), None);
            assert_eq!(derive_subject_fqn("a.b.FooIT"), None);
            assert_eq!(derive_subject_fqn("a.b.Footest"), None);
        }

        #[test]
        fn underscore_suffix_keeps_underscore() {
            // Only the literal suffix is removed.
            assert_eq!(derive_subject_fqn("a.b.Foo_Test"), Some("a.b.Foo_"));
        }
    }

    mod suggest_tests {
        use super::*;

        #[test]
        fn prefixes_and_capitalizes_first_candidate() {
            let naming = FixedNames(vec!["random", "rnd"]);
            let suggester = FieldNameSuggester::new(&naming);
            let ty = SemanticType::resolved("java.util.Random");
            assert_eq!(suggester.suggest(&ty), "mRandom");
        }

        #[test]
        fn capitalizes_only_first_character() {
            let naming = FixedNames(vec!["hTTPClient"]);
            let suggester = FieldNameSuggester::new(&naming);
            let ty = SemanticType::resolved("com.x.HTTPClient");
            assert_eq!(suggester.suggest(&ty), "mHTTPClient");
            assert_eq!(suggester.mock_field_name(&ty), "mHTTPClient");
        }

        #[test]
        fn falls_back_to_simple_name_without_candidates() {
            let naming = FixedNames(vec![]);
            let suggester = FieldNameSuggester::new(&naming);
            let ty = SemanticType::resolved("com.x.Foo");
            assert_eq!(suggester.suggest(&ty), "mFoo");
        }

        #[test]
        fn mock_field_name_keeps_prefix_lowercase() {
            let naming = FixedNames(vec!["list"]);
            let suggester = FieldNameSuggester::new(&naming);
            let ty = SemanticType::resolved("java.util.List");
            assert_eq!(suggester.mock_field_name(&ty), "mList");
        }
    }
}
