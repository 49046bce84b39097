//! Name resolution for type expressions.
//!
//! Turns the names written in a file into canonical, fully-qualified type
//! text using the file's own declarations, its imports, its package and the
//! classes known to the index. Lookup order for a simple name:
//!
//! 1. Types declared in the file (top-level and nested)
//! 2. Single-type imports
//! 3. Classes of the same package
//! 4. On-demand (`.*`) imports
//! 5. `java.lang`
//! 6. The only on-demand import of an uncataloged platform package
//!    (`java.*`, `javax.*`)
//!
//! JDK classes are not indexed, so a catalog of well-known platform classes
//! stands in for them when resolving on-demand imports and `java.lang`.
//! Step 6 covers platform packages the catalog does not list.

use std::collections::HashMap;

use mockgen_core::host::SemanticType;

use crate::parser::JavaFile;
use crate::types::{ClassSegment, TypeBase, TypeExpr};

/// Answers whether a fully-qualified class name exists.
pub trait KnownClasses {
    /// Is `fqn` a known class?
    fn is_known_class(&self, fqn: &str) -> bool;
}

const JAVA_LANG: &[&str] = &[
    "AutoCloseable", "Boolean", "Byte", "CharSequence", "Character", "Class", "ClassLoader",
    "Cloneable", "Comparable", "Deprecated", "Double", "Enum", "Error", "Exception", "Float",
    "FunctionalInterface", "IllegalArgumentException", "IllegalStateException", "Integer",
    "Iterable", "Long", "Math", "Number", "Object", "Override", "Process", "Runnable",
    "Runtime", "RuntimeException", "SafeVarargs", "Short", "String", "StringBuilder",
    "SuppressWarnings", "System", "Thread", "ThreadLocal", "Throwable", "Void",
    "Appendable", "ArithmeticException", "AssertionError", "IndexOutOfBoundsException",
    "InterruptedException", "NullPointerException", "ProcessBuilder", "Readable", "Record",
    "StringBuffer", "UnsupportedOperationException",
];

const PLATFORM_PACKAGES: &[(&str, &[&str])] = &[
    ("java.lang", JAVA_LANG),
    (
        "java.util",
        &[
            "ArrayList", "Arrays", "Collection", "Collections", "Comparator", "Date", "Deque",
            "HashMap", "HashSet", "Iterator", "LinkedHashMap", "LinkedList", "List", "Locale",
            "Map", "Objects", "Optional", "Properties", "Queue", "Random", "Set", "SortedMap",
            "TreeMap", "TreeSet", "UUID",
        ],
    ),
    (
        "java.util.concurrent",
        &[
            "Callable", "ConcurrentHashMap", "CountDownLatch", "Executor", "ExecutorService",
            "Executors", "Future", "ScheduledExecutorService", "TimeUnit",
        ],
    ),
    (
        "java.util.function",
        &["BiFunction", "Consumer", "Function", "Predicate", "Supplier"],
    ),
    (
        "java.io",
        &[
            "File", "IOException", "InputStream", "OutputStream", "Reader", "Serializable",
            "Writer",
        ],
    ),
    (
        "java.time",
        &[
            "Clock", "Duration", "Instant", "LocalDate", "LocalDateTime", "LocalTime",
            "OffsetDateTime", "Period", "ZoneId", "ZoneOffset", "ZonedDateTime",
        ],
    ),
    ("java.math", &["BigDecimal", "BigInteger"]),
    (
        "java.nio.file",
        &["FileSystem", "FileSystems", "Files", "Path", "Paths"],
    ),
    (
        "java.net",
        &["HttpURLConnection", "InetAddress", "Socket", "URI", "URL", "URLConnection"],
    ),
    ("java.util.regex", &["Matcher", "Pattern"]),
];

/// A platform package (`java.*`, `javax.*`) the catalog does not list.
fn is_uncataloged_platform_package(package: &str) -> bool {
    (package.starts_with("java.") || package.starts_with("javax."))
        && !PLATFORM_PACKAGES.iter().any(|(p, _)| *p == package)
}

/// Is `fqn` one of the cataloged platform classes?
pub fn is_platform_class(fqn: &str) -> bool {
    let Some((package, name)) = fqn.rsplit_once('.') else {
        return false;
    };
    PLATFORM_PACKAGES
        .iter()
        .any(|(p, names)| *p == package && names.contains(&name))
}

/// Resolves type expressions in the context of one parsed file.
pub struct TypeResolver<'a, K: ?Sized> {
    file: &'a JavaFile,
    known: &'a K,
    local_types: HashMap<String, String>,
}

impl<'a, K: KnownClasses + ?Sized> TypeResolver<'a, K> {
    /// Resolver for names written in `file`.
    pub fn new(file: &'a JavaFile, known: &'a K) -> Self {
        let mut local_types = HashMap::new();
        for (path, decl) in file.all_types() {
            local_types
                .entry(decl.name.clone())
                .or_insert_with(|| file.qualify(&path));
        }
        TypeResolver {
            file,
            known,
            local_types,
        }
    }

    /// Resolve `ty` to a host type. The result is resolved only when every
    /// class named in it (type arguments included) was found.
    pub fn semantic_type(&self, ty: &TypeExpr) -> SemanticType {
        let (canonical, resolved) = self.resolve(ty);
        if resolved {
            SemanticType::resolved(canonical.to_string())
        } else {
            SemanticType::unresolved(canonical.to_string())
        }
    }

    /// Canonical form of `ty` and whether every name in it resolved.
    pub fn resolve(&self, ty: &TypeExpr) -> (TypeExpr, bool) {
        match &ty.base {
            TypeBase::Primitive(_) | TypeBase::Wildcard(None) => (ty.clone(), true),
            TypeBase::Wildcard(Some((kind, bound))) => {
                let (bound, ok) = self.resolve(bound);
                let base = TypeBase::Wildcard(Some((*kind, Box::new(bound))));
                (TypeExpr { base, dims: ty.dims }, ok)
            }
            TypeBase::Class(segments) => {
                let mut all_ok = true;
                let mut resolved_segments: Vec<ClassSegment> = segments
                    .iter()
                    .map(|segment| ClassSegment {
                        name: segment.name.clone(),
                        args: segment
                            .args
                            .iter()
                            .map(|arg| {
                                let (arg, ok) = self.resolve(arg);
                                all_ok &= ok;
                                arg
                            })
                            .collect(),
                    })
                    .collect();

                let names: Vec<&str> = segments.iter().map(|s| s.name.as_str()).collect();
                match self.qualifier_for(&names) {
                    Some(qualifier) => {
                        let mut qualified: Vec<ClassSegment> =
                            qualifier.into_iter().map(ClassSegment::plain).collect();
                        qualified.append(&mut resolved_segments);
                        resolved_segments = qualified;
                    }
                    None => all_ok &= self.is_qualified_known(&names),
                }

                let base = TypeBase::Class(resolved_segments);
                (TypeExpr { base, dims: ty.dims }, all_ok)
            }
        }
    }

    /// Fully-qualified name for a simple class name, if it resolves.
    pub fn resolve_simple_name(&self, name: &str) -> Option<String> {
        if let Some(fqn) = self.local_types.get(name) {
            return Some(fqn.clone());
        }

        let single = self
            .file
            .imports
            .iter()
            .find(|i| !i.is_static && !i.on_demand && i.simple_name() == name);
        if let Some(import) = single {
            return Some(import.path.clone());
        }

        let same_package = self.file.qualify(name);
        if self.known.is_known_class(&same_package) {
            return Some(same_package);
        }

        for import in self.file.imports.iter().filter(|i| i.on_demand && !i.is_static) {
            let candidate = format!("{}.{}", import.path, name);
            if self.known.is_known_class(&candidate) || is_platform_class(&candidate) {
                return Some(candidate);
            }
        }

        let lang = format!("java.lang.{}", name);
        if self.known.is_known_class(&lang) || is_platform_class(&lang) {
            return Some(lang);
        }

        // class behind the single wildcard of an uncataloged platform package
        let looks_like_class = name.chars().next().is_some_and(char::is_uppercase);
        let mut platform_wildcards = self
            .file
            .imports
            .iter()
            .filter(|i| i.on_demand && !i.is_static && is_uncataloged_platform_package(&i.path));
        match (platform_wildcards.next(), platform_wildcards.next()) {
            (Some(import), None) if looks_like_class => Some(format!("{}.{}", import.path, name)),
            _ => None,
        }
    }

    /// Package/outer segments to prepend when the first written segment
    /// resolves as a simple name.
    fn qualifier_for(&self, names: &[&str]) -> Option<Vec<String>> {
        let first = names.first()?;
        let fqn = self.resolve_simple_name(first)?;
        let mut qualifier: Vec<String> = fqn.split('.').map(str::to_string).collect();
        qualifier.pop();
        Some(qualifier)
    }

    /// Names written qualified (`java.util.List`, `a.b.Outer.Inner`) resolve
    /// when some prefix names a known class.
    fn is_qualified_known(&self, names: &[&str]) -> bool {
        names.len() > 1
            && (1..=names.len()).rev().any(|end| {
                let candidate = names[..end].join(".");
                self.known.is_known_class(&candidate) || is_platform_class(&candidate)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_java;

    struct Known(&'static [&'static str]);

    impl KnownClasses for Known {
        fn is_known_class(&self, fqn: &str) -> bool {
            self.0.contains(&fqn)
        }
    }

    const PROJECT: Known = Known(&["a.b.Foo", "a.b.Bar", "c.d.Baz", "c.d.Qux", "e.Widget"]);

    fn canonical(source: &str, ty: &str) -> SemanticType {
        let file = parse_java(source).unwrap();
        let resolver = TypeResolver::new(&file, &PROJECT);
        resolver.semantic_type(&TypeExpr::parse(ty).unwrap())
    }

    const HEADER: &str = "package a.b;\nimport c.d.Baz;\nimport java.util.*;\nimport e.*;\nclass FooTest { static class Helper {} }\n";

    #[test]
    fn primitives_are_resolved() {
        let ty = canonical(HEADER, "int[]");
        assert_eq!(ty.canonical_text(), "int[]");
        assert!(ty.is_resolved());
    }

    #[test]
    fn single_type_import() {
        let ty = canonical(HEADER, "Baz");
        assert_eq!(ty.canonical_text(), "c.d.Baz");
        assert!(ty.is_resolved());
    }

    #[test]
    fn same_package() {
        assert_eq!(canonical(HEADER, "Bar").canonical_text(), "a.b.Bar");
    }

    #[test]
    fn on_demand_imports_use_index_and_platform_catalog() {
        assert_eq!(canonical(HEADER, "Widget").canonical_text(), "e.Widget");
        assert_eq!(canonical(HEADER, "Random").canonical_text(), "java.util.Random");
    }

    #[test]
    fn java_lang_is_implicit() {
        let ty = canonical(HEADER, "List<String>");
        assert_eq!(ty.canonical_text(), "java.util.List<java.lang.String>");
        assert!(ty.is_resolved());
    }

    #[test]
    fn local_types_win() {
        assert_eq!(canonical(HEADER, "Helper").canonical_text(), "a.b.FooTest.Helper");
        assert_eq!(canonical(HEADER, "FooTest").canonical_text(), "a.b.FooTest");
    }

    #[test]
    fn nested_segments_keep_their_place() {
        let ty = canonical(HEADER, "Map.Entry<String, Baz>");
        assert_eq!(ty.canonical_text(), "java.util.Map.Entry<java.lang.String,c.d.Baz>");
    }

    #[test]
    fn qualified_names_resolve_against_index() {
        let ty = canonical(HEADER, "c.d.Qux");
        assert_eq!(ty.canonical_text(), "c.d.Qux");
        assert!(ty.is_resolved());

        let ty = canonical(HEADER, "x.y.Missing");
        assert_eq!(ty.canonical_text(), "x.y.Missing");
        assert!(!ty.is_resolved());
    }

    #[test]
    fn unknown_names_stay_as_written() {
        let ty = canonical(HEADER, "Unknown");
        assert_eq!(ty.canonical_text(), "Unknown");
        assert!(!ty.is_resolved());
    }

    #[test]
    fn unresolved_argument_taints_the_whole_type() {
        let ty = canonical(HEADER, "List<Unknown>");
        assert_eq!(ty.canonical_text(), "java.util.List<Unknown>");
        assert!(!ty.is_resolved());
    }

    #[test]
    fn wildcard_bounds_are_resolved() {
        let ty = canonical(HEADER, "List<? extends Foo>");
        assert_eq!(ty.canonical_text(), "java.util.List<? extends a.b.Foo>");
    }

    #[test]
    fn static_imports_do_not_name_types() {
        let source = "package p;\nimport static c.d.Baz.Inner;\nclass T {}\n";
        assert!(!canonical(source, "Inner").is_resolved());
    }

    #[test]
    fn cataloged_platform_packages_behind_wildcards() {
        let source = "package p;\nimport java.time.*;\nimport java.nio.file.*;\nclass T {}\n";
        let ty = canonical(source, "Clock");
        assert_eq!(ty.canonical_text(), "java.time.Clock");
        assert!(ty.is_resolved());
        assert_eq!(canonical(source, "Path").canonical_text(), "java.nio.file.Path");
    }

    #[test]
    fn single_platform_wildcard_covers_uncataloged_classes() {
        let source = "package p;\nimport java.nio.channels.*;\nimport e.*;\nclass T {}\n";
        let ty = canonical(source, "FileChannel");
        assert_eq!(ty.canonical_text(), "java.nio.channels.FileChannel");
        assert!(ty.is_resolved());
        assert_eq!(canonical(source, "Widget").canonical_text(), "e.Widget");
        // cataloged packages are trusted to be complete
        assert!(!canonical(HEADER, "Unknown").is_resolved());
    }

    #[test]
    fn competing_platform_wildcards_stay_unresolved() {
        let source = "package p;\nimport java.nio.channels.*;\nimport java.security.*;\nclass T {}\n";
        let ty = canonical(source, "FileChannel");
        assert_eq!(ty.canonical_text(), "FileChannel");
        assert!(!ty.is_resolved());
    }

    #[test]
    fn platform_catalog() {
        assert!(is_platform_class("java.time.Clock"));
        assert!(is_platform_class("java.util.Random"));
        assert!(is_platform_class("java.lang.String"));
        assert!(!is_platform_class("java.util.Nope"));
        assert!(!is_platform_class("Random"));
    }
}
