//! Import management.
//!
//! Single-type imports are added in sorted position among the existing
//! non-static imports. A class never gets an import when it is already
//! visible: `java.lang`, the file's own package, an existing single-type
//! import or an on-demand import of its package.

use mockgen_core::host::{HostResult, ImportOrganizer};
use mockgen_core::text::{line_start, next_line_start};

use crate::parser::JavaFile;
use crate::unit::JavaCompilationUnit;

/// Does `fqn` need an import to be referenced by simple name in `file`?
pub fn needs_import(file: &JavaFile, fqn: &str) -> bool {
    let Some((package, _)) = fqn.rsplit_once('.') else {
        // default-package classes cannot be imported
        return false;
    };
    if package == "java.lang" || package == file.package_name() {
        return false;
    }
    !file.imports.iter().any(|import| {
        !import.is_static
            && ((!import.on_demand && import.path == fqn)
                || (import.on_demand && import.path == package))
    })
}

/// Insertion offset and text for `import fqn;`.
pub fn import_insertion(file: &JavaFile, source: &str, fqn: &str) -> (usize, String) {
    let line = format!("import {};\n", fqn);
    let regular: Vec<_> = file.imports.iter().filter(|i| !i.is_static).collect();

    if let Some(next) = regular.iter().find(|i| i.path.as_str() > fqn) {
        return (line_start(source, next.start), line);
    }
    if let Some(last) = regular.last() {
        return (next_line_start(source, last.end), line);
    }
    if let Some(first_static) = file.imports.iter().find(|i| i.is_static) {
        return (line_start(source, first_static.start), format!("{}\n", line));
    }
    if let Some(package) = &file.package {
        return (next_line_start(source, package.end), format!("\n{}", line));
    }
    (0, format!("{}\n", line))
}

/// Adds class imports to Java compilation units.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaImportOrganizer;

impl<'p> ImportOrganizer<JavaCompilationUnit<'p>> for JavaImportOrganizer {
    fn add_class_import(&self, unit: &mut JavaCompilationUnit<'p>, fqn: &str) -> HostResult<bool> {
        unit.ensure_import(fqn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_java;

    fn insert(source: &str, fqn: &str) -> String {
        let file = parse_java(source).unwrap();
        let (offset, text) = import_insertion(&file, source, fqn);
        let mut out = source.to_string();
        out.insert_str(offset, &text);
        out
    }

    mod needs_import_tests {
        use super::*;

        #[test]
        fn implicit_visibility() {
            let file = parse_java("package a.b;\nimport c.D;\nimport e.*;\nclass T {}").unwrap();
            assert!(!needs_import(&file, "java.lang.String"));
            assert!(!needs_import(&file, "a.b.Foo"));
            assert!(!needs_import(&file, "c.D"));
            assert!(!needs_import(&file, "e.Widget"));
            assert!(!needs_import(&file, "Foo"));
            assert!(needs_import(&file, "c.E"));
            assert!(needs_import(&file, "a.b.c.Foo"));
        }

        #[test]
        fn static_imports_do_not_count() {
            let file = parse_java("import static org.mockito.Mock.*;\nclass T {}").unwrap();
            assert!(needs_import(&file, "org.mockito.Mock"));
        }
    }

    mod placement_tests {
        use super::*;

        #[test]
        fn sorted_among_existing_imports() {
            let source = "package a;\n\nimport org.junit.Test;\nimport org.mockito.Mock;\n\nclass T {}\n";
            assert_eq!(
                insert(source, "org.junit.Before"),
                "package a;\n\nimport org.junit.Before;\nimport org.junit.Test;\nimport org.mockito.Mock;\n\nclass T {}\n"
            );
            assert_eq!(
                insert(source, "org.mockito.InjectMocks"),
                "package a;\n\nimport org.junit.Test;\nimport org.mockito.InjectMocks;\nimport org.mockito.Mock;\n\nclass T {}\n"
            );
        }

        #[test]
        fn after_last_import() {
            let source = "import a.A;\nclass T {}\n";
            assert_eq!(insert(source, "z.Z"), "import a.A;\nimport z.Z;\nclass T {}\n");
        }

        #[test]
        fn before_static_imports() {
            let source = "package a;\n\nimport static org.mockito.MockitoAnnotations.initMocks;\n\nclass T {}\n";
            assert_eq!(
                insert(source, "org.mockito.Mock"),
                "package a;\n\nimport org.mockito.Mock;\n\nimport static org.mockito.MockitoAnnotations.initMocks;\n\nclass T {}\n"
            );
        }

        #[test]
        fn after_package_declaration() {
            let source = "package a;\n\nclass T {}\n";
            assert_eq!(insert(source, "org.mockito.Mock"), "package a;\n\nimport org.mockito.Mock;\n\nclass T {}\n");
        }

        #[test]
        fn at_file_start_without_package() {
            assert_eq!(insert("class T {}\n", "org.mockito.Mock"), "import org.mockito.Mock;\n\nclass T {}\n");
        }
    }
}
