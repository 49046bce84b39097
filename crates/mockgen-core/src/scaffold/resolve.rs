//! Class resolution through the program-structure service.

use crate::host::{ProgramStructureService, SearchScope, SemanticType};

/// Resolves fully-qualified names to class handles.
///
/// Absence is an ordinary outcome: the subject may not exist yet, or the
/// derived name may not be a valid class name.
#[derive(Debug)]
pub struct ClassResolver<'h, P: ?Sized> {
    pss: &'h P,
}

impl<'h, P: ProgramStructureService + ?Sized> ClassResolver<'h, P> {
    /// Create a resolver over the host's program structure.
    pub fn new(pss: &'h P) -> Self {
        ClassResolver { pss }
    }

    /// Resolve `fqn` within `scope`.
    pub fn resolve(&self, fqn: &str, scope: SearchScope) -> Option<P::Class> {
        if !is_plausible_fqn(fqn) {
            return None;
        }
        self.pss.find_class(fqn, scope)
    }

    /// Type reference to `fqn` for insertion into project sources.
    pub fn project_type_reference(&self, fqn: &str) -> SemanticType {
        self.pss.type_by_name(fqn, SearchScope::Project)
    }
}

/// Non-empty, no empty segments (`a..b`, `a.b.`).
pub(crate) fn is_plausible_fqn(fqn: &str) -> bool {
    !fqn.is_empty() && fqn.split('.').all(|segment| !segment.is_empty())
}
