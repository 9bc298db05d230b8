use crate::decls::PackageRef;

/// Decides how names of other packages are written in generated code.
///
/// A qualifier belongs to exactly one home package. Names of the home package (and of
/// the universe) are left unqualified, every other package is referred to by its
/// short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    home: String,
}

impl Qualifier {
    pub fn new(home: &PackageRef) -> Self {
        Qualifier { home: home.path.clone() }
    }

    pub fn qualify<'p>(&self, other: &'p PackageRef) -> &'p str {
        if other.path == self.home || other.is_universe() { "" } else { &other.name }
    }
}
