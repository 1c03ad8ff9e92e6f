//! Checker identity: types, registration handles, and visit method references.
//!
//! Hosts identify checkers by a [`CheckerType`]. Types form a single
//! inheritance chain so a lookup for a base type also matches checkers whose
//! type extends it.

use crate::host::Emitter;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Declared type of a checker, optionally extending a parent type.
///
/// Declare types as `static` items so that children can borrow their parent
/// for `'static`.
///
/// # Examples
///
/// ```
/// use lintel::CheckerType;
///
/// static BASE: CheckerType = CheckerType::new("base");
/// static VARIABLES: CheckerType = CheckerType::extending("variables", &BASE);
///
/// assert!(VARIABLES.is_a(&BASE));
/// assert!(!BASE.is_a(&VARIABLES));
/// ```
#[derive(Debug)]
pub struct CheckerType {
    name: &'static str,
    parent: Option<&'static CheckerType>,
}

impl CheckerType {
    /// A root checker type.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// A checker type extending `parent`.
    #[must_use]
    pub const fn extending(name: &'static str, parent: &'static Self) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    /// Returns the type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the parent type, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<&'static Self> {
        self.parent
    }

    /// Iterates over this type and its ancestors, nearest first.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static Self> {
        std::iter::successors(Some(self), |current| current.parent)
    }

    /// Whether this type is `other` or extends it.
    #[must_use]
    pub fn is_a(&self, other: &Self) -> bool {
        std::iter::successors(Some(self), |current| current.parent).any(|ty| ty == other)
    }
}

// Names are unique within a host, so identity is by name.
impl PartialEq for CheckerType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CheckerType {}

impl Hash for CheckerType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for CheckerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Position of a checker in its host's registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckerId(usize);

impl CheckerId {
    /// Wraps a registration index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the registration index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CheckerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Names one visit method on checkers of a given type.
///
/// This is the handle plugins pass to [`crate::augment_visit`] and
/// [`crate::suppress_message`]: the owning checker is resolved from
/// [`Self::checker_type`], the method from [`Self::name`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisitMethod {
    checker_type: &'static CheckerType,
    name: &'static str,
}

impl VisitMethod {
    /// References `name` on checkers of `checker_type`.
    #[must_use]
    pub const fn new(checker_type: &'static CheckerType, name: &'static str) -> Self {
        Self { checker_type, name }
    }

    /// Returns the declared owner type.
    #[must_use]
    pub const fn checker_type(self) -> &'static CheckerType {
        self.checker_type
    }

    /// Returns the method name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl fmt::Display for VisitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.checker_type, self.name)
    }
}

/// A rule checker with named per-node-kind visit methods.
///
/// Checkers report findings through the [`Emitter`] they are handed, never by
/// holding one themselves, so a suppression scope installed on the host sees
/// every emission.
pub trait Checker<N> {
    /// Runtime type used by lookups.
    fn checker_type(&self) -> &'static CheckerType;

    /// Names of the visit methods this checker implements, such as `visit_call`.
    fn visit_methods(&self) -> &[&'static str];

    /// Runs the visit method `method` on `node`.
    ///
    /// Hosts only call this with names listed by [`Self::visit_methods`].
    fn visit(&mut self, method: &str, node: &N, emitter: &Emitter);

    /// Whether `method` is listed by [`Self::visit_methods`].
    fn has_visit_method(&self, method: &str) -> bool {
        self.visit_methods().iter().any(|name| *name == method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    static ROOT: CheckerType = CheckerType::new("root");
    static MIDDLE: CheckerType = CheckerType::extending("middle", &ROOT);
    static LEAF: CheckerType = CheckerType::extending("leaf", &MIDDLE);
    static OTHER: CheckerType = CheckerType::new("other");

    #[rstest]
    #[case(&LEAF, &LEAF, true)]
    #[case(&LEAF, &MIDDLE, true)]
    #[case(&LEAF, &ROOT, true)]
    #[case(&MIDDLE, &LEAF, false)]
    #[case(&ROOT, &OTHER, false)]
    fn is_a_follows_the_parent_chain(
        #[case] ty: &'static CheckerType,
        #[case] other: &'static CheckerType,
        #[case] expected: bool,
    ) {
        assert_eq!(ty.is_a(other), expected);
    }

    #[rstest]
    fn lineage_lists_nearest_first() {
        let names: Vec<_> = LEAF.lineage().map(CheckerType::name).collect();
        assert_eq!(names, ["leaf", "middle", "root"]);
    }

    #[rstest]
    fn visit_method_displays_owner_and_name() {
        let method = VisitMethod::new(&MIDDLE, "visit_call");
        assert_eq!(method.to_string(), "middle.visit_call");
    }
}
