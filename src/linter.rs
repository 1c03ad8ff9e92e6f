//! A minimal lint host implementing every capability lintel relies on.
//!
//! [`Linter`] owns checkers in registration order, an augmentation list per
//! `(checker, visit method)`, and an [`Emitter`] whose initial function records
//! diagnostics for [`Linter::take_diagnostics`]. Traversal is pre-order; for
//! each node every checker declaring `visit_<kind>` is dispatched, in
//! registration order, through its installed augmentations.

use crate::checker::{Checker, CheckerId, VisitMethod};
use crate::error::AugmentError;
use crate::host::{CheckerRegistry, DiagnosticSink, Emitter, VisitTarget};
use crate::intercept::{Augmentation, run_chain};
use crate::lookup::get_checker;
use lintel_common::Diagnostic;
use log::{debug, trace};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

const VISIT_PREFIX: &str = "visit_";

/// Syntax tree nodes the reference host can walk.
pub trait SyntaxNode {
    /// Node kind; dispatched to visit methods named `visit_<kind>`.
    fn kind(&self) -> &str;

    /// Child nodes in source order.
    fn children(&self) -> &[Self]
    where
        Self: Sized,
    {
        &[]
    }
}

/// Reference lint host.
pub struct Linter<N> {
    checkers: Vec<Box<dyn Checker<N>>>,
    augmentations: HashMap<CheckerId, HashMap<&'static str, Vec<Augmentation<N>>>>,
    emitter: Emitter,
    reported: Rc<RefCell<Vec<Diagnostic>>>,
}

impl<N> Default for Linter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Linter<N> {
    /// Creates a host with no checkers.
    #[must_use]
    pub fn new() -> Self {
        let reported: Rc<RefCell<Vec<Diagnostic>>> = Rc::default();
        let sink = Rc::clone(&reported);
        let emitter = Emitter::new(Rc::new(move |diagnostic: Diagnostic| {
            sink.borrow_mut().push(diagnostic);
        }));

        Self {
            checkers: Vec::new(),
            augmentations: HashMap::new(),
            emitter,
            reported,
        }
    }

    /// Registers `checker`, returning its id.
    pub fn register(&mut self, checker: impl Checker<N> + 'static) -> CheckerId {
        self.register_boxed(Box::new(checker))
    }

    /// Registers an already boxed checker.
    pub fn register_boxed(&mut self, checker: Box<dyn Checker<N>>) -> CheckerId {
        let id = CheckerId::new(self.checkers.len());
        debug!(
            target: "lintel::linter",
            "registered checker `{}` as {id}",
            checker.checker_type(),
        );
        self.checkers.push(checker);
        id
    }

    /// Number of registered checkers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// Whether no checker is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Dispatches `method` on the checker of its type for a single `node`.
    ///
    /// # Errors
    ///
    /// Fails like [`crate::augment_visit`] when the checker or method cannot
    /// be resolved.
    pub fn invoke(&mut self, method: VisitMethod, node: &N) -> Result<(), AugmentError> {
        let found = get_checker(&*self, method.checker_type())?;
        let id = found.id();
        if !found.checker().has_visit_method(method.name()) {
            return Err(AugmentError::NoSuchVisitMethod {
                checker_type: found.checker().checker_type(),
                method: method.name(),
            });
        }

        self.dispatch(id, method.name(), node);
        Ok(())
    }

    /// Drains the diagnostics that reached the reporter, in emission order.
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.reported.borrow_mut())
    }

    fn dispatch(&mut self, id: CheckerId, method: &str, node: &N) {
        // Snapshot so augmentations installed mid-dispatch apply from the next node.
        let layers = self.augmentations(id, method).to_vec();
        let emitter = &self.emitter;
        let Some(checker) = self.checkers.get_mut(id.index()) else {
            return;
        };

        trace!(
            target: "lintel::linter",
            "dispatching {method} on checker {id} through {} layer(s)",
            layers.len(),
        );
        let mut original = || checker.visit(method, node, emitter);
        run_chain(&layers, node, &mut original);
    }
}

impl<N: SyntaxNode> Linter<N> {
    /// Walks `root` in pre-order, dispatching matching visit methods.
    pub fn walk(&mut self, root: &N) {
        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            self.visit_node(node);
            pending.extend(node.children().iter().rev());
        }
    }

    fn visit_node(&mut self, node: &N) {
        let kind = node.kind();
        for index in 0..self.checkers.len() {
            let method = self.checkers.get(index).and_then(|checker| {
                checker
                    .visit_methods()
                    .iter()
                    .copied()
                    .find(|name| name.strip_prefix(VISIT_PREFIX) == Some(kind))
            });
            if let Some(method) = method {
                self.dispatch(CheckerId::new(index), method, node);
            }
        }
    }
}

impl<N> CheckerRegistry<N> for Linter<N> {
    fn checkers<'a>(&'a self) -> impl Iterator<Item = (CheckerId, &'a dyn Checker<N>)>
    where
        N: 'a,
    {
        self.checkers
            .iter()
            .enumerate()
            .map(|(index, checker)| (CheckerId::new(index), &**checker))
    }
}

impl<N> VisitTarget<N> for Linter<N> {
    fn install(&mut self, checker: CheckerId, method: &'static str, augmentation: Augmentation<N>) {
        self.augmentations
            .entry(checker)
            .or_default()
            .entry(method)
            .or_default()
            .push(augmentation);
    }

    fn augmentations(&self, checker: CheckerId, method: &str) -> &[Augmentation<N>] {
        self.augmentations
            .get(&checker)
            .and_then(|methods| methods.get(method))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl<N> DiagnosticSink for Linter<N> {
    fn emitter(&self) -> &Emitter {
        &self.emitter
    }
}

impl<N> fmt::Debug for Linter<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<_> = self
            .checkers
            .iter()
            .map(|checker| checker.checker_type().name())
            .collect();
        f.debug_struct("Linter")
            .field("checkers", &types)
            .field("augmented", &self.augmentations.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CheckerType;
    use crate::intercept::{Chain, augment_visit};
    use crate::testing::{SCRIPTED, ScriptedChecker, TestNode};
    use lintel_common::{Argument, SourceLocation, SourceSpan};
    use rstest::rstest;

    static EXTRA: CheckerType = CheckerType::new("extra");

    fn tree() -> TestNode {
        TestNode::new("module", 0)
            .with_child(TestNode::new("call", 1).with_child(TestNode::new("name", 2)))
            .with_child(TestNode::new("name", 3))
    }

    #[rstest]
    fn walks_in_preorder_across_checkers_in_registration_order() {
        let first = ScriptedChecker::new(&SCRIPTED)
            .on("visit_call", &[])
            .on("visit_name", &[]);
        let second = ScriptedChecker::new(&EXTRA).on("visit_name", &[]);
        let first_journal = first.journal();
        let second_journal = second.journal();
        let mut linter = Linter::new();
        linter.register(first);
        linter.register(second);

        linter.walk(&tree());

        assert_eq!(
            *first_journal.borrow(),
            ["visit_call(1)", "visit_name(2)", "visit_name(3)"]
        );
        assert_eq!(*second_journal.borrow(), ["visit_name(2)", "visit_name(3)"]);
    }

    #[rstest]
    fn walk_routes_visits_through_augmentations() {
        let mut linter = Linter::new();
        linter.register(ScriptedChecker::new(&SCRIPTED).on("visit_name", &["W0612"]));
        augment_visit(
            &mut linter,
            VisitMethod::new(&SCRIPTED, "visit_name"),
            |chain: &mut Chain<'_>, node: &TestNode| {
                if node.value() > 2 {
                    chain.proceed();
                }
            },
        )
        .expect("scripted checker is registered");

        linter.walk(&tree());

        let diagnostics = linter.take_diagnostics();
        let expected = Diagnostic::with_args("W0612", TestNode::new("name", 3).arguments());
        assert_eq!(diagnostics, [expected]);
    }

    #[rstest]
    fn diagnostics_carry_the_node_span() {
        let start = SourceLocation::new(3, 5);
        let span = SourceSpan::new(start, SourceLocation::new(3, 9)).expect("ordered span");
        let mut linter = Linter::new();
        linter.register(ScriptedChecker::new(&SCRIPTED).on("visit_name", &["C0103"]));

        linter.walk(&TestNode::new("name", 7).with_span(span));

        let diagnostics = linter.take_diagnostics();
        let [diagnostic] = diagnostics.as_slice() else {
            panic!("expected one diagnostic, observed {diagnostics:?}");
        };
        assert_eq!(
            diagnostic.args(),
            [
                Argument::Text("name".to_owned()),
                Argument::Integer(7),
                Argument::Span(span),
            ]
        );
        assert_eq!(diagnostic.to_string(), "C0103 name 7 3:5-3:9");
    }

    #[rstest]
    fn invoke_rejects_unregistered_types() {
        let mut linter: Linter<TestNode> = Linter::new();
        let err = linter
            .invoke(VisitMethod::new(&EXTRA, "visit_name"), &TestNode::new("name", 0))
            .expect_err("no checker registered");

        assert_eq!(err, AugmentError::NoSuchChecker { checker_type: &EXTRA });
    }

    #[rstest]
    fn take_diagnostics_drains_the_reporter() {
        let mut linter = Linter::new();
        linter.register(ScriptedChecker::new(&SCRIPTED).on("visit_name", &["E001"]));

        linter.walk(&TestNode::new("name", 0));

        assert_eq!(linter.take_diagnostics().len(), 1);
        assert!(linter.take_diagnostics().is_empty());
    }

    #[rstest]
    fn augmentations_are_listed_oldest_first() {
        let mut linter = Linter::new();
        let id = linter.register(ScriptedChecker::new(&SCRIPTED).on("visit_name", &[]));
        let method = VisitMethod::new(&SCRIPTED, "visit_name");
        for _ in 0..2 {
            augment_visit(&mut linter, method, |chain: &mut Chain<'_>, _: &TestNode| {
                chain.proceed();
            })
            .expect("scripted checker is registered");
        }

        assert_eq!(linter.augmentations(id, "visit_name").len(), 2);
        assert!(linter.augmentations(id, "visit_call").is_empty());
    }

    struct Lengths;

    impl<'n> Checker<&'n str> for Lengths {
        fn checker_type(&self) -> &'static CheckerType {
            &EXTRA
        }

        fn visit_methods(&self) -> &[&'static str] {
            &["visit_word"]
        }

        fn visit(&mut self, _method: &str, node: &&'n str, emitter: &Emitter) {
            let length = i64::try_from(node.len()).unwrap_or(i64::MAX);
            emitter.emit(Diagnostic::new("C0301").with_arg(length));
        }
    }

    #[rstest]
    fn hosts_checkers_over_borrowed_nodes() {
        let source = String::from("lintel");
        let word = source.as_str();
        let mut linter: Linter<&str> = Linter::new();
        let id = linter.register(Lengths);

        let listed: Vec<_> = linter
            .checkers()
            .map(|(id, checker)| (id, checker.checker_type()))
            .collect();
        assert_eq!(listed, [(id, &EXTRA)]);

        linter
            .invoke(VisitMethod::new(&EXTRA, "visit_word"), &word)
            .expect("visit dispatches");
        assert_eq!(linter.take_diagnostics(), [Diagnostic::new("C0301").with_arg(6_i64)]);
    }
}
