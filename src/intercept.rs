//! Wrapping checker visit methods with caller-supplied augmentations.
//!
//! Augmentations never replace a checker's code. The host keeps, for each
//! `(checker, method)` pair, an ordered list of wrappers; dispatch calls the
//! newest wrapper and hands it a [`Chain`] that runs the next older wrapper,
//! and so on down to the checker's own visit method.

use crate::checker::VisitMethod;
use crate::error::AugmentError;
use crate::host::{CheckerRegistry, VisitTarget};
use crate::lookup::get_checker;
use log::debug;
use std::fmt;
use std::rc::Rc;

/// A wrapper around a visit method. It receives the continuation and the node
/// being visited.
pub type Augmentation<N> = Rc<dyn Fn(&mut Chain<'_>, &N)>;

/// Continuation running the wrapped visit behaviour for the current node.
pub struct Chain<'a> {
    next: &'a mut dyn FnMut(),
    calls: usize,
}

impl<'a> Chain<'a> {
    pub(crate) fn new(next: &'a mut dyn FnMut()) -> Self {
        Self { next, calls: 0 }
    }

    /// Runs the wrapped behaviour once.
    ///
    /// May be called any number of times; each call repeats the wrapped
    /// behaviour, including every diagnostic it emits.
    pub fn proceed(&mut self) {
        self.calls += 1;
        (self.next)();
    }

    /// How many times [`Self::proceed`] has run for this node.
    #[must_use]
    pub const fn calls(&self) -> usize {
        self.calls
    }
}

impl fmt::Debug for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

/// Runs `layers` around `original` for `node`.
///
/// The last layer is outermost. With no layers `original` runs directly.
pub fn run_chain<N>(layers: &[Augmentation<N>], node: &N, original: &mut dyn FnMut()) {
    match layers.split_last() {
        None => original(),
        Some((outermost, inner)) => {
            let mut next = || run_chain(inner, node, &mut *original);
            let mut chain = Chain::new(&mut next);
            outermost(&mut chain, node);
        }
    }
}

/// Wraps `method` on the registered checker of its type with `augmentation`.
///
/// The checker is resolved through [`get_checker`]. Every later dispatch of
/// the method calls `augmentation` with a [`Chain`] that reaches whatever was
/// installed before it, so repeated calls compose.
///
/// # Errors
///
/// Returns [`AugmentError::NoSuchChecker`] when no registered checker is of
/// the method's type, and [`AugmentError::NoSuchVisitMethod`] when the
/// resolved checker does not implement the method.
///
/// # Examples
///
/// ```
/// use lintel::testing::{ScriptedChecker, TestNode, SCRIPTED};
/// use lintel::{Linter, VisitMethod, augment_visit};
///
/// let mut linter = Linter::new();
/// linter.register(ScriptedChecker::new(&SCRIPTED).on("visit_call", &["E001"]));
///
/// let call = VisitMethod::new(&SCRIPTED, "visit_call");
/// augment_visit(&mut linter, call, |chain, node: &TestNode| {
///     if node.value() != 0 {
///         chain.proceed();
///     }
/// })
/// .unwrap();
///
/// linter.invoke(call, &TestNode::new("call", 0)).unwrap();
/// assert!(linter.take_diagnostics().is_empty());
/// ```
pub fn augment_visit<N, L, F>(
    linter: &mut L,
    method: VisitMethod,
    augmentation: F,
) -> Result<(), AugmentError>
where
    L: CheckerRegistry<N> + VisitTarget<N>,
    F: Fn(&mut Chain<'_>, &N) + 'static,
{
    let found = get_checker(&*linter, method.checker_type())?;
    let id = found.id();
    if !found.checker().has_visit_method(method.name()) {
        return Err(AugmentError::NoSuchVisitMethod {
            checker_type: found.checker().checker_type(),
            method: method.name(),
        });
    }

    linter.install(id, method.name(), Rc::new(augmentation));
    debug!(
        target: "lintel::intercept",
        "augmented `{method}` on checker {id} ({} layer(s))",
        linter.augmentations(id, method.name()).len(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    type Trace = Rc<RefCell<Vec<String>>>;

    fn layer(trace: &Trace, label: &'static str) -> Augmentation<i32> {
        let trace = Rc::clone(trace);
        Rc::new(move |chain: &mut Chain<'_>, node: &i32| {
            trace.borrow_mut().push(format!("{label}:before:{node}"));
            chain.proceed();
            trace.borrow_mut().push(format!("{label}:after"));
        })
    }

    #[rstest]
    fn runs_original_without_layers() {
        let trace: Trace = Rc::default();
        let sink = Rc::clone(&trace);
        let mut original = || sink.borrow_mut().push("original".to_owned());

        run_chain::<i32>(&[], &7, &mut original);

        assert_eq!(*trace.borrow(), ["original"]);
    }

    #[rstest]
    fn newest_layer_is_outermost() {
        let trace: Trace = Rc::default();
        let layers = vec![layer(&trace, "first"), layer(&trace, "second")];
        let sink = Rc::clone(&trace);
        let mut original = || sink.borrow_mut().push("original".to_owned());

        run_chain(&layers, &3, &mut original);

        assert_eq!(
            *trace.borrow(),
            [
                "second:before:3",
                "first:before:3",
                "original",
                "first:after",
                "second:after",
            ]
        );
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    fn proceed_controls_how_often_the_original_runs(#[case] times: usize) {
        let runs = Rc::new(RefCell::new(0_usize));
        let seen = Rc::clone(&runs);
        let repeat: Augmentation<i32> = Rc::new(move |chain: &mut Chain<'_>, _node: &i32| {
            for _ in 0..times {
                chain.proceed();
            }
            assert_eq!(chain.calls(), times);
        });
        let mut original = || *seen.borrow_mut() += 1;

        run_chain(&[repeat], &0, &mut original);

        assert_eq!(*runs.borrow(), times);
    }
}
