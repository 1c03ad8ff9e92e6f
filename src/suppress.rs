//! Scoped capture and selective replay of emitted diagnostics.
//!
//! A [`SuppressionScope`] swaps the host's emit function for a capturing one
//! when opened. Everything emitted while the scope is alive is buffered in
//! order. When the scope drops, the original function is reinstated and the
//! buffer is replayed through it, skipping any message kind marked with
//! [`SuppressionScope::suppress`].
//!
//! Scopes on the same host must be released in the reverse order they were
//! opened. Releasing an outer scope while an inner one is still alive
//! reinstates a function the inner scope will later overwrite with a stale
//! capture function; diagnostics captured by that stale function are lost.

use crate::host::{DiagnosticSink, EmitFn, Emitter};
use lintel_common::{Diagnostic, MessageId};
use log::{trace, warn};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Guard buffering diagnostics until it is dropped.
///
/// # Examples
///
/// ```
/// use lintel::{Emitter, SuppressionScope};
/// use lintel_common::Diagnostic;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let emitter = Emitter::new(Rc::new(move |d: Diagnostic| sink.borrow_mut().push(d)));
///
/// {
///     let mut scope = SuppressionScope::open(&emitter);
///     emitter.emit(Diagnostic::new("E001"));
///     emitter.emit(Diagnostic::new("E002"));
///     scope.suppress("E001");
///     assert!(seen.borrow().is_empty());
/// }
///
/// assert_eq!(*seen.borrow(), [Diagnostic::new("E002")]);
/// ```
pub struct SuppressionScope {
    emitter: Emitter,
    original: Option<EmitFn>,
    capture: EmitFn,
    pending: Rc<RefCell<Vec<Diagnostic>>>,
    suppressed: HashSet<MessageId>,
}

impl SuppressionScope {
    /// Starts capturing everything `sink` emits.
    #[must_use = "diagnostics are replayed when the scope is dropped"]
    pub fn open<S>(sink: &S) -> Self
    where
        S: DiagnosticSink + ?Sized,
    {
        let emitter = sink.emitter().clone();
        let pending: Rc<RefCell<Vec<Diagnostic>>> = Rc::default();
        let buffer = Rc::clone(&pending);
        let capture: EmitFn =
            Rc::new(move |diagnostic: Diagnostic| buffer.borrow_mut().push(diagnostic));
        let original = emitter.replace(Rc::clone(&capture));

        Self {
            emitter,
            original: Some(original),
            capture,
            pending,
            suppressed: HashSet::new(),
        }
    }

    /// Marks `message_id` to be dropped on release.
    ///
    /// Applies to diagnostics captured before and after this call.
    pub fn suppress(&mut self, message_id: impl Into<MessageId>) {
        self.suppressed.insert(message_id.into());
    }

    /// Whether `message_id` is marked for suppression.
    #[must_use]
    pub fn is_suppressed(&self, message_id: &str) -> bool {
        self.suppressed.contains(message_id)
    }

    /// Number of diagnostics captured so far.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Releases the scope now instead of at the end of the enclosing block.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for SuppressionScope {
    fn drop(&mut self) {
        let Some(original) = self.original.take() else {
            return;
        };
        let displaced = self.emitter.replace(original);
        if !Rc::ptr_eq(&displaced, &self.capture) {
            warn!(
                target: "lintel::suppress",
                "suppression scope released out of order; the emit entry point it restored was not its own",
            );
        }

        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        let captured = pending.len();
        let mut forwarded = 0_usize;
        for diagnostic in pending {
            if self.suppressed.contains(diagnostic.message_id()) {
                continue;
            }
            forwarded += 1;
            self.emitter.emit(diagnostic);
        }
        trace!(
            target: "lintel::suppress",
            "released scope: {forwarded} of {captured} diagnostic(s) forwarded",
        );
    }
}

/// Runs `body` inside a [`SuppressionScope`] on `sink`, releasing it afterwards.
///
/// # Examples
///
/// ```
/// use lintel::{Emitter, with_suppression};
/// use lintel_common::Diagnostic;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let count = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&count);
/// let emitter = Emitter::new(Rc::new(move |_: Diagnostic| seen.set(seen.get() + 1)));
///
/// with_suppression(&emitter, |scope| {
///     scope.suppress("W0611");
///     emitter.emit(Diagnostic::new("W0611"));
///     emitter.emit(Diagnostic::new("W0612"));
/// });
///
/// assert_eq!(count.get(), 1);
/// ```
pub fn with_suppression<S, F, R>(sink: &S, body: F) -> R
where
    S: DiagnosticSink + ?Sized,
    F: FnOnce(&mut SuppressionScope) -> R,
{
    let mut scope = SuppressionScope::open(sink);
    body(&mut scope)
}
