//! Capabilities lintel expects from a lint host.
//!
//! A host exposes three things: an ordered set of registered checkers
//! ([`CheckerRegistry`]), a per-method augmentation list ([`VisitTarget`]), and
//! a replaceable diagnostic entry point ([`DiagnosticSink`]). The entry point
//! lives in a shared [`Emitter`] slot so that checkers, augmentations, and
//! suppression scopes all observe the same current function.

use crate::checker::{Checker, CheckerId};
use crate::intercept::Augmentation;
use lintel_common::Diagnostic;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Function receiving every emitted diagnostic.
pub type EmitFn = Rc<dyn Fn(Diagnostic)>;

/// Shared slot holding the host's current emit function.
///
/// Clones share the slot: replacing the function through one handle is seen by
/// all of them.
#[derive(Clone)]
pub struct Emitter {
    slot: Rc<RefCell<EmitFn>>,
}

impl Emitter {
    /// Creates a slot initialised with `emit`.
    #[must_use]
    pub fn new(emit: EmitFn) -> Self {
        Self {
            slot: Rc::new(RefCell::new(emit)),
        }
    }

    /// Sends `diagnostic` to the currently installed function.
    ///
    /// The slot is not borrowed while the function runs, so the function may
    /// itself replace the entry point.
    pub fn emit(&self, diagnostic: Diagnostic) {
        let current = self.current();
        current(diagnostic);
    }

    /// Returns the installed function.
    #[must_use]
    pub fn current(&self) -> EmitFn {
        Rc::clone(&self.slot.borrow())
    }

    /// Installs `emit`, returning the function it displaced.
    pub fn replace(&self, emit: EmitFn) -> EmitFn {
        self.slot.replace(emit)
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("shared", &Rc::strong_count(&self.slot))
            .finish_non_exhaustive()
    }
}

/// Hosts that expose a replaceable diagnostic entry point.
pub trait DiagnosticSink {
    /// Returns the host's emitter slot.
    fn emitter(&self) -> &Emitter;

    /// Emits through the current entry point.
    fn emit(&self, diagnostic: Diagnostic) {
        self.emitter().emit(diagnostic);
    }

    /// Swaps the entry point, returning the previous one.
    fn replace_emit(&self, emit: EmitFn) -> EmitFn {
        self.emitter().replace(emit)
    }
}

impl DiagnosticSink for Emitter {
    fn emitter(&self) -> &Emitter {
        self
    }
}

/// Hosts that enumerate their registered checkers.
pub trait CheckerRegistry<N> {
    /// Yields checkers with their ids, in registration order.
    fn checkers<'a>(&'a self) -> impl Iterator<Item = (CheckerId, &'a dyn Checker<N>)>
    where
        N: 'a;
}

/// Hosts whose visit methods can be wrapped by augmentations.
pub trait VisitTarget<N> {
    /// Appends `augmentation` as the new outermost wrapper of `method` on
    /// `checker`.
    fn install(&mut self, checker: CheckerId, method: &'static str, augmentation: Augmentation<N>);

    /// Wrappers installed on `method` of `checker`, oldest first.
    fn augmentations(&self, checker: CheckerId, method: &str) -> &[Augmentation<N>];
}
