//! Helpers for extending the checkers of a lint host without touching their
//! source.
//!
//! A plugin locates a registered checker by type ([`get_checker`]), wraps one
//! of its visit methods with extra logic ([`augment_visit`]), buffers and
//! filters what a block of code emits ([`SuppressionScope`]), or combines the
//! two to drop one message kind on nodes matching a predicate
//! ([`suppress_message`]). Hosts participate by implementing
//! [`CheckerRegistry`], [`VisitTarget`], and [`DiagnosticSink`]; [`Linter`] is
//! a small host implementing all three.
//!
//! Everything here is single-threaded: emitters and augmentations are shared
//! through `Rc` and are neither `Send` nor `Sync`.

pub mod checker;
pub mod conditional;
pub mod config;
pub mod error;
pub mod host;
pub mod intercept;
pub mod linter;
pub mod lookup;
pub mod suppress;
pub mod testing;

pub use checker::{Checker, CheckerId, CheckerType, VisitMethod};
pub use conditional::suppress_message;
pub use config::{ALWAYS, ConfigError, Predicate, PredicateSet, SuppressionConfig, SuppressionRule};
pub use error::AugmentError;
pub use host::{CheckerRegistry, DiagnosticSink, EmitFn, Emitter, VisitTarget};
pub use intercept::{Augmentation, Chain, augment_visit, run_chain};
pub use linter::{Linter, SyntaxNode};
pub use lookup::{RegisteredChecker, get_checker};
pub use suppress::{SuppressionScope, with_suppression};
