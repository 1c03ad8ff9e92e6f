//! Errors raised while wiring augmentations into a host.

use crate::checker::CheckerType;
use thiserror::Error;

/// Failures resolving the target of an augmentation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AugmentError {
    /// No registered checker is of the requested type or extends it.
    #[error("checker type `{checker_type}` was not found")]
    NoSuchChecker {
        /// The type that was requested.
        checker_type: &'static CheckerType,
    },

    /// The resolved checker does not implement the named visit method.
    #[error("checker `{checker_type}` has no visit method `{method}`")]
    NoSuchVisitMethod {
        /// Runtime type of the resolved checker.
        checker_type: &'static CheckerType,
        /// The missing method name.
        method: &'static str,
    },
}
