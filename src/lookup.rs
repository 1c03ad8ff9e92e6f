//! Locating registered checkers by declared type.

use crate::checker::{Checker, CheckerId, CheckerType};
use crate::error::AugmentError;
use crate::host::CheckerRegistry;
use std::fmt;

/// A checker found in a host registry.
pub struct RegisteredChecker<'a, N> {
    id: CheckerId,
    checker: &'a dyn Checker<N>,
}

impl<'a, N> RegisteredChecker<'a, N> {
    /// Returns the registration id.
    #[must_use]
    pub const fn id(&self) -> CheckerId {
        self.id
    }

    /// Returns the checker.
    #[must_use]
    pub fn checker(&self) -> &'a dyn Checker<N> {
        self.checker
    }
}

impl<N> fmt::Debug for RegisteredChecker<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredChecker")
            .field("id", &self.id)
            .field("checker_type", &self.checker.checker_type())
            .finish()
    }
}

/// Returns the first registered checker whose type is `checker_type` or
/// extends it.
///
/// Checkers are scanned in registration order.
///
/// # Errors
///
/// Returns [`AugmentError::NoSuchChecker`] carrying `checker_type` when no
/// checker matches.
///
/// # Examples
///
/// ```
/// use lintel::testing::{ScriptedChecker, TestNode};
/// use lintel::{AugmentError, CheckerType, Linter, get_checker};
///
/// static BASE: CheckerType = CheckerType::new("base");
/// static NAMES: CheckerType = CheckerType::extending("names", &BASE);
/// static IMPORTS: CheckerType = CheckerType::new("imports");
///
/// let mut linter: Linter<TestNode> = Linter::new();
/// let id = linter.register(ScriptedChecker::new(&NAMES));
///
/// assert_eq!(get_checker(&linter, &BASE).unwrap().id(), id);
/// assert_eq!(
///     get_checker(&linter, &IMPORTS).unwrap_err(),
///     AugmentError::NoSuchChecker { checker_type: &IMPORTS },
/// );
/// ```
pub fn get_checker<'a, N, R>(
    registry: &'a R,
    checker_type: &'static CheckerType,
) -> Result<RegisteredChecker<'a, N>, AugmentError>
where
    R: CheckerRegistry<N>,
    N: 'a,
{
    registry
        .checkers()
        .find(|(_, checker)| checker.checker_type().is_a(checker_type))
        .map(|(id, checker)| RegisteredChecker { id, checker })
        .ok_or(AugmentError::NoSuchChecker { checker_type })
}
