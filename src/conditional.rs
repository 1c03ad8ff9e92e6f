//! Dropping one message kind from a visit method when a node predicate holds.

use crate::checker::VisitMethod;
use crate::error::AugmentError;
use crate::host::{CheckerRegistry, DiagnosticSink, VisitTarget};
use crate::intercept::augment_visit;
use crate::suppress::SuppressionScope;
use lintel_common::MessageId;

/// Suppresses `message_id` from `method` on nodes for which `test` holds.
///
/// Each dispatch of `method` runs inside its own [`SuppressionScope`]. The
/// wrapped behaviour always runs exactly once; only diagnostics of kind
/// `message_id` emitted during that run on a matching node are discarded.
/// Other kinds, other visit methods, and non-matching nodes are unaffected.
///
/// # Errors
///
/// Propagates the lookup failures of [`augment_visit`].
///
/// # Examples
///
/// ```
/// use lintel::testing::{ScriptedChecker, TestNode, SCRIPTED};
/// use lintel::{Linter, VisitMethod, suppress_message};
///
/// let mut linter = Linter::new();
/// linter.register(ScriptedChecker::new(&SCRIPTED).on("visit_name", &["E001", "E002"]));
///
/// let visit_name = VisitMethod::new(&SCRIPTED, "visit_name");
/// suppress_message(&mut linter, visit_name, "E001", |node: &TestNode| node.value() == 1).unwrap();
///
/// linter.invoke(visit_name, &TestNode::new("name", 1)).unwrap();
/// let ids: Vec<_> = linter.take_diagnostics().iter().map(|d| d.message_id().to_string()).collect();
/// assert_eq!(ids, ["E002"]);
/// ```
pub fn suppress_message<N, L, P>(
    linter: &mut L,
    method: VisitMethod,
    message_id: impl Into<MessageId>,
    test: P,
) -> Result<(), AugmentError>
where
    L: CheckerRegistry<N> + VisitTarget<N> + DiagnosticSink,
    P: Fn(&N) -> bool + 'static,
{
    let emitter = linter.emitter().clone();
    let message_id = message_id.into();

    augment_visit(linter, method, move |chain, node: &N| {
        let mut scope = SuppressionScope::open(&emitter);
        if test(node) {
            scope.suppress(message_id.clone());
        }
        chain.proceed();
    })
}
