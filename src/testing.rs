//! Fixtures for exercising augmentations without a real analysis host.
//!
//! [`TestNode`] is a tiny syntax tree carrying a kind, an integer value, and
//! optionally the source span it covers.
//! [`ScriptedChecker`] emits a fixed list of message ids per visit method and
//! journals every visit, so tests can observe how often and in which order
//! the original visit logic ran.

use crate::checker::{Checker, CheckerType};
use crate::host::Emitter;
use crate::linter::SyntaxNode;
use lintel_common::{Argument, Diagnostic, MessageId, SourceSpan};
use std::cell::RefCell;
use std::rc::Rc;

/// Checker type used by [`ScriptedChecker`] fixtures that need no hierarchy.
pub static SCRIPTED: CheckerType = CheckerType::new("scripted");

/// Syntax node with a kind, an integer payload, and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestNode {
    kind: String,
    value: i64,
    span: Option<SourceSpan>,
    children: Vec<TestNode>,
}

impl TestNode {
    /// Creates a leaf node.
    #[must_use]
    pub fn new(kind: impl Into<String>, value: i64) -> Self {
        Self {
            kind: kind.into(),
            value,
            span: None,
            children: Vec::new(),
        }
    }

    /// Appends `child`.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Records the source span the node covers.
    #[must_use]
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Returns the integer payload.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Arguments a [`ScriptedChecker`] attaches to diagnostics for this node:
    /// its kind, its value, then its span when one was recorded.
    #[must_use]
    pub fn arguments(&self) -> Vec<Argument> {
        let mut arguments = vec![
            Argument::Text(self.kind.clone()),
            Argument::Integer(self.value),
        ];
        arguments.extend(self.span.map(Argument::Span));
        arguments
    }
}

impl SyntaxNode for TestNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Shared record of visits, formatted as `method(value)`.
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Checker emitting scripted message ids from its visit methods.
///
/// # Examples
///
/// ```
/// use lintel::testing::{ScriptedChecker, TestNode, SCRIPTED};
/// use lintel::Linter;
///
/// let checker = ScriptedChecker::new(&SCRIPTED).on("visit_name", &["W0612"]);
/// let journal = checker.journal();
/// let mut linter = Linter::new();
/// linter.register(checker);
///
/// linter.walk(&TestNode::new("name", 4));
/// assert_eq!(*journal.borrow(), ["visit_name(4)"]);
/// assert_eq!(linter.take_diagnostics().len(), 1);
/// ```
#[derive(Debug)]
pub struct ScriptedChecker {
    checker_type: &'static CheckerType,
    methods: Vec<&'static str>,
    scripts: Vec<Vec<MessageId>>,
    journal: Journal,
}

impl ScriptedChecker {
    /// A checker of `checker_type` with no visit methods.
    #[must_use]
    pub fn new(checker_type: &'static CheckerType) -> Self {
        Self {
            checker_type,
            methods: Vec::new(),
            scripts: Vec::new(),
            journal: Rc::default(),
        }
    }

    /// Declares `method`, emitting `messages` in order on every visit.
    #[must_use]
    pub fn on(mut self, method: &'static str, messages: &[&str]) -> Self {
        self.methods.push(method);
        self.scripts
            .push(messages.iter().copied().map(MessageId::from).collect());
        self
    }

    /// Returns a handle to the visit journal.
    #[must_use]
    pub fn journal(&self) -> Journal {
        Rc::clone(&self.journal)
    }
}

impl Checker<TestNode> for ScriptedChecker {
    fn checker_type(&self) -> &'static CheckerType {
        self.checker_type
    }

    fn visit_methods(&self) -> &[&'static str] {
        &self.methods
    }

    fn visit(&mut self, method: &str, node: &TestNode, emitter: &Emitter) {
        let Some(position) = self.methods.iter().position(|name| *name == method) else {
            return;
        };
        self.journal
            .borrow_mut()
            .push(format!("{method}({})", node.value));
        for message_id in self.scripts.get(position).into_iter().flatten() {
            emitter.emit(Diagnostic::with_args(message_id.clone(), node.arguments()));
        }
    }
}
