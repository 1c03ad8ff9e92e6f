//! Diagnostic values passed from checkers to the host reporter.
//!
//! A [`Diagnostic`] is an ordered tuple: a [`MessageId`] naming the kind of
//! finding followed by positional [`Argument`]s. Two diagnostics are equal when
//! their identifiers and arguments match; nothing deduplicates them.

use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier naming the kind of a diagnostic, such as `E001` or `unused-variable`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps `id` as a message identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintel_common::MessageId;
    ///
    /// let id = MessageId::new("E001");
    /// assert_eq!(id.as_str(), "E001");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for MessageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for MessageId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MessageId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Positional detail carried by a diagnostic after its identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Argument {
    /// Free-form text, typically the rendered message.
    Text(String),
    /// Integral value such as a count or a node attribute.
    Integer(i64),
    /// Location of the finding.
    Span(SourceSpan),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Span(span) => write!(f, "{span}"),
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<SourceSpan> for Argument {
    fn from(value: SourceSpan) -> Self {
        Self::Span(value)
    }
}

/// A reported finding: message kind plus ordered arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    message_id: MessageId,
    args: Vec<Argument>,
}

impl Diagnostic {
    /// Starts a diagnostic of kind `message_id` with no arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintel_common::{Argument, Diagnostic};
    ///
    /// let diagnostic = Diagnostic::new("E001").with_arg("unused name").with_arg(3);
    /// assert_eq!(diagnostic.message_id(), "E001");
    /// assert_eq!(diagnostic.args(), &[Argument::from("unused name"), Argument::Integer(3)]);
    /// ```
    #[must_use]
    pub fn new(message_id: impl Into<MessageId>) -> Self {
        Self {
            message_id: message_id.into(),
            args: Vec::new(),
        }
    }

    /// Builds a diagnostic from an identifier and a complete argument list.
    #[must_use]
    pub fn with_args(message_id: impl Into<MessageId>, args: Vec<Argument>) -> Self {
        Self {
            message_id: message_id.into(),
            args,
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<Argument>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Returns the message kind.
    #[must_use]
    pub const fn message_id(&self) -> &MessageId {
        &self.message_id
    }

    /// Returns the positional arguments in order.
    #[must_use]
    pub fn args(&self) -> &[Argument] {
        &self.args
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message_id)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
