//! Value types shared between lint hosts and lintel plugins: message
//! identifiers, positional diagnostic arguments, and source spans.

pub mod diagnostics;
pub mod span;

pub use diagnostics::{Argument, Diagnostic, MessageId};
pub use span::{SourceLocation, SourceSpan, SpanError};
