//! Source positions attached to diagnostics as positional arguments.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced when constructing spans.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SpanError {
    /// Indicates the start location occurs after the end location.
    #[error("span starts at {start} but ends earlier at {end}")]
    StartAfterEnd {
        /// Requested start of the span.
        start: SourceLocation,
        /// Requested end of the span.
        end: SourceLocation,
    },
}

/// Represents a location in source code using one-based line and column numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    line: usize,
    column: usize,
}

impl SourceLocation {
    /// Builds a new location.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintel_common::span::SourceLocation;
    ///
    /// let location = SourceLocation::new(3, 5);
    /// assert_eq!(location.line(), 3);
    /// ```
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns the one-based line number.
    #[must_use]
    pub const fn line(self) -> usize {
        self.line
    }

    /// Returns the one-based column number.
    #[must_use]
    pub const fn column(self) -> usize {
        self.column
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open region of source text reported alongside a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    start: SourceLocation,
    end: SourceLocation,
}

impl SourceSpan {
    /// Constructs a span, rejecting an end that precedes the start.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::StartAfterEnd`] when `start` sorts after `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lintel_common::span::{SourceLocation, SourceSpan};
    ///
    /// let span = SourceSpan::new(SourceLocation::new(1, 0), SourceLocation::new(3, 2)).unwrap();
    /// assert_eq!(span.start().line(), 1);
    /// ```
    pub fn new(start: SourceLocation, end: SourceLocation) -> Result<Self, SpanError> {
        if start > end {
            return Err(SpanError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// A zero-width span at `location`.
    #[must_use]
    pub const fn point(location: SourceLocation) -> Self {
        Self {
            start: location,
            end: location,
        }
    }

    /// Returns the start location.
    #[must_use]
    pub const fn start(self) -> SourceLocation {
        self.start
    }

    /// Returns the end location.
    #[must_use]
    pub const fn end(self) -> SourceLocation {
        self.end
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
