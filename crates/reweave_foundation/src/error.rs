//! Error types for the Reweave system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::element::{ElementId, ElementKind};

/// The main error type for Reweave operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid-option error.
    ///
    /// An option's binding array for `kind` does not line up with its rule's
    /// left pattern. This is fatal: all element lookups index by position.
    #[must_use]
    pub fn invalid_option(kind: ElementKind, expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::InvalidOption {
            kind,
            expected,
            actual,
        })
    }

    /// Creates an unbound-element lookup error.
    #[must_use]
    pub fn unbound_element(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnboundElementLookup { name: name.into() })
    }

    /// Creates an element not found error.
    #[must_use]
    pub fn element_not_found(id: ElementId) -> Self {
        Self::new(ErrorKind::ElementNotFound(id))
    }

    /// Creates an apply-failed error.
    #[must_use]
    pub fn apply_failed(rule: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::ApplyFailed {
            rule: rule.into(),
            detail: detail.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An option's binding arrays are not aligned with its rule's left pattern.
    #[error("invalid option: {kind} bindings expected {expected}, got {actual}")]
    InvalidOption {
        /// Which binding array is misaligned.
        kind: ElementKind,
        /// Length of the corresponding left-pattern array.
        expected: usize,
        /// Actual length of the binding array.
        actual: usize,
    },

    /// A query asked for the mapped element of a name absent from the rule's
    /// left pattern. Programming error.
    #[error("unbound element lookup: {name} is not in the rule's left pattern")]
    UnboundElementLookup {
        /// The name that was looked up.
        name: String,
    },

    /// Element was not found in the graph.
    #[error("element not found: {0:?}")]
    ElementNotFound(ElementId),

    /// The rule applicator failed while mutating a disposable graph copy.
    #[error("apply failed for rule {rule}: {detail}")]
    ApplyFailed {
        /// The rule whose application failed.
        rule: String,
        /// Description of the failure.
        detail: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Rule name, if the error belongs to a specific rule.
    pub rule: Option<String>,
    /// Matrix cell (P index, Q index), if the error belongs to one pair.
    pub pair: Option<(usize, usize)>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule name.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Sets the matrix cell.
    #[must_use]
    pub fn with_pair(mut self, p: usize, q: usize) -> Self {
        self.pair = Some((p, q));
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "in rule {rule}")?;
        }
        if let Some((p, q)) = self.pair {
            if self.rule.is_some() {
                write!(f, " ")?;
            }
            write!(f, "at cell ({p}, {q})")?;
        }
        Ok(())
    }
}

/// Convenient result alias for Reweave operations.
pub type Result<T> = std::result::Result<T, Error>;
