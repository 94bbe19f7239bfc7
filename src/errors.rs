//! Error taxonomy for the core (spec §7).
//!
//! Mirrors the teacher's `errors.rs`: small leaf error types for the regex
//! front end (`LexError`, `ParseError`), wrapped by `#[from]` into the
//! crate-wide [`Error`] enum.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// Error emitted by the regex lexer with a message and column position.
#[derive(Debug, Error, Clone)]
#[error("{message} at column {column}")]
pub struct LexError {
    /// Column at which the error occurred (1-indexed).
    pub column: usize,
    /// Human-readable error message.
    pub message: String,
}

impl LexError {
    pub fn new(column: usize, message: impl Into<String>) -> Self {
        Self {
            column,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEos,
    #[error("unexpected token {found}")]
    UnexpectedToken { found: String },
    #[error("missing closing parenthesis")]
    MissingRParen,
    #[error("illegal postfix operator usage")]
    MisplacedPostfix,
    #[error("empty alternative")]
    EmptyAlternative,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub column: usize,
    pub kind: ParseErrorKind,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at column {}", self.kind, self.column)
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    pub fn new(column: usize, kind: ParseErrorKind) -> Self {
        Self { column, kind }
    }
}

/// Crate-wide error taxonomy (spec §7). Every core primitive that can fail
/// returns this type; fixed-point loops cannot fail once past construction.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// Malformed graph, grammar, or regex input, discovered at construction.
    #[error("malformed input: {reason}")]
    InputShape { reason: String },

    /// An automaton operation was applied to a value of the wrong kind.
    /// Retained for API completeness: the core itself assumes validated
    /// inputs and never raises this; an interpreter collaborator would.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Intersection was requested with an RSM operand, which is explicitly
    /// unsupported (spec §7).
    #[error("unsupported operation: {reason}")]
    UnsupportedOperation { reason: String },

    /// Referenced identifier absent from scope. Retained for API
    /// completeness for an interpreter collaborator; unused by the core.
    #[error("unknown name: {0}")]
    UnknownName(String),

    /// Reassignment of a name already bound in the same scope. Retained for
    /// API completeness for an interpreter collaborator; unused by the core.
    #[error("redeclaration of {0} in the same scope")]
    RedeclarationAttempt(String),

    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    #[must_use]
    pub fn input_shape(reason: impl Into<String>) -> Self {
        Error::InputShape {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Error::UnsupportedOperation {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
