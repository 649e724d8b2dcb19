//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Violations surfaced while validating a grammar or scanning an expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The scanner reached a character that fits no rule of the grammar.
    #[error("unexpected character '{character}' at byte offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    /// A delimiter was opened but never closed (strict policy only).
    #[error("delimiter '{delimiter}' opened at byte offset {offset} is never closed")]
    UnterminatedDelimiter { delimiter: char, offset: usize },

    /// The caller-supplied grammar failed validation.
    #[error("invalid grammar: {0}")]
    InvalidGrammar(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
