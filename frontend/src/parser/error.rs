use crate::token::Kind;
use std::fmt;
use thiserror::Error;

/// What the parser was looking for when it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Token(Kind),
    Statement,
    Factor,
    CaseOrDefault,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::Statement => write!(f, "statement"),
            Expected::Factor => write!(f, "number, identifier or '('"),
            Expected::CaseOrDefault => write!(f, "'case', 'default' or '}}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorKind {
    /// `found` holds the offending token's text, or `None` at end of input.
    UnexpectedToken { expected: Expected, found: Option<String> },
    ChainedComparison { operator: String },
    NestingTooDeep { limit: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParserError {
    pub kind: ParserErrorKind,
    /// Index of the token the parser stopped at.
    pub position: usize,
}

impl fmt::Display for ParserErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserErrorKind::UnexpectedToken { expected, found } => {
                let found = found.as_deref().unwrap_or("end of input");
                write!(f, "Expected {expected}, got {found}")
            }
            ParserErrorKind::ChainedComparison { operator } => {
                write!(f, "chained comparison: unexpected '{operator}' after a complete comparison")
            }
            ParserErrorKind::NestingTooDeep { limit } => {
                write!(f, "nesting exceeds the limit of {limit} levels")
            }
        }
    }
}

impl ParserError {
    pub fn unexpected_token(position: usize, expected: Expected, found: Option<String>) -> Self {
        Self {
            kind: ParserErrorKind::UnexpectedToken { expected, found },
            position,
        }
    }

    pub fn chained_comparison(position: usize, operator: String) -> Self {
        Self {
            kind: ParserErrorKind::ChainedComparison { operator },
            position,
        }
    }

    pub fn nesting_too_deep(position: usize, limit: usize) -> Self {
        Self {
            kind: ParserErrorKind::NestingTooDeep { limit },
            position,
        }
    }

    /// The token kind the parser required, when the failure was a missing token.
    pub fn expected_kind(&self) -> Option<Kind> {
        match &self.kind {
            ParserErrorKind::UnexpectedToken { expected: Expected::Token(kind), .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type ParserResult<T> = Result<T, ParserError>;
