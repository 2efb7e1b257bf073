//! Crate-level error type.

use crate::lexer::LexError;
use crate::parser::ParseError;

/// Any error raised while compiling query text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The tokens do not form a valid select expression.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, Error>;
