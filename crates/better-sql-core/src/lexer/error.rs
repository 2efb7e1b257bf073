//! Lexer error types.

/// An error raised while splitting query text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// No token pattern matches at the given position.
    #[error("unknown token: {character:?} at line {line}, column {column}")]
    UnknownCharacter {
        /// The offending character.
        character: char,
        /// 1-based line number.
        line: usize,
        /// 1-based column (in characters).
        column: usize,
    },

    /// A quoted literal or call argument list never closes.
    #[error("unterminated {what} at line {line}")]
    Unterminated {
        /// What was left open, e.g. "string literal".
        what: &'static str,
        /// 1-based line number.
        line: usize,
    },
}
