//! Token types for the query lexer.

use core::fmt;

/// Single-character symbols recognised by the lexer.
pub const SYMBOL_CHARS: &str = "{}[]()<>!=,";

/// Multi-character comparison operators, folded into one symbol.
pub const MULTI_CHAR_OPERATORS: [&str; 4] = ["<>", "!=", "<=", ">="];

/// A lexical token.
///
/// Tokens keep the exact spelling found in the input. Keywords are not
/// recognised here; the parser matches them case-insensitively on words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Identifiers, literals, parameter markers, quoted strings and
    /// call fragments such as `count(*)`.
    Word(String),
    /// Brackets, separators, comparison operators and the folded
    /// `is` / `is not` phrases.
    Symbol(String),
    /// Line boundary.
    Newline,
}

impl Token {
    /// Creates a word token.
    #[must_use]
    pub fn word(text: impl Into<String>) -> Self {
        Self::Word(text.into())
    }

    /// Creates a symbol token.
    #[must_use]
    pub fn symbol(text: impl Into<String>) -> Self {
        Self::Symbol(text.into())
    }

    /// Returns true if this is a word equal to `keyword`, ignoring case.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Self::Word(text) if text.eq_ignore_ascii_case(keyword))
    }

    /// Returns true if this is exactly the symbol `symbol`.
    #[must_use]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self, Self::Symbol(text) if text == symbol)
    }

    /// Returns true for `[` and `{`.
    #[must_use]
    pub fn is_open_bracket(&self) -> bool {
        self.is_symbol("[") || self.is_symbol("{")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(text) => write!(f, "word {text:?}"),
            Self::Symbol(text) => write!(f, "symbol {text:?}"),
            Self::Newline => f.write_str("newline"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_keyword_ignores_case() {
        assert!(Token::word("SELECT").is_keyword("select"));
        assert!(Token::word("Select").is_keyword("select"));
        assert!(!Token::symbol("select").is_keyword("select"));
        assert!(!Token::Newline.is_keyword("select"));
    }

    #[test]
    fn test_open_bracket() {
        assert!(Token::symbol("[").is_open_bracket());
        assert!(Token::symbol("{").is_open_bracket());
        assert!(!Token::symbol("(").is_open_bracket());
        assert!(!Token::word("[").is_open_bracket());
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::word("id").to_string(), "word \"id\"");
        assert_eq!(Token::symbol("<=").to_string(), "symbol \"<=\"");
        assert_eq!(Token::Newline.to_string(), "newline");
    }
}
