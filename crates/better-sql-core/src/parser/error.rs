//! Parser error types.

use crate::lexer::Token;

/// A parse error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Tokens ran out where something was still required.
    #[error("missing {expected}")]
    Missing {
        /// What was expected, with its context.
        expected: String,
    },

    /// A token of the wrong kind was found.
    #[error("expect {expected}, got: {found}")]
    Unexpected {
        /// What was expected, with its context.
        expected: String,
        /// The offending token.
        found: Token,
    },

    /// A field block never closes.
    #[error("missing close bracket \"{bracket}\" for table \"{table}\"")]
    UnclosedBracket {
        /// The expected closing bracket.
        bracket: &'static str,
        /// The table whose block is open.
        table: String,
    },

    /// A clause keyword with nothing after it.
    #[error("empty {clause} statement after table \"{table}\"")]
    EmptyClause {
        /// Clause name, e.g. "where".
        clause: &'static str,
        /// The owning table.
        table: String,
    },

    /// `as` at the start of a field block.
    #[error("missing field name before \"as\" alias in table \"{table}\"")]
    AliasWithoutField {
        /// The table whose block is being parsed.
        table: String,
    },

    /// `as` after a nested table block.
    #[error("expected \"as\" alias before the fields of table \"{table}\"")]
    AliasAfterTable {
        /// The nested table.
        table: String,
    },

    /// An open bracket with no relation name before it.
    #[error("missing relation table name in fields of table \"{table}\"")]
    MissingRelationName {
        /// The parent table.
        table: String,
    },

    /// The same clause twice in one scope.
    #[error("duplicate {clause} clause for table \"{table}\"")]
    DuplicateClause {
        /// Clause name.
        clause: &'static str,
        /// The owning table.
        table: String,
    },

    /// Tokens left over after a complete select.
    #[error("unexpected trailing token after select expression: {found}")]
    TrailingTokens {
        /// The first unconsumed token.
        found: Token,
    },

    /// Nesting deeper than the configured limit.
    #[error("nesting exceeds the maximum depth of {max_depth}")]
    TooDeep {
        /// The configured limit.
        max_depth: usize,
    },
}

impl ParseError {
    /// Creates a "missing" error.
    #[must_use]
    pub fn missing(expected: impl Into<String>) -> Self {
        Self::Missing {
            expected: expected.into(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: Token) -> Self {
        Self::Unexpected {
            expected: expected.into(),
            found,
        }
    }
}
