//! Condition AST types shared by `where` and `having`.

use serde::Serialize;

use super::statement::Select;

/// A boolean or comparison expression.
///
/// `and` / `or` chains are [`WhereExpr::Compare`] nodes whose operator is
/// the connective. They nest to the right: `a and b and c` is
/// `Compare(a, and, Compare(b, and, c))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WhereExpr {
    /// `left op right`, including `and` / `or` chains.
    Compare {
        /// Left operand.
        left: Operand,
        /// Operator as written.
        op: String,
        /// Right operand.
        right: Operand,
    },
    /// `not expr`.
    Not {
        /// Spelling of `not` when it is not lowercase.
        #[serde(skip_serializing_if = "Option::is_none")]
        keyword_text: Option<String>,
        /// Negated expression.
        expr: Box<WhereExpr>,
    },
    /// `( expr )`.
    Parenthesis {
        /// Inner expression.
        expr: Box<WhereExpr>,
    },
    /// `expr [not] between low and high`.
    Between {
        /// Spelling of `between` when it is not lowercase.
        #[serde(skip_serializing_if = "Option::is_none")]
        keyword_text: Option<String>,
        /// Tested value.
        expr: String,
        /// Whether `not` precedes `between`.
        negated: bool,
        /// Spelling of the inner `and` when it is not lowercase.
        #[serde(skip_serializing_if = "Option::is_none")]
        and_keyword_text: Option<String>,
        /// Lower bound.
        low: String,
        /// Upper bound.
        high: String,
    },
    /// `expr [not] in (select ...)`.
    In {
        /// Spelling of `in` when it is not lowercase.
        #[serde(skip_serializing_if = "Option::is_none")]
        keyword_text: Option<String>,
        /// Tested value.
        expr: String,
        /// Whether `not` precedes `in`.
        negated: bool,
        /// The sub-select.
        select: Box<Select>,
    },
}

impl WhereExpr {
    /// Creates a comparison between two raw operands.
    #[must_use]
    pub fn compare(left: impl Into<String>, op: impl Into<String>, right: impl Into<String>) -> Self {
        Self::Compare {
            left: Operand::Value(left.into()),
            op: op.into(),
            right: Operand::Value(right.into()),
        }
    }

    /// Joins two expressions with a connective (`and` / `or`).
    #[must_use]
    pub fn chain(left: Self, op: impl Into<String>, right: Self) -> Self {
        Self::Compare {
            left: Operand::Expr(Box::new(left)),
            op: op.into(),
            right: Operand::Expr(Box::new(right)),
        }
    }

    /// Returns true if the expression is, or chains through, an `or`
    /// connective. `not` and parenthesis wrappers are looked through;
    /// `between` bounds and `in` sub-selects are not.
    #[must_use]
    pub fn has_top_level_or(&self) -> bool {
        match self {
            Self::Compare { left, op, right } => {
                Connective::parse(op) == Some(Connective::Or)
                    || left.has_top_level_or()
                    || right.has_top_level_or()
            }
            Self::Not { expr, .. } | Self::Parenthesis { expr } => expr.has_top_level_or(),
            Self::Between { .. } | Self::In { .. } => false,
        }
    }
}

/// An operand of [`WhereExpr::Compare`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    /// A column, literal or parameter marker as written.
    Value(String),
    /// A nested expression (both sides of an `and` / `or`).
    Expr(Box<WhereExpr>),
}

impl Operand {
    fn has_top_level_or(&self) -> bool {
        match self {
            Self::Value(_) => false,
            Self::Expr(expr) => expr.has_top_level_or(),
        }
    }
}

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// `and`.
    And,
    /// `or`.
    Or,
}

impl Connective {
    /// Recognises a connective, ignoring case.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("and") {
            Some(Self::And)
        } else if text.eq_ignore_ascii_case("or") {
            Some(Self::Or)
        } else {
            None
        }
    }

    /// Returns the canonical spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}
