//! Abstract Syntax Tree (AST) types for select expressions.
//!
//! The tree mirrors the nesting of the query text: a [`Select`] owns its
//! root [`Table`], and every nested relation is a [`Field::Table`] of its
//! parent. Keyword spellings that differ from lowercase are kept in the
//! `*_keyword_text` fields.

mod expression;
mod statement;

pub use expression::{Connective, Operand, WhereExpr};
pub use statement::{
    Column, Condition, Field, GroupBy, OrderBy, OrderField, Pagination, Select, SubQuery, Table,
};
