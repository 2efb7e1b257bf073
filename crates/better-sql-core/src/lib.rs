//! # better-sql-core
//!
//! A transpiler from a bracket-nested select language to plain SQL.
//!
//! A query names a root table and its columns; nesting another table's
//! block inside declares a join, and clauses written after a block apply to
//! that table's scope:
//!
//! ```rust
//! let sql = better_sql_core::to_sql(
//!     "select post [
//!        title
//!        author { nickname }
//!      ] where type_id = 1 or type_id = 2",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "select
//!   post.title
//! , author.nickname
//! from post
//! inner join author on author.id = post.author_id
//! where post.type_id = 1
//!    or post.type_id = 2"
//! );
//! ```
//!
//! The pipeline is text -> [`lexer`] tokens -> [`parser`] AST -> [`codegen`]
//! SQL text. [`compile`] and [`render`] expose the two halves.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::Select;
pub use codegen::render;
pub use error::{Error, Result};
pub use lexer::{LexError, Token, tokenize};
pub use parser::{ParseError, Parser, ParserOptions};

/// Tokenizes and parses query text with default options.
///
/// # Errors
///
/// Returns [`Error::Lex`] for unrecognised characters and
/// [`Error::Parse`] for structural errors.
pub fn compile(text: &str) -> Result<Select> {
    compile_with(text, &ParserOptions::default())
}

/// Tokenizes and parses query text with the given parser options.
///
/// # Errors
///
/// Returns [`Error::Lex`] for unrecognised characters and
/// [`Error::Parse`] for structural errors.
pub fn compile_with(text: &str, options: &ParserOptions) -> Result<Select> {
    let tokens = tokenize(text)?;
    Ok(Parser::with_options(tokens, *options).parse()?)
}

/// Compiles query text and renders it, without the surrounding newlines.
///
/// # Errors
///
/// Returns any error from [`compile`].
pub fn to_sql(text: &str) -> Result<String> {
    let select = compile(text)?;
    Ok(render(&select).trim().to_string())
}
