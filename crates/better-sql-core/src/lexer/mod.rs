//! Query lexer.
//!
//! Splits query text into a flat stream of [`Token`]s. The lexer never
//! changes the spelling of its input: keyword casing is preserved so that
//! the code generator can mimic it.

mod error;
mod token;
mod tokenizer;

pub use error::LexError;
pub use token::{MULTI_CHAR_OPERATORS, SYMBOL_CHARS, Token};
pub use tokenizer::{Lexer, tokenize};
