//! Select expression parser.
//!
//! A hand-written recursive descent parser. Clauses attach to the table
//! scope they are written after, and the first structural error aborts
//! the parse.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::{DEFAULT_MAX_DEPTH, Parser, ParserOptions, parse};
