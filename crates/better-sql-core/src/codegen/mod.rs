//! SQL code generator.
//!
//! Walks the table tree built by the parser and emits one SQL `select`
//! statement: columns qualified with their closest scope, one join per
//! nested relation, and the clauses of every scope merged in a fixed
//! order.

mod casing;
mod generator;
mod qualify;

use core::fmt;

pub use casing::Casing;
pub use generator::render;
pub use qualify::{is_literal, qualify};

use crate::ast::Select;

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
