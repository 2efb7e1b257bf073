#![allow(dead_code)]

use better_sql_core::ast::{Field, Select, Table, WhereExpr};
use better_sql_core::{Error, ParseError, compile, render};

pub fn compile_ok(text: &str) -> Select {
    compile(text).unwrap_or_else(|e| panic!("Failed to compile: {text}\nError: {e}"))
}

pub fn compile_err(text: &str) -> Error {
    compile(text).expect_err(&format!("Expected compile error for: {text}"))
}

pub fn parse_err(text: &str) -> ParseError {
    match compile_err(text) {
        Error::Parse(e) => e,
        other => panic!("Expected parse error for: {text}, got {other:?}"),
    }
}

/// Compiles and renders, keeping the surrounding newlines.
pub fn sql(text: &str) -> String {
    render(&compile_ok(text))
}

/// Asserts the rendered SQL, given without its surrounding newlines.
pub fn assert_sql(text: &str, expected: &str) {
    let actual = sql(text);
    assert_eq!(
        actual,
        format!("\n{expected}\n"),
        "\n  Input:\n{text}\n  Rendered:\n{actual}"
    );
}

pub fn nested_table(table: &Table, index: usize) -> &Table {
    match &table.fields[index] {
        Field::Table(t) => t,
        other => panic!("Expected nested table at {index}, got {other:?}"),
    }
}

pub fn where_expr(select: &Select) -> &WhereExpr {
    &select
        .table
        .where_clause
        .as_ref()
        .expect("Expected a where clause")
        .expr
}
