//! Tests for the JSON shape of the syntax tree.

mod common;
use common::*;

use serde_json::json;

#[test]
fn plain_select() {
    let select = compile_ok("select user { id as user_id }");
    assert_eq!(
        serde_json::to_value(&select).unwrap(),
        json!({
            "table": {
                "name": "user",
                "is_single": true,
                "fields": [
                    { "type": "column", "name": "id", "alias": "user_id" }
                ]
            }
        })
    );
}

#[test]
fn nested_table_and_clauses() {
    let select = compile_ok(
        "SELECT DISTINCT post [ author { nickname } order by nickname desc ] WHERE id > 1 limit 5",
    );
    assert_eq!(
        serde_json::to_value(&select).unwrap(),
        json!({
            "select_keyword_text": "SELECT",
            "distinct": true,
            "distinct_keyword_text": "DISTINCT",
            "table": {
                "name": "post",
                "is_single": false,
                "fields": [
                    {
                        "type": "table",
                        "name": "author",
                        "is_single": true,
                        "fields": [{ "type": "column", "name": "nickname" }],
                        "order_by": {
                            "fields": [{ "name": "nickname", "order_modifiers": "desc" }]
                        }
                    }
                ],
                "where": {
                    "keyword_text": "WHERE",
                    "expr": { "type": "compare", "left": "id", "op": ">", "right": "1" }
                },
                "limit": { "value": "5" }
            }
        })
    );
}

#[test]
fn condition_kinds() {
    let select = compile_ok(
        "select t [ id ] where not (a = 1 or b between 2 and 3) and c in ( select u [ id ] )",
    );
    let value = serde_json::to_value(where_expr(&select)).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "compare",
            "left": {
                "type": "not",
                "expr": {
                    "type": "parenthesis",
                    "expr": {
                        "type": "compare",
                        "left": { "type": "compare", "left": "a", "op": "=", "right": "1" },
                        "op": "or",
                        "right": {
                            "type": "between",
                            "expr": "b",
                            "negated": false,
                            "low": "2",
                            "high": "3"
                        }
                    }
                }
            },
            "op": "and",
            "right": {
                "type": "in",
                "expr": "c",
                "negated": false,
                "select": {
                    "table": {
                        "name": "u",
                        "is_single": false,
                        "fields": [{ "type": "column", "name": "id" }]
                    }
                }
            }
        })
    );
}
