//! Tests for field blocks: columns, aliases, nested relations and
//! sub-query columns.

mod common;
use common::*;

use better_sql_core::ast::{Column, Field, Select, Table};

#[test]
fn multi_row_select() {
    let select = compile_ok("select user [ id ]");
    assert_eq!(
        select,
        Select::new(Table::new("user", false).field(Column::new("id")))
    );
    assert_sql("select user [ id ]", "select\n  user.id\nfrom user");
}

#[test]
fn single_row_select_adds_limit() {
    assert_sql(
        "select user { id }",
        "select\n  user.id\nfrom user\nlimit 1",
    );
}

#[test]
fn inline_and_multi_line_fields_agree() {
    let inline = compile_ok("select user { id, nickname }");
    let multi_line = compile_ok(
        "
select user {
  id
  nickname
}
",
    );
    assert_eq!(inline, multi_line);
    assert_sql(
        "select user { id, nickname }",
        "select\n  user.id\n, user.nickname\nfrom user\nlimit 1",
    );
}

#[test]
fn nested_single_relation_is_inner_join() {
    let text = "
select post [
  title
  author {
    nickname
  }
]
";
    let select = compile_ok(text);
    let author = nested_table(&select.table, 1);
    assert!(author.is_single);
    assert_sql(
        text,
        "select
  post.title
, author.nickname
from post
inner join author on author.id = post.author_id",
    );
}

#[test]
fn nested_multi_relation_is_left_join() {
    assert_sql(
        "select user { id comment [ content ] }",
        "select
  user.id
, comment.content
from user
left join comment on comment.id = user.comment_id
limit 1",
    );
}

#[test]
fn multi_nested_joins_follow_declaration_order() {
    assert_sql(
        "
select cart [
  user_id
  user {
    nickname
  }
  product_id
  product {
    price
    shop {
      name
    }
  }
]
",
        "select
  cart.user_id
, user.nickname
, cart.product_id
, product.price
, shop.name
from cart
inner join user on user.id = cart.user_id
inner join product on product.id = cart.product_id
inner join shop on shop.id = product.shop_id",
    );
}

#[test]
fn column_alias() {
    let select = compile_ok("select post [ id, title as post_title, author_id ]");
    assert_eq!(
        select.table.fields[1],
        Field::Column(Column::new("title").alias("post_title"))
    );
    assert_sql(
        "select post [ id, title as post_title, author_id ]",
        "select
  post.id
, post.title as post_title
, post.author_id
from post",
    );
}

#[test]
fn column_alias_in_nested_table() {
    assert_sql(
        "
select post [
  id
  title as post_title
  author {
    nickname as author
  }
]
",
        "select
  post.id
, post.title as post_title
, author.nickname as author
from post
inner join author on author.id = post.author_id",
    );
}

#[test]
fn table_alias() {
    assert_sql(
        "select thread as post [ id ]",
        "select\n  post.id\nfrom thread as post",
    );
}

#[test]
fn nested_table_alias() {
    assert_sql(
        "
select thread as post [
  id
  user as author {
    username
    id as author_id
    is_admin
  }
  title
]
",
        "select
  post.id
, author.username
, author.id as author_id
, author.is_admin
, post.title
from thread as post
inner join user as author on author.id = post.author_id",
    );
}

#[test]
fn alias_keyword_spelling_is_kept() {
    let select = compile_ok("select thread AS post [ id As post_id ]");
    assert_eq!(select.table.alias_keyword_text.as_deref(), Some("AS"));
    assert_sql(
        "select thread AS post [ id As post_id ]",
        "select\n  post.id As post_id\nfrom thread AS post",
    );
}

#[test]
fn literal_and_function_columns() {
    assert_sql(
        "select post [ id, count(*) as total, max(score), :tag, 'draft' as state ]",
        "select
  post.id
, count(*) as total
, max(post.score)
, :tag
, 'draft' as state
from post",
    );
}

#[test]
fn dotted_column_is_not_requalified() {
    assert_sql(
        "select post [ author.nickname ]",
        "select\n  author.nickname\nfrom post",
    );
}

#[test]
fn sub_query_column() {
    let text = "select user [ id ( select post [ count(*) ] where author_id = 1 ) as posts ]";
    let select = compile_ok(text);
    assert!(matches!(
        &select.table.fields[1],
        Field::SubQuery(sub) if sub.alias.as_deref() == Some("posts")
    ));
    assert_sql(
        text,
        "select
  user.id
, (
  select
    count(*)
  from post
  where post.author_id = 1
) as posts
from user",
    );
}

#[test]
fn empty_field_block_selects_everything() {
    assert_sql("select user [ ]", "select\n  *\nfrom user");
}

#[test]
fn render_is_deterministic() {
    let text = "select post [ id author { nickname } ] where id > 1";
    assert_eq!(sql(text), sql(text));
    assert_eq!(compile_ok(text).to_string(), sql(text));
}
