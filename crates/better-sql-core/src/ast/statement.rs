//! Select, table and field AST types.

use serde::Serialize;

use super::expression::WhereExpr;

/// A `select` expression: the root of every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Select {
    /// Spelling of the leading keyword when it is not `select`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_keyword_text: Option<String>,
    /// Whether `distinct` follows the select keyword.
    #[serde(skip_serializing_if = "is_false")]
    pub distinct: bool,
    /// Spelling of `distinct` when it is not lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_keyword_text: Option<String>,
    /// The root table.
    pub table: Table,
}

impl Select {
    /// Creates a plain `select` over the given table.
    #[must_use]
    pub const fn new(table: Table) -> Self {
        Self {
            select_keyword_text: None,
            distinct: false,
            distinct_keyword_text: None,
            table,
        }
    }
}

/// A table scope together with its fields and clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Spelling of `as` when it is not lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_keyword_text: Option<String>,
    /// `true` for a `{ }` block (at most one row), `false` for `[ ]`.
    pub is_single: bool,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// WHERE condition of this scope.
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Condition>,
    /// HAVING condition of this scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub having: Option<Condition>,
    /// GROUP BY columns of this scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupBy>,
    /// ORDER BY columns of this scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    /// LIMIT (root scope only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Pagination>,
    /// OFFSET (root scope only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Pagination>,
}

impl Table {
    /// Creates a table without fields or clauses.
    #[must_use]
    pub fn new(name: impl Into<String>, is_single: bool) -> Self {
        Self {
            name: name.into(),
            alias: None,
            alias_keyword_text: None,
            is_single,
            fields: Vec::new(),
            where_clause: None,
            having: None,
            group_by: None,
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// The name columns of this scope are qualified with: the alias if
    /// present, otherwise the table name.
    #[must_use]
    pub fn scope_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// An entry in a table's field block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Field {
    /// A projected column.
    Column(Column),
    /// A nested relation, joined to its parent.
    Table(Table),
    /// A parenthesised select projected as a column.
    SubQuery(SubQuery),
}

impl From<Column> for Field {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<Table> for Field {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<SubQuery> for Field {
    fn from(sub_query: SubQuery) -> Self {
        Self::SubQuery(sub_query)
    }
}

/// A projected column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name or expression as written.
    pub name: String,
    /// Alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Spelling of `as` when it is not lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_keyword_text: Option<String>,
}

impl Column {
    /// Creates an unaliased column.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            alias_keyword_text: None,
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// An inline sub-select used as a projected column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubQuery {
    /// The inner select.
    pub select: Box<Select>,
    /// Alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Spelling of `as` when it is not lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_keyword_text: Option<String>,
}

/// A `where` or `having` condition attached to a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// Spelling of the clause keyword when it is not lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_text: Option<String>,
    /// The condition.
    pub expr: WhereExpr,
}

/// A `group by` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupBy {
    /// Spelling of `group by` when it is not lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_text: Option<String>,
    /// Grouped columns.
    pub fields: Vec<String>,
}

/// An `order by` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    /// Spelling of `order by` when it is not lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_text: Option<String>,
    /// Ordering entries.
    pub fields: Vec<OrderField>,
}

/// One `order by` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderField {
    /// Column to order by.
    pub name: String,
    /// Trailing modifiers as written, e.g. `collate nocase desc nulls last`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_modifiers: Option<String>,
}

/// A `limit` or `offset` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Spelling of the keyword when it is not lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_text: Option<String>,
    /// Row count or parameter marker.
    pub value: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}
