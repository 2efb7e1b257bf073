//! SQL text generation from a select AST.

use super::casing::Casing;
use super::qualify::qualify;
use crate::ast::{
    Column, Condition, Connective, Field, GroupBy, Operand, OrderBy, Pagination, Select,
    SubQuery, Table, WhereExpr,
};

/// Keywords that may appear among `order by` modifiers.
const ORDER_KEYWORDS: [&str; 6] = ["collate", "asc", "desc", "nulls", "first", "last"];

/// Renders a select as SQL text, surrounded by newlines.
///
/// Keywords are cased after the spelling of the select keyword; nested
/// sub-selects pick their own casing the same way.
#[must_use]
pub fn render(select: &Select) -> String {
    Generator::new(Casing::from_select_keyword(select.select_keyword_text.as_deref()))
        .select(select)
}

/// Indents every line but the first and the last by two spaces.
fn indent(sql: &str) -> String {
    let lines: Vec<&str> = sql.split('\n').collect();
    let last = lines.len() - 1;
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || i == last {
                (*line).to_string()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a nested select wrapped in parentheses.
fn parenthesized(select: &Select) -> String {
    format!("({})", indent(&render(select)))
}

/// A clause entry together with the scope that owns it.
struct Scoped<'a, T> {
    scope: &'a str,
    item: &'a T,
}

/// Everything a table subtree contributes to the output, in pre-order.
#[derive(Default)]
struct Collected<'a> {
    columns: Vec<String>,
    joins: Vec<String>,
    wheres: Vec<Scoped<'a, Condition>>,
    havings: Vec<Scoped<'a, Condition>>,
    group_by: Vec<Scoped<'a, GroupBy>>,
    order_by: Vec<Scoped<'a, OrderBy>>,
    limits: Vec<&'a Pagination>,
    offsets: Vec<&'a Pagination>,
}

impl Collected<'_> {
    fn merge(&mut self, other: Self) {
        self.columns.extend(other.columns);
        self.joins.extend(other.joins);
        self.wheres.extend(other.wheres);
        self.havings.extend(other.havings);
        self.group_by.extend(other.group_by);
        self.order_by.extend(other.order_by);
        self.limits.extend(other.limits);
        self.offsets.extend(other.offsets);
    }
}

/// How `and` / `or` chains are laid out.
#[derive(Clone, Copy)]
enum Layout {
    /// Each link on its own line, the connective right-aligned to the
    /// clause keyword of the given width.
    Clause(usize),
    /// Everything on one line.
    Inline,
}

/// Walks one select. Holds only the casing chosen for it.
struct Generator {
    casing: Casing,
}

impl Generator {
    const fn new(casing: Casing) -> Self {
        Self { casing }
    }

    /// A keyword as written, or the canonical spelling in this casing.
    fn keyword(&self, written: Option<&str>, canonical: &str) -> String {
        written.map_or_else(|| self.casing.apply(canonical), str::to_string)
    }

    /// A word kept verbatim in the AST: lowercase spellings follow the
    /// casing, anything else is emitted as written.
    fn word(&self, text: &str) -> String {
        if text == text.to_lowercase() {
            self.casing.apply(text)
        } else {
            text.to_string()
        }
    }

    fn select(&self, select: &Select) -> String {
        let table = &select.table;
        let collected = self.visit(table);

        let mut sql = String::from("\n");
        sql.push_str(&self.keyword(select.select_keyword_text.as_deref(), "select"));
        if select.distinct {
            sql.push(' ');
            sql.push_str(&self.keyword(select.distinct_keyword_text.as_deref(), "distinct"));
        }
        sql.push_str("\n  ");
        if collected.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&collected.columns.join("\n, "));
        }
        sql.push('\n');

        sql.push_str(&format!(
            "{} {}\n",
            self.keyword(None, "from"),
            self.table_ref(table)
        ));
        for join in &collected.joins {
            sql.push_str(join);
            sql.push('\n');
        }

        if !collected.wheres.is_empty() {
            sql.push_str(&self.conditions(&collected.wheres, "where"));
            sql.push('\n');
        }
        if let Some(first) = collected.group_by.first() {
            let fields: Vec<String> = collected
                .group_by
                .iter()
                .flat_map(|g| g.item.fields.iter().map(|f| qualify(f, g.scope)))
                .collect();
            sql.push_str(&format!(
                "{} {}\n",
                self.keyword(first.item.keyword_text.as_deref(), "group by"),
                fields.join(", ")
            ));
        }
        if !collected.havings.is_empty() {
            sql.push_str(&self.conditions(&collected.havings, "having"));
            sql.push('\n');
        }
        if let Some(first) = collected.order_by.first() {
            let fields: Vec<String> = collected
                .order_by
                .iter()
                .flat_map(|o| o.item.fields.iter().map(|f| (o.scope, f)))
                .map(|(scope, field)| {
                    let name = qualify(&field.name, scope);
                    match &field.order_modifiers {
                        Some(modifiers) => format!("{name} {}", self.order_modifiers(modifiers)),
                        None => name,
                    }
                })
                .collect();
            sql.push_str(&format!(
                "{} {}\n",
                self.keyword(first.item.keyword_text.as_deref(), "order by"),
                fields.join(", ")
            ));
        }

        // The root's own limit, explicit or implied by `{ }`, comes first;
        // otherwise the first nested one in declaration order.
        match collected.limits.first() {
            Some(limit) if table.limit.is_some() || !table.is_single => {
                sql.push_str(&self.pagination(limit, "limit"));
            }
            _ if table.is_single => {
                sql.push_str(&format!("{} 1\n", self.keyword(None, "limit")));
            }
            _ => {}
        }
        if let Some(offset) = collected.offsets.first() {
            sql.push_str(&self.pagination(offset, "offset"));
        }

        sql
    }

    /// Collects the columns, joins and clauses of a table subtree.
    fn visit<'a>(&self, table: &'a Table) -> Collected<'a> {
        let scope = table.scope_name();
        let mut collected = Collected::default();

        if let Some(item) = &table.where_clause {
            collected.wheres.push(Scoped { scope, item });
        }
        if let Some(item) = &table.having {
            collected.havings.push(Scoped { scope, item });
        }
        if let Some(item) = &table.group_by {
            collected.group_by.push(Scoped { scope, item });
        }
        if let Some(item) = &table.order_by {
            collected.order_by.push(Scoped { scope, item });
        }
        collected.limits.extend(&table.limit);
        collected.offsets.extend(&table.offset);

        for field in &table.fields {
            match field {
                Field::Column(column) => collected.columns.push(self.column(column, scope)),
                Field::Table(nested) => {
                    collected.joins.push(self.join(nested, scope));
                    collected.merge(self.visit(nested));
                }
                Field::SubQuery(sub_query) => collected.columns.push(self.sub_query(sub_query)),
            }
        }

        collected
    }

    fn pagination(&self, pagination: &Pagination, clause: &str) -> String {
        format!(
            "{} {}\n",
            self.keyword(pagination.keyword_text.as_deref(), clause),
            pagination.value
        )
    }

    fn alias(&self, keyword_text: Option<&str>, alias: &str) -> String {
        format!(" {} {alias}", self.keyword(keyword_text, "as"))
    }

    fn column(&self, column: &Column, scope: &str) -> String {
        let mut sql = qualify(&column.name, scope);
        if let Some(alias) = &column.alias {
            sql.push_str(&self.alias(column.alias_keyword_text.as_deref(), alias));
        }
        sql
    }

    fn sub_query(&self, sub_query: &SubQuery) -> String {
        let mut sql = parenthesized(&sub_query.select);
        if let Some(alias) = &sub_query.alias {
            sql.push_str(&self.alias(sub_query.alias_keyword_text.as_deref(), alias));
        }
        sql
    }

    fn table_ref(&self, table: &Table) -> String {
        let mut sql = table.name.clone();
        if let Some(alias) = &table.alias {
            sql.push_str(&self.alias(table.alias_keyword_text.as_deref(), alias));
        }
        sql
    }

    /// `inner join` for a `{ }` relation, `left join` for `[ ]`.
    fn join(&self, table: &Table, parent: &str) -> String {
        let kind = if table.is_single {
            "inner join"
        } else {
            "left join"
        };
        let name = table.scope_name();
        format!(
            "{} {} {} {name}.id = {parent}.{name}_id",
            self.keyword(None, kind),
            self.table_ref(table),
            self.keyword(None, "on"),
        )
    }

    /// Joins the conditions of every scope with `and`. A scope condition
    /// containing `or` is parenthesized when more than one scope
    /// contributes.
    fn conditions(&self, entries: &[Scoped<'_, Condition>], clause: &str) -> String {
        let keyword = self.keyword(entries[0].item.keyword_text.as_deref(), clause);
        let width = keyword.chars().count();
        let wrap = entries.len() > 1;

        let parts: Vec<String> = entries
            .iter()
            .map(|entry| {
                let expr = &entry.item.expr;
                if wrap && expr.has_top_level_or() {
                    format!("({})", self.expr(expr, entry.scope, Layout::Inline))
                } else {
                    self.expr(expr, entry.scope, Layout::Clause(width))
                }
            })
            .collect();

        let and = self.keyword(None, Connective::And.as_str());
        let separator = format!("\n{and:>width$} ");
        format!("{keyword} {}", parts.join(&separator))
    }

    fn expr(&self, expr: &WhereExpr, scope: &str, layout: Layout) -> String {
        match expr {
            WhereExpr::Compare { left, op, right } => {
                let left = self.operand(left, scope, layout);
                let right = self.operand(right, scope, layout);
                let op = self.word(op);
                match (Connective::parse(&op), layout) {
                    (Some(_), Layout::Clause(width)) => format!("{left}\n{op:>width$} {right}"),
                    _ => format!("{left} {op} {right}"),
                }
            }
            WhereExpr::Not { keyword_text, expr } => format!(
                "{} {}",
                self.keyword(keyword_text.as_deref(), "not"),
                self.expr(expr, scope, layout)
            ),
            WhereExpr::Parenthesis { expr } => {
                format!("({})", self.expr(expr, scope, Layout::Inline))
            }
            WhereExpr::Between {
                keyword_text,
                expr,
                negated,
                and_keyword_text,
                low,
                high,
            } => format!(
                "{} {}{} {} {} {}",
                qualify(expr, scope),
                self.negation(*negated),
                self.keyword(keyword_text.as_deref(), "between"),
                qualify(low, scope),
                self.keyword(and_keyword_text.as_deref(), "and"),
                qualify(high, scope),
            ),
            WhereExpr::In {
                keyword_text,
                expr,
                negated,
                select,
            } => format!(
                "{} {}{} {}",
                qualify(expr, scope),
                self.negation(*negated),
                self.keyword(keyword_text.as_deref(), "in"),
                parenthesized(select),
            ),
        }
    }

    fn operand(&self, operand: &Operand, scope: &str, layout: Layout) -> String {
        match operand {
            Operand::Value(value) => qualify(value, scope),
            Operand::Expr(expr) => self.expr(expr, scope, layout),
        }
    }

    fn negation(&self, negated: bool) -> String {
        if negated {
            format!("{} ", self.keyword(None, "not"))
        } else {
            String::new()
        }
    }

    fn order_modifiers(&self, modifiers: &str) -> String {
        modifiers
            .split_whitespace()
            .map(|word| {
                if ORDER_KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k)) {
                    self.word(word)
                } else {
                    word.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
