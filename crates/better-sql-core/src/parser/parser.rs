//! Select expression parser implementation.

use super::error::ParseError;
use crate::ast::{
    Column, Condition, Connective, Field, GroupBy, OrderBy, OrderField, Pagination, Select,
    SubQuery, Table, WhereExpr,
};
use crate::lexer::Token;

/// Default limit for [`ParserOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Word operators accepted between two operands of a comparison.
const WORD_OPERATORS: [&str; 4] = ["like", "ilike", "glob", "regexp"];

/// Symbols that can never be a comparison operator.
const STRUCTURAL_SYMBOLS: [&str; 7] = ["{", "}", "[", "]", "(", ")", ","];

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum combined nesting of relations, parentheses, sub-selects and
    /// `and` / `or` chain links.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Returns the keyword spelling when it differs from the canonical one.
fn keyword_text(word: &str, canonical: &str) -> Option<String> {
    (word != canonical).then(|| word.to_string())
}

fn reject_duplicate(present: bool, clause: &'static str, table: &Table) -> Result<(), ParseError> {
    if present {
        return Err(ParseError::DuplicateClause {
            clause,
            table: table.name.clone(),
        });
    }
    Ok(())
}

/// Recursive descent parser over a token stream.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    options: ParserOptions,
    depth: usize,
}

impl Parser {
    /// Creates a parser with default options.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    /// Creates a parser with the given options.
    #[must_use]
    pub const fn with_options(tokens: Vec<Token>, options: ParserOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
            depth: 0,
        }
    }

    /// Parses one select expression and requires that nothing follows it.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` at the first structural violation.
    pub fn parse(mut self) -> Result<Select, ParseError> {
        let select = self.parse_select()?;
        self.skip_newlines();
        match self.peek() {
            Some(token) => Err(ParseError::TrailingTokens {
                found: token.clone(),
            }),
            None => Ok(select),
        }
    }

    /// Parses `select [distinct] Table`.
    fn parse_select(&mut self) -> Result<Select, ParseError> {
        let keyword = match self.next_token() {
            Some(Token::Word(word)) if word.eq_ignore_ascii_case("select") => word,
            Some(token) => return Err(ParseError::unexpected("\"select\" keyword", token)),
            None => return Err(ParseError::missing("\"select\" keyword")),
        };

        let mut distinct = false;
        let mut distinct_keyword_text = None;
        // `distinct` directly before a bracket is a table name
        if self.lookahead(0).is_some_and(|t| t.is_keyword("distinct"))
            && self
                .lookahead(1)
                .is_some_and(|t| !t.is_open_bracket() && !t.is_keyword("as"))
        {
            let word = self.expect_word("\"distinct\" keyword")?;
            distinct = true;
            distinct_keyword_text = keyword_text(&word, "distinct");
        }

        let table = self.parse_table()?;

        Ok(Select {
            select_keyword_text: keyword_text(&keyword, "select"),
            distinct,
            distinct_keyword_text,
            table,
        })
    }

    /// Parses the root table of a select.
    fn parse_table(&mut self) -> Result<Table, ParseError> {
        let name = self.expect_word("table name")?;
        let mut table = Table::new(name, false);

        if self.lookahead(0).is_some_and(|t| t.is_keyword("as")) {
            let keyword = self.expect_word("\"as\" keyword")?;
            let alias = self.expect_word(&format!("alias of table \"{}\"", table.name))?;
            table.alias = Some(alias);
            table.alias_keyword_text = keyword_text(&keyword, "as");
        }

        self.parse_fields(&mut table)?;
        Ok(table)
    }

    /// Parses a bracketed field block and the clauses after it.
    fn parse_fields(&mut self, table: &mut Table) -> Result<(), ParseError> {
        self.enter()?;

        let expected = format!("open bracket for table \"{}\"", table.name);
        let close = match self.next_token() {
            Some(Token::Symbol(s)) if s == "[" => "]",
            Some(Token::Symbol(s)) if s == "{" => "}",
            Some(token) => return Err(ParseError::unexpected(expected, token)),
            None => return Err(ParseError::missing(expected)),
        };
        table.is_single = close == "}";

        loop {
            let Some(token) = self.advance() else {
                return Err(ParseError::UnclosedBracket {
                    bracket: close,
                    table: table.name.clone(),
                });
            };
            match token {
                Token::Symbol(s) if s == close => break,
                Token::Newline => {}
                Token::Symbol(s) if s == "," => {}
                Token::Word(word) if word.eq_ignore_ascii_case("as") => {
                    self.parse_field_alias(table, &word)?;
                }
                Token::Word(word) => table.fields.push(Field::Column(Column::new(word))),
                Token::Symbol(s) if s == "[" || s == "{" => {
                    // the bracket belongs to the nested block
                    self.pos -= 1;
                    self.parse_nested_table(table)?;
                }
                Token::Symbol(s) if s == "(" => {
                    let sub_query = self.parse_sub_query(&table.name)?;
                    table.fields.push(Field::SubQuery(sub_query));
                }
                other => {
                    return Err(ParseError::unexpected(
                        format!("fields of table \"{}\"", table.name),
                        other,
                    ));
                }
            }
        }

        self.parse_clauses(table)?;
        self.leave();
        Ok(())
    }

    /// Attaches an `as` alias to the field declared just before it.
    fn parse_field_alias(&mut self, table: &mut Table, keyword: &str) -> Result<(), ParseError> {
        let alias_keyword_text = keyword_text(keyword, "as");
        let field = match table.fields.pop() {
            Some(Field::Column(mut column)) => {
                let alias = self.expect_word(&format!("alias of column \"{}\"", column.name))?;
                column.alias = Some(alias);
                column.alias_keyword_text = alias_keyword_text;
                Field::Column(column)
            }
            Some(Field::SubQuery(mut sub_query)) => {
                let alias = self.expect_word(&format!(
                    "alias of sub-query in table \"{}\"",
                    table.name
                ))?;
                sub_query.alias = Some(alias);
                sub_query.alias_keyword_text = alias_keyword_text;
                Field::SubQuery(sub_query)
            }
            Some(Field::Table(nested)) => {
                return Err(ParseError::AliasAfterTable { table: nested.name });
            }
            None => {
                return Err(ParseError::AliasWithoutField {
                    table: table.name.clone(),
                });
            }
        };
        table.fields.push(field);
        Ok(())
    }

    /// Promotes the column declared just before an open bracket to a
    /// nested relation and parses its block.
    fn parse_nested_table(&mut self, parent: &mut Table) -> Result<(), ParseError> {
        let Some(Field::Column(column)) = parent.fields.pop() else {
            return Err(ParseError::MissingRelationName {
                table: parent.name.clone(),
            });
        };

        let mut nested = Table::new(column.name, false);
        nested.alias = column.alias;
        nested.alias_keyword_text = column.alias_keyword_text;
        self.parse_fields(&mut nested)?;

        parent.fields.push(Field::Table(nested));
        Ok(())
    }

    /// Parses `select ... )` after an opening parenthesis in a field block.
    fn parse_sub_query(&mut self, table: &str) -> Result<SubQuery, ParseError> {
        self.enter()?;
        let select = self.parse_select()?;
        self.expect_symbol(")", &format!("close parenthesis of sub-query in table \"{table}\""))?;
        self.leave();
        Ok(SubQuery {
            select: Box::new(select),
            alias: None,
            alias_keyword_text: None,
        })
    }

    /// Parses the clauses following a field block, in any order.
    fn parse_clauses(&mut self, table: &mut Table) -> Result<(), ParseError> {
        loop {
            let Some(Token::Word(word)) = self.lookahead(0) else {
                return Ok(());
            };
            let keyword = word.to_ascii_lowercase();
            match keyword.as_str() {
                "where" => {
                    reject_duplicate(table.where_clause.is_some(), "where", table)?;
                    table.where_clause = Some(self.parse_condition("where", &table.name)?);
                }
                "having" => {
                    reject_duplicate(table.having.is_some(), "having", table)?;
                    table.having = Some(self.parse_condition("having", &table.name)?);
                }
                "group" => {
                    reject_duplicate(table.group_by.is_some(), "group by", table)?;
                    table.group_by = Some(self.parse_group_by(&table.name)?);
                }
                "order" => {
                    reject_duplicate(table.order_by.is_some(), "order by", table)?;
                    table.order_by = Some(self.parse_order_by(&table.name)?);
                }
                "limit" => {
                    reject_duplicate(table.limit.is_some(), "limit", table)?;
                    table.limit = Some(self.parse_pagination("limit", &table.name)?);
                }
                "offset" => {
                    reject_duplicate(table.offset.is_some(), "offset", table)?;
                    table.offset = Some(self.parse_pagination("offset", &table.name)?);
                }
                _ => return Ok(()),
            }
        }
    }

    /// Parses `where <expr>` or `having <expr>`.
    fn parse_condition(
        &mut self,
        clause: &'static str,
        table: &str,
    ) -> Result<Condition, ParseError> {
        let keyword = self.expect_word(clause)?;
        if self.lookahead(0).is_none() {
            return Err(ParseError::EmptyClause {
                clause,
                table: table.to_string(),
            });
        }
        let expr = self.parse_where_expr(clause, table)?;
        Ok(Condition {
            keyword_text: keyword_text(&keyword, clause),
            expr,
        })
    }

    /// Parses a condition, nesting `and` / `or` chains to the right.
    ///
    /// Each link nests one level deeper in the tree, so it counts toward
    /// the depth limit like any other nesting.
    fn parse_where_expr(&mut self, clause: &str, table: &str) -> Result<WhereExpr, ParseError> {
        let mut links = Vec::new();
        let mut last = self.parse_where_primary(clause, table)?;
        while let Some(Token::Word(word)) = self.lookahead(0) {
            if Connective::parse(word).is_none() {
                break;
            }
            self.enter()?;
            let op = self.expect_word("connective")?;
            if self.lookahead(0).is_none() {
                return Err(ParseError::missing(format!(
                    "condition after \"{op}\" in {clause} statement after table \"{table}\""
                )));
            }
            links.push((last, op));
            last = self.parse_where_primary(clause, table)?;
        }

        self.depth -= links.len();

        // a and b and c => Compare(a, and, Compare(b, and, c))
        Ok(links
            .into_iter()
            .rev()
            .fold(last, |right, (left, op)| WhereExpr::chain(left, op, right)))
    }

    /// Parses `[not] ( "(" expr ")" | comparison )`.
    fn parse_where_primary(&mut self, clause: &str, table: &str) -> Result<WhereExpr, ParseError> {
        let not = if self.lookahead(0).is_some_and(|t| t.is_keyword("not")) {
            Some(self.expect_word("\"not\" keyword")?)
        } else {
            None
        };

        let expr = if self.lookahead(0).is_some_and(|t| t.is_symbol("(")) {
            self.enter()?;
            self.next_token();
            let inner = self.parse_where_expr(clause, table)?;
            self.expect_symbol(
                ")",
                &format!("close parenthesis of {clause} statement after table \"{table}\""),
            )?;
            self.leave();
            WhereExpr::Parenthesis {
                expr: Box::new(inner),
            }
        } else {
            self.parse_comparison(clause, table)?
        };

        Ok(match not {
            Some(keyword) => WhereExpr::Not {
                keyword_text: keyword_text(&keyword, "not"),
                expr: Box::new(expr),
            },
            None => expr,
        })
    }

    /// Parses `between`, `in`, word-operator and symbol comparisons.
    fn parse_comparison(&mut self, clause: &str, table: &str) -> Result<WhereExpr, ParseError> {
        let context = format!("{clause} statement after table \"{table}\"");
        let left = self.expect_word(&format!("left-hand side of {context}"))?;

        let negated = self.lookahead(0).is_some_and(|t| t.is_keyword("not"))
            && self.lookahead(1).is_some_and(|t| {
                t.is_keyword("between")
                    || t.is_keyword("in")
                    || WORD_OPERATORS.iter().any(|op| t.is_keyword(op))
            });
        let not = if negated {
            Some(self.expect_word("\"not\" keyword")?)
        } else {
            None
        };

        match self.lookahead(0) {
            Some(t) if t.is_keyword("between") => {
                let keyword = self.expect_word("\"between\" keyword")?;
                let low = self.expect_word(&format!("lower bound of between in {context}"))?;
                let and = match self.next_token() {
                    Some(Token::Word(word)) if word.eq_ignore_ascii_case("and") => word,
                    Some(token) => {
                        return Err(ParseError::unexpected(
                            format!("\"and\" of between in {context}"),
                            token,
                        ));
                    }
                    None => {
                        return Err(ParseError::missing(format!(
                            "\"and\" of between in {context}"
                        )));
                    }
                };
                let high = self.expect_word(&format!("upper bound of between in {context}"))?;
                Ok(WhereExpr::Between {
                    keyword_text: keyword_text(&keyword, "between"),
                    expr: left,
                    negated,
                    and_keyword_text: keyword_text(&and, "and"),
                    low,
                    high,
                })
            }
            Some(t) if t.is_keyword("in") => {
                let keyword = self.expect_word("\"in\" keyword")?;
                self.expect_symbol("(", &format!("open parenthesis of in in {context}"))?;
                self.enter()?;
                let select = self.parse_select()?;
                self.expect_symbol(")", &format!("close parenthesis of in in {context}"))?;
                self.leave();
                Ok(WhereExpr::In {
                    keyword_text: keyword_text(&keyword, "in"),
                    expr: left,
                    negated,
                    select: Box::new(select),
                })
            }
            Some(t) if WORD_OPERATORS.iter().any(|op| t.is_keyword(op)) => {
                let word = self.expect_word("operator")?;
                let op = match not {
                    Some(not) => format!("{not} {word}"),
                    None => word,
                };
                let right = self.expect_word(&format!("right-hand side of {context}"))?;
                Ok(WhereExpr::compare(left, op, right))
            }
            _ => {
                let expected = format!("operator of {context}");
                let op = match self.next_token() {
                    Some(Token::Symbol(s)) if !STRUCTURAL_SYMBOLS.contains(&s.as_str()) => s,
                    Some(token) => return Err(ParseError::unexpected(expected, token)),
                    None => return Err(ParseError::missing(expected)),
                };
                let right = self.expect_word(&format!("right-hand side of {context}"))?;
                Ok(WhereExpr::compare(left, op, right))
            }
        }
    }

    /// Parses `group by a, b`.
    fn parse_group_by(&mut self, table: &str) -> Result<GroupBy, ParseError> {
        let keyword = self.parse_by_keyword("group", table)?;
        let fields = self.parse_word_list("group by", table, |parser, table| {
            parser.expect_word(&format!("group by column after table \"{table}\""))
        })?;
        Ok(GroupBy {
            keyword_text: keyword_text(&keyword, "group by"),
            fields,
        })
    }

    /// Parses `order by a [collate x] [asc|desc [nulls first|last]], ...`.
    fn parse_order_by(&mut self, table: &str) -> Result<OrderBy, ParseError> {
        let keyword = self.parse_by_keyword("order", table)?;
        let fields = self.parse_word_list("order by", table, Self::parse_order_field)?;
        Ok(OrderBy {
            keyword_text: keyword_text(&keyword, "order by"),
            fields,
        })
    }

    fn parse_order_field(&mut self, table: &str) -> Result<OrderField, ParseError> {
        let name = self.expect_word(&format!("order by column after table \"{table}\""))?;
        let mut modifiers = Vec::new();

        if self.lookahead(0).is_some_and(|t| t.is_keyword("collate")) {
            modifiers.push(self.expect_word("\"collate\" keyword")?);
            modifiers.push(self.expect_word(&format!("collation of order by column \"{name}\""))?);
        }
        if self
            .lookahead(0)
            .is_some_and(|t| t.is_keyword("asc") || t.is_keyword("desc"))
        {
            modifiers.push(self.expect_word("order direction")?);
            if self.lookahead(0).is_some_and(|t| t.is_keyword("nulls")) {
                modifiers.push(self.expect_word("\"nulls\" keyword")?);
                let expected = format!("\"first\" or \"last\" after nulls of column \"{name}\"");
                match self.next_token() {
                    Some(Token::Word(word))
                        if word.eq_ignore_ascii_case("first")
                            || word.eq_ignore_ascii_case("last") =>
                    {
                        modifiers.push(word);
                    }
                    Some(token) => return Err(ParseError::unexpected(expected, token)),
                    None => return Err(ParseError::missing(expected)),
                }
            }
        }

        Ok(OrderField {
            name,
            order_modifiers: (!modifiers.is_empty()).then(|| modifiers.join(" ")),
        })
    }

    /// Consumes `<first> by` and returns the phrase as written.
    fn parse_by_keyword(&mut self, first: &'static str, table: &str) -> Result<String, ParseError> {
        let keyword = self.expect_word(first)?;
        let expected = format!("\"by\" after \"{keyword}\" for table \"{table}\"");
        match self.next_token() {
            Some(Token::Word(by)) if by.eq_ignore_ascii_case("by") => Ok(format!("{keyword} {by}")),
            Some(token) => Err(ParseError::unexpected(expected, token)),
            None => Err(ParseError::missing(expected)),
        }
    }

    /// Parses a comma separated, non-empty list of clause entries.
    fn parse_word_list<T>(
        &mut self,
        clause: &'static str,
        table: &str,
        mut item: impl FnMut(&mut Self, &str) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        if !matches!(self.lookahead(0), Some(Token::Word(_))) {
            return Err(ParseError::EmptyClause {
                clause,
                table: table.to_string(),
            });
        }
        let mut items = vec![item(self, table)?];
        while self.lookahead(0).is_some_and(|t| t.is_symbol(",")) {
            self.next_token();
            items.push(item(self, table)?);
        }
        Ok(items)
    }

    /// Parses `limit <value>` or `offset <value>`.
    fn parse_pagination(
        &mut self,
        clause: &'static str,
        table: &str,
    ) -> Result<Pagination, ParseError> {
        let keyword = self.expect_word(clause)?;
        let value = self.expect_word(&format!("value of {clause} for table \"{table}\""))?;
        Ok(Pagination {
            keyword_text: keyword_text(&keyword, clause),
            value,
        })
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(ParseError::TooDeep {
                max_depth: self.options.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the current token, newlines included, and advances.
    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek(), Some(Token::Newline)) {
            self.pos += 1;
        }
    }

    /// Returns the `n`-th upcoming token, not counting newlines.
    fn lookahead(&self, n: usize) -> Option<&Token> {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !matches!(t, Token::Newline))
            .nth(n)
    }

    /// Skips newlines, then returns the next token and advances.
    fn next_token(&mut self) -> Option<Token> {
        self.skip_newlines();
        self.advance()
    }

    /// Expects a word, skipping newlines before it.
    fn expect_word(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.next_token() {
            Some(Token::Word(word)) => Ok(word),
            Some(token) => Err(ParseError::unexpected(expected, token)),
            None => Err(ParseError::missing(expected)),
        }
    }

    /// Expects the given symbol, skipping newlines before it.
    fn expect_symbol(&mut self, symbol: &str, expected: &str) -> Result<(), ParseError> {
        match self.next_token() {
            Some(Token::Symbol(s)) if s == symbol => Ok(()),
            Some(token) => Err(ParseError::unexpected(expected, token)),
            None => Err(ParseError::missing(expected)),
        }
    }
}

/// Parses a token stream with default options.
///
/// # Errors
///
/// Returns a `ParseError` at the first structural violation.
pub fn parse(tokens: Vec<Token>) -> Result<Select, ParseError> {
    Parser::new(tokens).parse()
}
