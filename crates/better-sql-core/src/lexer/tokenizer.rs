//! Query tokenizer implementation.

use super::error::LexError;
use super::token::{MULTI_CHAR_OPERATORS, SYMBOL_CHARS, Token};

/// Characters that may appear in a bare word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '@' | '$' | '?' | '.' | '*')
}

/// Keywords that may be written directly before an opening parenthesis
/// without forming a call.
const PREFIX_KEYWORDS: [&str; 4] = ["not", "in", "and", "or"];

/// A lexer that tokenizes query text line by line.
pub struct Lexer<'a> {
    /// The input text.
    input: &'a str,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Tokenizes the entire input.
    ///
    /// A [`Token::Newline`] separates the tokens of consecutive non-blank
    /// lines; blank lines produce nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] at the first character no token pattern
    /// matches.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        for (index, line) in self.input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if !tokens.is_empty() {
                tokens.push(Token::Newline);
            }
            LineScanner::new(line, index + 1).scan_into(&mut tokens)?;
        }
        Ok(tokens)
    }
}

/// Scans the tokens of a single line.
struct LineScanner<'a> {
    line: &'a str,
    line_no: usize,
    pos: usize,
}

impl<'a> LineScanner<'a> {
    const fn new(line: &'a str, line_no: usize) -> Self {
        Self {
            line,
            line_no,
            pos: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn column(&self) -> usize {
        self.line[..self.pos].chars().count() + 1
    }

    fn scan_into(mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        loop {
            self.skip_whitespace();
            let Some(c) = self.peek() else {
                return Ok(());
            };

            if let Some(op) = self.match_operator() {
                self.pos += op.len();
                tokens.push(Token::symbol(op));
                continue;
            }

            if let Some((phrase, null, consumed)) = self.match_is_null() {
                tokens.push(Token::Symbol(phrase));
                tokens.push(Token::Word(null));
                self.pos += consumed;
                continue;
            }

            if SYMBOL_CHARS.contains(c) {
                self.advance();
                tokens.push(Token::Symbol(c.to_string()));
                continue;
            }

            let word = self.scan_word()?;
            if word.is_empty() {
                return Err(LexError::UnknownCharacter {
                    character: c,
                    line: self.line_no,
                    column: self.column(),
                });
            }
            tokens.push(Token::word(word));
        }
    }

    /// Matches `<>`, `!=`, `<=` or `>=` when followed by a blank or the
    /// end of the line.
    fn match_operator(&self) -> Option<&'static str> {
        let rest = self.rest();
        MULTI_CHAR_OPERATORS.into_iter().find(|op| {
            rest.strip_prefix(op)
                .is_some_and(|after| after.chars().next().is_none_or(char::is_whitespace))
        })
    }

    /// Matches `is null` and `is not null`, returning the phrase as
    /// written, the `null` spelling and the number of bytes consumed.
    fn match_is_null(&self) -> Option<(String, String, usize)> {
        let rest = self.rest();
        let (is, after_is) = split_word(rest);
        if !is.eq_ignore_ascii_case("is") {
            return None;
        }
        let after_is = after_is.trim_start();
        let (second, after_second) = split_word(after_is);
        let (phrase, null_part) = if second.eq_ignore_ascii_case("not") {
            (format!("{is} {second}"), after_second.trim_start())
        } else {
            (is.to_string(), after_is)
        };
        let null = null_part.get(..4)?;
        if !null.eq_ignore_ascii_case("null") {
            return None;
        }
        if null_part[4..].chars().next().is_some_and(is_word_char) {
            return None;
        }
        let consumed = rest.len() - null_part.len() + 4;
        Some((phrase, null.to_string(), consumed))
    }

    /// Scans the longest word at the cursor: bare word characters,
    /// quoted literals and directly attached call arguments.
    fn scan_word(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_word_char(c) {
                self.advance();
            } else if c == '\'' || c == '"' {
                self.scan_quoted(c)?;
            } else if c == '(' && self.pos > start && !self.is_prefix_keyword(start) {
                self.scan_call_arguments()?;
            } else {
                break;
            }
        }
        Ok(self.line[start..self.pos].to_string())
    }

    fn is_prefix_keyword(&self, start: usize) -> bool {
        let word = &self.line[start..self.pos];
        PREFIX_KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k))
    }

    fn scan_quoted(&mut self, quote: char) -> Result<(), LexError> {
        self.advance(); // consume opening quote
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    // Doubled quote is an escaped quote
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return Ok(());
                    }
                }
                Some(_) => {}
                None => {
                    return Err(LexError::Unterminated {
                        what: "quoted literal",
                        line: self.line_no,
                    });
                }
            }
        }
    }

    fn scan_call_arguments(&mut self) -> Result<(), LexError> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Some('(') => {
                    depth += 1;
                    self.advance();
                }
                Some(')') => {
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(c @ ('\'' | '"')) => self.scan_quoted(c)?,
                Some(_) => {
                    self.advance();
                }
                None => {
                    return Err(LexError::Unterminated {
                        what: "function call",
                        line: self.line_no,
                    });
                }
            }
        }
    }
}

/// Splits off the leading run of non-blank characters.
fn split_word(text: &str) -> (&str, &str) {
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    text.split_at(end)
}

/// Tokenizes query text.
///
/// # Errors
///
/// Returns a [`LexError`] when the text contains a character no token
/// pattern accepts.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(text).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<Token> {
        items.iter().map(|w| Token::word(*w)).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize("  \n\t \n").unwrap(), vec![]);
    }

    #[test]
    fn test_inline_select() {
        assert_eq!(
            tokenize("select user [ id ]").unwrap(),
            vec![
                Token::word("select"),
                Token::word("user"),
                Token::symbol("["),
                Token::word("id"),
                Token::symbol("]"),
            ]
        );
    }

    #[test]
    fn test_newlines_between_lines_only() {
        let tokens = tokenize("\n\nselect user {\n  id\n\n}\n").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::word("select"),
                Token::word("user"),
                Token::symbol("{"),
                Token::Newline,
                Token::word("id"),
                Token::Newline,
                Token::symbol("}"),
            ]
        );
    }

    #[test]
    fn test_symbols_without_spaces() {
        assert_eq!(
            tokenize("user{id,name}").unwrap(),
            vec![
                Token::word("user"),
                Token::symbol("{"),
                Token::word("id"),
                Token::symbol(","),
                Token::word("name"),
                Token::symbol("}"),
            ]
        );
    }

    #[test]
    fn test_multi_char_operators() {
        let tokens = tokenize("a <> b != c <= d >= e").unwrap();
        let symbols: Vec<_> = tokens
            .iter()
            .filter(|t| matches!(t, Token::Symbol(_)))
            .cloned()
            .collect();
        assert_eq!(
            symbols,
            vec![
                Token::symbol("<>"),
                Token::symbol("!="),
                Token::symbol("<="),
                Token::symbol(">="),
            ]
        );
    }

    #[test]
    fn test_operator_at_end_of_line() {
        assert_eq!(
            tokenize("a >=").unwrap(),
            vec![Token::word("a"), Token::symbol(">=")]
        );
    }

    #[test]
    fn test_operator_without_trailing_space_is_split() {
        assert_eq!(
            tokenize("a <=b").unwrap(),
            vec![
                Token::word("a"),
                Token::symbol("<"),
                Token::symbol("="),
                Token::word("b"),
            ]
        );
    }

    #[test]
    fn test_is_null_folding() {
        assert_eq!(
            tokenize("delete_time is null").unwrap(),
            vec![
                Token::word("delete_time"),
                Token::symbol("is"),
                Token::word("null"),
            ]
        );
    }

    #[test]
    fn test_is_not_null_folding_keeps_spelling() {
        assert_eq!(
            tokenize("delete_time IS Not NULL").unwrap(),
            vec![
                Token::word("delete_time"),
                Token::symbol("IS Not"),
                Token::word("NULL"),
            ]
        );
    }

    #[test]
    fn test_is_null_before_close_paren() {
        assert_eq!(
            tokenize("(a is null)").unwrap(),
            vec![
                Token::symbol("("),
                Token::word("a"),
                Token::symbol("is"),
                Token::word("null"),
                Token::symbol(")"),
            ]
        );
    }

    #[test]
    fn test_is_nullable_is_not_folded() {
        assert_eq!(
            tokenize("is nullable").unwrap(),
            words(&["is", "nullable"])
        );
    }

    #[test]
    fn test_parameter_markers() {
        assert_eq!(
            tokenize(":user_id $user_id @user_id ?").unwrap(),
            words(&[":user_id", "$user_id", "@user_id", "?"])
        );
    }

    #[test]
    fn test_quoted_literals() {
        assert_eq!(
            tokenize("'it''s here' \"Name\"").unwrap(),
            words(&["'it''s here'", "\"Name\""])
        );
    }

    #[test]
    fn test_function_call_is_one_word() {
        assert_eq!(
            tokenize("count(*) coalesce(a, 'x y') max(length(title))").unwrap(),
            words(&["count(*)", "coalesce(a, 'x y')", "max(length(title))"])
        );
    }

    #[test]
    fn test_keyword_before_paren_is_not_a_call() {
        assert_eq!(
            tokenize("not(a in(b").unwrap(),
            vec![
                Token::word("not"),
                Token::symbol("("),
                Token::word("a"),
                Token::word("in"),
                Token::symbol("("),
                Token::word("b"),
            ]
        );
        assert_eq!(
            tokenize("x = 1 AND(y").unwrap()[3..],
            [Token::word("AND"), Token::symbol("("), Token::word("y")]
        );
    }

    #[test]
    fn test_detached_paren_is_symbol() {
        assert_eq!(
            tokenize("in (").unwrap(),
            vec![Token::word("in"), Token::symbol("(")]
        );
    }

    #[test]
    fn test_dotted_and_star_words() {
        assert_eq!(
            tokenize("post.id * 1.5").unwrap(),
            words(&["post.id", "*", "1.5"])
        );
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(
            tokenize("SELECT Post").unwrap(),
            words(&["SELECT", "Post"])
        );
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("select user [\n  id + 1\n]").unwrap_err();
        assert_eq!(
            err,
            LexError::UnknownCharacter {
                character: '+',
                line: 2,
                column: 6,
            }
        );
        assert_eq!(err.to_string(), "unknown token: '+' at line 2, column 6");
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            tokenize("name = 'abc"),
            Err(LexError::Unterminated { line: 1, .. })
        ));
    }

    #[test]
    fn test_unterminated_call() {
        assert!(matches!(
            tokenize("count(id"),
            Err(LexError::Unterminated {
                what: "function call",
                ..
            })
        ));
    }
}
