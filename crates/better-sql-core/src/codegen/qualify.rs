//! Table qualification of column references.

/// Returns true if the text is a literal rather than a column name:
/// parameter markers, quoted strings, `null` / booleans, numbers, and
/// anything already dotted or containing `*`.
#[must_use]
pub fn is_literal(text: &str) -> bool {
    text.starts_with([':', '@', '$', '?', '\'', '"'])
        || text.eq_ignore_ascii_case("null")
        || text.eq_ignore_ascii_case("true")
        || text.eq_ignore_ascii_case("false")
        || is_number(text)
        || text.contains(['.', '*'])
}

fn is_number(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit()) && text.parse::<f64>().is_ok()
}

/// Prefixes a bare column name with its scope.
///
/// Literals are returned unchanged. For a call such as `count(id)` only
/// the arguments are qualified; arguments containing blanks are kept as
/// written.
#[must_use]
pub fn qualify(text: &str, scope: &str) -> String {
    if is_literal(text) {
        return text.to_string();
    }
    if let Some((function, args)) = split_call(text) {
        let args: Vec<String> = split_args(args)
            .into_iter()
            .map(|arg| {
                if arg.is_empty() || arg.contains(char::is_whitespace) {
                    arg.to_string()
                } else {
                    qualify(arg, scope)
                }
            })
            .collect();
        return format!("{function}({})", args.join(", "));
    }
    format!("{scope}.{text}")
}

/// Splits `name(args)` into the name and the text between the parentheses.
fn split_call(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    if open == 0 || !text.ends_with(')') {
        return None;
    }
    Some((&text[..open], &text[open + 1..text.len() - 1]))
}

/// Splits call arguments on commas outside nested parentheses and quotes.
fn split_args(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}
