//! Keyword casing derived from the spelling of `select`.

/// How synthesized keywords are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Casing {
    /// `from`, `inner join`.
    #[default]
    Lower,
    /// `FROM`, `INNER JOIN`.
    Upper,
    /// `From`, `Inner Join`.
    Title,
}

impl Casing {
    /// Picks the casing from the select keyword as written. Only the exact
    /// spellings `SELECT` and `Select` switch away from lowercase.
    #[must_use]
    pub fn from_select_keyword(text: Option<&str>) -> Self {
        match text {
            Some("SELECT") => Self::Upper,
            Some("Select") => Self::Title,
            _ => Self::Lower,
        }
    }

    /// Applies the casing to a keyword phrase.
    #[must_use]
    pub fn apply(self, keyword: &str) -> String {
        match self {
            Self::Lower => keyword.to_lowercase(),
            Self::Upper => keyword.to_uppercase(),
            Self::Title => keyword
                .split(' ')
                .map(title_case_word)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_select_keyword() {
        assert_eq!(Casing::from_select_keyword(None), Casing::Lower);
        assert_eq!(Casing::from_select_keyword(Some("SELECT")), Casing::Upper);
        assert_eq!(Casing::from_select_keyword(Some("Select")), Casing::Title);
        assert_eq!(Casing::from_select_keyword(Some("sELECT")), Casing::Lower);
    }

    #[test]
    fn test_apply() {
        assert_eq!(Casing::Lower.apply("inner join"), "inner join");
        assert_eq!(Casing::Upper.apply("inner join"), "INNER JOIN");
        assert_eq!(Casing::Title.apply("group by"), "Group By");
        assert_eq!(Casing::Title.apply("is not"), "Is Not");
    }

    #[test]
    fn test_symbols_are_unchanged() {
        for casing in [Casing::Lower, Casing::Upper, Casing::Title] {
            assert_eq!(casing.apply("<="), "<=");
        }
    }
}
