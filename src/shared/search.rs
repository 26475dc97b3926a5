/// Turn an optional search term into an `ILIKE` "contains" pattern
///
/// Blank terms yield `None` so the query's `$n::text IS NULL` branch applies.
/// LIKE wildcards in the term are escaped and match literally.
pub fn contains_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;

    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');

    Some(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_terms_are_ignored() {
        assert_eq!(contains_pattern(None), None);
        assert_eq!(contains_pattern(Some("")), None);
        assert_eq!(contains_pattern(Some("   ")), None);
    }

    #[test]
    fn test_term_is_wrapped() {
        assert_eq!(contains_pattern(Some("cardio")), Some("%cardio%".to_string()));
        assert_eq!(contains_pattern(Some(" Paris ")), Some("%Paris%".to_string()));
    }

    #[test]
    fn test_wildcards_are_escaped() {
        assert_eq!(
            contains_pattern(Some("100%_a\\b")),
            Some("%100\\%\\_a\\\\b%".to_string())
        );
    }
}
