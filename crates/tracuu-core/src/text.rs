// crates/tracuu-core/src/text.rs

//! Text helpers shared by the parser and the query engine.

/// Case-fold a string for comparison.
///
/// Uses Unicode `to_lowercase`, which is locale-independent: `"Phường"` and
/// `"PHƯỜNG"` fold to the same key on every host. Diacritics are kept, so
/// `"phuong"` does not match `"phường"`.
///
/// # Examples
///
/// ```rust
/// use tracuu_core::text::fold_case;
///
/// assert_eq!(fold_case("Bến Nghé"), "bến nghé");
/// assert_eq!(fold_case("AN KHÁNH"), "an khánh");
/// ```
#[inline]
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Normalize a raw query: trim surrounding whitespace, then fold case.
///
/// Returns `None` for an empty or all-whitespace query.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(fold_case(trimmed))
    }
}

/// Clean one physical line of the quasi-CSV export.
///
/// 1. Trim surrounding whitespace.
/// 2. Strip exactly one trailing comma, if present.
/// 3. If the remainder starts AND ends with `"`, strip one quote from each
///    side. Interior quotes are left untouched.
///
/// A lone `"` is kept as-is; stripping needs two distinct quote characters.
///
/// # Examples
///
/// ```rust
/// use tracuu_core::text::clean_line;
///
/// assert_eq!(clean_line("  \"Hà Nội\",  "), "Hà Nội");
/// assert_eq!(clean_line("Phường 1,"), "Phường 1");
/// assert_eq!(clean_line("\"a \"b\" c\""), "a \"b\" c");
/// assert_eq!(clean_line(" , "), "");
/// ```
pub fn clean_line(raw: &str) -> &str {
    let mut line = raw.trim();
    if let Some(stripped) = line.strip_suffix(',') {
        line = stripped;
    }
    if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
        line = &line[1..line.len() - 1];
    }
    line
}

/// Name-based matching for types that expose a searchable name.
///
/// Implementors provide a `&str` view of the name via [`NameMatch::name_str`]
/// and get case-insensitive helpers built on [`fold_case`].
///
/// # Examples
/// ```rust
/// use tracuu_core::text::NameMatch;
///
/// struct Ward(&'static str);
/// impl NameMatch for Ward {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Ward("Phường An Khánh").name_contains("an kh"));
/// assert!(!Ward("Phường An Khánh").name_contains("an kh "));
/// ```
pub trait NameMatch {
    /// Returns the name used for matching.
    fn name_str(&self) -> &str;

    /// Substring match against an already folded needle.
    ///
    /// Hot path for the query engine: the needle is folded once per query.
    #[inline]
    fn name_contains_folded(&self, folded: &str) -> bool {
        fold_case(self.name_str()).contains(folded)
    }

    /// Case-insensitive substring match. The needle is folded but not trimmed.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        self.name_contains_folded(&fold_case(q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_line_strips_only_one_trailing_comma() {
        assert_eq!(clean_line("abc,,"), "abc,");
    }

    #[test]
    fn clean_line_strips_comma_before_quotes() {
        assert_eq!(clean_line("\"Quận 1\","), "Quận 1");
        // The comma inside the quotes is not a trailing comma after trimming.
        assert_eq!(clean_line("\"Quận 1,\""), "Quận 1,");
    }

    #[test]
    fn clean_line_keeps_unbalanced_quotes() {
        assert_eq!(clean_line("\"open"), "\"open");
        assert_eq!(clean_line("close\""), "close\"");
        assert_eq!(clean_line("\""), "\"");
        assert_eq!(clean_line("\"\""), "");
    }

    #[test]
    fn normalize_query_rejects_blank() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("  \t "), None);
        assert_eq!(normalize_query("  An "), Some("an".to_string()));
    }

    #[test]
    fn fold_case_handles_vietnamese_capitals() {
        assert_eq!(fold_case("ĐỐNG ĐA"), "đống đa");
    }
}
