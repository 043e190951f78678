//! Search query newtype.

use std::fmt;

/// A trimmed search query.
///
/// The empty query is a distinct "no query" state, not an error: it keeps the
/// fetch pipeline idle and selects the Empty presentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Query(String);

impl Query {
    /// Smart constructor: strips leading and trailing whitespace.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// The empty query.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// True when nothing but whitespace was entered.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// The trimmed query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_surrounding_whitespace() {
        let query = Query::new("  react hooks \t");
        assert_eq!(query.as_str(), "react hooks");
    }

    #[test]
    fn new_keeps_internal_whitespace() {
        let query = Query::new("a   b");
        assert_eq!(query.as_str(), "a   b");
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert!(Query::new(" ").is_blank());
        assert!(Query::new("\t\n").is_blank());
        assert!(Query::empty().is_blank());
    }

    #[test]
    fn non_blank_query_is_not_blank() {
        assert!(!Query::new(" x ").is_blank());
    }

    #[test]
    fn queries_compare_after_trimming() {
        assert_eq!(Query::new("rust "), Query::new(" rust"));
    }
}
