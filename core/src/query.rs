//! Query-string filters for list endpoints.
//!
//! # Design
//! A `Filter` is an ordered mapping from filter-field name to an already
//! rendered scalar value, matching the backend's query parameters. Two
//! encoders exist because the two list endpoints that take filters do not
//! agree on empty values: the activities endpoint drops keys whose value is
//! empty, the users endpoint serializes everything it is given. Both
//! behaviors are part of the backend integration contract and are kept
//! side by side rather than unified.

use std::fmt::Display;

/// Ordered filter-field → scalar-value mapping for a list request.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pairs: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter field. Values are rendered with `Display`, so enums,
    /// numbers, and booleans all work.
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a filter field only when `value` is `Some`. Absent values never
    /// enter the mapping at all.
    pub fn maybe(self, key: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode for endpoints that drop empty values (activities): keys whose
    /// value is the empty string are omitted, every other key appears exactly
    /// once with its percent-encoded value.
    pub fn encode_compact(&self) -> String {
        encode(self.pairs.iter().filter(|(_, v)| !v.is_empty()))
    }

    /// Encode every present entry as-is, empty values included (users).
    pub fn encode_verbatim(&self) -> String {
        encode(self.pairs.iter())
    }
}

fn encode<'a>(pairs: impl Iterator<Item = &'a (String, String)>) -> String {
    pairs
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append `query` to `path` when non-empty.
pub(crate) fn with_query(path: String, query: &str) -> String {
    if query.is_empty() {
        path
    } else {
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_drops_empty_values() {
        let qs = Filter::new()
            .with("state", "pendiente")
            .with("search", "")
            .with("id_category", 3)
            .encode_compact();
        assert_eq!(qs, "state=pendiente&id_category=3");
    }

    #[test]
    fn verbatim_keeps_empty_values() {
        let qs = Filter::new()
            .with("search", "")
            .with("include_inactive", false)
            .encode_verbatim();
        assert_eq!(qs, "search=&include_inactive=false");
    }

    #[test]
    fn maybe_skips_absent_values() {
        let qs = Filter::new()
            .maybe("state", Some("completada"))
            .maybe("priority", None::<&str>)
            .encode_compact();
        assert_eq!(qs, "state=completada");
    }

    #[test]
    fn each_key_appears_exactly_once() {
        let qs = Filter::new()
            .with("skip", 0)
            .with("limit", 20)
            .with("search", "report")
            .encode_compact();
        assert_eq!(qs.matches("skip=").count(), 1);
        assert_eq!(qs.matches("limit=").count(), 1);
        assert_eq!(qs, "skip=0&limit=20&search=report");
    }

    #[test]
    fn values_are_percent_encoded() {
        let qs = Filter::new().with("search", "plan & review").encode_compact();
        assert_eq!(qs, "search=plan%20%26%20review");
    }

    #[test]
    fn empty_filter_encodes_to_empty_string() {
        assert_eq!(Filter::new().encode_compact(), "");
        assert_eq!(Filter::new().encode_verbatim(), "");
        assert!(Filter::new().is_empty());
    }

    #[test]
    fn with_query_omits_separator_for_empty_query() {
        assert_eq!(with_query("/activities".to_string(), ""), "/activities");
        assert_eq!(
            with_query("/activities".to_string(), "state=pendiente"),
            "/activities?state=pendiente"
        );
    }
}
