//! Declarative page metadata.
//!
//! Pure configuration read by callers (navigation helpers, reporters); the
//! entity assembler never looks at it.

use serde::{Deserialize, Serialize};

/// Where a page lives and how to recognise it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    /// Route relative to the application base URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub route: String,
    /// Query string appended to the route, without the leading `?`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub query_string: String,
    /// DOM id of the page's root element.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dom_id: String,
    /// Human-readable page name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Name of the registry type the page belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
}

impl PageMeta {
    /// Metadata for a page at `route`.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Self::default()
        }
    }

    /// Set the DOM id of the page's root element.
    pub fn with_dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = dom_id.into();
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the query string. A leading `?` is stripped.
    pub fn with_query_string(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query_string = query.strip_prefix('?').unwrap_or(&query).to_string();
        self
    }

    /// Set the registry name.
    pub fn with_registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Route with the query string appended, e.g. `/search?q=rust`.
    pub fn path(&self) -> String {
        if self.query_string.is_empty() {
            self.route.clone()
        } else {
            format!("{}?{}", self.route, self.query_string)
        }
    }

    /// Absolute URL for this page under `base`.
    ///
    /// Exactly one `/` separates `base` and the route.
    pub fn url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        let path = self.path();
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_without_query() {
        assert_eq!(PageMeta::new("/login").path(), "/login");
    }

    #[test]
    fn path_with_query_strips_question_mark() {
        let meta = PageMeta::new("/search").with_query_string("?q=rust");
        assert_eq!(meta.query_string, "q=rust");
        assert_eq!(meta.path(), "/search?q=rust");
    }

    #[test]
    fn url_joins_with_single_slash() {
        let meta = PageMeta::new("/login");
        assert_eq!(meta.url("https://example.test/"), "https://example.test/login");
        assert_eq!(meta.url("https://example.test"), "https://example.test/login");
        assert_eq!(PageMeta::default().url("https://example.test/"), "https://example.test");
    }
}
