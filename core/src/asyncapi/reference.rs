#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Turns pointer-style `$ref` strings into display names and in-page anchors.
//!
//! Resolution is lossy: only the final path segment is used. References are
//! never followed, so resolution cannot loop.

use crate::error::{AppError, AppResult};
use url::Url;

/// Extracts the simple name from a reference string.
/// e.g. `#/components/schemas/User` -> `User`
///
/// Absent and empty references yield `None`.
///
/// # Arguments
///
/// * `ref_location` - The `$ref` string, if the node carries one.
pub fn resolve_ref(ref_location: Option<&str>) -> Option<&str> {
    let ref_location = ref_location.filter(|r| !r.is_empty())?;
    ref_location.rsplit('/').next()
}

/// Prefix prepended to resolved names to build anchor links.
///
/// Built once per viewing session from the location the rendered document is
/// served at: `path + ?query + #`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Uses `prefix` verbatim.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Derives the prefix from the page location (fragment is dropped).
    ///
    /// An empty query (`/ui?`) contributes nothing, as in a browser's
    /// `location.search`.
    pub fn from_location(location: &Url) -> Self {
        let mut prefix = location.path().to_string();
        if let Some(query) = location.query().filter(|q| !q.is_empty()) {
            prefix.push('?');
            prefix.push_str(query);
        }
        prefix.push('#');
        Self(prefix)
    }

    /// Parses `location` as an absolute URL and derives the prefix from it.
    pub fn parse_location(location: &str) -> AppResult<Self> {
        let url = Url::parse(location)
            .map_err(|e| AppError::InvalidLocation(format!("'{}': {}", location, e)))?;
        Ok(Self::from_location(&url))
    }

    /// The raw prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self("#".to_string())
    }
}

/// Resolves references against a configured [`BaseUrl`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefResolver {
    base_url: BaseUrl,
}

impl RefResolver {
    /// Creates a resolver producing anchors under `base_url`.
    pub fn new(base_url: BaseUrl) -> Self {
        Self { base_url }
    }

    /// The anchor base in use.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Short display name of `ref_location`. See [`resolve_ref`].
    pub fn resolve<'a>(&self, ref_location: Option<&'a str>) -> Option<&'a str> {
        resolve_ref(ref_location)
    }

    /// In-page link to the entity named by `ref_location`.
    pub fn anchor_url(&self, ref_location: Option<&str>) -> Option<String> {
        resolve_ref(ref_location).map(|name| format!("{}{}", self.base_url.as_str(), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ref_takes_last_segment() {
        assert_eq!(resolve_ref(Some("a/b/c")), Some("c"));
        assert_eq!(resolve_ref(Some("#/components/schemas/User")), Some("User"));
    }

    #[test]
    fn test_resolve_ref_without_separator() {
        assert_eq!(resolve_ref(Some("c")), Some("c"));
    }

    #[test]
    fn test_resolve_ref_absent_or_empty() {
        assert_eq!(resolve_ref(None), None);
        assert_eq!(resolve_ref(Some("")), None);
    }

    #[test]
    fn test_base_url_from_location() {
        let url = Url::parse("https://docs.example.com/springwolf/asyncapi-ui.html?group=a#old")
            .unwrap();
        let base = BaseUrl::from_location(&url);
        assert_eq!(base.as_str(), "/springwolf/asyncapi-ui.html?group=a#");
    }

    #[test]
    fn test_base_url_ignores_empty_query() {
        let base = BaseUrl::parse_location("http://localhost:8080/ui?").unwrap();
        assert_eq!(base.as_str(), "/ui#");

        let base = BaseUrl::parse_location("http://localhost:8080/ui").unwrap();
        assert_eq!(base.as_str(), "/ui#");
    }

    #[test]
    fn test_base_url_invalid_location() {
        let err = BaseUrl::parse_location("not a url").unwrap_err();
        assert!(matches!(err, AppError::InvalidLocation(_)));
    }

    #[test]
    fn test_anchor_url() {
        let resolver = RefResolver::new(BaseUrl::new("/ui?x=1#"));
        assert_eq!(
            resolver.anchor_url(Some("#/components/schemas/OrderEvent")),
            Some("/ui?x=1#OrderEvent".to_string())
        );
        assert_eq!(resolver.anchor_url(None), None);
    }

    #[test]
    fn test_default_base_url() {
        let resolver = RefResolver::default();
        assert_eq!(resolver.anchor_url(Some("x/Y")), Some("#Y".to_string()));
    }
}
