//! Resolving request targets against the CA base URL.

use std::fmt;
use url::Url;

/// A URL reference relative to the CA: path, optional query, optional fragment.
///
/// A reference never carries a scheme or authority; those always come from
/// the base URL. Conversion from a string is infallible: everything before
/// the first `?` (or `#`) is the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Reference {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Reference {
    /// A reference with only a path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
            fragment: None,
        }
    }

    /// Attach a raw query string (without the leading `?`)
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Attach a fragment (without the leading `#`)
    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Path component
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query, if any
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Fragment, if any
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl From<&str> for Reference {
    fn from(s: &str) -> Self {
        let (rest, fragment) = match s.split_once('#') {
            Some((rest, frag)) => (rest, Some(frag.to_string())),
            None => (s, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };
        Self {
            path: path.to_string(),
            query,
            fragment,
        }
    }
}

impl From<String> for Reference {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&String> for Reference {
    fn from(s: &String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Resolve `reference` against `base`.
///
/// Scheme, host and port always come from `base`. An absolute reference path
/// replaces the base path; a relative one is merged with the base path's
/// directory. When the reference has a path, the base query is dropped and
/// the reference query (if any) is used verbatim. An empty reference path
/// keeps the base path, and keeps the base query too unless the reference
/// supplies its own. The fragment is always the reference's.
#[must_use]
pub fn resolve_reference(base: &Url, reference: &Reference) -> Url {
    let mut url = base.clone();

    if reference.path.is_empty() {
        if reference.query.is_some() {
            url.set_query(reference.query.as_deref());
        }
    } else {
        let path = if reference.path.starts_with('/') {
            reference.path.clone()
        } else {
            merge_paths(base.path(), &reference.path)
        };
        url.set_path(&path);
        url.set_query(reference.query.as_deref());
    }

    url.set_fragment(reference.fragment.as_deref());
    url
}

fn merge_paths(base: &str, relative: &str) -> String {
    match base.rfind('/') {
        Some(idx) => format!("{}{relative}", &base[..=idx]),
        None => format!("/{relative}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_path_on_bare_host() {
        let got = resolve_reference(&base("https://localhost"), &Reference::new("/foo"));
        assert_eq!(got.as_str(), "https://localhost/foo");
    }

    #[test]
    fn test_path_replaces_base_path() {
        let got = resolve_reference(&base("https://localhost/bar"), &Reference::new("/foo"));
        assert_eq!(got.as_str(), "https://localhost/foo");
    }

    #[test]
    fn test_query_carried_verbatim() {
        let reference = Reference::new("/foo").with_query("foo=bar");
        let got = resolve_reference(&base("https://localhost"), &reference);
        assert_eq!(got.as_str(), "https://localhost/foo?foo=bar");
        assert_eq!(got.scheme(), "https");
        assert_eq!(got.host_str(), Some("localhost"));
        assert_eq!(got.path(), "/foo");
        assert_eq!(got.query(), Some("foo=bar"));
    }

    #[test]
    fn test_base_query_dropped_when_path_given() {
        let got = resolve_reference(&base("https://localhost/bar?x=1#top"), &Reference::new("/foo"));
        assert_eq!(got.as_str(), "https://localhost/foo");
    }

    #[test]
    fn test_port_kept() {
        let got = resolve_reference(&base("https://127.0.0.1:9000/"), &Reference::from("/roots?a=b"));
        assert_eq!(got.as_str(), "https://127.0.0.1:9000/roots?a=b");
    }

    #[test]
    fn test_empty_path_keeps_base() {
        let b = base("https://localhost/bar?x=1");
        assert_eq!(resolve_reference(&b, &Reference::default()).as_str(), "https://localhost/bar?x=1");

        let reference = Reference::default().with_query("y=2");
        assert_eq!(resolve_reference(&b, &reference).as_str(), "https://localhost/bar?y=2");
    }

    #[test]
    fn test_relative_path_merges() {
        let b = base("https://localhost/acme/dir");
        assert_eq!(resolve_reference(&b, &Reference::new("new-order")).path(), "/acme/new-order");
        assert_eq!(resolve_reference(&b, &Reference::new("../roots")).path(), "/roots");
    }

    #[test]
    fn test_fragment_from_reference() {
        let got = resolve_reference(&base("https://localhost/#a"), &Reference::from("/x#b"));
        assert_eq!(got.fragment(), Some("b"));
    }

    #[test]
    fn test_deterministic() {
        let b = base("https://ca.local/base");
        let r = Reference::from("/sign?x=1");
        assert_eq!(resolve_reference(&b, &r), resolve_reference(&b, &r));
    }

    #[test]
    fn test_reference_from_str() {
        let r = Reference::from("/a/b?c=d#e");
        assert_eq!(r.path(), "/a/b");
        assert_eq!(r.query(), Some("c=d"));
        assert_eq!(r.fragment(), Some("e"));
        assert_eq!(r.to_string(), "/a/b?c=d#e");

        let r = Reference::from("/a#frag?notquery");
        assert_eq!(r.path(), "/a");
        assert_eq!(r.query(), None);
        assert_eq!(r.fragment(), Some("frag?notquery"));
    }
}
