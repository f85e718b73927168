//! URL path construction for endpoint routes.
//!
//! Routes are made of fixed fragments (`/_cat/allocation`), required
//! identifiers (a document ID) and optional comma-joined lists (index names,
//! node IDs). Optional parts that are empty are dropped together with their
//! separator, so a route never contains an empty segment.
//!
//! # Example
//!
//! ```
//! use osclient_core::PathBuilder;
//!
//! let nodes = vec!["n1".to_string(), "n2".to_string()];
//! let metrics: Vec<String> = Vec::new();
//! let path = PathBuilder::new("/_nodes")
//!     .list(&nodes)
//!     .literal("/usage")
//!     .list(&metrics)
//!     .build();
//! assert_eq!(path, "/_nodes/n1,n2/usage");
//! ```

/// Incremental builder for a request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuilder {
    path: String,
}

impl PathBuilder {
    /// Start from a fixed route fragment.
    #[must_use]
    pub fn new(route: &str) -> Self {
        Self {
            path: route.to_string(),
        }
    }

    /// Start from an empty path, for routes that begin with an identifier.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Append a fixed fragment verbatim.
    #[must_use]
    pub fn literal(mut self, fragment: &str) -> Self {
        self.path.push_str(fragment);
        self
    }

    /// Append `/{id}`, even when `id` is empty.
    #[must_use]
    pub fn segment(mut self, id: &str) -> Self {
        self.path.push('/');
        self.path.push_str(id);
        self
    }

    /// Append `/{id}` only when `id` is non-empty.
    #[must_use]
    pub fn optional(self, id: &str) -> Self {
        if id.is_empty() { self } else { self.segment(id) }
    }

    /// Append `/{a,b,...}` only when `values` is non-empty.
    #[must_use]
    pub fn list<S: AsRef<str>>(self, values: &[S]) -> Self {
        if values.is_empty() {
            self
        } else {
            let joined = comma_join(values);
            self.segment(&joined)
        }
    }

    /// Append `a,b,...` with no leading separator, for routes that already
    /// end in `/`.
    #[must_use]
    pub fn join<S: AsRef<str>>(mut self, values: &[S]) -> Self {
        self.path.push_str(&comma_join(values));
        self
    }

    /// Finish the path. An empty path becomes `/`.
    #[must_use]
    pub fn build(self) -> String {
        if self.path.is_empty() {
            "/".to_string()
        } else {
            self.path
        }
    }
}

/// Join values with commas.
#[must_use]
pub fn comma_join<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}
