//! HTTP request building.
//!
//! [`build_request`] (or the equivalent [`RequestBuilder`]) is the single
//! primitive every endpoint uses to turn its fields into a [`Request`]. The
//! steps always run in the same order:
//!
//! 1. percent-encode the path and parse it, failing with
//!    [`Error::MalformedRequest`]. Space, `"`, `#`, `%`, `<`, `>`, `` ` ``,
//!    `^`, `{`, `|`, `}`, `\` and non-ASCII bytes are escaped while `/` and
//!    `,` stay literal. A query already on the path is kept as is. Control
//!    characters are not escaped and make the request malformed;
//! 2. merge the parameters into the query string, replacing same-named keys;
//! 3. force `Content-Type: application/json` when there is a body;
//! 4. merge the caller's headers. An empty header set is replaced outright,
//!    otherwise every caller value is appended, so a caller `Content-Type`
//!    ends up next to the JSON one rather than replacing it.
//!
//! # Example
//!
//! ```
//! use osclient_core::{Method, ParamMap, build_request};
//! use http::HeaderMap;
//!
//! let mut params = ParamMap::new();
//! params.insert("format".to_string(), "json".to_string());
//!
//! let request = build_request(Method::Get, "/_cat/count/", None, params, HeaderMap::new())
//!     .expect("valid request");
//! assert_eq!(request.uri().to_string(), "/_cat/count/?format=json");
//! ```

use std::collections::BTreeMap;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Uri};
use percent_encoding::{AsciiSet, utf8_percent_encode};
use url::{Position, Url, form_urlencoded};

use crate::{APPLICATION_JSON, Error, Method, ParamMap, Result};

/// Path bytes escaped before parsing. Control characters are left alone so
/// that they fail as malformed.
const PATH_ENCODE_SET: &AsciiSet = &AsciiSet::EMPTY
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'^')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b'\\');

/// Types that produce a transport [`Request`] from their own fields.
///
/// Implemented by every endpoint request type. Building consumes the value:
/// a request description is turned into exactly one transport request.
pub trait Requestable {
    /// Build the transport request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRequest`] if the path cannot be parsed.
    fn into_request(self) -> Result<Request>;
}

impl Requestable for Request {
    fn into_request(self) -> Result<Request> {
        Ok(self)
    }
}

/// Build a transport request from its parts.
///
/// See the [module documentation](self) for the exact rules.
///
/// # Errors
///
/// Returns [`Error::MalformedRequest`] if `path` is not a valid request URI.
pub fn build_request(
    method: Method,
    path: &str,
    body: Option<Bytes>,
    params: ParamMap,
    headers: HeaderMap,
) -> Result<Request> {
    let mut builder = Request::builder(method, path)
        .params(params)
        .headers(headers);
    if let Some(body) = body {
        builder = builder.body(body);
    }
    builder.build()
}

/// An HTTP request with method, URI, headers, and optional body.
///
/// The URI holds only a path and query until the request is
/// [resolved](Request::resolve) against a base URL.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, path)
    }

    /// Reassemble a request from its parts.
    #[must_use]
    pub fn from_parts(method: Method, uri: Uri, headers: HeaderMap, body: Option<Bytes>) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Request path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Raw encoded query string, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Decoded query parameters, in encoded order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query()
            .map(|query| form_urlencoded::parse(query.as_bytes()).into_owned().collect())
            .unwrap_or_default()
    }

    /// Decoded value of a query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// First value of a header, if it is valid text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// All text values of a header, in insertion order.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, uri, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Uri, HeaderMap, Option<Bytes>) {
        (self.method, self.uri, self.headers, self.body)
    }

    /// Make the URI absolute against `base`.
    ///
    /// Scheme and authority come from `base`; a path prefix in `base`
    /// (e.g. `https://proxy/opensearch`) is prepended to the request path.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` has no host or the combined URI is invalid.
    pub fn resolve(mut self, base: &Url) -> Result<Self> {
        if !base.has_host() {
            return Err(Error::invalid_request(format!(
                "base URL has no host: {base}"
            )));
        }

        let authority = &base[Position::BeforeHost..Position::AfterPort];
        let prefix = base.path().trim_end_matches('/');
        let path_and_query = self
            .uri
            .path_and_query()
            .map_or("/", http::uri::PathAndQuery::as_str);

        self.uri = format!("{}://{authority}{prefix}{path_and_query}", base.scheme()).parse()?;
        Ok(self)
    }
}

/// Builder for constructing [`Request`] instances.
///
/// The builder only collects parts; [`RequestBuilder::build`] applies them in
/// a fixed order regardless of the order the setters were called in.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    path: String,
    params: ParamMap,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: ParamMap::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Sets a query parameter, replacing a previous value for the same key.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Sets query parameters, replacing previous values for the same keys.
    #[must_use]
    pub fn params(mut self, params: ParamMap) -> Self {
        if self.params.is_empty() {
            self.params = params;
        } else {
            self.params.extend(params);
        }
        self
    }

    /// Sets the caller-supplied headers.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `value` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.body(body))
    }

    /// Builds the [`Request`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRequest`] if the encoded path is not a valid
    /// URI.
    pub fn build(self) -> Result<Request> {
        let mut uri: Uri = encode_path(&self.path).parse()?;

        if !self.params.is_empty() {
            uri = with_params(&uri, self.params)?;
        }

        let mut headers = HeaderMap::new();
        if self.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        if !self.headers.is_empty() {
            if headers.is_empty() {
                headers = self.headers;
            } else {
                let mut current = None;
                for (name, value) in self.headers {
                    if name.is_some() {
                        current = name;
                    }
                    if let Some(name) = &current {
                        headers.append(name.clone(), value);
                    }
                }
            }
        }

        Ok(Request {
            method: self.method,
            uri,
            headers,
            body: self.body,
        })
    }
}

/// Percent-encode the part of `path` before any `?`.
fn encode_path(path: &str) -> String {
    match path.split_once('?') {
        Some((path, query)) => format!(
            "{}?{query}",
            utf8_percent_encode(path, PATH_ENCODE_SET)
        ),
        None => utf8_percent_encode(path, PATH_ENCODE_SET).to_string(),
    }
}

/// Merge `params` into the query of `uri`, replacing same-named keys.
/// Keys are encoded in sorted order.
fn with_params(uri: &Uri, params: ParamMap) -> Result<Uri> {
    let mut query: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(existing) = uri.query() {
        for (key, value) in form_urlencoded::parse(existing.as_bytes()).into_owned() {
            query.entry(key).or_default().push(value);
        }
    }
    for (key, value) in params {
        query.insert(key, vec![value]);
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in &query {
        for value in values {
            serializer.append_pair(key, value);
        }
    }

    let mut path_and_query = uri.path().to_string();
    path_and_query.push('?');
    path_and_query.push_str(&serializer.finish());
    Ok(path_and_query.parse::<Uri>()?)
}
