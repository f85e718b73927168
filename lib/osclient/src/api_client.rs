//! The dispatcher.
//!
//! [`Client`] combines an [`HttpClient`] transport with the cluster base URL
//! and runs every endpoint call through [`Client::perform`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::api::ErrorResponse;
use crate::{
    ApiResponse, ApiResult, Error, Failure, HttpClient, HyperClient, Requestable, Response, Result,
    from_json, is_json,
};

/// Environment variable read by [`Client::from_env`].
pub const URL_ENV: &str = "OPENSEARCH_URL";

/// Cluster URL used when [`URL_ENV`] is unset or empty.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// OpenSearch API client.
///
/// Cheap to clone when the transport is; [`HyperClient`] shares its
/// connection pool between clones.
///
/// # Example
///
/// ```ignore
/// use osclient::{Client, HyperClient};
///
/// let http = HyperClient::builder().with_logging().build();
/// let client = Client::new(http, "https://search.internal:9200")?;
///
/// let health = client.cluster().health(None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Client<C = HyperClient> {
    http: C,
    base_url: Url,
}

impl<C> Client<C> {
    /// Create a client for the cluster at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(http: C, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url.as_ref())?,
        })
    }

    /// Create a client with a pre-parsed URL.
    #[must_use]
    pub fn with_url(http: C, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Create a client for the cluster named by `OPENSEARCH_URL`, falling
    /// back to `http://localhost:9200`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable holds an invalid URL.
    pub fn from_env_with(http: C) -> Result<Self> {
        Self::new(http, url_from_env(std::env::var(URL_ENV).ok()))
    }

    /// The cluster base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the transport.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.http
    }

    /// Get a mutable reference to the transport.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.http
    }

    /// Consume the client and return the transport.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.http
    }
}

impl Client<HyperClient> {
    /// Create a client with a default [`HyperClient`] transport for the
    /// cluster named by `OPENSEARCH_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable holds an invalid URL.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(HyperClient::new())
    }
}

impl<C: HttpClient> Client<C> {
    /// Execute an endpoint request and decode its typed response.
    ///
    /// The typed response is produced on every path. On failure it comes
    /// back inside the [`Failure`] with default body fields, and
    /// [`inspect`](ApiResponse::inspect) exposes the raw response whenever
    /// the server answered.
    ///
    /// Dropping the returned future cancels the call.
    ///
    /// # Errors
    ///
    /// - the request cannot be built or resolved
    /// - the transport fails or times out
    /// - the server answers with a non-2xx status
    /// - the body is not JSON or does not decode into the response type
    pub async fn perform<R, T>(&self, request: R) -> ApiResult<T>
    where
        R: Requestable,
        T: ApiResponse,
    {
        let request = match request
            .into_request()
            .and_then(|request| request.resolve(&self.base_url))
        {
            Ok(request) => request,
            Err(error) => return Err(Failure::new(error, T::from_parts(T::Body::default(), None))),
        };

        let method = request.method();
        let path = request.path().to_string();

        let raw = match self.http.execute(request).await {
            Ok(response) => Arc::new(response),
            Err(error) => {
                debug!(%method, %path, %error, "no response received");
                return Err(Failure::new(error, T::from_parts(T::Body::default(), None)));
            }
        };

        match decode::<T::Body>(&raw) {
            Ok(body) => Ok(T::from_parts(body, Some(raw))),
            Err(error) => {
                if error.status().is_some() {
                    debug!(%method, %path, %error, "request rejected");
                } else {
                    warn!(%method, %path, %error, "failed to decode response");
                }
                Err(Failure::new(error, T::from_parts(T::Body::default(), Some(raw))))
            }
        }
    }
}

fn url_from_env(value: Option<String>) -> String {
    value
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_URL.to_string())
}

/// Decode a raw response into an endpoint body.
fn decode<B: DeserializeOwned + Default>(response: &Response) -> Result<B> {
    let status = response.status();
    if !status.is_success() {
        let message = ErrorResponse::message_from(response.body()).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        });
        return Err(Error::http_with_body(
            status.as_u16(),
            message,
            response.body().clone(),
        ));
    }

    if response.body().is_empty() {
        return Ok(B::default());
    }

    if let Some(content_type) = response.content_type()
        && !is_json(content_type)
    {
        return Err(Error::UnexpectedContentType(content_type.to_string()));
    }

    from_json(response.body())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bytes::Bytes;
    use http::header::CONTENT_TYPE;
    use http::{HeaderMap, HeaderValue, StatusCode};

    use super::*;
    use crate::api::{ClusterHealthResp, DanglingImportReq, DanglingImportResp};
    use crate::{Inspect, Method, Request};

    /// Transport double answering every call with one canned response.
    #[derive(Debug)]
    struct Canned {
        response: Option<Response>,
        seen: Mutex<Vec<String>>,
    }

    impl Canned {
        fn answering(status: StatusCode, content_type: Option<&'static str>, body: &str) -> Self {
            let mut headers = HeaderMap::new();
            if let Some(content_type) = content_type {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
            Self {
                response: Some(Response::new(
                    status,
                    headers,
                    Bytes::from(body.to_string()),
                )),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn refusing() -> Self {
            Self {
                response: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpClient for Canned {
        async fn execute(&self, request: Request) -> Result<Response> {
            self.seen
                .lock()
                .expect("lock")
                .push(format!("{} {}", request.method(), request.uri()));
            self.response
                .clone()
                .ok_or_else(|| Error::connection("connection refused"))
        }
    }

    fn client(http: Canned) -> Client<Canned> {
        Client::new(http, "http://localhost:9200").expect("client")
    }

    #[derive(Debug, Default, serde::Deserialize)]
    struct Ack {
        acknowledged: bool,
        #[serde(skip)]
        response: Option<Arc<Response>>,
    }

    impl ApiResponse for Ack {
        type Body = Self;

        fn from_parts(mut body: Self, raw: Option<Arc<Response>>) -> Self {
            body.response = raw;
            body
        }

        fn inspect(&self) -> Inspect {
            Inspect::new(self.response.clone())
        }
    }

    #[test]
    fn env_url_fallback() {
        assert_eq!(url_from_env(None), DEFAULT_URL);
        assert_eq!(url_from_env(Some("  ".to_string())), DEFAULT_URL);
        assert_eq!(
            url_from_env(Some("https://search:9200".to_string())),
            "https://search:9200"
        );
    }

    #[test]
    fn invalid_base_url() {
        let err = Client::new(Canned::refusing(), "not a url").expect_err("invalid");
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn perform_decodes_success() {
        let client = client(Canned::answering(
            StatusCode::OK,
            Some("application/json; charset=UTF-8"),
            r#"{"acknowledged":true}"#,
        ));

        let ack: Ack = client
            .perform(Request::builder(Method::Post, "/_dangling/abc").build().expect("request"))
            .await
            .expect("success");

        assert!(ack.acknowledged);
        assert_eq!(ack.inspect().status(), Some(StatusCode::OK));
        assert_eq!(
            client.inner().seen.lock().expect("lock").as_slice(),
            ["POST http://localhost:9200/_dangling/abc"]
        );
    }

    #[tokio::test]
    async fn perform_sends_endpoint_request() {
        let client = client(Canned::answering(
            StatusCode::OK,
            Some("application/json"),
            r#"{"acknowledged":true}"#,
        ));

        let resp: DanglingImportResp = client
            .perform(DanglingImportReq {
                index_uuid: "zmM4e0JtBkeUjiHD-MihPQ".to_string(),
                ..Default::default()
            })
            .await
            .expect("success");

        assert!(resp.acknowledged);
        assert_eq!(
            client.inner().seen.lock().expect("lock").as_slice(),
            ["POST http://localhost:9200/_dangling/zmM4e0JtBkeUjiHD-MihPQ"]
        );
    }

    #[tokio::test]
    async fn perform_empty_body_is_default() {
        let client = client(Canned::answering(StatusCode::OK, None, ""));

        let ack: Ack = client
            .perform(Request::builder(Method::Get, "/").build().expect("request"))
            .await
            .expect("success");

        assert!(!ack.acknowledged);
        assert!(ack.inspect().has_response());
    }

    #[tokio::test]
    async fn perform_status_error_keeps_response() {
        let body = r#"{"error":{"type":"index_not_found_exception","reason":"no such index [logs]"},"status":404}"#;
        let client = client(Canned::answering(
            StatusCode::NOT_FOUND,
            Some("application/json"),
            body,
        ));

        let failure = client
            .perform::<_, ClusterHealthResp>(
                Request::builder(Method::Get, "/_cluster/health/logs")
                    .build()
                    .expect("request"),
            )
            .await
            .expect_err("404");

        assert!(failure.error().is_not_found());
        assert_eq!(
            failure.to_string(),
            "HTTP error 404: index_not_found_exception: no such index [logs]"
        );
        assert_eq!(failure.response().cluster_name, "");
        let inspect = failure.inspect();
        assert_eq!(inspect.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(inspect.body().map(|b| b.to_vec()), Some(body.as_bytes().to_vec()));
    }

    #[tokio::test]
    async fn perform_status_error_without_payload_uses_reason_phrase() {
        let client = client(Canned::answering(StatusCode::SERVICE_UNAVAILABLE, None, ""));

        let failure = client
            .perform::<_, Ack>(Request::builder(Method::Get, "/").build().expect("request"))
            .await
            .expect_err("503");

        assert_eq!(failure.error().status(), Some(503));
        assert_eq!(failure.to_string(), "HTTP error 503: Service Unavailable");
    }

    #[tokio::test]
    async fn perform_rejects_non_json() {
        let client = client(Canned::answering(
            StatusCode::OK,
            Some("text/plain"),
            "green",
        ));

        let failure = client
            .perform::<_, Ack>(Request::builder(Method::Get, "/").build().expect("request"))
            .await
            .expect_err("text body");

        assert!(matches!(failure.error(), Error::UnexpectedContentType(ct) if ct == "text/plain"));
        assert!(failure.inspect().has_response());
    }

    #[tokio::test]
    async fn perform_bad_json_keeps_response() {
        let client = client(Canned::answering(
            StatusCode::OK,
            Some("application/json"),
            r#"{"acknowledged":"yes"}"#,
        ));

        let failure = client
            .perform::<_, Ack>(Request::builder(Method::Get, "/").build().expect("request"))
            .await
            .expect_err("bad json");

        assert!(failure.error().is_deserialization());
        assert!(failure.error().to_string().contains("acknowledged"));
        assert!(!failure.response().acknowledged);
        assert_eq!(failure.inspect().status(), Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn perform_transport_error_has_no_response() {
        let client = client(Canned::refusing());

        let failure = client
            .perform::<_, Ack>(Request::builder(Method::Get, "/").build().expect("request"))
            .await
            .expect_err("refused");

        assert!(failure.error().is_connection());
        assert!(!failure.inspect().has_response());
    }

    #[tokio::test]
    async fn perform_build_error_never_reaches_transport() {
        let client = client(Canned::refusing());

        let failure = client
            .perform::<_, Ack>(DanglingImportReq {
                index_uuid: "bad\nuuid".to_string(),
                ..Default::default()
            })
            .await
            .expect_err("malformed");

        assert!(failure.error().is_malformed_request());
        assert!(!failure.inspect().has_response());
        assert!(client.inner().seen.lock().expect("lock").is_empty());
    }
}
