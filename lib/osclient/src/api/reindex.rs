//! `_reindex`.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    ApiResult, Client, HttpClient, Method, Params, Request, Requestable, Response, Result,
    ToParams, build_request, to_json,
};

impl<C: HttpClient> Client<C> {
    /// `POST /_reindex`: copy documents from one index to another.
    ///
    /// With `wait_for_completion=false` the cluster answers at once and
    /// [`ReindexResp::task`] names the background task.
    pub async fn reindex(&self, req: ReindexReq) -> ApiResult<ReindexResp> {
        self.perform(req).await
    }
}

/// Request for `POST /_reindex`.
#[derive(Debug, Clone, Default)]
pub struct ReindexReq {
    /// JSON body with `source` and `dest`.
    pub body: Option<Bytes>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: ReindexParams,
}

impl ReindexReq {
    /// Request with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `body` cannot be encoded.
    pub fn json<T: Serialize>(body: &T) -> Result<Self> {
        Ok(Self {
            body: Some(to_json(body)?),
            ..Default::default()
        })
    }
}

impl Requestable for ReindexReq {
    fn into_request(self) -> Result<Request> {
        build_request(
            Method::Post,
            "/_reindex",
            self.body,
            self.params.to_params(),
            self.headers,
        )
    }
}

/// Query parameters of [`ReindexReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct ReindexParams {
    /// Stop after this many documents.
    pub max_docs: Option<u64>,
    /// Refresh the destination shards when done.
    pub refresh: Option<bool>,
    /// Throttle, in sub-requests per second; `-1` disables throttling.
    pub requests_per_second: Option<f32>,
    /// Destination must be an alias.
    pub require_alias: Option<bool>,
    /// How long to keep the search context alive.
    pub scroll: Option<Duration>,
    /// Number of slices, or `auto`.
    pub slices: String,
    /// How long each write waits for unavailable shards.
    pub timeout: Option<Duration>,
    /// Active shard count required before writing, a number or `all`.
    pub wait_for_active_shards: String,
    /// Block until the reindex finishes.
    pub wait_for_completion: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `POST /_reindex`.
///
/// A background reindex only fills [`task`](Self::task).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReindexResp {
    /// Total time of the operation, in milliseconds.
    pub took: u64,
    /// Some request timed out during the reindex.
    pub timed_out: bool,
    /// Documents processed.
    pub total: u64,
    /// Documents updated in the destination.
    pub updated: u64,
    /// Documents created in the destination.
    pub created: u64,
    /// Documents deleted.
    pub deleted: u64,
    /// Scroll responses pulled from the source.
    pub batches: u64,
    /// Version conflicts hit.
    pub version_conflicts: u64,
    /// Documents skipped by the script.
    pub noops: u64,
    /// Retries of bulk and search requests.
    pub retries: ReindexRetries,
    /// Time spent throttled, in milliseconds.
    pub throttled_millis: u64,
    /// Effective throttle, `-1` when unthrottled.
    pub requests_per_second: f64,
    /// Delay before the next throttled batch, in milliseconds.
    pub throttled_until_millis: u64,
    /// Per-document failures, as reported.
    pub failures: Vec<Value>,
    /// Background task ID, `node:id`.
    pub task: Option<String>,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(ReindexResp);

/// Retry counters of a reindex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReindexRetries {
    /// Bulk write retries.
    pub bulk: u64,
    /// Search retries.
    pub search: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::from_json;

    #[test]
    fn reindex_request() {
        let mut req = ReindexReq::json(&json!({
            "source": {"index": "logs"},
            "dest": {"index": "logs-v2"}
        }))
        .expect("body");
        req.params.wait_for_completion = Some(false);
        req.params.requests_per_second = Some(1.0);

        let request = req.into_request().expect("request");

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/_reindex");
        assert_eq!(
            request.query(),
            Some("requests_per_second=1&wait_for_completion=false")
        );
        assert_eq!(request.header("content-type"), Some("application/json"));
        let body: Value = from_json(request.body().expect("body")).expect("json body");
        assert_eq!(body["source"]["index"], "logs");
        assert_eq!(body["dest"]["index"], "logs-v2");
    }

    #[test]
    fn completed_reindex_decodes() {
        let body = br#"{
            "took": 812, "timed_out": false, "total": 10000, "updated": 0, "created": 10000,
            "deleted": 0, "batches": 10, "version_conflicts": 0, "noops": 0,
            "retries": {"bulk": 0, "search": 0}, "throttled_millis": 0,
            "requests_per_second": -1.0, "throttled_until_millis": 0, "failures": []
        }"#;

        let resp: ReindexResp = from_json(body).expect("decode");
        assert_eq!(resp.created, 10000);
        assert_eq!(resp.batches, 10);
        assert!(resp.task.is_none());
    }

    #[test]
    fn background_reindex_decodes() {
        let resp: ReindexResp =
            from_json(br#"{"task":"oTUltX4IQMOUUVeiohTt8A:12345"}"#).expect("decode");
        assert_eq!(resp.task.as_deref(), Some("oTUltX4IQMOUUVeiohTt8A:12345"));
        assert_eq!(resp.total, 0);
    }
}
