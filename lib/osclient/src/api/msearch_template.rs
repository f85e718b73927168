//! Multi search with templates.

use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ErrorCause, SearchType, ShardStatistics};
use crate::{
    ApiResult, Client, HttpClient, Method, Params, PathBuilder, Request, Requestable, Response,
    Result, ToParams, build_request,
};

impl<C: HttpClient> Client<C> {
    /// `POST [/{indices}]/_msearch/template`: run several templated searches
    /// in one call.
    pub async fn msearch_template(
        &self,
        req: MSearchTemplateReq,
    ) -> ApiResult<MSearchTemplateResp> {
        self.perform(req).await
    }
}

/// Request for `POST [/{indices}]/_msearch/template`.
///
/// The body is newline-delimited JSON, alternating a header line and a
/// template line; see [`ndjson`].
#[derive(Debug, Clone, Default)]
pub struct MSearchTemplateReq {
    /// Default indices for searches whose header names none.
    pub indices: Vec<String>,
    /// NDJSON body.
    pub body: Option<Bytes>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: MSearchTemplateParams,
}

impl Requestable for MSearchTemplateReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::root()
            .list(&self.indices)
            .literal("/_msearch/template")
            .build();
        build_request(
            Method::Post,
            &path,
            self.body,
            self.params.to_params(),
            self.headers,
        )
    }
}

/// Query parameters of [`MSearchTemplateReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct MSearchTemplateParams {
    /// Minimize round trips for cross-cluster searches.
    pub ccs_minimize_roundtrips: Option<bool>,
    /// Maximum searches run concurrently.
    pub max_concurrent_searches: Option<u32>,
    /// Report `hits.total` as a plain number.
    pub rest_total_hits_as_int: Option<bool>,
    /// Scoring mode.
    pub search_type: Option<SearchType>,
    /// Prefix aggregation and suggester names with their type.
    pub typed_keys: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Serialize values into an NDJSON body, one value per line.
///
/// # Errors
///
/// Returns a serialization error if a value cannot be encoded.
pub fn ndjson<T: Serialize>(lines: &[T]) -> Result<Bytes> {
    let mut buf = BytesMut::new().writer();
    for line in lines {
        serde_json::to_writer(&mut buf, line)?;
        buf.get_mut().put_u8(b'\n');
    }
    Ok(buf.into_inner().freeze())
}

/// Response of `POST /_msearch/template`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MSearchTemplateResp {
    /// Total time in milliseconds.
    pub took: u64,
    /// One entry per search, in request order.
    pub responses: Vec<MSearchTemplateItem>,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(MSearchTemplateResp);

/// One search of a [`MSearchTemplateResp`].
///
/// Failed searches carry `error` and leave the other fields at their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MSearchTemplateItem {
    /// Time in milliseconds.
    pub took: u64,
    /// Whether the search timed out.
    pub timed_out: bool,
    /// Per-shard outcome.
    #[serde(rename = "_shards")]
    pub shards: ShardStatistics,
    /// Matching documents.
    pub hits: SearchHits,
    /// HTTP status of this search.
    pub status: u16,
    /// Failure cause, for failed searches.
    pub error: Option<ErrorCause>,
}

/// The `hits` section of a search result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchHits {
    /// Total hit count.
    pub total: TotalHits,
    /// Best score, `None` when sorting by field.
    pub max_score: Option<f32>,
    /// Returned hits.
    pub hits: Vec<SearchHit>,
}

/// `hits.total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TotalHits {
    /// Hit count.
    pub value: u64,
    /// `eq` for an exact count, `gte` for a lower bound.
    pub relation: String,
}

/// A single search hit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    /// Index of the document.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score.
    #[serde(rename = "_score")]
    pub score: Option<f32>,
    /// Document source, `Null` when excluded.
    #[serde(rename = "_source")]
    pub source: Value,
    /// Requested stored or docvalue fields.
    pub fields: Option<Value>,
    /// Sort values, when sorting.
    pub sort: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn msearch_template_request() {
        let body = ndjson(&[
            json!({"index": "movies"}),
            json!({"id": "by-title", "params": {"title": "Solaris"}}),
        ])
        .expect("body");

        let request = MSearchTemplateReq {
            indices: vec!["movies".to_string()],
            body: Some(body),
            params: MSearchTemplateParams {
                search_type: Some(SearchType::QueryThenFetch),
                ..Default::default()
            },
            ..Default::default()
        }
        .into_request()
        .expect("request");

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/movies/_msearch/template");
        assert_eq!(request.query(), Some("search_type=query_then_fetch"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            request.body().map(|b| b.to_vec()),
            Some(
                b"{\"index\":\"movies\"}\n{\"id\":\"by-title\",\"params\":{\"title\":\"Solaris\"}}\n"
                    .to_vec()
            )
        );
    }

    #[test]
    fn msearch_template_without_indices() {
        let request = MSearchTemplateReq::default()
            .into_request()
            .expect("request");
        assert_eq!(request.path(), "/_msearch/template");
    }

    #[test]
    fn responses_decode_with_failures() {
        let body = br#"{
            "took": 5,
            "responses": [
                {
                    "took": 3,
                    "timed_out": false,
                    "_shards": {"total": 1, "successful": 1, "skipped": 0, "failed": 0},
                    "hits": {
                        "total": {"value": 1, "relation": "eq"},
                        "max_score": 0.2876821,
                        "hits": [{"_index": "movies", "_id": "1", "_score": 0.2876821,
                                  "_source": {"title": "Solaris"}}]
                    },
                    "status": 200
                },
                {
                    "error": {"type": "index_not_found_exception", "reason": "no such index [nope]"},
                    "status": 404
                }
            ]
        }"#;

        let resp: MSearchTemplateResp = crate::from_json(body).expect("decode");

        assert_eq!(resp.took, 5);
        assert_eq!(resp.responses.len(), 2);
        let first = &resp.responses[0];
        assert_eq!(first.hits.total.value, 1);
        assert_eq!(first.hits.hits[0].id, "1");
        assert_eq!(first.hits.hits[0].source["title"], "Solaris");
        assert!(first.error.is_none());

        let second = &resp.responses[1];
        assert_eq!(second.status, 404);
        assert_eq!(
            second.error.as_ref().and_then(ErrorCause::kind),
            Some("index_not_found_exception")
        );
        assert!(second.hits.hits.is_empty());
    }
}
