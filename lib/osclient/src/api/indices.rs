//! Index management endpoints.

use std::sync::Arc;

use http::HeaderMap;
use serde::Deserialize;

use super::{ExpandWildcards, ShardStatistics};
use crate::{
    ApiResult, Client, HttpClient, Method, Params, PathBuilder, Request, Requestable, Response,
    Result, ToParams, build_request,
};

/// Index endpoint group, see [`Client::indices`].
#[derive(Debug)]
pub struct Indices<'a, C> {
    client: &'a Client<C>,
}

impl<C: HttpClient> Client<C> {
    /// Index endpoints.
    #[must_use]
    pub fn indices(&self) -> Indices<'_, C> {
        Indices { client: self }
    }
}

impl<C: HttpClient> Indices<'_, C> {
    /// `POST [/{indices}]/_cache/clear`: clear index caches.
    pub async fn clear_cache(
        &self,
        req: Option<IndicesClearCacheReq>,
    ) -> ApiResult<IndicesClearCacheResp> {
        self.client.perform(req.unwrap_or_default()).await
    }
}

/// Request for `POST [/{indices}]/_cache/clear`.
#[derive(Debug, Clone, Default)]
pub struct IndicesClearCacheReq {
    /// Indices to clear, all when empty.
    pub indices: Vec<String>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: IndicesClearCacheParams,
}

impl Requestable for IndicesClearCacheReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::root()
            .list(&self.indices)
            .literal("/_cache/clear")
            .build();
        build_request(Method::Post, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`IndicesClearCacheReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct IndicesClearCacheParams {
    /// Succeed when a wildcard matches no index.
    pub allow_no_indices: Option<bool>,
    /// Index kinds that wildcard expressions expand to.
    pub expand_wildcards: Vec<ExpandWildcards>,
    /// Clear the field data cache.
    pub fielddata: Option<bool>,
    /// Restrict field data clearing to these fields.
    pub fields: Vec<String>,
    /// Clear the file cache.
    pub file: Option<bool>,
    /// Ignore missing or closed indices.
    pub ignore_unavailable: Option<bool>,
    /// Clear the query cache.
    pub query: Option<bool>,
    /// Clear the request cache.
    pub request: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `POST /_cache/clear`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndicesClearCacheResp {
    /// Per-shard outcome.
    #[serde(rename = "_shards")]
    pub shards: ShardStatistics,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(IndicesClearCacheResp);
