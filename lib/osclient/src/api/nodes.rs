//! `_nodes` endpoints.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use serde::Deserialize;
use serde_json::Value;

use super::NodeStatistics;
use crate::{
    ApiResult, Client, HttpClient, Method, Params, PathBuilder, Request, Requestable, Response,
    Result, ToParams, build_request,
};

/// `_nodes` endpoint group, see [`Client::nodes`].
#[derive(Debug)]
pub struct Nodes<'a, C> {
    client: &'a Client<C>,
}

impl<C: HttpClient> Client<C> {
    /// `_nodes` endpoints.
    #[must_use]
    pub fn nodes(&self) -> Nodes<'_, C> {
        Nodes { client: self }
    }
}

impl<C: HttpClient> Nodes<'_, C> {
    /// `GET /_nodes[/{node_id}]/usage[/{metrics}]`: REST action and
    /// aggregation usage counters.
    pub async fn usage(&self, req: Option<NodesUsageReq>) -> ApiResult<NodesUsageResp> {
        self.client.perform(req.unwrap_or_default()).await
    }
}

/// Request for `GET /_nodes[/{node_id}]/usage[/{metrics}]`.
#[derive(Debug, Clone, Default)]
pub struct NodesUsageReq {
    /// Nodes to query, all when empty.
    pub node_id: Vec<String>,
    /// `rest_actions`, `aggregations` or `_all`.
    pub metrics: Vec<String>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: NodesUsageParams,
}

impl Requestable for NodesUsageReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::new("/_nodes")
            .list(&self.node_id)
            .literal("/usage")
            .list(&self.metrics)
            .build();
        build_request(Method::Get, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`NodesUsageReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct NodesUsageParams {
    /// How long to wait for each node.
    pub timeout: Option<Duration>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_nodes/usage`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodesUsageResp {
    /// Node-level outcome.
    #[serde(rename = "_nodes")]
    pub nodes_stats: NodeStatistics,
    /// Cluster name.
    pub cluster_name: String,
    /// Usage keyed by node ID.
    pub nodes: HashMap<String, NodesUsage>,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(NodesUsageResp);

/// Usage counters of one node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodesUsage {
    /// When the counters were read, epoch millis.
    pub timestamp: i64,
    /// When counting started, epoch millis.
    pub since: i64,
    /// Call count per REST action name.
    pub rest_actions: HashMap<String, u64>,
    /// Aggregation usage, shaped by the installed plugins.
    pub aggregations: Value,
}
