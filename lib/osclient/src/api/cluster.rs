//! `_cluster` endpoints.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use serde::Deserialize;

use super::{ExpandWildcards, HealthStatus, Level, WaitForEvents};
use crate::{
    ApiResult, Client, HttpClient, Method, Params, PathBuilder, Request, Requestable, Response,
    Result, ToParams, build_request,
};

/// `_cluster` endpoint group, see [`Client::cluster`].
#[derive(Debug)]
pub struct Cluster<'a, C> {
    client: &'a Client<C>,
}

impl<C: HttpClient> Client<C> {
    /// `_cluster` endpoints.
    #[must_use]
    pub fn cluster(&self) -> Cluster<'_, C> {
        Cluster { client: self }
    }
}

impl<C: HttpClient> Cluster<'_, C> {
    /// `GET /_cluster/health`, optionally scoped to indices.
    pub async fn health(&self, req: Option<ClusterHealthReq>) -> ApiResult<ClusterHealthResp> {
        self.client.perform(req.unwrap_or_default()).await
    }
}

/// Request for `GET /_cluster/health[/{indices}]`.
#[derive(Debug, Clone, Default)]
pub struct ClusterHealthReq {
    /// Restrict health to these indices.
    pub indices: Vec<String>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: ClusterHealthParams,
}

impl Requestable for ClusterHealthReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::new("/_cluster/health")
            .list(&self.indices)
            .build();
        build_request(Method::Get, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`ClusterHealthReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct ClusterHealthParams {
    /// Index kinds that wildcard expressions expand to.
    pub expand_wildcards: Vec<ExpandWildcards>,
    /// Level of detail.
    pub level: Option<Level>,
    /// Read from the local node instead of the cluster manager.
    pub local: Option<bool>,
    /// Deprecated alias of `cluster_manager_timeout`.
    pub master_timeout: Option<Duration>,
    /// How long to wait for the cluster manager.
    pub cluster_manager_timeout: Option<Duration>,
    /// How long to wait for the `wait_for_*` conditions.
    pub timeout: Option<Duration>,
    /// Active shard count to wait for, a number or `all`.
    pub wait_for_active_shards: String,
    /// Wait until pending events of this priority are processed.
    pub wait_for_events: Option<WaitForEvents>,
    /// Wait until no shards are initializing.
    pub wait_for_no_initializing_shards: Option<bool>,
    /// Wait until no shards are relocating.
    pub wait_for_no_relocating_shards: Option<bool>,
    /// Node count to wait for, e.g. `>=3`.
    pub wait_for_nodes: String,
    /// Wait until the cluster reaches this status.
    pub wait_for_status: Option<HealthStatus>,
    /// Awareness attribute, with `level=awareness_attributes`.
    pub awareness_attribute: String,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_cluster/health`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClusterHealthResp {
    /// Name of the cluster.
    pub cluster_name: String,
    /// `green`, `yellow` or `red`.
    pub status: String,
    /// A `wait_for_*` condition timed out.
    pub timed_out: bool,
    /// Nodes in the cluster.
    pub number_of_nodes: u32,
    /// Data nodes in the cluster.
    pub number_of_data_nodes: u32,
    /// Deprecated alias of `discovered_cluster_manager`.
    pub discovered_master: bool,
    /// A cluster manager has been elected.
    pub discovered_cluster_manager: bool,
    /// Active primary shards.
    pub active_primary_shards: u32,
    /// Active primary and replica shards.
    pub active_shards: u32,
    /// Shards being relocated.
    pub relocating_shards: u32,
    /// Shards being initialized.
    pub initializing_shards: u32,
    /// Shards not allocated to any node.
    pub unassigned_shards: u32,
    /// Unassigned shards whose allocation is delayed.
    pub delayed_unassigned_shards: u32,
    /// Cluster-level changes not yet executed.
    pub number_of_pending_tasks: u32,
    /// Unfinished shard fetches.
    pub number_of_in_flight_fetch: u32,
    /// Wait time of the oldest pending task, in milliseconds.
    pub task_max_waiting_in_queue_millis: u64,
    /// Active shards, in percent.
    pub active_shards_percent_as_number: f64,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(ClusterHealthResp);
