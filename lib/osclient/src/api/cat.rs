//! `_cat` endpoints.
//!
//! The cat APIs answer with a JSON array (`format=json` is always sent) whose
//! numbers are encoded as strings. Responses expose the array as a named
//! field. Field names follow the column and parameter names of the API.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use super::{ByteUnit, ExpandWildcards, HealthStatus, TimeUnit};
use crate::{
    ApiResult, Client, HttpClient, Method, Params, PathBuilder, Request, Requestable, Response,
    Result, ToParams, build_request,
};

/// `_cat` endpoint group, see [`Client::cat`].
#[derive(Debug)]
pub struct Cat<'a, C> {
    client: &'a Client<C>,
}

impl<C: HttpClient> Client<C> {
    /// `_cat` endpoints.
    #[must_use]
    pub fn cat(&self) -> Cat<'_, C> {
        Cat { client: self }
    }
}

impl<C: HttpClient> Cat<'_, C> {
    /// `GET /_cat/allocation`: shard allocation and disk usage per node.
    pub async fn allocation(
        &self,
        req: Option<CatAllocationReq>,
    ) -> ApiResult<CatAllocationsResp> {
        self.client.perform(req.unwrap_or_default()).await
    }

    /// `GET /_cat/count`: document counts.
    pub async fn count(&self, req: Option<CatCountReq>) -> ApiResult<CatCountsResp> {
        self.client.perform(req.unwrap_or_default()).await
    }

    /// `GET /_cat/indices`: index overview.
    pub async fn indices(&self, req: Option<CatIndicesReq>) -> ApiResult<CatIndicesResp> {
        self.client.perform(req.unwrap_or_default()).await
    }

    /// `GET /_cat/master`: elected cluster manager node.
    pub async fn master(&self, req: Option<CatMasterReq>) -> ApiResult<CatMasterResp> {
        self.client.perform(req.unwrap_or_default()).await
    }

    /// `GET /_cat/recovery`: shard recoveries.
    pub async fn recovery(&self, req: Option<CatRecoveryReq>) -> ApiResult<CatRecoveryResp> {
        self.client.perform(req.unwrap_or_default()).await
    }

    /// `GET /_cat/repositories`: snapshot repositories.
    pub async fn repositories(
        &self,
        req: Option<CatRepositoriesReq>,
    ) -> ApiResult<CatRepositoriesResp> {
        self.client.perform(req.unwrap_or_default()).await
    }
}

// ============================================================================
// Allocation
// ============================================================================

/// Request for `GET /_cat/allocation/{node_ids}`.
#[derive(Debug, Clone, Default)]
pub struct CatAllocationReq {
    /// Restrict to these nodes.
    pub node_ids: Vec<String>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: CatAllocationParams,
}

impl Requestable for CatAllocationReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::new("/_cat/allocation/")
            .join(&self.node_ids)
            .build();
        build_request(Method::Get, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`CatAllocationReq`].
#[derive(Debug, Clone, Default, Params)]
#[params(format = "json")]
pub struct CatAllocationParams {
    /// Unit for byte values.
    pub bytes: Option<ByteUnit>,
    /// Read from the local node instead of the cluster manager.
    pub local: Option<bool>,
    /// Deprecated alias of `cluster_manager_timeout`.
    pub master_timeout: Option<Duration>,
    /// How long to wait for the cluster manager.
    pub cluster_manager_timeout: Option<Duration>,
    /// Columns to display.
    pub h: Vec<String>,
    /// Return the column help instead of the rows.
    pub help: Option<bool>,
    /// Columns to sort by, sent as `s`.
    #[params(rename = "s")]
    pub sort: Vec<String>,
    /// Include column headings.
    pub v: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_cat/allocation`.
#[derive(Debug, Clone, Default)]
pub struct CatAllocationsResp {
    /// One row per node, plus an `UNASSIGNED` row when shards are unassigned.
    pub allocations: Vec<CatAllocationResp>,
    response: Option<Arc<Response>>,
}

api_response!(CatAllocationsResp, allocations: Vec<CatAllocationResp>);

/// One row of [`CatAllocationsResp`].
///
/// Disk and host columns are `null` on the `UNASSIGNED` row.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatAllocationResp {
    /// Shards allocated to the node.
    #[serde_as(as = "DisplayFromStr")]
    pub shards: u32,
    /// Disk used by index data.
    #[serde(rename = "disk.indices")]
    pub disk_indices: Option<String>,
    /// Total disk used on the node.
    #[serde(rename = "disk.used")]
    pub disk_used: Option<String>,
    /// Free disk on the node.
    #[serde(rename = "disk.avail")]
    pub disk_avail: Option<String>,
    /// Total disk of the node.
    #[serde(rename = "disk.total")]
    pub disk_total: Option<String>,
    /// Disk used, in percent.
    #[serde(rename = "disk.percent")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub disk_percent: Option<u32>,
    /// Host name of the node.
    pub host: Option<String>,
    /// IP address of the node.
    pub ip: Option<String>,
    /// Node name, or `UNASSIGNED`.
    pub node: String,
}

// ============================================================================
// Count
// ============================================================================

/// Request for `GET /_cat/count/{indices}`.
#[derive(Debug, Clone, Default)]
pub struct CatCountReq {
    /// Restrict to these indices.
    pub indices: Vec<String>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: CatCountParams,
}

impl Requestable for CatCountReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::new("/_cat/count/").join(&self.indices).build();
        build_request(Method::Get, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`CatCountReq`].
#[derive(Debug, Clone, Default, Params)]
#[params(format = "json")]
pub struct CatCountParams {
    /// Columns to display.
    pub h: Vec<String>,
    /// Return the column help instead of the rows.
    pub help: Option<bool>,
    /// Columns to sort by, sent as `s`.
    #[params(rename = "s")]
    pub sort: Vec<String>,
    /// Include column headings.
    pub v: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_cat/count`.
#[derive(Debug, Clone, Default)]
pub struct CatCountsResp {
    /// Count rows, usually one.
    pub counts: Vec<CatCountResp>,
    response: Option<Arc<Response>>,
}

api_response!(CatCountsResp, counts: Vec<CatCountResp>);

/// One row of [`CatCountsResp`].
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatCountResp {
    /// Time of the count, in seconds since the epoch.
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
    /// Time of the count, as `HH:MM:SS`.
    pub timestamp: String,
    /// Number of documents.
    #[serde_as(as = "DisplayFromStr")]
    pub count: u64,
}

// ============================================================================
// Indices
// ============================================================================

/// Request for `GET /_cat/indices/{indices}`.
#[derive(Debug, Clone, Default)]
pub struct CatIndicesReq {
    /// Restrict to these indices or patterns.
    pub indices: Vec<String>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: CatIndicesParams,
}

impl Requestable for CatIndicesReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::new("/_cat/indices/")
            .join(&self.indices)
            .build();
        build_request(Method::Get, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`CatIndicesReq`].
#[derive(Debug, Clone, Default, Params)]
#[params(format = "json")]
pub struct CatIndicesParams {
    /// Unit for byte values.
    pub bytes: Option<ByteUnit>,
    /// Index kinds that wildcard expressions expand to.
    pub expand_wildcards: Vec<ExpandWildcards>,
    /// Only indices with this health.
    pub health: Option<HealthStatus>,
    /// Count memory of segments that are not loaded.
    pub include_unloaded_segments: Option<bool>,
    /// Read from the local node instead of the cluster manager.
    pub local: Option<bool>,
    /// Deprecated alias of `cluster_manager_timeout`.
    pub master_timeout: Option<Duration>,
    /// How long to wait for the cluster manager.
    pub cluster_manager_timeout: Option<Duration>,
    /// Add columns for primary shards only.
    pub pri: Option<bool>,
    /// Unit for time values.
    pub time: Option<TimeUnit>,
    /// Columns to display.
    pub h: Vec<String>,
    /// Return the column help instead of the rows.
    pub help: Option<bool>,
    /// Columns to sort by, sent as `s`.
    #[params(rename = "s")]
    pub sort: Vec<String>,
    /// Include column headings.
    pub v: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_cat/indices`.
#[derive(Debug, Clone, Default)]
pub struct CatIndicesResp {
    /// One row per index.
    pub indices: Vec<CatIndexResp>,
    response: Option<Arc<Response>>,
}

api_response!(CatIndicesResp, indices: Vec<CatIndexResp>);

/// One row of [`CatIndicesResp`].
///
/// Count and size columns are `null` for closed indices.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatIndexResp {
    /// `green`, `yellow` or `red`.
    pub health: Option<String>,
    /// `open` or `close`.
    pub status: String,
    /// Index name.
    pub index: String,
    /// Index UUID.
    pub uuid: String,
    /// Number of primary shards.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub pri: Option<u32>,
    /// Number of replicas.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub rep: Option<u32>,
    /// Number of documents.
    #[serde(rename = "docs.count")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub docs_count: Option<u64>,
    /// Number of deleted documents.
    #[serde(rename = "docs.deleted")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub docs_deleted: Option<u64>,
    /// Store size of all shards.
    #[serde(rename = "store.size")]
    pub store_size: Option<String>,
    /// Store size of the primary shards.
    #[serde(rename = "pri.store.size")]
    pub pri_store_size: Option<String>,
}

// ============================================================================
// Master
// ============================================================================

/// Request for `GET /_cat/master/`.
#[derive(Debug, Clone, Default)]
pub struct CatMasterReq {
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: CatMasterParams,
}

impl Requestable for CatMasterReq {
    fn into_request(self) -> Result<Request> {
        build_request(
            Method::Get,
            "/_cat/master/",
            None,
            self.params.to_params(),
            self.headers,
        )
    }
}

/// Query parameters of [`CatMasterReq`].
#[derive(Debug, Clone, Default, Params)]
#[params(format = "json")]
pub struct CatMasterParams {
    /// Read from the local node instead of the cluster manager.
    pub local: Option<bool>,
    /// Deprecated alias of `cluster_manager_timeout`.
    pub master_timeout: Option<Duration>,
    /// How long to wait for the cluster manager.
    pub cluster_manager_timeout: Option<Duration>,
    /// Columns to display.
    pub h: Vec<String>,
    /// Return the column help instead of the rows.
    pub help: Option<bool>,
    /// Columns to sort by, sent as `s`.
    #[params(rename = "s")]
    pub sort: Vec<String>,
    /// Include column headings.
    pub v: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_cat/master`.
#[derive(Debug, Clone, Default)]
pub struct CatMasterResp {
    /// Elected cluster manager, a single row.
    pub master: Vec<CatMasterItemResp>,
    response: Option<Arc<Response>>,
}

api_response!(CatMasterResp, master: Vec<CatMasterItemResp>);

/// One row of [`CatMasterResp`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatMasterItemResp {
    /// Node ID.
    pub id: String,
    /// Host name.
    pub host: String,
    /// IP address.
    pub ip: String,
    /// Node name.
    pub node: String,
}

// ============================================================================
// Recovery
// ============================================================================

/// Request for `GET /_cat/recovery/{indices}`.
#[derive(Debug, Clone, Default)]
pub struct CatRecoveryReq {
    /// Restrict to these indices.
    pub indices: Vec<String>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: CatRecoveryParams,
}

impl Requestable for CatRecoveryReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::new("/_cat/recovery/")
            .join(&self.indices)
            .build();
        build_request(Method::Get, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`CatRecoveryReq`].
#[derive(Debug, Clone, Default, Params)]
#[params(format = "json")]
pub struct CatRecoveryParams {
    /// Only ongoing recoveries.
    pub active_only: Option<bool>,
    /// Unit for byte values.
    pub bytes: Option<ByteUnit>,
    /// Add detailed recovery columns.
    pub detailed: Option<bool>,
    /// Columns to display.
    pub h: Vec<String>,
    /// Return the column help instead of the rows.
    pub help: Option<bool>,
    /// Columns to sort by, sent as `s`.
    #[params(rename = "s")]
    pub sort: Vec<String>,
    /// Unit for time values.
    pub time: Option<TimeUnit>,
    /// Include column headings.
    pub v: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_cat/recovery`.
#[derive(Debug, Clone, Default)]
pub struct CatRecoveryResp {
    /// One row per shard recovery.
    pub recoveries: Vec<CatRecoveryItemResp>,
    response: Option<Arc<Response>>,
}

api_response!(CatRecoveryResp, recoveries: Vec<CatRecoveryItemResp>);

/// One row of [`CatRecoveryResp`].
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatRecoveryItemResp {
    /// Index name.
    pub index: String,
    /// Shard number.
    #[serde_as(as = "DisplayFromStr")]
    pub shard: u32,
    /// Recovery duration.
    pub time: String,
    /// Recovery type, e.g. `peer` or `snapshot`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Recovery stage, e.g. `done`.
    pub stage: String,
    /// Host of the source node.
    pub source_host: String,
    /// Name of the source node.
    pub source_node: String,
    /// Host of the target node.
    pub target_host: String,
    /// Name of the target node.
    pub target_node: String,
    /// Snapshot repository, `n/a` for other recoveries.
    pub repository: String,
    /// Snapshot name, `n/a` for other recoveries.
    pub snapshot: String,
    /// Files to recover.
    #[serde_as(as = "DisplayFromStr")]
    pub files: u64,
    /// Files recovered so far.
    #[serde_as(as = "DisplayFromStr")]
    pub files_recovered: u64,
    /// Files recovered, in percent.
    pub files_percent: String,
    /// Total files of the shard.
    #[serde_as(as = "DisplayFromStr")]
    pub files_total: u64,
    /// Bytes to recover.
    #[serde_as(as = "DisplayFromStr")]
    pub bytes: u64,
    /// Bytes recovered so far.
    #[serde_as(as = "DisplayFromStr")]
    pub bytes_recovered: u64,
    /// Bytes recovered, in percent.
    pub bytes_percent: String,
    /// Total bytes of the shard.
    #[serde_as(as = "DisplayFromStr")]
    pub bytes_total: u64,
    /// Translog operations to replay.
    #[serde_as(as = "DisplayFromStr")]
    pub translog_ops: i64,
    /// Translog operations replayed so far.
    #[serde_as(as = "DisplayFromStr")]
    pub translog_ops_recovered: i64,
    /// Translog operations replayed, in percent.
    pub translog_ops_percent: String,
}

// ============================================================================
// Repositories
// ============================================================================

/// Request for `GET /_cat/repositories`.
#[derive(Debug, Clone, Default)]
pub struct CatRepositoriesReq {
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: CatRepositoriesParams,
}

impl Requestable for CatRepositoriesReq {
    fn into_request(self) -> Result<Request> {
        build_request(
            Method::Get,
            "/_cat/repositories",
            None,
            self.params.to_params(),
            self.headers,
        )
    }
}

/// Query parameters of [`CatRepositoriesReq`].
#[derive(Debug, Clone, Default, Params)]
#[params(format = "json")]
pub struct CatRepositoriesParams {
    /// Read from the local node instead of the cluster manager.
    pub local: Option<bool>,
    /// Deprecated alias of `cluster_manager_timeout`.
    pub master_timeout: Option<Duration>,
    /// How long to wait for the cluster manager.
    pub cluster_manager_timeout: Option<Duration>,
    /// Columns to display.
    pub h: Vec<String>,
    /// Return the column help instead of the rows.
    pub help: Option<bool>,
    /// Columns to sort by, sent as `s`.
    #[params(rename = "s")]
    pub sort: Vec<String>,
    /// Include column headings.
    pub v: Option<bool>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `GET /_cat/repositories`.
#[derive(Debug, Clone, Default)]
pub struct CatRepositoriesResp {
    /// One row per repository.
    pub repositories: Vec<CatRepositoryResp>,
    response: Option<Arc<Response>>,
}

api_response!(CatRepositoriesResp, repositories: Vec<CatRepositoryResp>);

/// One row of [`CatRepositoriesResp`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatRepositoryResp {
    /// Repository name.
    pub id: String,
    /// Repository type, e.g. `fs` or `s3`.
    #[serde(rename = "type")]
    pub kind: String,
}
