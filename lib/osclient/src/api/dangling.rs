//! `_dangling` endpoints.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use serde::Deserialize;

use crate::{
    ApiResult, Client, HttpClient, Method, Params, PathBuilder, Request, Requestable, Response,
    Result, ToParams, build_request,
};

/// `_dangling` endpoint group, see [`Client::dangling`].
#[derive(Debug)]
pub struct Dangling<'a, C> {
    client: &'a Client<C>,
}

impl<C: HttpClient> Client<C> {
    /// `_dangling` endpoints.
    #[must_use]
    pub fn dangling(&self) -> Dangling<'_, C> {
        Dangling { client: self }
    }
}

impl<C: HttpClient> Dangling<'_, C> {
    /// `POST /_dangling/{index_uuid}`: import a dangling index.
    ///
    /// The cluster refuses unless `accept_data_loss` is set.
    pub async fn import(&self, req: DanglingImportReq) -> ApiResult<DanglingImportResp> {
        self.client.perform(req).await
    }
}

/// Request for `POST /_dangling/{index_uuid}`.
#[derive(Debug, Clone, Default)]
pub struct DanglingImportReq {
    /// UUID of the dangling index.
    pub index_uuid: String,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: DanglingImportParams,
}

impl Requestable for DanglingImportReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::new("/_dangling")
            .segment(&self.index_uuid)
            .build();
        build_request(Method::Post, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`DanglingImportReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct DanglingImportParams {
    /// Acknowledge that importing may lose data.
    pub accept_data_loss: Option<bool>,
    /// Deprecated alias of `cluster_manager_timeout`.
    pub master_timeout: Option<Duration>,
    /// How long to wait for the cluster manager.
    pub cluster_manager_timeout: Option<Duration>,
    /// How long to wait for the response.
    pub timeout: Option<Duration>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `POST /_dangling/{index_uuid}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DanglingImportResp {
    /// Whether the import was accepted.
    pub acknowledged: bool,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(DanglingImportResp);
