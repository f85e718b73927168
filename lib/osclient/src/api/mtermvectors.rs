//! Multi term vectors.

use std::sync::Arc;

use bytes::Bytes;
use http::HeaderMap;
use serde::Deserialize;
use serde_json::Value;

use super::VersionType;
use crate::{
    ApiResult, Client, HttpClient, Method, Params, PathBuilder, Request, Requestable, Response,
    Result, ToParams, build_request,
};

impl<C: HttpClient> Client<C> {
    /// `POST [/{index}]/_mtermvectors`: term vectors of several documents.
    pub async fn mtermvectors(&self, req: MTermvectorsReq) -> ApiResult<MTermvectorsResp> {
        self.perform(req).await
    }
}

/// Request for `POST [/{index}]/_mtermvectors`.
#[derive(Debug, Clone, Default)]
pub struct MTermvectorsReq {
    /// Default index for documents that name none.
    pub index: String,
    /// JSON body with `docs` or `ids`.
    pub body: Option<Bytes>,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: MTermvectorsParams,
}

impl Requestable for MTermvectorsReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::root()
            .optional(&self.index)
            .literal("/_mtermvectors")
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

/// Query parameters of [`MTermvectorsReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct MTermvectorsParams {
    /// Include document counts and frequency sums.
    pub field_statistics: Option<bool>,
    /// Fields to return vectors for.
    pub fields: Vec<String>,
    /// Document IDs, instead of a body.
    pub ids: Vec<String>,
    /// Include term offsets.
    pub offsets: Option<bool>,
    /// Include term payloads.
    pub payloads: Option<bool>,
    /// Include term positions.
    pub positions: Option<bool>,
    /// Node or shard preference.
    pub preference: String,
    /// Read the latest version instead of the last refreshed one.
    pub realtime: Option<bool>,
    /// Custom routing value.
    pub routing: String,
    /// Include total term frequency and document frequency.
    pub term_statistics: Option<bool>,
    /// Expected document version.
    pub version: Option<u64>,
    /// Versioning scheme of `version`.
    pub version_type: Option<VersionType>,
    /// Pretty-print the response.
    pub pretty: bool,
    /// Human readable units in the response.
    pub human: bool,
    /// Include stack traces in error payloads.
    pub error_trace: bool,
}

/// Response of `POST /_mtermvectors`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MTermvectorsResp {
    /// One entry per requested document.
    pub docs: Vec<MTermvectorsDoc>,
    #[serde(skip)]
    response: Option<Arc<Response>>,
}

api_response!(MTermvectorsResp);

/// Term vectors of one document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MTermvectorsDoc {
    /// Index of the document.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Document version.
    #[serde(rename = "_version")]
    pub version: u64,
    /// Whether the document exists.
    pub found: bool,
    /// Time in milliseconds.
    pub took: u64,
    /// Mapping type, only sent by older clusters.
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    /// Vectors keyed by field name.
    pub term_vectors: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_json;

    #[test]
    fn index_is_optional() {
        let request = MTermvectorsReq::default().into_request().expect("request");
        assert_eq!(request.path(), "/_mtermvectors");

        let request = MTermvectorsReq {
            index: "movies".to_string(),
            params: MTermvectorsParams {
                ids: vec!["1".to_string(), "2".to_string()],
                fields: vec!["title".to_string()],
                term_statistics: Some(true),
                ..Default::default()
            },
            ..Default::default()
        }
        .into_request()
        .expect("request");
        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/movies/_mtermvectors");
        assert_eq!(
            request.query_pairs(),
            vec![
                ("fields".to_string(), "title".to_string()),
                ("ids".to_string(), "1,2".to_string()),
                ("term_statistics".to_string(), "true".to_string()),
            ]
        );
        assert!(request.header("content-type").is_none());
    }

    #[test]
    fn docs_decode() {
        let body = br#"{"docs":[
            {"_index":"movies","_id":"1","_version":1,"found":true,"took":2,
             "term_vectors":{"title":{"terms":{"solaris":{"term_freq":1}}}}},
            {"_index":"movies","_id":"9","found":false}
        ]}"#;

        let resp: MTermvectorsResp = from_json(body).expect("decode");
        assert_eq!(resp.docs.len(), 2);
        assert!(resp.docs[0].found);
        assert_eq!(
            resp.docs[0].term_vectors["title"]["terms"]["solaris"]["term_freq"],
            1
        );
        assert!(!resp.docs[1].found);
        assert!(resp.docs[1].term_vectors.is_null());
        assert!(resp.docs[1].kind.is_none());
    }
}
