//! Single document endpoints.

use std::sync::Arc;

use http::HeaderMap;
use serde_json::Value;

use super::VersionType;
use crate::{
    ApiResult, Client, HttpClient, Method, Params, PathBuilder, Request, Requestable, Response,
    Result, ToParams, build_request,
};

/// Document endpoint group, see [`Client::document`].
#[derive(Debug)]
pub struct Document<'a, C> {
    client: &'a Client<C>,
}

impl<C: HttpClient> Client<C> {
    /// Document endpoints.
    #[must_use]
    pub fn document(&self) -> Document<'_, C> {
        Document { client: self }
    }
}

impl<C: HttpClient> Document<'_, C> {
    /// `GET /{index}/_source/{id}`: the stored source of a document.
    pub async fn source(&self, req: DocumentSourceReq) -> ApiResult<DocumentSourceResp> {
        self.client.perform(req).await
    }
}

/// Request for `GET /{index}/_source/{id}`.
#[derive(Debug, Clone, Default)]
pub struct DocumentSourceReq {
    /// Index holding the document.
    pub index: String,
    /// Document ID.
    pub document_id: String,
    /// Extra request headers.
    pub headers: HeaderMap,
    /// Query parameters.
    pub params: DocumentSourceParams,
}

impl Requestable for DocumentSourceReq {
    fn into_request(self) -> Result<Request> {
        let path = PathBuilder::root()
            .segment(&self.index)
            .literal("/_source")
            .segment(&self.document_id)
            .build();
        build_request(Method::Get, &path, None, self.params.to_params(), self.headers)
    }
}

/// Query parameters of [`DocumentSourceReq`].
#[derive(Debug, Clone, Default, Params)]
pub struct DocumentSourceParams {
    /// Node or shard preference.
    pub preference: String,
    /// Read the latest version instead of the last refreshed one.
    pub realtime: Option<bool>,
    /// Refresh the shard before reading.
    pub refresh: Option<bool>,
    /// Custom routing value.
    pub routing: String,
    /// `true`, `false`, or the fields to return.
    #[params(rename = "_source")]
    pub source: Vec<String>,
    /// Source fields to leave out.
    #[params(rename = "_source_excludes")]
    pub source_excludes: Vec<String>,
    /// Source fields to return.
    #[params(rename = "_source_includes")]
    pub source_includes: Vec<String>,
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

/// Response of `GET /{index}/_source/{id}`.
#[derive(Debug, Clone, Default)]
pub struct DocumentSourceResp {
    /// The document source as stored, `Null` when the body was empty.
    pub source: Value,
    response: Option<Arc<Response>>,
}

api_response!(DocumentSourceResp, source: Value);

impl DocumentSourceResp {
    /// Decode the source into a typed document.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error if the source does not match `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        let bytes = serde_json::to_vec(&self.source)?;
        crate::from_json(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::ApiResponse;

    #[test]
    fn source_path_and_params() {
        let request = DocumentSourceReq {
            index: "movies".to_string(),
            document_id: "1".to_string(),
            params: DocumentSourceParams {
                source_includes: vec!["title".to_string(), "year".to_string()],
                version: Some(3),
                version_type: Some(VersionType::External),
                ..Default::default()
            },
            ..Default::default()
        }
        .into_request()
        .expect("request");

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.path(), "/movies/_source/1");
        assert_eq!(
            request.query_param("_source_includes").as_deref(),
            Some("title,year")
        );
        assert_eq!(request.query_param("version").as_deref(), Some("3"));
        assert_eq!(
            request.query_param("version_type").as_deref(),
            Some("external")
        );
    }

    #[test]
    fn typed_source() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Movie {
            title: String,
            year: u16,
        }

        let source = serde_json::json!({"title": "Solaris", "year": 1972});
        let resp = DocumentSourceResp::from_parts(source, None);

        let movie: Movie = resp.decode().expect("movie");
        assert_eq!(
            movie,
            Movie {
                title: "Solaris".to_string(),
                year: 1972
            }
        );
        assert!(resp.decode::<Vec<u8>>().is_err());
    }
}
