//! Tests for `#[derive(Params)]`.

use std::time::Duration;

use osclient::api::{ByteUnit, ExpandWildcards};
use osclient::{ParamValue, Params, ToParams};

#[derive(Debug, Default, Params)]
struct SearchParams {
    q: String,
    size: Option<u32>,
    timeout: Option<Duration>,
    expand_wildcards: Vec<ExpandWildcards>,
    #[params(rename = "s")]
    sort: Vec<String>,
    #[params(skip)]
    #[allow(dead_code)]
    label: String,
    pretty: bool,
    error_trace: bool,
}

#[derive(Debug, Default, Params)]
#[params(format = "json")]
struct CatParams {
    bytes: Option<ByteUnit>,
    v: Option<bool>,
}

#[derive(Debug, Default, Params)]
struct Empty;

#[derive(Debug, Params)]
struct Required {
    from: u64,
}

#[derive(Debug, Params)]
struct Generic<T: ParamValue> {
    value: Option<T>,
}

#[derive(Debug, Clone, Copy)]
struct Preference(u8);

impl ParamValue for Preference {
    fn to_param(&self) -> String {
        format!("_shards:{}", self.0)
    }
}

#[test]
fn test_default_encodes_nothing() {
    assert!(SearchParams::default().to_params().is_empty());
    assert!(Empty.to_params().is_empty());
}

#[test]
fn test_field_rules() {
    let params = SearchParams {
        q: "title:solaris".to_string(),
        size: Some(0),
        timeout: Some(Duration::from_millis(1500)),
        expand_wildcards: vec![ExpandWildcards::Open, ExpandWildcards::Closed],
        sort: vec!["year:desc".to_string(), "_score".to_string()],
        label: "ignored".to_string(),
        pretty: true,
        error_trace: false,
    }
    .to_params();

    assert_eq!(params.len(), 6);
    assert_eq!(params["q"], "title:solaris");
    assert_eq!(params["size"], "0");
    assert_eq!(params["timeout"], "1500ms");
    assert_eq!(params["expand_wildcards"], "open,closed");
    assert_eq!(params["s"], "year:desc,_score");
    assert_eq!(params["pretty"], "true");
    assert!(!params.contains_key("sort"));
    assert!(!params.contains_key("label"));
    assert!(!params.contains_key("error_trace"));
}

#[test]
fn test_format_is_always_sent() {
    let params = CatParams::default().to_params();
    assert_eq!(params.len(), 1);
    assert_eq!(params["format"], "json");

    let params = CatParams {
        bytes: Some(ByteUnit::Gb),
        v: Some(true),
    }
    .to_params();
    assert_eq!(params.len(), 3);
    assert_eq!(params["bytes"], "gb");
    assert_eq!(params["v"], "true");
}

#[test]
fn test_plain_values_are_always_sent() {
    let params = Required { from: 0 }.to_params();
    assert_eq!(params["from"], "0");
}

#[test]
fn test_generic_and_custom_values() {
    let params = Generic {
        value: Some(Preference(2)),
    }
    .to_params();
    assert_eq!(params["value"], "_shards:2");

    let params = Generic::<Preference> { value: None }.to_params();
    assert!(params.is_empty());
}
