//! HTTP request assembly.
//!
//! Turns an endpoint path and a parameter bag into a [`RequestDescriptor`]:
//! method from the schema store, URL from the base URL, auth header from
//! the resolved key, and query parameters from every non-null entry.

use crate::error::{Result, TapToolsError};
use crate::schema::ApiSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Reserved parameter key carrying per-call header overrides.
///
/// The value must be a JSON object; its entries are merged into the request
/// headers and excluded from the query string.
pub const HEADER_OVERRIDES_KEY: &str = "_headers";

/// Named parameters for a single API call.
///
/// A null value means "omit this parameter"; every other value is sent,
/// string-coerced, as a query parameter.
pub type Params = Map<String, Value>;

/// A fully assembled request, ready for dispatch.
///
/// Constructed fresh per call; carries no identity beyond the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// HTTP method (GET, POST, ...)
    pub method: String,
    /// Absolute request URL
    pub url: String,
    /// Request headers, auth header included
    pub headers: Vec<(String, String)>,
    /// Query parameters, null-valued entries already dropped
    pub query: Vec<(String, String)>,
}

/// Render a JSON value the way it should appear in a query string.
///
/// Strings are used verbatim; everything else keeps its JSON rendering, so
/// `0` stays `"0"` and `false` stays `"false"`.
fn coerce_to_string(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Assemble the request for `endpoint`.
///
/// Pure function of its inputs; issues no network traffic. Fails before
/// anything is sent when the endpoint is absent from the schema.
pub(crate) fn build_request(
    schema: &ApiSchema,
    base_url: &str,
    api_key: &str,
    endpoint: &str,
    params: &Params,
) -> Result<RequestDescriptor> {
    let method = schema.method_for(endpoint)?.to_string();
    let url = format!("{}{}", base_url, endpoint);

    let mut headers = vec![("x-api-key".to_string(), api_key.to_string())];
    if let Some(overrides) = params.get(HEADER_OVERRIDES_KEY) {
        let overrides = overrides.as_object().ok_or_else(|| {
            TapToolsError::InvalidParameter(
                HEADER_OVERRIDES_KEY.to_string(),
                "expected an object of header names to values".to_string(),
            )
        })?;
        for (name, value) in overrides {
            headers.push((name.clone(), coerce_to_string(value)));
        }
    }

    let mut query = Vec::new();
    for (key, value) in params {
        if key == HEADER_OVERRIDES_KEY || value.is_null() {
            continue;
        }
        query.push((key.clone(), coerce_to_string(value)));
    }

    debug!(%method, %url, query_params = query.len(), "Prepared request");

    Ok(RequestDescriptor {
        method,
        url,
        headers,
        query,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_schema() -> ApiSchema {
        ApiSchema::bundled().unwrap()
    }

    fn build(endpoint: &str, params: Params) -> Result<RequestDescriptor> {
        build_request(
            &test_schema(),
            "https://api.example.com/v1",
            "secret",
            endpoint,
            &params,
        )
    }

    #[test]
    fn test_url_and_method() {
        let descriptor = build("/token/mcap", Params::new()).unwrap();
        assert_eq!(descriptor.method, "GET");
        assert_eq!(descriptor.url, "https://api.example.com/v1/token/mcap");
    }

    #[test]
    fn test_auth_header_is_plain_key() {
        let descriptor = build("/token/mcap", Params::new()).unwrap();
        assert_eq!(
            descriptor.headers,
            vec![("x-api-key".to_string(), "secret".to_string())]
        );
    }

    #[test]
    fn test_null_params_dropped_defined_params_coerced() {
        let mut params = Params::new();
        params.insert("unit".into(), json!("abcd"));
        params.insert("page".into(), json!(0));
        params.insert("adaOnly".into(), json!(false));
        params.insert("empty".into(), json!(""));
        params.insert("absent".into(), Value::Null);

        let descriptor = build("/token/mcap", params).unwrap();
        assert_eq!(
            descriptor.query,
            vec![
                ("adaOnly".to_string(), "false".to_string()),
                ("empty".to_string(), "".to_string()),
                ("page".to_string(), "0".to_string()),
                ("unit".to_string(), "abcd".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_overrides_merge_and_leave_query() {
        let mut params = Params::new();
        params.insert("unit".into(), json!("abcd"));
        params.insert(
            HEADER_OVERRIDES_KEY.into(),
            json!({"x-request-id": "42"}),
        );

        let descriptor = build("/token/mcap", params).unwrap();
        assert!(
            descriptor
                .headers
                .contains(&("x-request-id".to_string(), "42".to_string()))
        );
        assert_eq!(
            descriptor.query,
            vec![("unit".to_string(), "abcd".to_string())]
        );
    }

    #[test]
    fn test_header_overrides_must_be_object() {
        let mut params = Params::new();
        params.insert(HEADER_OVERRIDES_KEY.into(), json!("not-an-object"));

        let err = build("/token/mcap", params).unwrap_err();
        assert!(matches!(err, TapToolsError::InvalidParameter(_, _)));
    }

    #[test]
    fn test_unknown_endpoint_builds_nothing() {
        let err = build("/unknown", Params::new()).unwrap_err();
        assert!(matches!(err, TapToolsError::UnknownEndpoint(_)));
    }
}
