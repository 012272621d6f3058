//! TapTools API wrapper.

use crate::config;
use crate::error::Result;
use crate::request::{self, Params, RequestDescriptor};
use crate::schema::ApiSchema;
use crate::transport;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// Wrapper around the TapTools REST API.
///
/// Holds the resolved API key and the schema document describing the
/// endpoints the API supports. The schema is injected at construction and
/// shared read-only by every call; the wrapper itself is immutable once
/// built.
///
/// # Example
///
/// ```no_run
/// use taptools_client::{ApiSchema, Params, TapToolsClient};
///
/// # #[tokio::main]
/// # async fn main() -> taptools_client::Result<()> {
/// // Key resolved from the TAPTOOLS_API_KEY environment variable
/// let client = TapToolsClient::new(ApiSchema::bundled()?, None)?;
///
/// let mut params = Params::new();
/// params.insert("quote".into(), "USD".into());
/// let stats = client.arun("/market/stats", &params).await?;
/// println!("{stats}");
/// # Ok(())
/// # }
/// ```
pub struct TapToolsClient {
    schema: ApiSchema,
    api_key: String,
    base_url: String,
    session: Option<reqwest::Client>,
    timeout: Duration,
}

impl std::fmt::Debug for TapToolsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The API key is a secret and stays out of logs.
        f.debug_struct("TapToolsClient")
            .field("base_url", &self.base_url)
            .field("endpoints", &self.schema.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TapToolsClient {
    /// Create a client over `schema`.
    ///
    /// The API key is taken from `api_key` when given, otherwise from the
    /// `TAPTOOLS_API_KEY` environment variable; construction fails when
    /// neither yields a non-empty key. The base URL comes from the schema
    /// document.
    pub fn new(schema: ApiSchema, api_key: Option<&str>) -> Result<Self> {
        Ok(Self {
            api_key: config::resolve_api_key(api_key)?,
            base_url: schema.base_url().to_string(),
            schema,
            session: None,
            timeout: transport::DEFAULT_TIMEOUT,
        })
    }

    /// Reuse a caller-owned HTTP session for asynchronous calls.
    ///
    /// The session is never torn down by this client; its lifecycle stays
    /// with the caller.
    pub fn with_session(mut self, session: reqwest::Client) -> Self {
        self.session = Some(session);
        self
    }

    /// Override the base URL declared by the schema document.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The schema document this client consults.
    pub fn schema(&self) -> &ApiSchema {
        &self.schema
    }

    /// Assemble the request for `endpoint` without dispatching it.
    #[instrument(skip(self, params))]
    pub fn prepare_request(&self, endpoint: &str, params: &Params) -> Result<RequestDescriptor> {
        request::build_request(&self.schema, &self.base_url, &self.api_key, endpoint, params)
    }

    /// Call `endpoint` on the current thread and return the decoded body.
    pub fn run(&self, endpoint: &str, params: &Params) -> Result<Value> {
        let descriptor = self.prepare_request(endpoint, params)?;
        transport::call_sync(&descriptor, self.timeout)
    }

    /// Call `endpoint` without blocking and return the decoded body.
    pub async fn arun(&self, endpoint: &str, params: &Params) -> Result<Value> {
        let descriptor = self.prepare_request(endpoint, params)?;
        transport::call_async(&descriptor, self.session.as_ref(), self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TapToolsError;

    #[test]
    fn test_explicit_key_lands_in_auth_header() {
        let client = TapToolsClient::new(ApiSchema::bundled().unwrap(), Some("abc123")).unwrap();
        let descriptor = client
            .prepare_request("/token/mcap", &Params::new())
            .unwrap();
        assert!(
            descriptor
                .headers
                .contains(&("x-api-key".to_string(), "abc123".to_string()))
        );
    }

    #[test]
    fn test_unknown_endpoint_fails_before_any_network_call() {
        let client = TapToolsClient::new(ApiSchema::bundled().unwrap(), Some("abc123"))
            .unwrap()
            // Unroutable on purpose: reaching the transport would hang, not 404.
            .with_base_url("http://192.0.2.1");
        let err = client.run("/unknown", &Params::new()).unwrap_err();
        assert!(matches!(err, TapToolsError::UnknownEndpoint(_)));
    }

    #[test]
    fn test_base_url_defaults_to_schema_servers_entry() {
        let client = TapToolsClient::new(ApiSchema::bundled().unwrap(), Some("abc123")).unwrap();
        let descriptor = client
            .prepare_request("/token/mcap", &Params::new())
            .unwrap();
        assert_eq!(
            descriptor.url,
            "https://openapi.taptools.io/api/v1/token/mcap"
        );
    }
}
