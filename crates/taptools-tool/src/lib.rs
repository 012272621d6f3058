//! Tool adapter for the TapTools API.
//!
//! Wraps [`taptools_client::TapToolsClient`] in the [`Tool`] trait so an
//! agent can query the taptools.io Cardano blockchain API. The tool takes
//! an `endpoint` plus free-form named parameters and returns the API's
//! JSON result unchanged.

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use taptools_client::{Params, TapToolsClient};
use taptools_core::{Error, Tool, ToolContext, ToolResponse};
use tracing::debug;

/// Name the tool is registered under.
pub const TOOL_NAME: &str = "taptools_api";

/// Reduced, human-readable endpoint listing shown to the model.
const REDUCED_SCHEMA: &str = include_str!("../schemas/reduced_schema.json");

/// Policy id / hex name lookup table for popular tokens; descriptive only,
/// never consulted when building requests.
const POLICY_AND_HEX: &str = include_str!("../schemas/policy_and_hex.json");

/// Tool that queries the taptools.io Cardano blockchain API and returns
/// JSON.
///
/// # Example
///
/// ```no_run
/// use taptools_client::{ApiSchema, TapToolsClient};
/// use taptools_tool::TapToolsTool;
///
/// # fn main() -> taptools_client::Result<()> {
/// let client = TapToolsClient::new(ApiSchema::bundled()?, None)?;
/// let tool = TapToolsTool::new(client);
/// # Ok(())
/// # }
/// ```
pub struct TapToolsTool {
    description: String,
    client: TapToolsClient,
}

impl TapToolsTool {
    /// Create the tool over an already configured client.
    pub fn new(client: TapToolsClient) -> Self {
        let description = format!(
            "TapTools API provided by taptools.io. Use this tool to look up market, token, \
             NFT, wallet and onchain data for the Cardano blockchain. The input is an endpoint \
             path plus any required or optional parameters, and the output is the JSON object \
             the API returns. Available endpoints with their methods and parameters: \
             {REDUCED_SCHEMA} Policy id and hex-encoded name for some popular tokens: \
             {POLICY_AND_HEX}"
        );
        Self {
            description,
            client,
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &TapToolsClient {
        &self.client
    }

    /// Call `endpoint` on the current thread.
    pub fn run(&self, endpoint: &str, params: &Params) -> taptools_client::Result<Value> {
        self.client.run(endpoint, params)
    }

    /// Call `endpoint` without blocking.
    pub async fn arun(&self, endpoint: &str, params: &Params) -> taptools_client::Result<Value> {
        self.client.arun(endpoint, params).await
    }

    fn tool_failed(source: anyhow::Error) -> Error {
        Error::ToolFailed {
            tool: TOOL_NAME.to_string(),
            source,
        }
    }
}

#[async_trait]
impl Tool for TapToolsTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "endpoint": {
                    "type": "string",
                    "description": "Endpoint path to call, e.g. /token/mcap"
                }
            },
            "required": ["endpoint"],
            "additionalProperties": {
                "description": "Every additional property is sent as a query parameter; null values are omitted"
            }
        })
    }

    async fn execute(
        &self,
        ctx: Arc<dyn ToolContext>,
        params: Value,
    ) -> taptools_core::Result<ToolResponse> {
        let mut params = match params {
            Value::Object(map) => map,
            _ => return Err(Self::tool_failed(anyhow!("expected an object of parameters"))),
        };

        let endpoint = match params.remove("endpoint") {
            Some(Value::String(endpoint)) => endpoint,
            _ => {
                return Err(Self::tool_failed(anyhow!(
                    "missing required string parameter 'endpoint'"
                )));
            }
        };

        debug!(
            invocation_id = %ctx.invocation_id(),
            tool_call_id = %ctx.function_call_id(),
            %endpoint,
            "Calling TapTools API"
        );

        let result = self
            .client
            .arun(&endpoint, &params)
            .await
            .map_err(|e| Self::tool_failed(e.into()))?;

        Ok(ToolResponse { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taptools_client::ApiSchema;
    use taptools_core::DefaultToolContext;

    fn test_tool(base_url: String) -> TapToolsTool {
        let client = TapToolsClient::new(ApiSchema::bundled().unwrap(), Some("test-key"))
            .unwrap()
            .with_base_url(base_url);
        TapToolsTool::new(client)
    }

    fn test_ctx() -> Arc<dyn ToolContext> {
        Arc::new(DefaultToolContext::new(
            "call-123".to_string(),
            "inv-456".to_string(),
        ))
    }

    #[test]
    fn test_name_and_description() {
        let tool = test_tool("http://localhost".to_string());
        assert_eq!(tool.name(), "taptools_api");
        assert!(tool.description().contains("/token/mcap"));
        assert!(tool.description().contains("SNEK"));
    }

    #[test]
    fn test_schema_requires_endpoint() {
        let tool = test_tool("http://localhost".to_string());
        let schema = tool.schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["endpoint"]));
    }

    #[tokio::test]
    async fn test_execute_returns_structural_result() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/token/quote")
            .match_query(mockito::Matcher::UrlEncoded("quote".into(), "EUR".into()))
            .with_status(200)
            .with_body("{\"price\": 0.42}")
            .create_async()
            .await;

        let tool = test_tool(server.url());
        let response = tool
            .execute(test_ctx(), json!({"endpoint": "/token/quote", "quote": "EUR"}))
            .await
            .unwrap();

        assert_eq!(response.result, json!({"price": 0.42}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_execute_without_endpoint_fails() {
        let tool = test_tool("http://localhost".to_string());
        let err = tool
            .execute(test_ctx(), json!({"quote": "EUR"}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
    }
}
