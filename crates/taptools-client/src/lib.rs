//! # TapTools API client
//!
//! A thin wrapper around the TapTools REST API (Cardano blockchain data),
//! built to back a callable tool in an LLM agent framework.
//!
//! ## Features
//!
//! - Bundled OpenAPI description of the TapTools endpoints
//! - HTTP method lookup per endpoint (exactly one method each)
//! - API key resolution from an explicit value or `TAPTOOLS_API_KEY`
//! - Synchronous and asynchronous dispatch with an optional shared session
//! - Errors for missing keys, unknown endpoints, non-2xx responses and
//!   malformed JSON bodies - nothing is retried or swallowed
//!
//! ## Example
//!
//! ```no_run
//! use taptools_client::{ApiSchema, TapToolsClient};
//!
//! # #[tokio::main]
//! # async fn main() -> taptools_client::Result<()> {
//! // Key resolved from the TAPTOOLS_API_KEY environment variable
//! let client = TapToolsClient::new(ApiSchema::bundled()?, None)?;
//!
//! let mut params = taptools_client::Params::new();
//! params.insert("unit".into(), "279c909f...534e454b".into());
//! let mcap = client.arun("/token/mcap", &params).await?;
//! println!("{mcap}");
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod request;
mod schema;
mod transport;

pub use client::TapToolsClient;
pub use config::{API_KEY_ENV_VAR, resolve_api_key};
pub use error::{Result, TapToolsError};
pub use request::{HEADER_OVERRIDES_KEY, Params, RequestDescriptor};
pub use schema::{ApiSchema, DEFAULT_BASE_URL};
pub use transport::{DEFAULT_TIMEOUT, call_async, call_sync};
