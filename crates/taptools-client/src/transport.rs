//! Request dispatch.
//!
//! One synchronous path over reqwest's blocking client and one
//! asynchronous path that can reuse a caller-owned session. Both treat any
//! non-success status as a failure and decode the body strictly as JSON.

use crate::error::{Result, TapToolsError};
use crate::request::RequestDescriptor;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn parse_method(method: &str) -> Result<reqwest::Method> {
    reqwest::Method::from_bytes(method.as_bytes())
        .map_err(|_| TapToolsError::Schema(format!("invalid HTTP method '{}'", method)))
}

/// Turn status + body bytes into the decoded JSON result or an error.
fn decode_response(
    descriptor: &RequestDescriptor,
    status: reqwest::StatusCode,
    bytes: &[u8],
) -> Result<Value> {
    if !status.is_success() {
        let body = String::from_utf8_lossy(bytes).to_string();
        error!(
            method = %descriptor.method,
            url = %descriptor.url,
            status = status.as_u16(),
            body = %body,
            "API request failed"
        );
        return Err(TapToolsError::Http {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_slice(bytes).map_err(TapToolsError::Decode)
}

/// Dispatch `descriptor` on a blocking client scoped to this call.
pub fn call_sync(descriptor: &RequestDescriptor, timeout: Duration) -> Result<Value> {
    let client = reqwest::blocking::Client::new();

    let mut builder = client
        .request(parse_method(&descriptor.method)?, &descriptor.url)
        .timeout(timeout);
    for (name, value) in &descriptor.headers {
        builder = builder.header(name, value);
    }
    if !descriptor.query.is_empty() {
        builder = builder.query(&descriptor.query);
    }

    let response = builder.send()?;
    let status = response.status();
    let bytes = response.bytes()?;

    debug!(status = status.as_u16(), "Response received");
    decode_response(descriptor, status, &bytes)
}

/// Dispatch `descriptor` without blocking.
///
/// A supplied `session` is reused and left open for the caller; without one
/// a client is created for this call alone and released when the call
/// returns, on success or failure.
pub async fn call_async(
    descriptor: &RequestDescriptor,
    session: Option<&reqwest::Client>,
    timeout: Duration,
) -> Result<Value> {
    let client = match session {
        Some(session) => session.clone(),
        None => reqwest::Client::new(),
    };

    let mut builder = client
        .request(parse_method(&descriptor.method)?, &descriptor.url)
        .timeout(timeout);
    for (name, value) in &descriptor.headers {
        builder = builder.header(name, value);
    }
    if !descriptor.query.is_empty() {
        builder = builder.query(&descriptor.query);
    }

    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    debug!(status = status.as_u16(), "Response received");
    decode_response(descriptor, status, &bytes)
}
