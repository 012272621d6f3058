//! API key resolution.

use crate::error::{Result, TapToolsError};
use std::env;

/// Environment variable holding the TapTools API key.
pub const API_KEY_ENV_VAR: &str = "TAPTOOLS_API_KEY";

/// Resolve the API key from an explicit value or the environment.
///
/// An explicit non-empty value takes precedence; otherwise
/// `TAPTOOLS_API_KEY` is consulted. Fails fast with a configuration error
/// when neither source yields a non-empty key.
///
/// # Example
/// ```no_run
/// use taptools_client::resolve_api_key;
///
/// let key = resolve_api_key(None)?; // reads TAPTOOLS_API_KEY
/// # Ok::<(), taptools_client::TapToolsError>(())
/// ```
pub fn resolve_api_key(explicit: Option<&str>) -> Result<String> {
    if let Some(key) = explicit {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    match env::var(API_KEY_ENV_VAR) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(TapToolsError::Config(format!(
            "API key not found. Pass one explicitly or set the {} environment variable",
            API_KEY_ENV_VAR
        ))),
    }
}
