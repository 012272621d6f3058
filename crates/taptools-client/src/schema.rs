//! TapTools API schema store.
//!
//! Parses an OpenAPI description of the TapTools REST API and answers the
//! one question request building needs: which HTTP method an endpoint
//! supports. The store is loaded once and read-only afterwards.

use crate::error::{Result, TapToolsError};
use openapiv3::{OpenAPI, ReferenceOr};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// Default base URL of the TapTools REST API.
pub const DEFAULT_BASE_URL: &str = "https://openapi.taptools.io/api/v1";

/// OpenAPI description of the TapTools API, compiled into the crate.
const BUNDLED_SCHEMA: &str = include_str!("../schemas/schema.json");

/// Immutable store of the endpoints the API documents.
///
/// Each endpoint must document exactly one HTTP method; a document that
/// lists several methods for the same path is rejected at load time, so
/// `method_for` never has to guess.
#[derive(Debug, Clone)]
pub struct ApiSchema {
    base_url: String,
    /// Endpoint path -> upper-case HTTP method
    endpoints: BTreeMap<String, String>,
}

impl ApiSchema {
    /// Load the OpenAPI description bundled with this crate.
    pub fn bundled() -> Result<Self> {
        Self::from_str(BUNDLED_SCHEMA)
    }

    /// Load an OpenAPI description from a file.
    ///
    /// Supports both JSON and YAML formats.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let spec: OpenAPI = if path.ends_with(".json") {
            serde_json::from_str(&content).map_err(|e| TapToolsError::Schema(e.to_string()))?
        } else {
            serde_yaml::from_str(&content)?
        };

        Self::from_spec(spec)
    }

    /// Parse an OpenAPI description from a string.
    ///
    /// Automatically detects JSON or YAML format.
    pub fn from_str(content: &str) -> Result<Self> {
        let spec: OpenAPI = serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e: serde_yaml::Error| TapToolsError::Schema(e.to_string()))?;

        Self::from_spec(spec)
    }

    fn from_spec(spec: OpenAPI) -> Result<Self> {
        // Base URL comes from the first server entry and is fixed for the
        // lifetime of the store.
        let base_url = spec
            .servers
            .first()
            .map(|s| s.url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)?;

        let mut endpoints = BTreeMap::new();

        for (path, path_item_ref) in &spec.paths.paths {
            let path_item = match path_item_ref {
                ReferenceOr::Item(item) => item,
                ReferenceOr::Reference { .. } => {
                    return Err(TapToolsError::Schema(format!(
                        "path '{}' is a reference, references are not supported",
                        path
                    )));
                }
            };

            let methods = [
                ("get", &path_item.get),
                ("post", &path_item.post),
                ("put", &path_item.put),
                ("delete", &path_item.delete),
                ("patch", &path_item.patch),
                ("head", &path_item.head),
                ("options", &path_item.options),
                ("trace", &path_item.trace),
            ];

            let mut documented = methods
                .iter()
                .filter(|(_, operation)| operation.is_some())
                .map(|(name, _)| *name);

            let method = documented.next().ok_or_else(|| {
                TapToolsError::Schema(format!("endpoint '{}' documents no HTTP method", path))
            })?;

            if let Some(extra) = documented.next() {
                return Err(TapToolsError::Schema(format!(
                    "endpoint '{}' documents more than one HTTP method ({} and {})",
                    path, method, extra
                )));
            }

            endpoints.insert(path.clone(), method.to_uppercase());
        }

        debug!(
            endpoints = endpoints.len(),
            base_url = %base_url,
            "Loaded API schema"
        );

        Ok(Self { base_url, endpoints })
    }

    /// The HTTP method documented for `endpoint`.
    ///
    /// Fails with [`TapToolsError::UnknownEndpoint`] if the endpoint is
    /// absent from the schema; no request is ever built for such a path.
    pub fn method_for(&self, endpoint: &str) -> Result<&str> {
        self.endpoints
            .get(endpoint)
            .map(|m| m.as_str())
            .ok_or_else(|| TapToolsError::UnknownEndpoint(endpoint.to_string()))
    }

    /// Base URL declared by the schema document.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All endpoint paths in the schema, in sorted order.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(|s| s.as_str())
    }

    /// Number of endpoints in the schema.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Check if the schema is empty.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
