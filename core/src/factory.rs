//! Entry point: binds a transport to a base URL and hands out builders.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::RequestBuilder;
use crate::error::{RequestError, Result};
use crate::kind::TypeOf;
use crate::transport::Transport;

/// Factory settings as they appear in a JSON configuration document.
///
/// `base_url` stays a raw JSON value so a non-string entry is reported as a
/// configuration error rather than a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(alias = "base_url")]
    pub base_url: Value,
    #[serde(default, alias = "api_version")]
    pub api_version: String,
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| RequestError::Config(e.to_string()))
    }
}

/// Produces independent `RequestBuilder`s sharing one transport, base URL
/// and API version.
pub struct RequestFactory<T> {
    transport: Arc<T>,
    base_url: Arc<str>,
    api_version: Arc<str>,
}

impl<T: Transport> RequestFactory<T> {
    /// Fails with `RequestError::Config` when `base_url` is not a string.
    pub fn new(
        transport: T,
        base_url: impl Into<Value>,
        api_version: impl Into<String>,
    ) -> Result<Self> {
        let base_url = match base_url.into() {
            Value::String(url) => url,
            other => {
                let kind = other.type_of();
                tracing::warn!(%kind, "rejected non-string base URL");
                return Err(RequestError::Config(format!(
                    "base URL must be a string, got {kind}: {other}"
                )));
            }
        };
        let api_version = api_version.into();
        tracing::debug!(%base_url, %api_version, "request factory created");
        Ok(Self {
            transport: Arc::new(transport),
            base_url: base_url.into(),
            api_version: api_version.into(),
        })
    }

    pub fn from_config(transport: T, config: ClientConfig) -> Result<Self> {
        Self::new(transport, config.base_url, config.api_version)
    }

    /// A fresh builder whose default path is `path`.
    pub fn bind(&self, path: impl Into<String>) -> RequestBuilder<T> {
        RequestBuilder::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.base_url),
            Arc::clone(&self.api_version),
            path.into(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T> Clone for RequestFactory<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: Arc::clone(&self.base_url),
            api_version: Arc::clone(&self.api_version),
        }
    }
}

impl<T> fmt::Debug for RequestFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestFactory")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}
