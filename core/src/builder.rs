//! Per-request builder and its terminal dispatchers.
//!
//! # Design
//! A `RequestBuilder` is created by `RequestFactory::bind` and owns all of
//! its request state: headers, body and middlewares. Mutators take
//! `&mut self`, validate their input before touching anything, and hand
//! `&mut Self` back so calls chain with `?`. A terminal dispatcher assembles
//! `Parameters`, runs the middleware pipeline and passes the parameters to the
//! shared `Transport`.
//!
//! Whether a body is sent, and whether it is encoded as JSON, is decided
//! before the middlewares run. After they finish the transport gets the
//! current header map and, for bodies passed through unencoded, the current
//! body. JSON text encoded before the middlewares is sent as encoded.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{RequestError, Result};
use crate::http::{
    Body, Headers, HttpMethod, Parameters, APPLICATION_JSON, AUTHORIZATION, CONTENT_TYPE,
};
use crate::kind::TypeOf;
use crate::middleware::Middlewares;
use crate::transport::Transport;

/// One pending request bound to a base URL and a default path.
pub struct RequestBuilder<T> {
    transport: Arc<T>,
    base_url: Arc<str>,
    api_version: Arc<str>,
    path: String,
    headers: Headers,
    body: Option<Body>,
    middlewares: Middlewares,
    request_id: Uuid,
}

impl<T: Transport> RequestBuilder<T> {
    pub(crate) fn new(
        transport: Arc<T>,
        base_url: Arc<str>,
        api_version: Arc<str>,
        path: String,
    ) -> Self {
        Self {
            transport,
            base_url,
            api_version,
            path,
            headers: Headers::new(),
            body: None,
            middlewares: Middlewares::default(),
            request_id: Uuid::new_v4(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Version string captured by the factory. Informational only.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Default path used when a dispatcher gets no override.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn middlewares(&self) -> &Middlewares {
        &self.middlewares
    }

    /// Identifier attached to this builder's log spans.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Set a header, replacing any previous value under the same key.
    ///
    /// Both `key` and `value` must be strings; otherwise nothing changes and
    /// `RequestError::InvalidHeader` carries the two rejected values with the
    /// kinds they had before conversion.
    pub fn with_header(
        &mut self,
        key: impl Into<Value> + TypeOf,
        value: impl Into<Value> + TypeOf,
    ) -> Result<&mut Self> {
        let (key_kind, value_kind) = (key.type_of(), value.type_of());
        match (key.into(), value.into()) {
            (Value::String(key), Value::String(value)) => {
                tracing::trace!(request_id = %self.request_id, %key, "header set");
                self.headers.insert(key, value);
                Ok(self)
            }
            (key, value) => {
                tracing::warn!(
                    request_id = %self.request_id,
                    %key_kind,
                    %value_kind,
                    "rejected non-string header"
                );
                Err(RequestError::InvalidHeader {
                    key,
                    value,
                    key_kind,
                    value_kind,
                })
            }
        }
    }

    pub fn with_authorization(&mut self, token: impl Into<Value> + TypeOf) -> Result<&mut Self> {
        self.with_header(AUTHORIZATION, token)
    }

    /// Set `Authorization: Bearer <token>`. The token is formatted with
    /// `Display`, so the header value is always a string.
    pub fn with_bearer_authorization(&mut self, token: impl fmt::Display) -> Result<&mut Self> {
        self.with_authorization(format!("Bearer {token}"))
    }

    pub fn with_content_type(&mut self, content_type: impl Into<Value> + TypeOf) -> Result<&mut Self> {
        self.with_header(CONTENT_TYPE, content_type)
    }

    /// Store the request payload, replacing any previous one.
    ///
    /// A JSON `null` payload is refused with `RequestError::InvalidBody` and
    /// the stored body is left as it was. Every other payload, including
    /// `0`, `""`, `false`, `[]` and `{}`, is stored exactly as given.
    pub fn with_body(&mut self, body: impl Into<Body>) -> Result<&mut Self> {
        let body = body.into();
        let kind = body.type_of();
        if kind.is_undefined_or_null() {
            tracing::warn!(request_id = %self.request_id, %kind, "rejected empty body");
            return Err(RequestError::InvalidBody { body });
        }
        tracing::trace!(request_id = %self.request_id, %kind, "body set");
        self.body = Some(body);
        Ok(self)
    }

    /// Register middlewares. Slots left empty in `middlewares` keep their
    /// current registration.
    pub fn with_middleware(&mut self, middlewares: Middlewares) -> &mut Self {
        self.middlewares.merge(middlewares);
        self
    }

    /// Assemble transport parameters from the current state.
    ///
    /// The body is included only when one is stored and a `Content-Type`
    /// header is present. A content type starting with `application/json`
    /// turns the body into JSON text; any other content type passes it
    /// through unchanged.
    pub fn build_parameters(&self, method: HttpMethod) -> Result<Parameters> {
        let body = match (&self.body, self.headers.get(CONTENT_TYPE)) {
            (Some(body), Some(content_type)) if !body.type_of().is_undefined_or_null() => {
                if is_json(content_type) {
                    Some(Body::Text(body.to_json()?))
                } else {
                    Some(body.clone())
                }
            }
            _ => None,
        };
        Ok(Parameters {
            method,
            headers: self.headers.clone(),
            body,
        })
    }

    fn encodes_json(&self) -> bool {
        self.headers.get(CONTENT_TYPE).is_some_and(|ct| is_json(ct))
    }

    /// URL for a dispatch: the base URL followed by `path`, or by the bound
    /// default path when `path` is `None` or empty.
    pub fn url_for(&self, path: Option<&str>) -> String {
        let path = path.filter(|p| !p.is_empty()).unwrap_or(self.path.as_str());
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&mut self, path: Option<&str>) -> Result<T::Output> {
        self.dispatch(HttpMethod::Get, path).await
    }

    pub async fn post(&mut self, path: Option<&str>) -> Result<T::Output> {
        self.dispatch(HttpMethod::Post, path).await
    }

    /// `post` with `Content-Type: application/json` forced first.
    pub async fn post_json(&mut self, path: Option<&str>) -> Result<T::Output> {
        self.with_content_type(APPLICATION_JSON)?;
        self.post(path).await
    }

    pub async fn put(&mut self, path: Option<&str>) -> Result<T::Output> {
        self.dispatch(HttpMethod::Put, path).await
    }

    /// `put` with `Content-Type: application/json` forced first.
    pub async fn put_json(&mut self, path: Option<&str>) -> Result<T::Output> {
        self.with_content_type(APPLICATION_JSON)?;
        self.put(path).await
    }

    pub async fn delete(&mut self, path: Option<&str>) -> Result<T::Output> {
        self.dispatch(HttpMethod::Delete, path).await
    }

    async fn dispatch(&mut self, method: HttpMethod, path: Option<&str>) -> Result<T::Output> {
        let url = self.url_for(path);
        let span = tracing::debug_span!(
            "dispatch",
            request_id = %self.request_id,
            %method,
            %url
        );
        async move {
            let mut params = self.build_parameters(method)?;
            let pass_through = params.body.is_some() && !self.encodes_json();
            self.run_middlewares().await?;
            params.headers = self.headers.clone();
            if pass_through {
                params.body = self
                    .body
                    .clone()
                    .filter(|body| !body.type_of().is_undefined_or_null());
            }
            tracing::debug!(
                headers = params.headers.len(),
                has_body = params.body.is_some(),
                "invoking transport"
            );
            Ok::<_, RequestError>(self.transport.request(url, params).await)
        }
        .instrument(span)
        .await
    }

    async fn run_middlewares(&mut self) -> Result<()> {
        self.middlewares.run(&mut self.headers, &mut self.body).await
    }
}

fn is_json(content_type: &str) -> bool {
    content_type.starts_with(APPLICATION_JSON)
}

impl<T> fmt::Debug for RequestBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("path", &self.path)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("middlewares", &self.middlewares)
            .field("request_id", &self.request_id)
            .finish()
    }
}
