//! Pre-flight hooks run by terminal dispatchers.
//!
//! # Design
//! There are two slots, one per piece of request state. A dispatch runs the
//! header slot, then the body slot, each to completion, before parameters are
//! assembled and the transport is called. Hooks get `&mut` access to their
//! slice of state, so an in-place change (a computed signature header, a
//! wrapped payload) is what the transport sees.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::{BoxError, RequestError, Result, Stage};
use crate::http::{Body, Headers};
use crate::kind::{Kind, TypeOf};

/// Hook over the header map.
#[async_trait]
pub trait HeaderMiddleware: Send + Sync {
    async fn handle(&self, headers: &mut Headers) -> std::result::Result<(), BoxError>;
}

/// Hook over the stored body. `None` when no body was set.
#[async_trait]
pub trait BodyMiddleware: Send + Sync {
    async fn handle(&self, body: &mut Option<Body>) -> std::result::Result<(), BoxError>;
}

#[async_trait]
impl<F> HeaderMiddleware for F
where
    F: for<'a> Fn(&'a mut Headers) -> BoxFuture<'a, std::result::Result<(), BoxError>> + Send + Sync,
{
    async fn handle(&self, headers: &mut Headers) -> std::result::Result<(), BoxError> {
        (self)(headers).await
    }
}

#[async_trait]
impl<F> BodyMiddleware for F
where
    F: for<'a> Fn(&'a mut Option<Body>) -> BoxFuture<'a, std::result::Result<(), BoxError>>
        + Send
        + Sync,
{
    async fn handle(&self, body: &mut Option<Body>) -> std::result::Result<(), BoxError> {
        (self)(body).await
    }
}

impl TypeOf for dyn HeaderMiddleware {
    fn type_of(&self) -> Kind {
        Kind::Function
    }
}

impl TypeOf for dyn BodyMiddleware {
    fn type_of(&self) -> Kind {
        Kind::Function
    }
}

/// Middleware configuration passed to `RequestBuilder::with_middleware`.
///
/// A slot left as `None` keeps whatever the builder already has registered
/// there; a `Some` slot replaces it.
#[derive(Clone, Default)]
pub struct Middlewares {
    pub header: Option<Arc<dyn HeaderMiddleware>>,
    pub body: Option<Arc<dyn BodyMiddleware>>,
}

impl Middlewares {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, middleware: impl HeaderMiddleware + 'static) -> Self {
        self.header = Some(Arc::new(middleware));
        self
    }

    pub fn body(mut self, middleware: impl BodyMiddleware + 'static) -> Self {
        self.body = Some(Arc::new(middleware));
        self
    }

    /// Overwrite the slots that `other` fills.
    pub(crate) fn merge(&mut self, other: Middlewares) {
        if let Some(header) = other.header {
            self.header = Some(header);
        }
        if let Some(body) = other.body {
            self.body = Some(body);
        }
    }

    /// Run the header stage, then the body stage. Stops at the first failure.
    pub(crate) async fn run(&self, headers: &mut Headers, body: &mut Option<Body>) -> Result<()> {
        if let Some(middleware) = &self.header {
            tracing::trace!("running header middleware");
            middleware
                .handle(headers)
                .await
                .map_err(|source| failed(Stage::Header, source))?;
        }
        if let Some(middleware) = &self.body {
            tracing::trace!("running body middleware");
            middleware
                .handle(body)
                .await
                .map_err(|source| failed(Stage::Body, source))?;
        }
        Ok(())
    }
}

fn failed(stage: Stage, source: BoxError) -> RequestError {
    tracing::warn!(%stage, error = %source, "middleware failed, request not sent");
    RequestError::Middleware { stage, source }
}

impl fmt::Debug for Middlewares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middlewares")
            .field("header", &self.header.is_some())
            .field("body", &self.body.is_some())
            .finish()
    }
}
