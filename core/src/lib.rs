//! Chainable description of a single outbound HTTP request.
//!
//! # Overview
//! `RequestFactory` binds a `Transport` to a base URL. Each call to
//! `RequestFactory::bind` yields a `RequestBuilder` for one request: headers,
//! body and pre-flight middlewares are accumulated through `with_*` calls,
//! then one terminal dispatcher (`get`, `post`, `post_json`, `put`,
//! `put_json`, `delete`) runs the middlewares and hands the assembled
//! `Parameters` to the transport.
//!
//! # Design
//! - Network I/O lives behind `Transport`; the core never inspects its output.
//! - Input validation goes through the `Kind` classification in `kind`.
//! - The only body codec is JSON, applied when `Content-Type` starts with
//!   `application/json`.
//!
//! ```no_run
//! # async fn demo<T: outbound_core::Transport>(transport: T) -> outbound_core::Result<()> {
//! use outbound_core::RequestFactory;
//! use serde_json::json;
//!
//! let factory = RequestFactory::new(transport, "https://api.example.com", "v1")?;
//! let _output = factory
//!     .bind("/users")
//!     .with_bearer_authorization("token")?
//!     .with_body(json!({ "name": "ada" }))?
//!     .post_json(None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod factory;
pub mod http;
pub mod kind;
pub mod middleware;
pub mod transport;

pub use builder::RequestBuilder;
pub use error::{BoxError, RequestError, Result, Stage};
pub use factory::{ClientConfig, RequestFactory};
pub use http::{Body, Headers, HttpMethod, Parameters};
pub use kind::{type_of, Kind, TypeOf};
pub use middleware::{BodyMiddleware, HeaderMiddleware, Middlewares};
pub use transport::Transport;
