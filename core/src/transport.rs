//! The seam between the builder and whatever performs network I/O.

use async_trait::async_trait;

use crate::http::Parameters;

/// Executes one outbound call.
///
/// Implementations pick their own `Output`, usually a `Result` over their
/// response and error types. The builder never inspects it; dispatchers hand
/// it back to the caller as returned here.
#[async_trait]
pub trait Transport: Send + Sync {
    type Output: Send;

    async fn request(&self, url: String, params: Parameters) -> Self::Output;
}
