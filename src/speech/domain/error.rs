//! Error type for skill handler failures.

use std::sync::Arc;
use thiserror::Error;

/// Failure raised by a skill handler during dispatch.
///
/// The host does not catch handler errors; the dispatch adapter records any
/// pending metrics observation and lets the failure surface on the
/// listener's error path.
#[derive(Debug, Clone, Error)]
#[error("skill handler failed: {0}")]
pub struct HandlerError(Arc<dyn std::error::Error + Send + Sync>);

impl HandlerError {
    /// Wraps an underlying error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Creates a handler error from a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        Self(Arc::new(std::io::Error::other(message.into())))
    }
}
