//! The contract every registered skill handler implements.

use crate::speech::domain::{HandlerError, RequestEnvelope, SkillResponse};
use async_trait::async_trait;

/// Result type for skill handler operations.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Capability set invoked by the dispatcher on the request-handling context.
///
/// Implementations must be safe under concurrent invocation: the listener may
/// dispatch several requests to the same handler instance at once.
#[async_trait]
pub trait SkillHandler: Send + Sync {
    /// Handles a bare launch event; must produce a response.
    async fn on_launch(&self, envelope: &RequestEnvelope) -> HandlerResult<SkillResponse>;

    /// Handles a named-intent event; must produce a response.
    async fn on_intent(&self, envelope: &RequestEnvelope) -> HandlerResult<SkillResponse>;

    /// Notification that a session started. Default: no-op.
    async fn on_session_started(&self, envelope: &RequestEnvelope) -> HandlerResult<()> {
        let _ = envelope;
        Ok(())
    }

    /// Notification that a session ended. Default: no-op.
    async fn on_session_ended(&self, envelope: &RequestEnvelope) -> HandlerResult<()> {
        let _ = envelope;
        Ok(())
    }
}
