//! Metrics decorator over the skill handler contract.

use crate::metrics::registry::{MetricKey, MetricsRegistry, TimerGuard};
use crate::speech::domain::{RequestEnvelope, SkillResponse};
use crate::speech::ports::{HandlerResult, SkillHandler};
use async_trait::async_trait;
use std::sync::Arc;

/// Timer for session-start notifications.
pub const SESSIONS_STARTED: &str = "sessions.started";
/// Timer for session-end notifications.
pub const SESSIONS_ENDED: &str = "sessions.ended";
/// Timer for launch events.
pub const LAUNCHES: &str = "launches";
/// Per-intent timer for intent dispatch.
pub const INTENTS_HANDLED: &str = "intents.handled";
/// Path-wide timer for intent dispatch, across all intents.
pub const INTENTS_HANDLED_TOTAL: &str = "intents.handled.total";

/// Label carrying the registration path of the wrapped handler.
pub const PATH_LABEL: &str = "path";
/// Label carrying the dispatched intent name.
pub const INTENT_LABEL: &str = "intent";
/// Intent label value used when an intent request carries no intent.
pub const NULL_INTENT: &str = "null";

/// Transparent metrics decorator for a [`SkillHandler`].
///
/// Records the wall-clock duration of every delegate call under timers
/// labelled with the handler's registration path. Arguments, return values,
/// and errors pass through unchanged; a failing delegate still gets its
/// duration recorded before the error propagates.
pub struct MetricsHandler {
    delegate: Arc<dyn SkillHandler>,
    path: String,
    registry: Arc<MetricsRegistry>,
}

impl MetricsHandler {
    /// Wraps `delegate`, labelling observations with `path`.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        delegate: Arc<dyn SkillHandler>,
        registry: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            delegate,
            path: path.into(),
            registry,
        }
    }

    fn path_key(&self, metric: &str) -> MetricKey {
        MetricKey::new(metric).with_label(PATH_LABEL, self.path.clone())
    }

    fn timer(&self, key: MetricKey) -> TimerGuard {
        TimerGuard::start(Arc::clone(&self.registry), key)
    }
}

#[async_trait]
impl SkillHandler for MetricsHandler {
    async fn on_launch(&self, envelope: &RequestEnvelope) -> HandlerResult<SkillResponse> {
        let _timer = self.timer(self.path_key(LAUNCHES));
        self.delegate.on_launch(envelope).await
    }

    async fn on_intent(&self, envelope: &RequestEnvelope) -> HandlerResult<SkillResponse> {
        let intent_name = envelope
            .request
            .intent()
            .map_or(NULL_INTENT, |intent| intent.name.as_str());
        let _total_timer = self.timer(self.path_key(INTENTS_HANDLED_TOTAL));
        let _intent_timer = self.timer(
            self.path_key(INTENTS_HANDLED)
                .with_label(INTENT_LABEL, intent_name),
        );
        self.delegate.on_intent(envelope).await
    }

    async fn on_session_started(&self, envelope: &RequestEnvelope) -> HandlerResult<()> {
        let _timer = self.timer(self.path_key(SESSIONS_STARTED));
        self.delegate.on_session_started(envelope).await
    }

    async fn on_session_ended(&self, envelope: &RequestEnvelope) -> HandlerResult<()> {
        let _timer = self.timer(self.path_key(SESSIONS_ENDED));
        self.delegate.on_session_ended(envelope).await
    }
}
