//! Router assembly and request dispatch.
//!
//! Builds the axum router from a frozen registration snapshot: one POST
//! dispatch route per registration, the dev-mode diagnostic handler on the
//! root path, and the metrics scrape endpoint when enabled. Built-in
//! endpoints never displace a registration; a path conflict is logged and
//! the built-in endpoint skipped.

use crate::host::domain::{FeatureConfig, SecurityPolicy, SkillPath, SkillRegistration};
use crate::host::ports::EnvelopeValidator;
use crate::host::{METRICS_PATH, ROOT_PATH};
use crate::metrics::{MetricsHandler, MetricsRegistry};
use crate::speech::domain::{RequestEnvelope, ResponseEnvelope, SkillRequest};
use crate::speech::ports::SkillHandler;
use axum::Router;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use chrono::SecondsFormat;
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Inputs for [`build_router`], frozen at start time.
pub(crate) struct RouterSpec<'a> {
    /// The registration snapshot to bind.
    pub(crate) registrations: &'a [SkillRegistration],
    /// The security policy derived from the snapshot.
    pub(crate) policy: &'a SecurityPolicy,
    /// Feature toggles.
    pub(crate) features: FeatureConfig,
    /// Whether dev mode is active.
    pub(crate) dev: bool,
    /// Registry receiving decorator observations and serving the scrape
    /// endpoint.
    pub(crate) registry: &'a Arc<MetricsRegistry>,
    /// Validator applied to every inbound envelope.
    pub(crate) validator: &'a Arc<dyn EnvelopeValidator>,
    /// Clock for validation receive times and the diagnostic endpoint.
    pub(crate) clock: &'a Arc<dyn Clock + Send + Sync>,
}

/// Per-route dispatch state.
struct RouteContext {
    path: SkillPath,
    handler: Arc<dyn SkillHandler>,
    policy: Arc<SecurityPolicy>,
    validator: Arc<dyn EnvelopeValidator>,
    clock: Arc<dyn Clock + Send + Sync>,
}

/// Assembles the router for one host run.
pub(crate) fn build_router(spec: &RouterSpec<'_>) -> Router {
    let policy = Arc::new(spec.policy.clone());
    let occupied: BTreeSet<&str> = spec
        .registrations
        .iter()
        .map(|registration| registration.path().as_str())
        .collect();

    let mut router = Router::new();

    for registration in spec.registrations {
        let handler: Arc<dyn SkillHandler> = if spec.features.metrics {
            Arc::new(MetricsHandler::new(
                registration.path().as_str(),
                registration.handler(),
                Arc::clone(spec.registry),
            ))
        } else {
            registration.handler()
        };

        info!(
            path = %registration.path(),
            application_id = registration.application_id(),
            "registering skill handler"
        );

        let context = Arc::new(RouteContext {
            path: registration.path().clone(),
            handler,
            policy: Arc::clone(&policy),
            validator: Arc::clone(spec.validator),
            clock: Arc::clone(spec.clock),
        });
        router = router.route(
            registration.path().as_str(),
            post(dispatch).with_state(context),
        );
    }

    if spec.dev {
        if occupied.contains(ROOT_PATH) {
            warn!("skipping diagnostic handler, a skill is registered on {ROOT_PATH}");
        } else {
            info!("installing diagnostic handler on {ROOT_PATH}");
            router = router.route(ROOT_PATH, get(diagnostic).with_state(Arc::clone(spec.clock)));
        }
        info!("dev mode active");
    }

    if spec.features.metrics {
        if occupied.contains(METRICS_PATH) {
            warn!("skipping metrics endpoint, a skill is registered on {METRICS_PATH}");
        } else {
            info!("metrics available on {METRICS_PATH}");
            router = router.route(
                METRICS_PATH,
                get(scrape).with_state(Arc::clone(spec.registry)),
            );
        }
    }

    router
}

/// Routes one inbound envelope to the matching handler operation.
async fn dispatch(
    State(context): State<Arc<RouteContext>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Response {
    let received_at = context.clock.utc();
    if let Err(err) = context
        .validator
        .validate(&envelope, &context.policy, received_at)
    {
        warn!(path = %context.path, error = %err, "rejected request envelope");
        return (StatusCode::FORBIDDEN, err.to_string()).into_response();
    }

    let outcome = match &envelope.request {
        SkillRequest::Launch { .. } => context.handler.on_launch(&envelope).await.map(Some),
        SkillRequest::Intent { .. } => context.handler.on_intent(&envelope).await.map(Some),
        SkillRequest::SessionStarted { .. } => context
            .handler
            .on_session_started(&envelope)
            .await
            .map(|()| None),
        SkillRequest::SessionEnded { .. } => context
            .handler
            .on_session_ended(&envelope)
            .await
            .map(|()| None),
    };

    match outcome {
        Ok(Some(response)) => Json(ResponseEnvelope::new(
            response,
            envelope.session.attributes.clone(),
        ))
        .into_response(),
        Ok(None) => Json(ResponseEnvelope::empty()).into_response(),
        Err(err) => {
            error!(path = %context.path, error = %err, "skill handler failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Dev-mode liveness page on the root path.
async fn diagnostic(State(clock): State<Arc<dyn Clock + Send + Sync>>) -> String {
    format!(
        "Aleksa running: {}\n",
        clock.utc().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Prometheus text exposition of all recorded timers.
async fn scrape(State(registry): State<Arc<MetricsRegistry>>) -> String {
    registry.render_prometheus()
}
