//! Unit tests for router assembly and dispatch.

use super::TellSkill;
use crate::host::adapters::http::{RouterSpec, build_router};
use crate::host::domain::{FeatureConfig, SecurityPolicy, SkillPath, SkillRegistration};
use crate::host::ports::{EnvelopeValidator, MockEnvelopeValidator, ValidationError};
use crate::host::{METRICS_PATH, ROOT_PATH};
use crate::metrics::MetricsRegistry;
use crate::speech::domain::{
    HandlerError, Intent, RequestEnvelope, Session, SkillRequest, SkillResponse,
};
use crate::speech::ports::{HandlerResult, SkillHandler};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tower::ServiceExt;

/// Handler failing every request.
struct BrokenSkill;

#[async_trait]
impl SkillHandler for BrokenSkill {
    async fn on_launch(&self, _envelope: &RequestEnvelope) -> HandlerResult<SkillResponse> {
        Err(HandlerError::message("launch failure"))
    }

    async fn on_intent(&self, _envelope: &RequestEnvelope) -> HandlerResult<SkillResponse> {
        Err(HandlerError::message("intent failure"))
    }
}

fn registration(path: &str, application_id: &str) -> SkillRegistration {
    SkillRegistration::new(
        SkillPath::new(path).expect("path should validate"),
        application_id,
        Arc::new(TellSkill),
    )
}

struct RouterSetup {
    registrations: Vec<SkillRegistration>,
    policy: SecurityPolicy,
    dev: bool,
    metrics: bool,
    validator: Arc<dyn EnvelopeValidator>,
}

impl RouterSetup {
    fn permissive(registrations: Vec<SkillRegistration>) -> Self {
        Self {
            registrations,
            policy: SecurityPolicy::permissive(),
            dev: false,
            metrics: false,
            validator: Arc::new(crate::host::adapters::PolicyEnvelopeValidator::new()),
        }
    }

    fn build(self) -> (Router, Arc<MetricsRegistry>) {
        let registry = Arc::new(MetricsRegistry::new());
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);
        let router = build_router(&RouterSpec {
            registrations: &self.registrations,
            policy: &self.policy,
            features: FeatureConfig::new(self.metrics),
            dev: self.dev,
            registry: &registry,
            validator: &self.validator,
            clock: &clock,
        });
        (router, registry)
    }
}

fn launch_envelope(application_id: &str) -> RequestEnvelope {
    RequestEnvelope::new(
        Session::for_application(application_id),
        SkillRequest::Launch {
            request_id: String::new(),
            timestamp: None,
        },
    )
}

fn post_json(path: &str, envelope: &RequestEnvelope) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(envelope).expect("envelope should serialise"),
        ))
        .expect("request should build")
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("request should build")
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router
        .oneshot(request)
        .await
        .expect("router should produce a response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    (
        status,
        String::from_utf8(bytes.to_vec()).expect("body should be UTF-8"),
    )
}

#[tokio::test]
async fn dispatches_launch_requests_to_the_registered_handler() {
    let (router, _) = RouterSetup::permissive(vec![registration("/skill_a", "app-1")]).build();

    let (status, body) = send(router, post_json("/skill_a", &launch_envelope("app-1"))).await;

    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).expect("body should be JSON");
    assert_eq!(value["response"]["outputSpeech"]["text"], "launched");
    assert_eq!(value["response"]["shouldEndSession"], true);
}

#[tokio::test]
async fn dispatches_intent_requests_and_echoes_session_attributes() {
    let (router, _) = RouterSetup::permissive(vec![registration("/skill_a", "app-1")]).build();
    let mut envelope = RequestEnvelope::new(
        Session::for_application("app-1"),
        SkillRequest::Intent {
            request_id: String::new(),
            timestamp: None,
            intent: Some(Intent::named("GreetIntent")),
        },
    );
    envelope.session.put_attribute_string("name", "Ada");

    let (status, body) = send(router, post_json("/skill_a", &envelope)).await;

    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).expect("body should be JSON");
    assert_eq!(value["response"]["outputSpeech"]["text"], "handled");
    assert_eq!(value["sessionAttributes"]["name"], "Ada");
}

#[tokio::test]
async fn session_notifications_yield_an_empty_envelope() {
    let (router, _) = RouterSetup::permissive(vec![registration("/skill_a", "app-1")]).build();
    let envelope = RequestEnvelope::new(
        Session::for_application("app-1"),
        SkillRequest::SessionStarted {
            request_id: String::new(),
            timestamp: None,
        },
    );

    let (status, body) = send(router, post_json("/skill_a", &envelope)).await;

    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).expect("body should be JSON");
    assert_eq!(value["version"], "1.0");
    assert!(value.get("response").is_none());
}

#[tokio::test]
async fn handler_failure_maps_to_internal_server_error() {
    let mut setup = RouterSetup::permissive(vec![SkillRegistration::new(
        SkillPath::new("/broken").expect("path should validate"),
        "app-1",
        Arc::new(BrokenSkill),
    )]);
    setup.metrics = false;
    let (router, _) = setup.build();

    let (status, _) = send(router, post_json("/broken", &launch_envelope("app-1"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn rejected_envelopes_get_forbidden_with_the_rejection_message() {
    let registrations = vec![registration("/skill_a", "app-1")];
    let mut setup = RouterSetup::permissive(registrations);
    setup.policy = SecurityPolicy::derive(&setup.registrations, false);
    let (router, _) = setup.build();

    let (status, body) = send(router, post_json("/skill_a", &launch_envelope("app-2"))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("app-2"));
}

#[tokio::test]
async fn consults_the_configured_validator() {
    let mut mock = MockEnvelopeValidator::new();
    mock.expect_validate()
        .times(1)
        .returning(|_, _, _| Err(ValidationError::MissingTimestamp));
    let mut setup = RouterSetup::permissive(vec![registration("/skill_a", "app-1")]);
    setup.validator = Arc::new(mock);
    let (router, _) = setup.build();

    let (status, _) = send(router, post_json("/skill_a", &launch_envelope("app-1"))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn dev_mode_serves_the_diagnostic_page() {
    let mut setup = RouterSetup::permissive(vec![registration("/skill_a", "app-1")]);
    setup.dev = true;
    let (router, _) = setup.build();

    let (status, body) = send(router, get(ROOT_PATH)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Aleksa running: "));
    assert!(body.ends_with('\n'));
}

#[tokio::test]
async fn diagnostic_is_absent_outside_dev_mode() {
    let (router, _) = RouterSetup::permissive(vec![registration("/skill_a", "app-1")]).build();

    let (status, _) = send(router, get(ROOT_PATH)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn root_registration_displaces_the_diagnostic_page() {
    let mut setup = RouterSetup::permissive(vec![registration(ROOT_PATH, "app-1")]);
    setup.dev = true;
    let (router, _) = setup.build();

    let (get_status, _) = send(router.clone(), get(ROOT_PATH)).await;
    let (post_status, _) = send(router, post_json(ROOT_PATH, &launch_envelope("app-1"))).await;

    assert_eq!(get_status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(post_status, StatusCode::OK);
}

#[tokio::test]
async fn metrics_endpoint_exposes_decorated_observations() {
    let mut setup = RouterSetup::permissive(vec![
        registration("/a", "app-1"),
        registration("/b", "app-2"),
    ]);
    setup.metrics = true;
    let (router, _) = setup.build();

    for _ in 0..3 {
        let (status, _) = send(router.clone(), post_json("/a", &launch_envelope("app-1"))).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(router.clone(), post_json("/b", &launch_envelope("app-2"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(router, get(METRICS_PATH)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("aleksa_launches_seconds_count{path=\"/a\"} 3"));
    assert!(body.contains("aleksa_launches_seconds_count{path=\"/b\"} 1"));
}

#[tokio::test]
async fn metrics_endpoint_is_absent_when_metrics_are_off() {
    let (router, _) = RouterSetup::permissive(vec![registration("/skill_a", "app-1")]).build();

    let (status, _) = send(router, get(METRICS_PATH)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_path_registration_displaces_the_scrape_endpoint() {
    let mut setup = RouterSetup::permissive(vec![registration(METRICS_PATH, "app-1")]);
    setup.metrics = true;
    let (router, _) = setup.build();

    let (get_status, _) = send(router.clone(), get(METRICS_PATH)).await;
    let (post_status, _) =
        send(router, post_json(METRICS_PATH, &launch_envelope("app-1"))).await;

    assert_eq!(get_status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(post_status, StatusCode::OK);
}

#[tokio::test]
async fn unregistered_paths_are_not_found() {
    let (router, _) = RouterSetup::permissive(vec![registration("/skill_a", "app-1")]).build();

    let (status, _) = send(router, post_json("/other", &launch_envelope("app-1"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
