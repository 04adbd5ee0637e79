//! Aleksa: a multi-skill voice assistant host.
//!
//! This crate hosts independent skill request handlers (launch events,
//! named intents, session lifecycle notifications) behind a single network
//! listener, routing inbound requests to the correct handler by URL path,
//! optionally terminating TLS, and optionally wrapping every handler with
//! latency and count instrumentation exposed in Prometheus text format.
//!
//! # Architecture
//!
//! Aleksa follows hexagonal architecture principles:
//!
//! - **Domain**: Pure data types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, TLS, validation)
//!
//! # Modules
//!
//! - [`speech`]: Request/response envelopes and the skill handler contract
//! - [`metrics`]: Timer registry and the transparent metrics decorator
//! - [`host`]: Registration, lifecycle, dispatch, and security policy
//!
//! # Example
//!
//! ```no_run
//! use aleksa::host::{SkillHost, StartOptions};
//! use aleksa::speech::domain::{RequestEnvelope, SkillResponse};
//! use aleksa::speech::ports::{HandlerResult, SkillHandler};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct HelloSkill;
//!
//! #[async_trait]
//! impl SkillHandler for HelloSkill {
//!     async fn on_launch(&self, _envelope: &RequestEnvelope) -> HandlerResult<SkillResponse> {
//!         Ok(SkillResponse::ask("What do you want to know?"))
//!     }
//!
//!     async fn on_intent(&self, _envelope: &RequestEnvelope) -> HandlerResult<SkillResponse> {
//!         Ok(SkillResponse::tell("Hello world"))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), aleksa::host::HostError> {
//!     let host = SkillHost::new();
//!     host.register("/hello", "amzn1.ask.skill.example", Arc::new(HelloSkill))?;
//!     host.start(StartOptions::new()).await?;
//!     host.join().await;
//!     Ok(())
//! }
//! ```

pub mod host;
pub mod metrics;
pub mod speech;
