//! Multi-skill host: registration, lifecycle, dispatch, and security policy.
//!
//! A [`SkillHost`] owns an in-memory registration table and a single network
//! listener. Callers register skill handlers against URL paths while the host
//! is stopped, then `start` freezes a registration snapshot, derives the
//! global [`domain::SecurityPolicy`], optionally wraps every handler with the
//! metrics decorator, builds a plain or TLS-terminating connector, and binds
//! the listener. `stop` tears the listener down and clears the table so the
//! host can be restarted with a fresh registration set.
//!
//! # Architecture
//!
//! - **Domain**: Registrations, policy, TLS material, feature flags
//! - **Ports**: The envelope validation seam ([`ports::EnvelopeValidator`])
//! - **Adapters**: Router assembly and dispatch, connector builder, default
//!   policy validator
//! - **Services**: The [`SkillHost`] lifecycle state machine and start
//!   options (including the commandline form)

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

pub use services::lifecycle::{HostError, HostResult, SkillHost};
pub use services::options::StartOptions;

/// Root path served by the dev-mode diagnostic handler.
pub const ROOT_PATH: &str = "/";
/// Path of the metrics scrape endpoint.
pub const METRICS_PATH: &str = "/metrics/prometheus";

#[cfg(test)]
mod tests;
