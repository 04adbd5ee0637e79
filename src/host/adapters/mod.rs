//! Adapter implementations for the skill host.

pub mod http;
pub mod tls;
pub mod validation;

pub use tls::ConnectorError;
pub use validation::PolicyEnvelopeValidator;
