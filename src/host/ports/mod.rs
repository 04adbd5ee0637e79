//! Port contracts for the skill host.

mod validator;

pub use validator::{EnvelopeValidator, ValidationError};

#[cfg(test)]
pub use validator::MockEnvelopeValidator;
