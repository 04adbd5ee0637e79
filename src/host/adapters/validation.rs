//! Default policy-driven envelope validator.

use crate::host::domain::SecurityPolicy;
use crate::host::ports::{EnvelopeValidator, ValidationError};
use crate::speech::domain::RequestEnvelope;
use chrono::{DateTime, Utc};

/// Enforces the application-id allow-list and timestamp tolerance of the
/// active [`SecurityPolicy`].
///
/// When the policy disables strict validation every envelope passes.
/// Cryptographic signature verification is outside this adapter; deployments
/// needing it supply their own [`EnvelopeValidator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyEnvelopeValidator;

impl PolicyEnvelopeValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EnvelopeValidator for PolicyEnvelopeValidator {
    fn validate(
        &self,
        envelope: &RequestEnvelope,
        policy: &SecurityPolicy,
        received_at: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if !policy.strict_validation() {
            return Ok(());
        }

        let application_id = envelope.application_id();
        if !policy.allows_application(application_id) {
            return Err(ValidationError::UnknownApplication(
                application_id.to_owned(),
            ));
        }

        let Some(timestamp) = envelope.request.timestamp() else {
            return Err(ValidationError::MissingTimestamp);
        };

        let skew = received_at
            .signed_duration_since(timestamp)
            .abs()
            .num_milliseconds()
            .unsigned_abs();
        if skew > policy.timestamp_tolerance_millis() {
            return Err(ValidationError::StaleTimestamp {
                timestamp,
                tolerance_millis: policy.timestamp_tolerance_millis(),
            });
        }

        Ok(())
    }
}
