//! Envelope validation seam.
//!
//! Request authenticity checking (signatures, timestamp skew, application-id
//! verification) is owned by an external validation layer. This port is its
//! boundary: the dispatcher hands every inbound envelope, the policy derived
//! at start time, and the receive time to the configured validator before
//! invoking the handler.

use crate::host::domain::SecurityPolicy;
use crate::speech::domain::RequestEnvelope;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Rejections produced by envelope validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The envelope's application id is not on the policy allow-list.
    #[error("application id '{0}' is not on the allow-list")]
    UnknownApplication(String),

    /// The request timestamp is outside the policy tolerance.
    #[error("request timestamp {timestamp} is outside the {tolerance_millis} ms tolerance")]
    StaleTimestamp {
        /// The rejected request timestamp.
        timestamp: DateTime<Utc>,
        /// The tolerance the policy applied, in milliseconds.
        tolerance_millis: u64,
    },

    /// Strict validation requires a timestamp and the request carried none.
    #[error("request carries no timestamp")]
    MissingTimestamp,
}

/// Validates inbound envelopes against the active security policy.
#[cfg_attr(test, mockall::automock)]
pub trait EnvelopeValidator: Send + Sync {
    /// Checks `envelope` against `policy`.
    ///
    /// `received_at` is the dispatcher's receive time, used for timestamp
    /// skew checks.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the envelope must be rejected.
    fn validate(
        &self,
        envelope: &RequestEnvelope,
        policy: &SecurityPolicy,
        received_at: DateTime<Utc>,
    ) -> Result<(), ValidationError>;
}
