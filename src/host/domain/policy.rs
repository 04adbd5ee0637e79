//! Security policy derived once per start call.

use super::SkillRegistration;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Timestamp tolerance applied in strict validation mode, in milliseconds.
pub const DEFAULT_TIMESTAMP_TOLERANCE_MILLIS: u64 = 150;

/// Atomic security-policy value derived from a registration snapshot.
///
/// Dev mode disables strict validation, zeroes the timestamp tolerance, and
/// empties the allow-list (any application id is accepted). Non-dev mode
/// enables strict validation with the default tolerance and an allow-list of
/// exactly the snapshot's application ids. The policy is immutable for the
/// duration of one run; a new start call recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityPolicy {
    strict_validation: bool,
    timestamp_tolerance_millis: u64,
    allowed_application_ids: BTreeSet<String>,
}

impl SecurityPolicy {
    /// Derives the policy from a registration snapshot and the dev-mode flag.
    #[must_use]
    pub fn derive(registrations: &[SkillRegistration], dev: bool) -> Self {
        if dev {
            return Self::permissive();
        }

        Self {
            strict_validation: true,
            timestamp_tolerance_millis: DEFAULT_TIMESTAMP_TOLERANCE_MILLIS,
            allowed_application_ids: registrations
                .iter()
                .map(|registration| registration.application_id().to_owned())
                .collect(),
        }
    }

    /// Returns the permissive dev-mode policy.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            strict_validation: false,
            timestamp_tolerance_millis: 0,
            allowed_application_ids: BTreeSet::new(),
        }
    }

    /// Returns true when strict validation is enabled.
    #[must_use]
    pub const fn strict_validation(&self) -> bool {
        self.strict_validation
    }

    /// Returns the timestamp tolerance in milliseconds.
    #[must_use]
    pub const fn timestamp_tolerance_millis(&self) -> u64 {
        self.timestamp_tolerance_millis
    }

    /// Returns the timestamp tolerance as a [`Duration`].
    #[must_use]
    pub const fn timestamp_tolerance(&self) -> Duration {
        Duration::from_millis(self.timestamp_tolerance_millis)
    }

    /// Returns the application ids accepted under this policy.
    #[must_use]
    pub const fn allowed_application_ids(&self) -> &BTreeSet<String> {
        &self.allowed_application_ids
    }

    /// Returns true when `application_id` is accepted under this policy.
    ///
    /// An empty allow-list accepts any application id.
    #[must_use]
    pub fn allows_application(&self, application_id: &str) -> bool {
        self.allowed_application_ids.is_empty()
            || self.allowed_application_ids.contains(application_id)
    }

    /// Returns the allow-list in its comma-joined external form.
    #[must_use]
    pub fn allowed_ids_joined(&self) -> String {
        self.allowed_application_ids
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
