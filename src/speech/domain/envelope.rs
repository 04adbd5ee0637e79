//! Request envelope delivered at the dispatch boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Envelope schema version produced and consumed by the host.
pub const ENVELOPE_VERSION: &str = "1.0";

/// Inbound request envelope.
///
/// Carries the session key-value store and one of the four request kinds the
/// dispatcher routes to a [`crate::speech::ports::SkillHandler`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Envelope schema version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Session state shared across the requests of one conversation.
    pub session: Session,
    /// The request payload.
    pub request: SkillRequest,
}

fn default_version() -> String {
    ENVELOPE_VERSION.to_owned()
}

impl RequestEnvelope {
    /// Creates an envelope for the given session and request.
    #[must_use]
    pub fn new(session: Session, request: SkillRequest) -> Self {
        Self {
            version: default_version(),
            session,
            request,
        }
    }

    /// Returns the application id the envelope was addressed to.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.session.application.application_id
    }
}

/// Session state: identifier, owning application, and attribute store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Platform-assigned session identifier.
    #[serde(default)]
    pub session_id: String,
    /// The application this session belongs to.
    pub application: ApplicationRef,
    /// Free-form attributes persisted across the session's requests.
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    /// Whether this is the first request of the session.
    #[serde(default, rename = "new")]
    pub is_new: bool,
}

impl Session {
    /// Creates a fresh session for the given application id.
    #[must_use]
    pub fn for_application(application_id: impl Into<String>) -> Self {
        Self {
            session_id: String::new(),
            application: ApplicationRef {
                application_id: application_id.into(),
            },
            attributes: HashMap::new(),
            is_new: true,
        }
    }

    /// Reads the string attribute stored under `key`.
    ///
    /// Returns `None` when the key is absent or the value is not a string.
    #[must_use]
    pub fn attribute_string(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Stores `value` under `key`, overwriting any existing value.
    pub fn put_attribute_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), Value::String(value.into()));
    }

    /// Removes the attribute stored under `key`, if any.
    pub fn remove_attribute(&mut self, key: &str) {
        self.attributes.remove(key);
    }
}

/// Reference to the application a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRef {
    /// Opaque application identifier, matched against the host's allow-list.
    pub application_id: String,
}

/// The four request kinds routed by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SkillRequest {
    /// Bare launch event; expects a response.
    #[serde(rename = "LaunchRequest", rename_all = "camelCase")]
    Launch {
        /// Platform-assigned request identifier.
        #[serde(default)]
        request_id: String,
        /// Time the platform issued the request.
        timestamp: Option<DateTime<Utc>>,
    },
    /// Named-intent event; expects a response.
    #[serde(rename = "IntentRequest", rename_all = "camelCase")]
    Intent {
        /// Platform-assigned request identifier.
        #[serde(default)]
        request_id: String,
        /// Time the platform issued the request.
        timestamp: Option<DateTime<Utc>>,
        /// The resolved intent; absent on malformed requests.
        intent: Option<Intent>,
    },
    /// Session-start notification; no response expected.
    #[serde(rename = "SessionStartedRequest", rename_all = "camelCase")]
    SessionStarted {
        /// Platform-assigned request identifier.
        #[serde(default)]
        request_id: String,
        /// Time the platform issued the request.
        timestamp: Option<DateTime<Utc>>,
    },
    /// Session-end notification; no response expected.
    #[serde(rename = "SessionEndedRequest", rename_all = "camelCase")]
    SessionEnded {
        /// Platform-assigned request identifier.
        #[serde(default)]
        request_id: String,
        /// Time the platform issued the request.
        timestamp: Option<DateTime<Utc>>,
        /// Why the platform ended the session.
        reason: Option<String>,
    },
}

impl SkillRequest {
    /// Returns the request timestamp, when the platform supplied one.
    #[must_use]
    pub const fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Launch { timestamp, .. }
            | Self::Intent { timestamp, .. }
            | Self::SessionStarted { timestamp, .. }
            | Self::SessionEnded { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the intent for intent requests that carry one.
    #[must_use]
    pub const fn intent(&self) -> Option<&Intent> {
        match self {
            Self::Intent {
                intent: Some(intent),
                ..
            } => Some(intent),
            _ => None,
        }
    }
}

/// A named intent with its slot values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Intent name, e.g. `AMAZON.HelpIntent`.
    pub name: String,
    /// Slots keyed by slot name.
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Creates an intent with no slots.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: HashMap::new(),
        }
    }

    /// Extracts the value of the slot with the given name.
    ///
    /// Returns `None` when the slot is absent or has no value.
    #[must_use]
    pub fn slot_value(&self, slot_name: &str) -> Option<&str> {
        self.slots
            .get(slot_name)
            .and_then(|slot| slot.value.as_deref())
    }
}

/// A single slot of an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Slot name.
    pub name: String,
    /// Resolved slot value; absent when the utterance left it unfilled.
    pub value: Option<String>,
}
