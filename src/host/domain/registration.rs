//! Skill registrations and their validated paths.

use super::PathError;
use crate::speech::ports::SkillHandler;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Validated URL path a skill handler is registered under.
///
/// Paths route each inbound request to exactly one handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SkillPath(String);

impl SkillPath {
    /// Creates a validated skill path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] when the value is empty,
    /// [`PathError::MissingLeadingSlash`] when it does not start with `/`, or
    /// [`PathError::ContainsWhitespace`] when it contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, PathError> {
        let path = value.into();

        if path.is_empty() {
            return Err(PathError::Empty);
        }

        if !path.starts_with('/') {
            return Err(PathError::MissingLeadingSlash(path));
        }

        if path.chars().any(char::is_whitespace) {
            return Err(PathError::ContainsWhitespace(path));
        }

        Ok(Self(path))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SkillPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SkillPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the registration table: a path, the application id it serves,
/// and the handler reference.
///
/// The application id is opaque to the host; it only feeds the security
/// policy allow-list. Registrations live until the host is stopped.
#[derive(Clone)]
pub struct SkillRegistration {
    path: SkillPath,
    application_id: String,
    handler: Arc<dyn SkillHandler>,
}

impl SkillRegistration {
    /// Creates a registration.
    #[must_use]
    pub fn new(
        path: SkillPath,
        application_id: impl Into<String>,
        handler: Arc<dyn SkillHandler>,
    ) -> Self {
        Self {
            path,
            application_id: application_id.into(),
            handler,
        }
    }

    /// Returns the registration path.
    #[must_use]
    pub const fn path(&self) -> &SkillPath {
        &self.path
    }

    /// Returns the application id.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Returns the registered handler.
    #[must_use]
    pub fn handler(&self) -> Arc<dyn SkillHandler> {
        Arc::clone(&self.handler)
    }
}

impl fmt::Debug for SkillRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillRegistration")
            .field("path", &self.path)
            .field("application_id", &self.application_id)
            .finish_non_exhaustive()
    }
}
