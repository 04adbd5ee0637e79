//! TLS material configuration.

use std::path::{Path, PathBuf};

/// TLS keystore configuration for the listener connector.
///
/// Absence of a `TlsConfig` means a plaintext listener. The keystore is a
/// PKCS#12 archive on disk; the key password defaults to the keystore
/// password, and the key alias selects a key pair when the archive holds
/// more than one (a key is chosen automatically when unset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    keystore: PathBuf,
    keystore_password: String,
    key_password: Option<String>,
    key_alias: Option<String>,
}

impl TlsConfig {
    /// Creates a TLS configuration for the given keystore.
    #[must_use]
    pub fn new(keystore: impl Into<PathBuf>, keystore_password: impl Into<String>) -> Self {
        Self {
            keystore: keystore.into(),
            keystore_password: keystore_password.into(),
            key_password: None,
            key_alias: None,
        }
    }

    /// Sets a key password distinct from the keystore password.
    #[must_use]
    pub fn with_key_password(mut self, key_password: impl Into<String>) -> Self {
        self.key_password = Some(key_password.into());
        self
    }

    /// Selects the key pair with the given alias.
    #[must_use]
    pub fn with_key_alias(mut self, key_alias: impl Into<String>) -> Self {
        self.key_alias = Some(key_alias.into());
        self
    }

    /// Returns the keystore location.
    #[must_use]
    pub fn keystore(&self) -> &Path {
        &self.keystore
    }

    /// Returns the keystore password.
    #[must_use]
    pub fn keystore_password(&self) -> &str {
        &self.keystore_password
    }

    /// Returns the key password, defaulting to the keystore password.
    #[must_use]
    pub fn key_password(&self) -> &str {
        self.key_password
            .as_deref()
            .unwrap_or(&self.keystore_password)
    }

    /// Returns the key alias, when one was configured.
    #[must_use]
    pub fn key_alias(&self) -> Option<&str> {
        self.key_alias.as_deref()
    }
}
