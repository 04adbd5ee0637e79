//! Listener connector builder.
//!
//! Resolves the bind address and, when TLS material is supplied, loads the
//! PKCS#12 keystore into a rustls server configuration. All certificate and
//! key material errors surface here, at build time, not on first connection.

use crate::host::domain::TlsConfig;
use axum_server::tls_rustls::RustlsConfig;
use p12_keystore::{KeyStore, KeyStoreEntry};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the listener connector.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The interface/port pair could not be resolved.
    #[error("failed to resolve listener address {interface}:{port}: {source}")]
    Resolve {
        /// The interface that failed to resolve.
        interface: String,
        /// The requested port.
        port: u16,
        /// The underlying resolution error.
        source: std::io::Error,
    },

    /// Resolution succeeded but produced no socket address.
    #[error("listener address {interface}:{port} did not resolve to any socket address")]
    NoAddress {
        /// The interface that resolved to nothing.
        interface: String,
        /// The requested port.
        port: u16,
    },

    /// The keystore file could not be read.
    #[error("failed to read TLS keystore {path}: {source}")]
    KeystoreRead {
        /// The keystore location.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The keystore could not be parsed or unlocked.
    #[error("failed to open TLS keystore {path}: {source}")]
    KeystoreOpen {
        /// The keystore location.
        path: PathBuf,
        /// The underlying keystore error.
        source: p12_keystore::error::Error,
    },

    /// No entry matches the configured key alias.
    #[error("TLS key alias '{0}' not found in keystore")]
    AliasNotFound(String),

    /// The keystore holds no private key entry to select automatically.
    #[error("keystore {0} contains no private key entry")]
    NoPrivateKey(PathBuf),

    /// The extracted material was rejected by the TLS layer.
    #[error("failed to assemble TLS configuration: {0}")]
    Tls(std::io::Error),
}

/// Listener configuration produced by [`build_connector`].
#[derive(Debug, Clone)]
pub(crate) struct ConnectorSpec {
    /// The resolved bind address.
    pub(crate) addr: SocketAddr,
    /// TLS termination material; `None` means a plaintext listener.
    pub(crate) tls: Option<RustlsConfig>,
}

/// Builds the listener configuration for `interface:port`.
///
/// Without TLS material this yields a plaintext connector. With TLS material
/// the keystore is loaded and unlocked and the selected key pair becomes the
/// listener's server certificate.
pub(crate) async fn build_connector(
    interface: &str,
    port: u16,
    tls: Option<&TlsConfig>,
) -> Result<ConnectorSpec, ConnectorError> {
    let addr = resolve_address(interface, port)?;
    let tls = match tls {
        None => None,
        Some(config) => Some(load_rustls_config(config).await?),
    };
    Ok(ConnectorSpec { addr, tls })
}

fn resolve_address(interface: &str, port: u16) -> Result<SocketAddr, ConnectorError> {
    (interface, port)
        .to_socket_addrs()
        .map_err(|source| ConnectorError::Resolve {
            interface: interface.to_owned(),
            port,
            source,
        })?
        .next()
        .ok_or_else(|| ConnectorError::NoAddress {
            interface: interface.to_owned(),
            port,
        })
}

async fn load_rustls_config(config: &TlsConfig) -> Result<RustlsConfig, ConnectorError> {
    let path = config.keystore().to_path_buf();
    let bytes = std::fs::read(&path).map_err(|source| ConnectorError::KeystoreRead {
        path: path.clone(),
        source,
    })?;

    // PKCS#12 archives carry one password; try the keystore password first
    // and fall back to a distinct key password when one was supplied.
    let keystore = match KeyStore::from_pkcs12(&bytes, config.keystore_password()) {
        Ok(keystore) => keystore,
        Err(source) if config.key_password() != config.keystore_password() => {
            KeyStore::from_pkcs12(&bytes, config.key_password()).map_err(|_| {
                ConnectorError::KeystoreOpen {
                    path: path.clone(),
                    source,
                }
            })?
        }
        Err(source) => {
            return Err(ConnectorError::KeystoreOpen {
                path: path.clone(),
                source,
            });
        }
    };

    let chain = select_key_chain(&keystore, config.key_alias())
        .ok_or_else(|| match config.key_alias() {
            Some(alias) => ConnectorError::AliasNotFound(alias.to_owned()),
            None => ConnectorError::NoPrivateKey(path.clone()),
        })?;

    let certificates: Vec<Vec<u8>> = chain
        .chain()
        .iter()
        .map(|certificate| certificate.as_der().to_vec())
        .collect();
    let key = chain.key().to_vec();

    RustlsConfig::from_der(certificates, key)
        .await
        .map_err(ConnectorError::Tls)
}

/// Selects the key pair by alias, or the first private key entry when no
/// alias was configured.
fn select_key_chain<'a>(
    keystore: &'a KeyStore,
    alias: Option<&str>,
) -> Option<&'a p12_keystore::PrivateKeyChain> {
    keystore.entries().find_map(|(entry_alias, entry)| {
        let matches_alias = alias.is_none_or(|wanted| entry_alias.as_str() == wanted);
        match entry {
            KeyStoreEntry::PrivateKeyChain(chain) if matches_alias => Some(chain),
            _ => None,
        }
    })
}
