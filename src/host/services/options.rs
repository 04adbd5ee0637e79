//! Start options and their commandline form.

use crate::host::domain::{FeatureConfig, TlsConfig};
use clap::Parser;
use clap::error::ErrorKind;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Default interface to bind to.
pub const DEFAULT_INTERFACE: &str = "0.0.0.0";
/// Default port to bind to.
pub const DEFAULT_PORT: u16 = 8080;

/// The commandline arguments could not be parsed.
#[derive(Debug, Error)]
#[error("invalid commandline arguments: {0}")]
pub struct ArgumentError(String);

/// Options for one start call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOptions {
    interface: String,
    port: u16,
    dev: bool,
    tls: Option<TlsConfig>,
    features: FeatureConfig,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            interface: DEFAULT_INTERFACE.to_owned(),
            port: DEFAULT_PORT,
            dev: false,
            tls: None,
            features: FeatureConfig::default(),
        }
    }
}

impl StartOptions {
    /// Creates options with all defaults: `0.0.0.0:8080`, dev mode off,
    /// plaintext listener, metrics off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interface to bind to.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    /// Sets the port to bind to. Port `0` requests an ephemeral port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables or disables dev mode.
    #[must_use]
    pub const fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    /// Supplies TLS material; the listener terminates TLS.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Replaces the feature configuration.
    #[must_use]
    pub const fn with_features(mut self, features: FeatureConfig) -> Self {
        self.features = features;
        self
    }

    /// Enables or disables metrics collection.
    #[must_use]
    pub const fn with_metrics(mut self, metrics: bool) -> Self {
        self.features.metrics = metrics;
        self
    }

    /// Returns the interface to bind to.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Returns the port to bind to.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether dev mode is enabled.
    #[must_use]
    pub const fn dev(&self) -> bool {
        self.dev
    }

    /// Returns the TLS material, when configured.
    #[must_use]
    pub const fn tls(&self) -> Option<&TlsConfig> {
        self.tls.as_ref()
    }

    /// Returns the feature configuration.
    #[must_use]
    pub const fn features(&self) -> FeatureConfig {
        self.features
    }

    /// Parses start options from a commandline argument list.
    ///
    /// The list carries only the flags, without a leading program name.
    /// Returns `Ok(None)` when `--help` was requested: usage is printed and
    /// no start should be performed.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the arguments cannot be parsed.
    pub fn from_args<I, T>(args: I) -> Result<Option<Self>, ArgumentError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = std::iter::once(OsString::from("aleksa"))
            .chain(args.into_iter().map(Into::into));
        let parsed = match HostArgs::try_parse_from(argv) {
            Ok(parsed) => parsed,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                err.print()
                    .map_err(|print_err| ArgumentError(print_err.to_string()))?;
                return Ok(None);
            }
            Err(err) => return Err(ArgumentError(err.to_string())),
        };

        let HostArgs {
            interface,
            port,
            dev,
            keystore,
            keystore_password,
            key_password,
            key_alias,
            metrics,
        } = parsed;

        let tls = keystore.map(|keystore_path| {
            let mut config = TlsConfig::new(keystore_path, keystore_password);
            if let Some(password) = key_password {
                config = config.with_key_password(password);
            }
            if let Some(alias) = key_alias {
                config = config.with_key_alias(alias);
            }
            config
        });

        Ok(Some(Self {
            interface,
            port,
            dev,
            tls,
            features: FeatureConfig::new(metrics),
        }))
    }
}

/// Commandline flags accepted by the argument-list start form.
#[derive(Parser, Debug)]
#[command(name = "aleksa", about = "Multi-skill voice assistant host")]
struct HostArgs {
    /// Interface to bind to.
    #[arg(short = 'i', long, default_value = DEFAULT_INTERFACE)]
    interface: String,

    /// Port to bind to.
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Enable development mode.
    #[arg(short = 'd', long)]
    dev: bool,

    /// Location of the TLS keystore.
    #[arg(long, value_name = "PATH")]
    keystore: Option<PathBuf>,

    /// TLS keystore password.
    #[arg(long, default_value = "", hide_default_value = true)]
    keystore_password: String,

    /// TLS key password. If not set, the keystore password will be used.
    #[arg(long)]
    key_password: Option<String>,

    /// TLS key alias. If not set, a key will be automatically selected.
    #[arg(long)]
    key_alias: Option<String>,

    /// Enable metrics.
    #[arg(short = 'm', long)]
    metrics: bool,
}
