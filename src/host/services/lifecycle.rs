//! The skill host lifecycle state machine.

use crate::host::adapters::http::{RouterSpec, build_router};
use crate::host::adapters::tls::{ConnectorError, ConnectorSpec, build_connector};
use crate::host::adapters::validation::PolicyEnvelopeValidator;
use crate::host::domain::{PathError, SecurityPolicy, SkillPath, SkillRegistration};
use crate::host::ports::EnvelopeValidator;
use crate::host::services::options::{ArgumentError, StartOptions};
use crate::metrics::MetricsRegistry;
use crate::speech::ports::SkillHandler;
use axum::Router;
use axum_server::Handle;
use mockable::{Clock, DefaultClock};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Configuration errors surfaced synchronously from lifecycle operations.
///
/// Any failed `start` leaves the host `Stopped` with its registrations
/// intact, so a corrected call can be retried.
#[derive(Debug, Error)]
pub enum HostError {
    /// `start` was called with an empty registration table.
    #[error("no skill handlers registered; register at least one before starting")]
    NoRegistrations,

    /// `start` was called while the host is already running.
    #[error("host is already running on {0}")]
    AlreadyRunning(SocketAddr),

    /// Two registrations share the same path.
    #[error("duplicate registration path: {0}")]
    DuplicatePath(SkillPath),

    /// A registration path failed validation.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The connector could not be built (address resolution, TLS material).
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    /// The listener failed to bind.
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// The underlying listener error.
        source: std::io::Error,
    },

    /// The commandline argument list could not be parsed.
    #[error(transparent)]
    Arguments(#[from] ArgumentError),
}

/// Result type for host lifecycle operations.
pub type HostResult<T> = Result<T, HostError>;

/// State held while the listener is up.
struct RunningServer {
    handle: Handle,
    bound_addr: SocketAddr,
    policy: SecurityPolicy,
    server: JoinHandle<std::io::Result<()>>,
    done: watch::Receiver<bool>,
}

/// Hosts skill handlers behind a single listener.
///
/// Each host instance owns its own registration table and lifecycle state;
/// multiple independent hosts can coexist in one process. The host is
/// designed for a single control-plane caller performing registrations and
/// one `start`; the listener itself serves many concurrent requests.
pub struct SkillHost {
    registrations: Mutex<Vec<SkillRegistration>>,
    running: Mutex<Option<RunningServer>>,
    metrics: Arc<MetricsRegistry>,
    validator: Arc<dyn EnvelopeValidator>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for SkillHost {
    fn default() -> Self {
        Self {
            registrations: Mutex::new(Vec::new()),
            running: Mutex::new(None),
            metrics: Arc::new(MetricsRegistry::new()),
            validator: Arc::new(PolicyEnvelopeValidator::new()),
            clock: Arc::new(DefaultClock),
        }
    }
}

impl SkillHost {
    /// Creates a stopped host with an empty registration table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the envelope validator.
    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn EnvelopeValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    /// Adds a handler registration serving `application_id` under `path`.
    ///
    /// Allowed at any time. Registrations made while the host is running
    /// only take effect at the next `start`; the live dispatcher keeps the
    /// snapshot frozen at the previous start.
    ///
    /// Duplicate paths are accepted here and rejected by `start`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Path`] when `path` is not a valid skill path.
    pub fn register(
        &self,
        path: impl Into<String>,
        application_id: impl Into<String>,
        handler: Arc<dyn SkillHandler>,
    ) -> HostResult<()> {
        let registration =
            SkillRegistration::new(SkillPath::new(path)?, application_id, handler);
        info!(
            path = %registration.path(),
            application_id = registration.application_id(),
            "added skill registration"
        );
        self.lock_registrations().push(registration);
        Ok(())
    }

    /// Starts the host, binding the listener and freezing the registration
    /// snapshot.
    ///
    /// Returns the bound address; with port `0` this carries the ephemeral
    /// port the listener actually bound.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when no registrations exist, the host is
    /// already running, a path is registered twice, the connector cannot be
    /// built, or the listener fails to bind. The host stays `Stopped` in
    /// every failure case.
    pub async fn start(&self, options: StartOptions) -> HostResult<SocketAddr> {
        if let Some(running) = self.lock_running().as_ref() {
            return Err(HostError::AlreadyRunning(running.bound_addr));
        }

        let snapshot: Vec<SkillRegistration> = self.lock_registrations().clone();
        if snapshot.is_empty() {
            return Err(HostError::NoRegistrations);
        }
        let mut seen_paths = BTreeSet::new();
        for registration in &snapshot {
            if !seen_paths.insert(registration.path().clone()) {
                return Err(HostError::DuplicatePath(registration.path().clone()));
            }
        }

        let policy = SecurityPolicy::derive(&snapshot, options.dev());
        let connector = build_connector(options.interface(), options.port(), options.tls()).await?;
        let requested_addr = connector.addr;
        let router = build_router(&RouterSpec {
            registrations: &snapshot,
            policy: &policy,
            features: options.features(),
            dev: options.dev(),
            registry: &self.metrics,
            validator: &self.validator,
            clock: &self.clock,
        });

        let handle = Handle::new();
        let (done_tx, done_rx) = watch::channel(false);
        let server = spawn_listener(connector, router, handle.clone(), done_tx);

        let Some(bound_addr) = handle.listening().await else {
            let source = match server.await {
                Ok(Err(io_err)) => io_err,
                Ok(Ok(())) => std::io::Error::other("listener exited before binding"),
                Err(join_err) => std::io::Error::other(join_err),
            };
            return Err(HostError::Bind {
                addr: requested_addr,
                source,
            });
        };

        {
            let mut running = self.lock_running();
            if let Some(existing) = running.as_ref() {
                // Lost a concurrent start race; roll back our listener.
                handle.shutdown();
                return Err(HostError::AlreadyRunning(existing.bound_addr));
            }
            *running = Some(RunningServer {
                handle,
                bound_addr,
                policy,
                server,
                done: done_rx,
            });
        }

        info!(%bound_addr, dev = options.dev(), "skill host running");
        Ok(bound_addr)
    }

    /// Starts the host from a commandline argument list.
    ///
    /// Accepts `--interface`, `--port`, `--dev`, `--keystore`,
    /// `--keystore-password`, `--key-password`, `--key-alias`, `--metrics`
    /// and `--help`. Returns `Ok(None)` when `--help` was requested: usage
    /// is printed and no start is performed.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Arguments`] for unparsable arguments, otherwise
    /// any error `start` can return.
    pub async fn start_from_args<I, T>(&self, args: I) -> HostResult<Option<SocketAddr>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        match StartOptions::from_args(args)? {
            Some(options) => Ok(Some(self.start(options).await?)),
            None => Ok(None),
        }
    }

    /// Stops the host: halts the listener and clears the registration table.
    ///
    /// No-op when already stopped; unconditionally safe to call repeatedly.
    pub async fn stop(&self) {
        let Some(running) = self.lock_running().take() else {
            return;
        };

        running.handle.shutdown();
        match running.server.await {
            Ok(Ok(())) | Ok(Err(_)) => {}
            Err(join_err) => error!(error = %join_err, "listener task failed during stop"),
        }
        self.lock_registrations().clear();
        info!("skill host stopped");
    }

    /// Blocks until a concurrent `stop` completes.
    ///
    /// Returns immediately when the host is stopped. Wakes promptly when the
    /// listener finishes; no polling is involved.
    pub async fn join(&self) {
        let done = self
            .lock_running()
            .as_ref()
            .map(|running| running.done.clone());
        let Some(mut done) = done else {
            return;
        };
        if *done.borrow() {
            return;
        }
        // Wakes on the completion signal or when the listener task drops
        // the sender.
        done.changed().await.ok();
    }

    /// Returns true while the listener is up.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock_running().is_some()
    }

    /// Returns the bound listener address while running.
    #[must_use]
    pub fn bound_addr(&self) -> Option<SocketAddr> {
        self.lock_running().as_ref().map(|running| running.bound_addr)
    }

    /// Returns the security policy of the current run, when running.
    #[must_use]
    pub fn security_policy(&self) -> Option<SecurityPolicy> {
        self.lock_running()
            .as_ref()
            .map(|running| running.policy.clone())
    }

    /// Returns the metrics registry fed by decorated handlers.
    #[must_use]
    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    // Lifecycle state is plain data; recover it even from a lock poisoned
    // by a panicking task.
    fn lock_registrations(&self) -> std::sync::MutexGuard<'_, Vec<SkillRegistration>> {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_running(&self) -> std::sync::MutexGuard<'_, Option<RunningServer>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs the listener to completion on a background task, signalling `done`
/// when it exits.
fn spawn_listener(
    connector: ConnectorSpec,
    router: Router,
    handle: Handle,
    done: watch::Sender<bool>,
) -> JoinHandle<std::io::Result<()>> {
    tokio::spawn(async move {
        let service = router.into_make_service();
        let result = match connector.tls {
            Some(tls) => {
                axum_server::bind_rustls(connector.addr, tls)
                    .handle(handle)
                    .serve(service)
                    .await
            }
            None => {
                axum_server::bind(connector.addr)
                    .handle(handle)
                    .serve(service)
                    .await
            }
        };
        if let Err(err) = &result {
            error!(error = %err, "listener terminated abnormally");
        }
        done.send(true).ok();
        result
    })
}
