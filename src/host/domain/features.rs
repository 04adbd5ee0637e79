//! Optional host features.

/// Feature toggles evaluated once at start time.
///
/// Orthogonal to TLS material and dev mode. Toggling after start has no
/// effect until the next start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureConfig {
    /// Collect handler metrics and expose the scrape endpoint.
    pub metrics: bool,
}

impl FeatureConfig {
    /// Creates a feature configuration.
    #[must_use]
    pub const fn new(metrics: bool) -> Self {
        Self { metrics }
    }
}
