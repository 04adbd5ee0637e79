//! Concurrent timer registry with Prometheus text exposition.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Prefix applied to every exposed metric name.
const METRIC_NAMESPACE: &str = "aleksa";

/// Identifies one timer series: a metric name plus its label set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetricKey {
    name: String,
    labels: BTreeMap<String, String>,
}

impl MetricKey {
    /// Creates a key with no labels.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
        }
    }

    /// Adds a label to the key.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Returns the metric name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the label set, ordered by label name.
    #[must_use]
    pub const fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }
}

/// Point-in-time view of one timer series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSnapshot {
    /// Number of recorded observations.
    pub count: u64,
    /// Sum of all recorded durations.
    pub total: Duration,
}

#[derive(Debug, Clone, Copy, Default)]
struct TimerAggregate {
    count: u64,
    total: Duration,
}

/// Thread-safe registry of timer aggregates.
///
/// Safe under concurrent recording; observations never corrupt aggregate
/// statistics.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    timers: RwLock<BTreeMap<MetricKey, TimerAggregate>>,
}

impl MetricsRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation of `elapsed` under `key`.
    pub fn record(&self, key: MetricKey, elapsed: Duration) {
        // Aggregates are plain counters; recover them even from a lock
        // poisoned by a panicking recorder.
        let mut timers = self
            .timers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let aggregate = timers.entry(key).or_default();
        aggregate.count += 1;
        aggregate.total += elapsed;
    }

    /// Returns the snapshot for `key`, or `None` when nothing was recorded.
    #[must_use]
    pub fn snapshot(&self, key: &MetricKey) -> Option<TimerSnapshot> {
        let timers = self.timers.read().unwrap_or_else(PoisonError::into_inner);
        timers.get(key).map(|aggregate| TimerSnapshot {
            count: aggregate.count,
            total: aggregate.total,
        })
    }

    /// Renders all timer series in the Prometheus text exposition format.
    ///
    /// Each series contributes `<name>_seconds_count` and
    /// `<name>_seconds_sum` samples; names are namespaced and sanitised.
    #[must_use]
    pub fn render_prometheus(&self) -> String {
        let timers = self.timers.read().unwrap_or_else(PoisonError::into_inner);
        let mut output = String::new();
        let mut last_name: Option<String> = None;

        for (key, aggregate) in timers.iter() {
            let metric = format!("{METRIC_NAMESPACE}_{}_seconds", sanitise_name(key.name()));
            if last_name.as_deref() != Some(metric.as_str()) {
                let _ = writeln!(output, "# TYPE {metric} summary");
                last_name = Some(metric.clone());
            }
            let labels = render_labels(key.labels());
            let _ = writeln!(output, "{metric}_count{labels} {}", aggregate.count);
            let _ = writeln!(
                output,
                "{metric}_sum{labels} {}",
                aggregate.total.as_secs_f64()
            );
        }

        output
    }
}

/// Scoped timer: starts on creation and records on drop.
///
/// Recording on drop guarantees an observation on every exit path of the
/// timed call, including error returns.
#[derive(Debug)]
pub struct TimerGuard {
    registry: Arc<MetricsRegistry>,
    key: Option<MetricKey>,
    started: Instant,
}

impl TimerGuard {
    /// Starts a timer that records into `registry` under `key` when dropped.
    #[must_use]
    pub fn start(registry: Arc<MetricsRegistry>, key: MetricKey) -> Self {
        Self {
            registry,
            key: Some(key),
            started: Instant::now(),
        }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.registry.record(key, self.started.elapsed());
        }
    }
}

fn sanitise_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn render_labels(labels: &BTreeMap<String, String>) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = labels
        .iter()
        .map(|(key, value)| format!("{key}=\"{}\"", escape_label_value(value)))
        .collect();
    format!("{{{}}}", rendered.join(","))
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
