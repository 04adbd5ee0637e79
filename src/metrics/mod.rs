//! Call-count and latency instrumentation for skill handlers.
//!
//! [`registry::MetricsRegistry`] aggregates wall-clock timers keyed by metric
//! name and labels and renders them in the Prometheus text exposition format.
//! [`decorator::MetricsHandler`] transparently wraps a
//! [`crate::speech::ports::SkillHandler`], recording a timer observation for
//! every dispatched call without changing the handler's contract.

pub mod decorator;
pub mod registry;

pub use decorator::MetricsHandler;
pub use registry::{MetricKey, MetricsRegistry, TimerGuard, TimerSnapshot};

#[cfg(test)]
mod tests;
