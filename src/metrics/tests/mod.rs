//! Unit tests for the metrics module.
//!
//! Tests cover the timer registry, Prometheus rendering, and the
//! transparent handler decorator.
