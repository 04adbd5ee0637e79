//! Orchestration services for the skill host.

pub mod lifecycle;
pub mod options;
