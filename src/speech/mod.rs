//! Skill request and response envelopes for Aleksa.
//!
//! This module owns the dispatch-boundary data model: the JSON request
//! envelope delivered by the voice platform, the tell/ask response envelope
//! written back, speech-markup helpers, and the [`ports::SkillHandler`]
//! contract every registered skill implements.
//!
//! # Architecture
//!
//! - **Domain**: Envelope and response types ([`domain::RequestEnvelope`],
//!   [`domain::SkillResponse`], [`domain::OutputSpeech`]) plus SSML helpers
//! - **Ports**: The handler contract ([`ports::SkillHandler`]) invoked by the
//!   host's dispatcher

pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
