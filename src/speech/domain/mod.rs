//! Domain types for skill requests and responses.

mod envelope;
mod error;
mod response;

pub mod intents;
pub mod ssml;

pub use envelope::{
    ApplicationRef, ENVELOPE_VERSION, Intent, RequestEnvelope, Session, SkillRequest, Slot,
};
pub use error::HandlerError;
pub use response::{OutputSpeech, Reprompt, ResponseEnvelope, SkillResponse};
