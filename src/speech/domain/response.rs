//! Tell/ask response envelope written back through the dispatcher.

use super::envelope::ENVELOPE_VERSION;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Root tag that marks speech content as SSML markup.
const SSML_ROOT_TAG: &str = "<speak>";

/// Speech content, either plain text or SSML markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    /// Plain text spoken verbatim.
    #[serde(rename = "PlainText", rename_all = "camelCase")]
    PlainText {
        /// The text to speak.
        text: String,
    },
    /// SSML markup interpreted by the speech synthesiser.
    #[serde(rename = "SSML")]
    Ssml {
        /// The SSML document, including the `<speak>` root element.
        ssml: String,
    },
}

impl OutputSpeech {
    /// Creates output speech from the given text, auto-detecting SSML.
    ///
    /// Content is treated as SSML if and only if it begins with the
    /// `<speak>` root tag.
    #[must_use]
    pub fn auto(text: impl Into<String>) -> Self {
        let content = text.into();
        if content.starts_with(SSML_ROOT_TAG) {
            Self::Ssml { ssml: content }
        } else {
            Self::PlainText { text: content }
        }
    }

    /// Creates plain text output speech.
    #[must_use]
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    /// Creates SSML output speech.
    #[must_use]
    pub fn ssml(ssml: impl Into<String>) -> Self {
        Self::Ssml { ssml: ssml.into() }
    }

    /// Returns the rendered speech content regardless of kind.
    #[must_use]
    pub fn rendered(&self) -> &str {
        match self {
            Self::PlainText { text } => text,
            Self::Ssml { ssml } => ssml,
        }
    }
}

/// Reprompt spoken when an ask response receives no follow-up utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    /// The reprompt speech.
    pub output_speech: OutputSpeech,
}

/// Response returned by launch and intent dispatch.
///
/// A *tell* response ends the session; an *ask* response keeps it open and
/// carries a reprompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    reprompt: Option<Reprompt>,
    should_end_session: bool,
}

impl SkillResponse {
    /// Creates a tell response: terminal, no further input expected.
    ///
    /// SSML is auto-detected.
    #[must_use]
    pub fn tell(text: impl Into<String>) -> Self {
        Self {
            output_speech: OutputSpeech::auto(text),
            reprompt: None,
            should_end_session: true,
        }
    }

    /// Creates an ask response reusing the question as its own reprompt.
    ///
    /// SSML is auto-detected for both renderings.
    #[must_use]
    pub fn ask(question: impl Into<String>) -> Self {
        let question_text = question.into();
        Self::ask_with_reprompt(question_text.clone(), question_text)
    }

    /// Creates an ask response with a distinct reprompt.
    ///
    /// SSML is auto-detected independently for question and reprompt.
    #[must_use]
    pub fn ask_with_reprompt(question: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Self {
            output_speech: OutputSpeech::auto(question),
            reprompt: Some(Reprompt {
                output_speech: OutputSpeech::auto(reprompt),
            }),
            should_end_session: false,
        }
    }

    /// Returns the response speech.
    #[must_use]
    pub const fn output_speech(&self) -> &OutputSpeech {
        &self.output_speech
    }

    /// Returns the reprompt, present only on ask responses.
    #[must_use]
    pub const fn reprompt(&self) -> Option<&Reprompt> {
        self.reprompt.as_ref()
    }

    /// Returns true when the response ends the session.
    #[must_use]
    pub const fn should_end_session(&self) -> bool {
        self.should_end_session
    }
}

/// Outbound response envelope serialised by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Envelope schema version.
    pub version: String,
    /// Session attributes echoed back to the platform.
    #[serde(default)]
    pub session_attributes: HashMap<String, Value>,
    /// The response; absent for notification-only requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<SkillResponse>,
}

impl ResponseEnvelope {
    /// Wraps a skill response with the given session attributes.
    #[must_use]
    pub fn new(response: SkillResponse, session_attributes: HashMap<String, Value>) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_owned(),
            session_attributes,
            response: Some(response),
        }
    }

    /// Creates an empty envelope for notification-only requests.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: ENVELOPE_VERSION.to_owned(),
            session_attributes: HashMap::new(),
            response: None,
        }
    }
}
