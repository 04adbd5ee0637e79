//! Unit tests for the host module.
//!
//! Tests cover path and registration validation, policy derivation, start
//! option parsing, the default envelope validator, and router dispatch.

mod dispatch_tests;
mod policy_tests;

use crate::speech::domain::{RequestEnvelope, SkillResponse};
use crate::speech::ports::{HandlerResult, SkillHandler};
use async_trait::async_trait;

/// Handler answering every request with a fixed tell response.
pub(crate) struct TellSkill;

#[async_trait]
impl SkillHandler for TellSkill {
    async fn on_launch(&self, _envelope: &RequestEnvelope) -> HandlerResult<SkillResponse> {
        Ok(SkillResponse::tell("launched"))
    }

    async fn on_intent(&self, _envelope: &RequestEnvelope) -> HandlerResult<SkillResponse> {
        Ok(SkillResponse::tell("handled"))
    }
}
