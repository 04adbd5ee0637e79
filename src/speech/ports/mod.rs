//! Port contracts for the speech module.

mod handler;

pub use handler::{HandlerResult, SkillHandler};
