//! Domain types for the skill host.

mod error;
mod features;
mod policy;
mod registration;
mod tls;

pub use error::PathError;
pub use features::FeatureConfig;
pub use policy::{DEFAULT_TIMESTAMP_TOLERANCE_MILLIS, SecurityPolicy};
pub use registration::{SkillPath, SkillRegistration};
pub use tls::TlsConfig;
