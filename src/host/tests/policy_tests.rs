//! Unit tests for security policy derivation.

use super::TellSkill;
use crate::host::domain::{
    DEFAULT_TIMESTAMP_TOLERANCE_MILLIS, SecurityPolicy, SkillPath, SkillRegistration,
};
use std::sync::Arc;
use std::time::Duration;

fn registration(path: &str, application_id: &str) -> SkillRegistration {
    SkillRegistration::new(
        SkillPath::new(path).expect("path should validate"),
        application_id,
        Arc::new(TellSkill),
    )
}

#[test]
fn non_dev_policy_is_strict_with_the_snapshot_allow_list() {
    let registrations = vec![registration("/a", "app-1"), registration("/b", "app-2")];

    let policy = SecurityPolicy::derive(&registrations, false);

    assert!(policy.strict_validation());
    assert_eq!(
        policy.timestamp_tolerance_millis(),
        DEFAULT_TIMESTAMP_TOLERANCE_MILLIS
    );
    assert_eq!(
        policy.timestamp_tolerance(),
        Duration::from_millis(DEFAULT_TIMESTAMP_TOLERANCE_MILLIS)
    );
    assert!(policy.allows_application("app-1"));
    assert!(policy.allows_application("app-2"));
    assert!(!policy.allows_application("app-3"));
}

#[test]
fn dev_policy_is_permissive() {
    let registrations = vec![registration("/a", "app-1")];

    let policy = SecurityPolicy::derive(&registrations, true);

    assert_eq!(policy, SecurityPolicy::permissive());
    assert!(!policy.strict_validation());
    assert_eq!(policy.timestamp_tolerance_millis(), 0);
    assert!(policy.allowed_application_ids().is_empty());
    assert!(policy.allows_application("anything"));
}

#[test]
fn duplicate_application_ids_collapse_in_the_allow_list() {
    let registrations = vec![registration("/a", "app-1"), registration("/b", "app-1")];

    let policy = SecurityPolicy::derive(&registrations, false);

    assert_eq!(policy.allowed_application_ids().len(), 1);
}

#[test]
fn joined_allow_list_is_comma_separated_and_ordered() {
    let registrations = vec![
        registration("/b", "app-2"),
        registration("/a", "app-1"),
        registration("/c", "app-3"),
    ];

    let policy = SecurityPolicy::derive(&registrations, false);

    assert_eq!(policy.allowed_ids_joined(), "app-1,app-2,app-3");
}

#[test]
fn empty_allow_list_accepts_any_application() {
    assert!(SecurityPolicy::permissive().allows_application("app-1"));
    assert_eq!(SecurityPolicy::permissive().allowed_ids_joined(), "");
}
