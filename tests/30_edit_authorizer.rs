mod common;

use personnel_guard::error::ApiError;
use personnel_guard::policy::{
    authorize_destructive_action, authorize_edit, is_self_edit, max_role_level, PolicyError,
};

#[test]
fn self_edit_of_personal_fields_ignores_seniority() {
    let changed = ["primaryPhone"];
    assert!(authorize_edit(1, 100, true, Some(&changed[..])).is_ok());
}

#[test]
fn self_edit_of_salary_is_forbidden() {
    let changed = ["currentSalary"];
    let err = authorize_edit(1, 100, true, Some(&changed[..])).unwrap_err();
    let PolicyError::Forbidden(reason) = &err;
    assert!(reason.contains("currentSalary"));

    let api: ApiError = err.into();
    assert_eq!(api.status_code(), 403);
}

#[test]
fn editing_others_requires_equal_or_higher_level() {
    let manager = max_role_level(&["CENTER_MANAGER"]);
    let officer = max_role_level(&["HR_OFFICER"]);
    let changed = ["currentSalary", "roleId"];

    assert!(authorize_edit(manager, officer, false, Some(&changed[..])).is_ok());
    assert!(authorize_edit(officer, officer, false, Some(&changed[..])).is_ok());
    assert_eq!(
        authorize_edit(officer, manager, false, Some(&changed[..])),
        Err(PolicyError::Forbidden("insufficient role level".to_string()))
    );
}

#[test]
fn destructive_self_action_refused_regardless_of_level() {
    assert!(is_self_edit(Some("E1"), Some("E1")));
    assert!(authorize_destructive_action(Some("E1"), Some("E1"), 100, 1).is_err());
}

#[test]
fn destructive_action_on_others_uses_levels() {
    assert!(authorize_destructive_action(Some("E1"), Some("E2"), 90, 50).is_ok());
    assert!(authorize_destructive_action(Some("E1"), Some("E2"), 30, 50).is_err());
    // unknown caller id is never a self action
    assert!(authorize_destructive_action(None, Some("E2"), 90, 50).is_ok());
}
