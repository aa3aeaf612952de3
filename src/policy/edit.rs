// Edit authorization. Self-edits are never role-gated but are limited to
// personal fields; destructive actions on one's own record are always refused.

use super::fields::sensitive_fields;
use super::PolicyError;

/// Both ids must be present and equal
pub fn is_self_edit(caller_subject_id: Option<&str>, target_subject_id: Option<&str>) -> bool {
    match (caller_subject_id, target_subject_id) {
        (Some(caller), Some(target)) => caller == target,
        _ => false,
    }
}

/// Decide whether a caller may modify a target record.
///
/// `changed_fields = None` means the caller did not say which fields change;
/// for a self-edit that is allowed.
pub fn authorize_edit<S: AsRef<str>>(
    caller_level: i32,
    target_level: i32,
    is_self: bool,
    changed_fields: Option<&[S]>,
) -> Result<(), PolicyError> {
    if is_self {
        let restricted = changed_fields.map(sensitive_fields).unwrap_or_default();
        if restricted.is_empty() {
            return Ok(());
        }
        tracing::debug!("Self-edit rejected for restricted fields: {:?}", restricted);
        return Err(PolicyError::forbidden(format!(
            "cannot modify restricted fields on own record: {}",
            restricted.join(", ")
        )));
    }

    check_role_level(caller_level, target_level)
}

/// Destructive actions (deactivation, termination) on one's own record are
/// refused regardless of level, then the usual level comparison applies.
pub fn authorize_destructive_action(
    caller_subject_id: Option<&str>,
    target_subject_id: Option<&str>,
    caller_level: i32,
    target_level: i32,
) -> Result<(), PolicyError> {
    if is_self_edit(caller_subject_id, target_subject_id) {
        return Err(PolicyError::forbidden(
            "cannot perform this action on your own record",
        ));
    }
    check_role_level(caller_level, target_level)
}

fn check_role_level(caller_level: i32, target_level: i32) -> Result<(), PolicyError> {
    if caller_level >= target_level {
        Ok(())
    } else {
        Err(PolicyError::forbidden("insufficient role level"))
    }
}
