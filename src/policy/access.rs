// Center-scoped access decisions and query filters.
//
// Head office is the *absence* of a center id. Callers pass `Option<&str>`;
// `None` is HQ and never equals any concrete id.

use serde::Serialize;
use serde_json::Value;

use super::PolicyError;
use crate::types::{center_id_from_json, AccessScope, CallerContext};

/// True iff the center id denotes head office
pub fn is_hq(center_id: Option<&str>) -> bool {
    center_id.is_none()
}

/// Whether a caller in `caller_center` with `scope` may touch data owned by `target_center`
pub fn can_access_center(
    caller_center: Option<&str>,
    target_center: Option<&str>,
    scope: AccessScope,
) -> bool {
    match scope {
        AccessScope::AllCenters => true,
        AccessScope::OwnCenter => match (caller_center, target_center) {
            (None, None) => true,
            (Some(caller), Some(target)) => caller == target,
            _ => false,
        },
        AccessScope::OwnRecords => false,
    }
}

/// Same decision as [`can_access_center`], failing fast with a forbidden error
pub fn validate_center_access(
    caller_center: Option<&str>,
    target_center: Option<&str>,
    scope: AccessScope,
) -> Result<(), PolicyError> {
    if can_access_center(caller_center, target_center, scope) {
        Ok(())
    } else {
        tracing::debug!(
            "Center access denied: caller={:?} target={:?} scope={}",
            caller_center,
            target_center,
            scope
        );
        Err(PolicyError::forbidden("no access to this center's data"))
    }
}

/// Record-level check. `OWN_RECORDS` callers only see records whose subject is themselves.
pub fn can_access_record(
    ctx: &CallerContext,
    owner_subject_id: Option<&str>,
    owner_center: Option<&str>,
) -> bool {
    match ctx.effective_access_scope {
        AccessScope::OwnRecords => owner_subject_id == Some(ctx.subject_id.as_str()),
        scope => can_access_center(ctx.center_id.as_deref(), owner_center, scope),
    }
}

/// Tenant/center filter handed to query layers.
///
/// `center_id = None` omits the key (whole tenant). `Some(None)` pins head
/// office and serializes as `centerId: null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterFilter {
    pub tenant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_id: Option<Option<String>>,
}

/// Same shape as [`CenterFilter`]; kept as the name for call sites that
/// match HQ ownership explicitly
pub type OptionalCenterFilter = CenterFilter;

impl CenterFilter {
    pub fn where_clause(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Whether a JSON record falls inside this filter. A missing and a null
    /// `centerId` on the record both mean head office.
    pub fn matches(&self, record: &Value) -> bool {
        if record.get("tenantId").and_then(Value::as_str) != Some(self.tenant_id.as_str()) {
            return false;
        }
        match &self.center_id {
            None => true,
            Some(pinned) => center_id_from_json(record, "centerId").as_deref() == pinned.as_deref(),
        }
    }
}

/// Unrestricted within the tenant for `ALL_CENTERS`, otherwise pinned to the
/// caller's center. An HQ caller pins `centerId: null`, never the whole tenant.
pub fn build_center_filter(
    tenant_id: &str,
    caller_center: Option<&str>,
    scope: AccessScope,
) -> CenterFilter {
    let center_id = match scope {
        AccessScope::AllCenters => None,
        _ => Some(caller_center.map(str::to_string)),
    };
    CenterFilter {
        tenant_id: tenant_id.to_string(),
        center_id,
    }
}

/// Explicit-null variant for data models where HQ ownership must be matched exactly
pub fn build_optional_center_filter(
    tenant_id: &str,
    caller_center: Option<&str>,
    scope: AccessScope,
) -> OptionalCenterFilter {
    build_center_filter(tenant_id, caller_center, scope)
}

/// Outcome of checking a center-to-center transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferCheck {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransferCheck {
    fn valid() -> Self {
        Self { is_valid: true, error: None }
    }

    fn invalid(error: &str) -> Self {
        Self {
            is_valid: false,
            error: Some(error.to_string()),
        }
    }
}

/// Any two HQ references are treated as the same unit.
pub fn describe_transfer(from_center: Option<&str>, to_center: Option<&str>) -> TransferCheck {
    match (from_center, to_center) {
        (None, None) => TransferCheck::invalid("cannot transfer from head office to head office"),
        (Some(from), Some(to)) if from == to => {
            TransferCheck::invalid("source and destination center are the same")
        }
        _ => TransferCheck::valid(),
    }
}
