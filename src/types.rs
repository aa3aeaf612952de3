/// Shared types used across the policy, catalog and database layers

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::policy::roles::RoleDirectory;

/// How broadly a role may see data across organizational centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessScope {
    AllCenters,
    OwnCenter,
    OwnRecords,
}

impl AccessScope {
    /// Breadth rank, higher sees more
    pub fn breadth(&self) -> u8 {
        match self {
            AccessScope::AllCenters => 2,
            AccessScope::OwnCenter => 1,
            AccessScope::OwnRecords => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessScope::AllCenters => "ALL_CENTERS",
            AccessScope::OwnCenter => "OWN_CENTER",
            AccessScope::OwnRecords => "OWN_RECORDS",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ALL_CENTERS" => Some(AccessScope::AllCenters),
            "OWN_CENTER" => Some(AccessScope::OwnCenter),
            "OWN_RECORDS" => Some(AccessScope::OwnRecords),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccessScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request caller context derived from upstream authentication data.
/// `center_id = None` marks head-office personnel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerContext {
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_id: Option<String>,
    pub effective_access_scope: AccessScope,
    pub role_level: i32,
    pub subject_id: String,
}

impl CallerContext {
    /// Build the context from the role codes the caller holds
    pub fn resolve<S: AsRef<str>>(
        tenant_id: impl Into<String>,
        center_id: Option<String>,
        subject_id: impl Into<String>,
        role_codes: &[S],
        directory: &RoleDirectory,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            center_id,
            effective_access_scope: directory.effective_scope(role_codes),
            role_level: directory.max_level(role_codes),
            subject_id: subject_id.into(),
        }
    }

    pub fn is_hq(&self) -> bool {
        self.center_id.is_none()
    }
}

/// Read a `centerId`-style value out of JSON, treating a missing key and an
/// explicit `null` identically as head office
pub fn center_id_from_json(record: &Value, key: &str) -> Option<String> {
    match record.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn access_scope_wire_names() {
        assert_eq!(serde_json::to_value(AccessScope::OwnCenter).unwrap(), json!("OWN_CENTER"));
        assert_eq!(AccessScope::parse("ALL_CENTERS"), Some(AccessScope::AllCenters));
        assert_eq!(AccessScope::parse("everything"), None);
    }

    #[test]
    fn missing_and_null_center_are_both_hq() {
        assert_eq!(center_id_from_json(&json!({}), "centerId"), None);
        assert_eq!(center_id_from_json(&json!({ "centerId": null }), "centerId"), None);
        assert_eq!(
            center_id_from_json(&json!({ "centerId": "C1" }), "centerId"),
            Some("C1".to_string())
        );
    }

    #[test]
    fn resolve_takes_highest_level_and_broadest_scope() {
        let directory = RoleDirectory::system();
        let ctx = CallerContext::resolve("t1", Some("C1".into()), "E1", &["EMPLOYEE", "CENTER_MANAGER"], &directory);
        assert_eq!(ctx.role_level, 50);
        assert_eq!(ctx.effective_access_scope, AccessScope::OwnCenter);
        assert!(!ctx.is_hq());
    }
}
