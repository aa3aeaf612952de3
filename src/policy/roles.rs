use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::types::AccessScope;

/// Code of the role that always holds every permission in the catalog
pub const SUPER_ADMIN_ROLE: &str = "SUPER_ADMIN";

/// Role definition used for privilege comparisons.
/// `level` is a total order, higher is more senior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub code: String,
    pub level: i32,
    pub access_scope: AccessScope,
    pub is_system_role: bool,
}

impl Role {
    pub fn new(code: impl Into<String>, level: i32, access_scope: AccessScope) -> Self {
        Self {
            code: code.into(),
            level,
            access_scope,
            is_system_role: false,
        }
    }

    fn system(code: &str, level: i32, access_scope: AccessScope) -> Self {
        Self {
            code: code.to_string(),
            level,
            access_scope,
            is_system_role: true,
        }
    }
}

/// Lookup of role definitions by code
#[derive(Debug, Clone, Default)]
pub struct RoleDirectory {
    roles: HashMap<String, Role>,
}

static SYSTEM_DIRECTORY: Lazy<RoleDirectory> = Lazy::new(|| {
    RoleDirectory::from_roles(vec![
        Role::system(SUPER_ADMIN_ROLE, 100, AccessScope::AllCenters),
        Role::system("ADMIN", 90, AccessScope::AllCenters),
        Role::system("HR_MANAGER", 70, AccessScope::AllCenters),
        Role::system("CENTER_MANAGER", 50, AccessScope::OwnCenter),
        Role::system("HR_OFFICER", 30, AccessScope::OwnCenter),
        Role::system("EMPLOYEE", 10, AccessScope::OwnRecords),
    ])
});

impl RoleDirectory {
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().map(|r| (r.code.clone(), r)).collect(),
        }
    }

    /// Built-in system roles seeded for every tenant
    pub fn system() -> Self {
        SYSTEM_DIRECTORY.clone()
    }

    /// Add or replace a role, e.g. a tenant-defined one loaded from the store
    pub fn insert(&mut self, role: Role) {
        self.roles.insert(role.code.clone(), role);
    }

    pub fn get(&self, code: &str) -> Option<&Role> {
        self.roles.get(code)
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    /// Highest level among the held roles. Unknown codes count as 0, no roles is 0.
    pub fn max_level<S: AsRef<str>>(&self, codes: &[S]) -> i32 {
        codes
            .iter()
            .map(|code| self.get(code.as_ref()).map(|r| r.level).unwrap_or(0))
            .max()
            .unwrap_or(0)
    }

    /// Broadest access scope among the held roles, `OWN_RECORDS` when none are known
    pub fn effective_scope<S: AsRef<str>>(&self, codes: &[S]) -> AccessScope {
        codes
            .iter()
            .filter_map(|code| self.get(code.as_ref()))
            .map(|r| r.access_scope)
            .max_by_key(|scope| scope.breadth())
            .unwrap_or(AccessScope::OwnRecords)
    }
}

/// `max_level` against the built-in system roles
pub fn max_role_level<S: AsRef<str>>(codes: &[S]) -> i32 {
    SYSTEM_DIRECTORY.max_level(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_level_picks_highest_known_role() {
        assert_eq!(max_role_level(&["EMPLOYEE", "HR_MANAGER"]), 70);
        assert_eq!(max_role_level(&["SUPER_ADMIN"]), 100);
    }

    #[test]
    fn unknown_and_empty_roles_are_level_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(max_role_level(&empty), 0);
        assert_eq!(max_role_level(&["JANITOR"]), 0);
        assert_eq!(max_role_level(&["JANITOR", "EMPLOYEE"]), 10);
    }

    #[test]
    fn effective_scope_prefers_broadest() {
        let directory = RoleDirectory::system();
        assert_eq!(directory.effective_scope(&["EMPLOYEE"]), AccessScope::OwnRecords);
        assert_eq!(directory.effective_scope(&["EMPLOYEE", "HR_OFFICER"]), AccessScope::OwnCenter);
        assert_eq!(directory.effective_scope(&["HR_OFFICER", "ADMIN"]), AccessScope::AllCenters);
        assert_eq!(directory.effective_scope(&["UNKNOWN"]), AccessScope::OwnRecords);
    }

    #[test]
    fn tenant_roles_extend_the_directory() {
        let mut directory = RoleDirectory::system();
        directory.insert(Role::new("ARMORY_CLERK", 25, AccessScope::OwnCenter));
        assert_eq!(directory.max_level(&["ARMORY_CLERK", "EMPLOYEE"]), 25);
        assert!(!directory.get("ARMORY_CLERK").unwrap().is_system_role);
    }
}
