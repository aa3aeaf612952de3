use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::policy::roles::Role;
use crate::types::AccessScope;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleRecord {
    pub id: Uuid,
    pub code: String,
    pub level: i32,
    pub access_scope: String,
    pub is_system_role: bool,
}

impl RoleRecord {
    /// Policy view of the row. Unknown scope strings fall back to the narrowest scope.
    pub fn to_role(&self) -> Role {
        let access_scope = AccessScope::parse(&self.access_scope).unwrap_or_else(|| {
            tracing::warn!(
                "Role '{}' has unknown access scope '{}', treating as OWN_RECORDS",
                self.code,
                self.access_scope
            );
            AccessScope::OwnRecords
        });
        Role {
            code: self.code.clone(),
            level: self.level,
            access_scope,
            is_system_role: self.is_system_role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_policy_role() {
        let record = RoleRecord {
            id: Uuid::new_v4(),
            code: "HR_OFFICER".into(),
            level: 30,
            access_scope: "OWN_CENTER".into(),
            is_system_role: true,
        };
        let role = record.to_role();
        assert_eq!(role.access_scope, AccessScope::OwnCenter);
        assert_eq!(role.level, 30);

        let odd = RoleRecord { access_scope: "EVERYWHERE".into(), ..record };
        assert_eq!(odd.to_role().access_scope, AccessScope::OwnRecords);
    }
}
