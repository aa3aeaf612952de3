use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::catalog::declaration::PermissionDeclaration;

/// Catalog permission, unique on `(module, action, resource)`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    pub id: Uuid,
    pub module: String,
    pub action: String,
    pub resource: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Permission {
    pub fn matches(&self, declaration: &PermissionDeclaration) -> bool {
        self.module == declaration.module
            && self.action == declaration.action
            && self.resource == declaration.resource
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermission {
    pub module: String,
    pub action: String,
    pub resource: String,
    pub description: String,
}

impl From<&PermissionDeclaration> for NewPermission {
    fn from(declaration: &PermissionDeclaration) -> Self {
        Self {
            module: declaration.module.clone(),
            action: declaration.action.clone(),
            resource: declaration.resource.clone(),
            description: declaration.description(),
        }
    }
}

