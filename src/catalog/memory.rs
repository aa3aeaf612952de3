use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::declaration::PermissionDeclaration;
use super::store::{CatalogError, CatalogStore};
use crate::database::models::{NewPermission, Permission, RoleRecord};
use crate::policy::roles::RoleDirectory;

#[derive(Default)]
struct MemoryState {
    permissions: Vec<Permission>,
    roles: Vec<RoleRecord>,
    grants: HashSet<(Uuid, Uuid)>,
}

/// In-process catalog used for dry runs and tests
#[derive(Default)]
pub struct MemoryCatalogStore {
    state: RwLock<MemoryState>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the built-in system roles
    pub fn with_system_roles() -> Self {
        let roles = RoleDirectory::system()
            .roles()
            .map(|role| RoleRecord {
                id: Uuid::new_v4(),
                code: role.code.clone(),
                level: role.level,
                access_scope: role.access_scope.as_str().to_string(),
                is_system_role: role.is_system_role,
            })
            .collect();
        Self {
            state: RwLock::new(MemoryState {
                roles,
                ..Default::default()
            }),
        }
    }

    pub async fn add_role(&self, role: RoleRecord) {
        self.state.write().await.roles.push(role);
    }

    pub async fn permission_count(&self) -> usize {
        self.state.read().await.permissions.len()
    }

    pub async fn grant_count(&self, role_id: Uuid) -> usize {
        self.state
            .read()
            .await
            .grants
            .iter()
            .filter(|(role, _)| *role == role_id)
            .count()
    }

    /// Overwrite a description, as an operator editing the catalog would
    pub async fn set_description(&self, declaration: &PermissionDeclaration, description: &str) -> bool {
        let mut state = self.state.write().await;
        match state.permissions.iter_mut().find(|p| p.matches(declaration)) {
            Some(permission) => {
                permission.description = description.to_string();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn find_permission(
        &self,
        declaration: &PermissionDeclaration,
    ) -> Result<Option<Permission>, CatalogError> {
        let state = self.state.read().await;
        Ok(state.permissions.iter().find(|p| p.matches(declaration)).cloned())
    }

    async fn create_permission(&self, permission: NewPermission) -> Result<Permission, CatalogError> {
        let mut state = self.state.write().await;
        let exists = state.permissions.iter().any(|p| {
            p.module == permission.module && p.action == permission.action && p.resource == permission.resource
        });
        if exists {
            return Err(CatalogError::Duplicate(format!(
                "{}.{}.{}",
                permission.module, permission.action, permission.resource
            )));
        }

        let created = Permission {
            id: Uuid::new_v4(),
            module: permission.module,
            action: permission.action,
            resource: permission.resource,
            description: permission.description,
            created_at: Utc::now(),
        };
        state.permissions.push(created.clone());
        Ok(created)
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, CatalogError> {
        Ok(self.state.read().await.permissions.clone())
    }

    async fn find_role_by_code(&self, code: &str) -> Result<Option<RoleRecord>, CatalogError> {
        let state = self.state.read().await;
        Ok(state.roles.iter().find(|r| r.code == code).cloned())
    }

    async fn granted_permission_ids(&self, role_id: Uuid) -> Result<HashSet<Uuid>, CatalogError> {
        let state = self.state.read().await;
        Ok(state
            .grants
            .iter()
            .filter(|(role, _)| *role == role_id)
            .map(|(_, permission)| *permission)
            .collect())
    }

    async fn grant_permissions(&self, role_id: Uuid, permission_ids: &[Uuid]) -> Result<u64, CatalogError> {
        let mut state = self.state.write().await;
        let inserted = permission_ids
            .iter()
            .filter(|id| state.grants.insert((role_id, **id)))
            .count();
        Ok(inserted as u64)
    }
}
