use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::declaration::PermissionDeclaration;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewPermission, Permission, RoleRecord};

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Insert hit the natural-key unique constraint, e.g. another instance won the race
    #[error("Permission already exists: {0}")]
    Duplicate(String),

    #[error("Catalog store error: {0}")]
    Store(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Database(DatabaseError::Sqlx(err))
    }
}

/// Persisted permission catalog consumed by the startup sync
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Look up a permission by its `(module, action, resource)` key
    async fn find_permission(
        &self,
        declaration: &PermissionDeclaration,
    ) -> Result<Option<Permission>, CatalogError>;

    /// Insert a permission. Fails with [`CatalogError::Duplicate`] when the key exists.
    async fn create_permission(&self, permission: NewPermission) -> Result<Permission, CatalogError>;

    async fn list_permissions(&self) -> Result<Vec<Permission>, CatalogError>;

    async fn find_role_by_code(&self, code: &str) -> Result<Option<RoleRecord>, CatalogError>;

    async fn granted_permission_ids(&self, role_id: Uuid) -> Result<HashSet<Uuid>, CatalogError>;

    /// Grant permissions to a role, skipping existing grants. Returns rows inserted.
    async fn grant_permissions(&self, role_id: Uuid, permission_ids: &[Uuid]) -> Result<u64, CatalogError>;
}
