// Postgres-backed permission catalog.
//
// Expected tables:
//   permissions(id uuid pk, module, action, resource, description, created_at)
//     UNIQUE (module, action, resource)
//   roles(id uuid pk, code unique, level int, access_scope text, is_system_role bool)
//   role_permissions(role_id, permission_id) UNIQUE (role_id, permission_id)

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::declaration::PermissionDeclaration;
use crate::catalog::store::{CatalogError, CatalogStore};
use crate::database::models::{NewPermission, Permission, RoleRecord};

pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_permission(
        &self,
        declaration: &PermissionDeclaration,
    ) -> Result<Option<Permission>, CatalogError> {
        let row = sqlx::query_as::<_, Permission>(
            r#"
            SELECT id, module, action, resource, description, created_at
            FROM permissions
            WHERE module = $1 AND action = $2 AND resource = $3
            "#,
        )
        .bind(&declaration.module)
        .bind(&declaration.action)
        .bind(&declaration.resource)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_permission(&self, permission: NewPermission) -> Result<Permission, CatalogError> {
        let result = sqlx::query_as::<_, Permission>(
            r#"
            INSERT INTO permissions (module, action, resource, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, module, action, resource, description, created_at
            "#,
        )
        .bind(&permission.module)
        .bind(&permission.action)
        .bind(&permission.resource)
        .bind(&permission.description)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(CatalogError::Duplicate(format!(
                    "{}.{}.{}",
                    permission.module, permission.action, permission.resource
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, CatalogError> {
        let rows = sqlx::query_as::<_, Permission>(
            "SELECT id, module, action, resource, description, created_at FROM permissions ORDER BY module, action, resource",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_role_by_code(&self, code: &str) -> Result<Option<RoleRecord>, CatalogError> {
        let row = sqlx::query_as::<_, RoleRecord>(
            "SELECT id, code, level, access_scope, is_system_role FROM roles WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn granted_permission_ids(&self, role_id: Uuid) -> Result<HashSet<Uuid>, CatalogError> {
        let ids: Vec<(Uuid,)> =
            sqlx::query_as("SELECT permission_id FROM role_permissions WHERE role_id = $1")
                .bind(role_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    async fn grant_permissions(&self, role_id: Uuid, permission_ids: &[Uuid]) -> Result<u64, CatalogError> {
        if permission_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, permission_id)
            SELECT $1, unnest($2::uuid[])
            ON CONFLICT (role_id, permission_id) DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
