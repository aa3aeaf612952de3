// Service initialization for processes embedding the authorization core.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{CatalogStore, PermissionCatalogSync, SyncReport};
use crate::cipher::FieldCipher;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgCatalogStore};
use crate::handlers;
use crate::policy::roles::RoleDirectory;

/// Long-lived objects shared by request handlers
#[derive(Debug, Clone)]
pub struct GuardServices {
    pub cipher: Arc<FieldCipher>,
    pub roles: Arc<RoleDirectory>,
    pub catalog_sync: Option<SyncReport>,
}

/// Entry point for services embedding the authorization core: call once at
/// boot and keep the returned [`GuardServices`] in shared state. When enabled,
/// syncs the catalog in Postgres. An unreachable database is logged, never fatal.
pub async fn initialize(config: &AppConfig) -> GuardServices {
    let store: Option<Arc<dyn CatalogStore>> = if config.catalog.sync_on_startup {
        match DatabaseManager::main_pool().await {
            Ok(pool) => Some(Arc::new(PgCatalogStore::new(pool))),
            Err(e) => {
                tracing::error!("Permission catalog sync skipped, database unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };
    initialize_with_store(config, store).await
}

pub async fn initialize_with_store(
    config: &AppConfig,
    store: Option<Arc<dyn CatalogStore>>,
) -> GuardServices {
    let cipher = Arc::new(FieldCipher::from_config(&config.encryption));
    if cipher.is_protection_enabled() {
        tracing::info!("Field protection enabled");
    } else {
        tracing::warn!("FIELD_ENCRYPTION_KEY not set, personal data is stored unprotected");
    }

    let catalog_sync = match store {
        Some(store) => {
            let mut sync = PermissionCatalogSync::new(
                store,
                handlers::registry(),
                config.catalog.super_admin_role.clone(),
            );
            sync.run_at_startup(Duration::from_secs(config.catalog.sync_timeout_secs))
                .await
        }
        None => None,
    };

    GuardServices {
        cipher,
        roles: Arc::new(RoleDirectory::system()),
        catalog_sync,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalogStore;

    #[tokio::test]
    async fn startup_syncs_into_given_store() {
        let mut config = AppConfig::from_env();
        config.encryption.key = None;
        let store = Arc::new(MemoryCatalogStore::with_system_roles());

        let services = initialize_with_store(&config, Some(store.clone())).await;
        let report = services.catalog_sync.expect("sync report");
        assert_eq!(report.created, store.permission_count().await);
        assert!(!services.cipher.is_protection_enabled());
    }

    #[tokio::test]
    async fn initialize_without_sync_never_touches_database() {
        let mut config = AppConfig::from_env();
        config.catalog.sync_on_startup = false;
        config.encryption.key = Some("embedding-secret".to_string());
        config.encryption.scrypt_log_n = 4;

        let services = initialize(&config).await;
        assert!(services.catalog_sync.is_none());
        assert!(services.cipher.is_protection_enabled());
        assert_eq!(services.roles.max_level(&["HR_OFFICER"]), 30);
    }
}
