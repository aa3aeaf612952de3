#![allow(dead_code)]

use std::sync::Arc;

use personnel_guard::catalog::{HandlerRegistry, HandlerSpec, MemoryCatalogStore, PermissionCatalogSync};
use personnel_guard::cipher::FieldCipher;
use personnel_guard::types::{AccessScope, CallerContext};

/// Low scrypt cost keeps tests fast; production uses the default cost
pub fn test_cipher() -> FieldCipher {
    FieldCipher::with_cost("integration-test-secret", "integration-test-salt", 4)
}

pub fn caller(center: Option<&str>, scope: AccessScope, level: i32, subject: &str) -> CallerContext {
    CallerContext {
        tenant_id: "tenant-1".to_string(),
        center_id: center.map(str::to_string),
        effective_access_scope: scope,
        role_level: level,
        subject_id: subject.to_string(),
    }
}

pub fn registry(specs: &[HandlerSpec]) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register_all(specs);
    registry
}

pub fn memory_sync(specs: &[HandlerSpec]) -> (Arc<MemoryCatalogStore>, PermissionCatalogSync) {
    let store = Arc::new(MemoryCatalogStore::with_system_roles());
    let sync = PermissionCatalogSync::new(store.clone(), registry(specs), "SUPER_ADMIN");
    (store, sync)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
