// Startup reconciliation of the permission catalog with what handlers declare.
//
// Idle -> Discovering -> Reconciling -> GrantingToAdmin -> Done
//
// Each phase completes before the next starts. Existing rows are never updated
// or removed, so running on every boot is safe. No retries: a failed run is
// logged and the catalog stays as it was until the next start.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use uuid::Uuid;

use super::declaration::PermissionDeclaration;
use super::registry::HandlerRegistry;
use super::store::{CatalogError, CatalogStore};
use crate::database::models::NewPermission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncPhase {
    Idle,
    Discovering,
    Reconciling,
    GrantingToAdmin,
    Done,
}

/// Declarations found on registered handlers
#[derive(Debug, Clone, Default, Serialize)]
pub struct Discovery {
    pub declarations: Vec<PermissionDeclaration>,
    pub malformed: Vec<String>,
}

/// Walk every handler, dedupe declarations by exact string and parse them.
/// Malformed declarations are logged and skipped.
pub fn discover(registry: &HandlerRegistry) -> Discovery {
    let unique: BTreeSet<&str> = registry
        .handlers()
        .flat_map(|h| h.required_permissions().iter().copied())
        .collect();

    let mut discovery = Discovery::default();
    for raw in unique {
        match PermissionDeclaration::parse(raw) {
            Ok(declaration) => discovery.declarations.push(declaration),
            Err(e) => {
                tracing::warn!("Skipping permission declaration: {}", e);
                discovery.malformed.push(raw.to_string());
            }
        }
    }
    discovery
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub discovered: usize,
    pub malformed: Vec<String>,
    pub created: usize,
    pub existing: usize,
    pub granted: u64,
    pub super_admin_missing: bool,
}

pub struct PermissionCatalogSync {
    store: Arc<dyn CatalogStore>,
    registry: HandlerRegistry,
    super_admin_role: String,
    phase: SyncPhase,
}

impl PermissionCatalogSync {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        registry: HandlerRegistry,
        super_admin_role: impl Into<String>,
    ) -> Self {
        Self {
            store,
            registry,
            super_admin_role: super_admin_role.into(),
            phase: SyncPhase::Idle,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    fn enter(&mut self, phase: SyncPhase) {
        tracing::debug!("Permission catalog sync: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Run all phases once, propagating store failures
    pub async fn run(&mut self) -> Result<SyncReport, CatalogError> {
        let started = Instant::now();
        let mut report = SyncReport::default();

        self.enter(SyncPhase::Discovering);
        let discovery = discover(&self.registry);
        report.discovered = discovery.declarations.len();
        report.malformed = discovery.malformed;
        tracing::info!(
            "Discovered {} permission declarations across {} handlers ({} malformed)",
            report.discovered,
            self.registry.len(),
            report.malformed.len()
        );

        self.enter(SyncPhase::Reconciling);
        for declaration in &discovery.declarations {
            if self.store.find_permission(declaration).await?.is_some() {
                report.existing += 1;
                continue;
            }
            match self.store.create_permission(NewPermission::from(declaration)).await {
                Ok(permission) => {
                    tracing::debug!("Created permission {} ({})", declaration, permission.description);
                    report.created += 1;
                }
                Err(CatalogError::Duplicate(key)) => {
                    tracing::warn!("Permission {} was created concurrently, skipping", key);
                    report.existing += 1;
                }
                Err(e) => return Err(e),
            }
        }

        self.enter(SyncPhase::GrantingToAdmin);
        match self.store.find_role_by_code(&self.super_admin_role).await? {
            Some(role) => {
                let granted = self.store.granted_permission_ids(role.id).await?;
                let missing: Vec<Uuid> = self
                    .store
                    .list_permissions()
                    .await?
                    .into_iter()
                    .map(|p| p.id)
                    .filter(|id| !granted.contains(id))
                    .collect();
                if !missing.is_empty() {
                    report.granted = self.store.grant_permissions(role.id, &missing).await?;
                }
            }
            None => {
                tracing::warn!(
                    "Super administrator role '{}' not found, skipping permission grants",
                    self.super_admin_role
                );
                report.super_admin_missing = true;
            }
        }

        self.enter(SyncPhase::Done);
        tracing::info!(
            "Permission catalog sync finished in {:?}: {} created, {} existing, {} granted to {}",
            started.elapsed(),
            report.created,
            report.existing,
            report.granted,
            self.super_admin_role
        );
        Ok(report)
    }

    /// Startup wrapper: bounded by `limit`, failures are logged and swallowed
    pub async fn run_at_startup(&mut self, limit: Duration) -> Option<SyncReport> {
        match tokio::time::timeout(limit, self.run()).await {
            Ok(Ok(report)) => Some(report),
            Ok(Err(e)) => {
                tracing::error!("Permission catalog sync failed in phase {:?}: {}", self.phase, e);
                None
            }
            Err(_) => {
                tracing::error!(
                    "Permission catalog sync timed out after {:?} in phase {:?}",
                    limit,
                    self.phase
                );
                None
            }
        }
    }
}
