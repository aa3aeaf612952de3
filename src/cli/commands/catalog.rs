use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use serde_json::json;

use crate::catalog::{discover, CatalogStore, MemoryCatalogStore, PermissionCatalogSync, SyncReport};
use crate::cli::utils::{output_json, output_success};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::{DatabaseManager, PgCatalogStore};
use crate::handlers;

#[derive(Subcommand)]
pub enum CatalogCommands {
    #[command(about = "List permissions declared by registered handlers")]
    List,

    #[command(about = "Reconcile the persisted catalog and grant everything to the super administrator")]
    Sync {
        #[arg(long, help = "Run against an in-memory catalog instead of the database")]
        dry_run: bool,
    },
}

pub async fn handle(cmd: CatalogCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        CatalogCommands::List => {
            let discovery = discover(&handlers::registry());
            match output_format {
                OutputFormat::Json => {
                    let permissions: Vec<_> = discovery
                        .declarations
                        .iter()
                        .map(|d| json!({ "permission": d.to_string(), "description": d.description() }))
                        .collect();
                    output_json(&json!({ "permissions": permissions, "malformed": discovery.malformed }))?;
                }
                OutputFormat::Text => {
                    println!("{:<40} {}", "PERMISSION", "DESCRIPTION");
                    println!("{}", "-".repeat(80));
                    for declaration in &discovery.declarations {
                        println!("{:<40} {}", declaration.to_string(), declaration.description());
                    }
                    for raw in &discovery.malformed {
                        println!("{:<40} (malformed, skipped)", raw);
                    }
                }
            }
            Ok(())
        }
        CatalogCommands::Sync { dry_run } => {
            let settings = &config::config().catalog;
            let store: Arc<dyn CatalogStore> = if dry_run {
                Arc::new(MemoryCatalogStore::with_system_roles())
            } else {
                Arc::new(PgCatalogStore::new(DatabaseManager::main_pool().await?))
            };

            let mut sync = PermissionCatalogSync::new(store, handlers::registry(), settings.super_admin_role.clone());
            let report = tokio::time::timeout(Duration::from_secs(settings.sync_timeout_secs), sync.run())
                .await
                .map_err(|_| anyhow::anyhow!("catalog sync timed out after {}s", settings.sync_timeout_secs))??;

            print_report(&report, dry_run, &output_format)
        }
    }
}

fn print_report(report: &SyncReport, dry_run: bool, output_format: &OutputFormat) -> anyhow::Result<()> {
    let message = if dry_run {
        "Permission catalog dry run complete"
    } else {
        "Permission catalog synchronized"
    };
    match output_format {
        OutputFormat::Json => output_success(output_format, message, Some(json!({ "report": report }))),
        OutputFormat::Text => {
            output_success(output_format, message, None)?;
            println!("Discovered: {}", report.discovered);
            println!("Created:    {}", report.created);
            println!("Existing:   {}", report.existing);
            println!("Granted:    {}", report.granted);
            if !report.malformed.is_empty() {
                println!("Malformed:  {}", report.malformed.join(", "));
            }
            if report.super_admin_missing {
                println!("Warning: super administrator role not found, no grants made");
            }
            Ok(())
        }
    }
}
