use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_json;
use crate::cli::OutputFormat;
use crate::policy::{can_access_center, describe_transfer, max_role_level};
use crate::types::AccessScope;

#[derive(Subcommand)]
pub enum PolicyCommands {
    #[command(about = "Check whether a transfer between centers is valid (omit a center for head office)")]
    Transfer {
        #[arg(long, help = "Source center id")]
        from: Option<String>,
        #[arg(long, help = "Destination center id")]
        to: Option<String>,
    },

    #[command(about = "Check center access for a scope (omit a center for head office)")]
    Access {
        #[arg(long, help = "ALL_CENTERS, OWN_CENTER or OWN_RECORDS")]
        scope: String,
        #[arg(long, help = "Caller center id")]
        caller: Option<String>,
        #[arg(long, help = "Target center id")]
        target: Option<String>,
    },

    #[command(about = "Effective level for a set of system role codes")]
    Level {
        #[arg(help = "Role codes")]
        roles: Vec<String>,
    },
}

pub async fn handle(cmd: PolicyCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = match cmd {
        PolicyCommands::Transfer { from, to } => {
            serde_json::to_value(describe_transfer(from.as_deref(), to.as_deref()))?
        }
        PolicyCommands::Access { scope, caller, target } => {
            let scope = AccessScope::parse(&scope)
                .ok_or_else(|| anyhow::anyhow!("unknown access scope '{}'", scope))?;
            json!({ "allowed": can_access_center(caller.as_deref(), target.as_deref(), scope) })
        }
        PolicyCommands::Level { roles } => json!({ "level": max_role_level(&roles) }),
    };

    match output_format {
        OutputFormat::Json => output_json(&result),
        OutputFormat::Text => {
            if let Some(map) = result.as_object() {
                for (key, value) in map {
                    println!("{}: {}", key, value);
                }
            }
            Ok(())
        }
    }
}
