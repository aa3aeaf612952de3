pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "personnel-guard")]
#[command(about = "Authorization and field protection tooling for the personnel platform")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Permission catalog discovery and synchronization")]
    Catalog {
        #[command(subcommand)]
        cmd: commands::catalog::CatalogCommands,
    },

    #[command(about = "Field-level encryption helpers")]
    Cipher {
        #[command(subcommand)]
        cmd: commands::cipher::CipherCommands,
    },

    #[command(about = "Evaluate access policy decisions")]
    Policy {
        #[command(subcommand)]
        cmd: commands::policy::PolicyCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Catalog { cmd } => commands::catalog::handle(cmd, output_format).await,
        Commands::Cipher { cmd } => commands::cipher::handle(cmd, output_format).await,
        Commands::Policy { cmd } => commands::policy::handle(cmd, output_format).await,
    }
}
