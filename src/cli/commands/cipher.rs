use clap::Subcommand;
use serde_json::json;

use crate::cipher::FieldCipher;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum CipherCommands {
    #[command(about = "Show whether field protection is enabled")]
    Status,

    #[command(about = "Protect a single field value")]
    Encrypt {
        #[arg(help = "Plaintext value")]
        value: String,
    },

    #[command(about = "Reveal a protected field value")]
    Decrypt {
        #[arg(help = "Protected value (enc:...)")]
        value: String,
    },
}

pub async fn handle(cmd: CipherCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let cipher = FieldCipher::from_config(&config::config().encryption);

    match cmd {
        CipherCommands::Status => {
            let enabled = cipher.is_protection_enabled();
            let message = if enabled {
                "Field protection enabled"
            } else {
                "Field protection disabled (FIELD_ENCRYPTION_KEY not set)"
            };
            output_success(&output_format, message, Some(json!({ "enabled": enabled })))
        }
        CipherCommands::Encrypt { value } => {
            if !cipher.is_protection_enabled() {
                tracing::warn!("FIELD_ENCRYPTION_KEY not set, value returned unchanged");
            }
            let protected = cipher.encrypt(&value)?;
            print_value(&output_format, &protected)
        }
        CipherCommands::Decrypt { value } => match cipher.decrypt(&value) {
            Ok(plain) => print_value(&output_format, &plain),
            Err(e) => {
                output_error(&output_format, &e.to_string(), Some("DECRYPTION_ERROR"))?;
                Err(e.into())
            }
        },
    }
}

fn print_value(output_format: &OutputFormat, value: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_success(output_format, "ok", Some(json!({ "value": value }))),
        OutputFormat::Text => {
            println!("{}", value);
            Ok(())
        }
    }
}
