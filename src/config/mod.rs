use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::cipher::DEFAULT_SCRYPT_LOG_N;
use crate::policy::roles::SUPER_ADMIN_ROLE;

/// Salt used for key derivation when FIELD_ENCRYPTION_SALT is unset
pub const DEFAULT_ENCRYPTION_SALT: &str = "personnel-guard-field-salt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub encryption: EncryptionConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// Master secret. `None` disables field protection entirely.
    #[serde(skip_serializing, default)]
    pub key: Option<String>,
    pub salt: String,
    pub scrypt_log_n: u8,
}

impl std::fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("salt", &self.salt)
            .field("scrypt_log_n", &self.scrypt_log_n)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub super_admin_role: String,
    pub sync_on_startup: bool,
    pub sync_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| env::var(name).ok())
    }

    /// Apply overrides from any variable source; `lookup` returns the raw value
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Database overrides
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Encryption overrides
        self.encryption.key = lookup("FIELD_ENCRYPTION_KEY").filter(|k| !k.is_empty());
        if let Some(v) = lookup("FIELD_ENCRYPTION_SALT") {
            if !v.is_empty() {
                self.encryption.salt = v;
            }
        }
        if let Some(v) = lookup("FIELD_ENCRYPTION_SCRYPT_LOG_N") {
            self.encryption.scrypt_log_n = v.parse().unwrap_or(self.encryption.scrypt_log_n);
        }

        // Catalog overrides
        if let Some(v) = lookup("CATALOG_SUPER_ADMIN_ROLE") {
            if !v.is_empty() {
                self.catalog.super_admin_role = v;
            }
        }
        if let Some(v) = lookup("CATALOG_SYNC_ON_STARTUP") {
            self.catalog.sync_on_startup = v.parse().unwrap_or(self.catalog.sync_on_startup);
        }
        if let Some(v) = lookup("CATALOG_SYNC_TIMEOUT_SECS") {
            self.catalog.sync_timeout_secs = v.parse().unwrap_or(self.catalog.sync_timeout_secs);
        }

        self
    }

    fn encryption_defaults() -> EncryptionConfig {
        EncryptionConfig {
            key: None,
            salt: DEFAULT_ENCRYPTION_SALT.to_string(),
            scrypt_log_n: DEFAULT_SCRYPT_LOG_N,
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 5,
                connection_timeout: 30,
            },
            encryption: Self::encryption_defaults(),
            catalog: CatalogConfig {
                super_admin_role: SUPER_ADMIN_ROLE.to_string(),
                sync_on_startup: true,
                sync_timeout_secs: 60,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 10,
            },
            encryption: Self::encryption_defaults(),
            catalog: CatalogConfig {
                super_admin_role: SUPER_ADMIN_ROLE.to_string(),
                sync_on_startup: true,
                sync_timeout_secs: 30,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 5,
            },
            encryption: Self::encryption_defaults(),
            catalog: CatalogConfig {
                super_admin_role: SUPER_ADMIN_ROLE.to_string(),
                sync_on_startup: true,
                sync_timeout_secs: 30,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
