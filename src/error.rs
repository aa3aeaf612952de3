// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::catalog::store::CatalogError;
use crate::cipher::CipherError;
use crate::database::manager::DatabaseError;
use crate::policy::PolicyError;

/// Error surfaced to HTTP callers of the authorization core.
/// Only policy denials carry their reason to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 403, deliberate policy denial
    Forbidden(String),
    /// 409, catalog entry already present
    Conflict(String),
    /// 500
    InternalServerError(String),
    /// 503, missing key material or database
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Forbidden(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Forbidden(reason) => ApiError::forbidden(reason),
        }
    }
}

impl From<CipherError> for ApiError {
    fn from(err: CipherError) -> Self {
        // Never leak cipher internals; the cause goes to the log
        tracing::error!("Field protection error: {}", err);
        match err {
            CipherError::Decryption(_) => {
                ApiError::InternalServerError("Failed to read a protected field".into())
            }
            CipherError::KeyUnavailable | CipherError::KeyDerivation(_) => {
                ApiError::ServiceUnavailable("Field protection is misconfigured".into())
            }
            CipherError::Encryption(_) => {
                ApiError::InternalServerError("Failed to protect a field".into())
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConfigMissing(name) => {
                tracing::error!("Database configuration missing: {}", name);
                ApiError::ServiceUnavailable("Database temporarily unavailable".into())
            }
            DatabaseError::Sqlx(sqlx_err) => {
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::InternalServerError("Database error occurred".into())
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Duplicate(key) => ApiError::Conflict(format!("Permission {} already exists", key)),
            CatalogError::Store(msg) => {
                tracing::error!("Catalog store error: {}", msg);
                ApiError::InternalServerError("An error occurred while processing your request".into())
            }
            CatalogError::Database(db) => db.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_denial_maps_to_403_with_reason() {
        let err: ApiError = PolicyError::forbidden("insufficient role level").into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_json()["message"], "insufficient role level");
        assert_eq!(err.to_json()["code"], "FORBIDDEN");
    }

    #[test]
    fn decryption_failure_hides_cause() {
        let err: ApiError = CipherError::Decryption("authentication tag mismatch".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("tag"));
    }

    #[test]
    fn catalog_and_database_errors_map_to_status() {
        let dup: ApiError = CatalogError::Duplicate("salary.read.record".into()).into();
        assert_eq!(dup.status_code(), StatusCode::CONFLICT);
        assert_eq!(dup.message(), "Permission salary.read.record already exists");

        let missing: ApiError = CatalogError::Database(DatabaseError::ConfigMissing("DATABASE_URL")).into();
        assert_eq!(missing.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!missing.message().contains("DATABASE_URL"));

        let no_key: ApiError = CipherError::KeyUnavailable.into();
        assert_eq!(no_key.error_code(), "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn into_response_uses_status() {
        let response = ApiError::forbidden("no access to this center's data").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
