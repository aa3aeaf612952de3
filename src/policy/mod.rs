pub mod access;
pub mod edit;
pub mod fields;
pub mod roles;

use thiserror::Error;

pub use access::{
    build_center_filter, build_optional_center_filter, can_access_center, can_access_record,
    describe_transfer, is_hq, validate_center_access, CenterFilter, OptionalCenterFilter,
    TransferCheck,
};
pub use edit::{authorize_destructive_action, authorize_edit, is_self_edit};
pub use fields::{classify_field, sensitive_fields, FieldSensitivity, PERSONAL_FIELDS};
pub use roles::{max_role_level, Role, RoleDirectory};

/// Deliberate policy denials. Always carries a human-readable reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl PolicyError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        PolicyError::Forbidden(reason.into())
    }

    pub fn reason(&self) -> &str {
        match self {
            PolicyError::Forbidden(reason) => reason,
        }
    }
}
