use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("Malformed permission declaration '{declaration}': {reason}")]
    Malformed { declaration: String, reason: &'static str },
}

/// A `module.action.resource` permission declared by a request handler.
/// The triple is the natural key of a catalog permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionDeclaration {
    pub module: String,
    pub action: String,
    pub resource: String,
}

impl PermissionDeclaration {
    /// Exactly three non-empty, lower-case alphanumeric segments
    pub fn parse(declaration: &str) -> Result<Self, DeclarationError> {
        let malformed = |reason| DeclarationError::Malformed {
            declaration: declaration.to_string(),
            reason,
        };

        let segments: Vec<&str> = declaration.split('.').collect();
        if segments.len() != 3 {
            return Err(malformed("expected exactly three dot-separated segments"));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(malformed("segments must not be empty"));
        }
        let valid_segment = |s: &str| s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !segments.iter().all(|s| valid_segment(s)) {
            return Err(malformed("segments must be lower-case alphanumeric"));
        }

        Ok(Self {
            module: segments[0].to_string(),
            action: segments[1].to_string(),
            resource: segments[2].to_string(),
        })
    }

    /// Human-readable label, e.g. `employees.read.salary` -> "View Employees Salary"
    pub fn description(&self) -> String {
        format!(
            "{} {} {}",
            action_verb(&self.action),
            capitalize(&self.module),
            capitalize(&self.resource)
        )
    }
}

impl FromStr for PermissionDeclaration {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PermissionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.module, self.action, self.resource)
    }
}

/// Unknown actions pass through verbatim
fn action_verb(action: &str) -> &str {
    match action {
        "create" => "Create",
        "read" => "View",
        "update" => "Update",
        "delete" => "Delete",
        "manage" => "Manage",
        "approve" => "Approve",
        "reject" => "Reject",
        "export" => "Export",
        "import" => "Import",
        other => other,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
