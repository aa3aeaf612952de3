/// Employee fields a subject may change on their own record
pub const PERSONAL_FIELDS: &[&str] = &[
    "primaryPhone",
    "secondaryPhone",
    "personalEmail",
    "address",
    "city",
    "postalCode",
    "emergencyContactName",
    "emergencyContactPhone",
    "emergencyContactRelation",
    "maritalStatus",
    "profilePhotoUrl",
];

/// Employee fields stored encrypted at rest
pub const PROTECTED_EMPLOYEE_FIELDS: &[&str] = &[
    "nationalId",
    "passportNumber",
    "bankAccountNumber",
    "primaryPhone",
    "personalEmail",
    "address",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSensitivity {
    Personal,
    Sensitive,
}

/// Anything outside the personal set is sensitive
pub fn classify_field(name: &str) -> FieldSensitivity {
    if PERSONAL_FIELDS.contains(&name) {
        FieldSensitivity::Personal
    } else {
        FieldSensitivity::Sensitive
    }
}

/// Sensitive fields among `changed`, in input order
pub fn sensitive_fields<'a, S: AsRef<str>>(changed: &'a [S]) -> Vec<&'a str> {
    changed
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| classify_field(name) == FieldSensitivity::Sensitive)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(classify_field("primaryPhone"), FieldSensitivity::Personal);
        assert_eq!(classify_field("currentSalary"), FieldSensitivity::Sensitive);
        assert_eq!(classify_field("PrimaryPhone"), FieldSensitivity::Sensitive);
    }

    #[test]
    fn sensitive_fields_keeps_order() {
        let changed = ["roleId", "city", "currentSalary"];
        assert_eq!(sensitive_fields(&changed), vec!["roleId", "currentSalary"]);
    }
}
