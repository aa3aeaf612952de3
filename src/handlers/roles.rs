use crate::catalog::registry::HandlerSpec;

pub const HANDLERS: &[HandlerSpec] = &[
    HandlerSpec::new("roles::list", &["roles.read.definitions"]),
    HandlerSpec::new("roles::manage", &["roles.manage.definitions"]),
    HandlerSpec::new("roles::assign", &["roles.manage.assignments"]),
    HandlerSpec::new("permissions::list", &["roles.read.permissions"]),
];
