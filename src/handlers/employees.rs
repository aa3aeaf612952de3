use crate::catalog::registry::HandlerSpec;

pub const HANDLERS: &[HandlerSpec] = &[
    HandlerSpec::new("employees::list", &["employees.read.records"]),
    HandlerSpec::new("employees::show", &["employees.read.records"]),
    HandlerSpec::new("employees::create", &["employees.create.records"]),
    HandlerSpec::new("employees::update", &["employees.update.records"]),
    HandlerSpec::new("employees::update_self", &["employees.update.profile"]),
    HandlerSpec::new("employees::deactivate", &["employees.delete.records"]),
    HandlerSpec::new("employees::transfer", &["employees.manage.transfers"]),
    HandlerSpec::new("employees::show_identity", &["employees.read.identity"]),
    HandlerSpec::new("employees::export", &["employees.export.records"]),
    HandlerSpec::new("employees::import", &["employees.import.records"]),
];
