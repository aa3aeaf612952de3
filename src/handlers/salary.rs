use crate::catalog::registry::HandlerSpec;

pub const HANDLERS: &[HandlerSpec] = &[
    HandlerSpec::new("salary::show", &["employees.read.salary"]),
    HandlerSpec::new("salary::update", &["employees.update.salary"]),
    HandlerSpec::new("salary::history", &["salary.read.history"]),
    HandlerSpec::new("salary::run_payroll", &["salary.manage.payroll"]),
    HandlerSpec::new("salary::approve_payroll", &["salary.approve.payroll", "salary.read.history"]),
    HandlerSpec::new("salary::export", &["salary.export.payroll"]),
];
