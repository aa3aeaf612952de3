use crate::catalog::registry::HandlerSpec;

pub const HANDLERS: &[HandlerSpec] = &[
    HandlerSpec::new("correspondence::list", &["correspondence.read.letters"]),
    HandlerSpec::new("correspondence::create", &["correspondence.create.letters"]),
    HandlerSpec::new("correspondence::update", &["correspondence.update.letters"]),
    HandlerSpec::new("correspondence::archive", &["correspondence.delete.letters"]),
    HandlerSpec::new("correspondence::approve", &["correspondence.approve.letters"]),
    HandlerSpec::new("correspondence::reject", &["correspondence.reject.letters"]),
];
