use crate::catalog::registry::HandlerSpec;

pub const HANDLERS: &[HandlerSpec] = &[
    HandlerSpec::new("rewards::list", &["rewards.read.nominations"]),
    HandlerSpec::new("rewards::nominate", &["rewards.create.nominations"]),
    HandlerSpec::new("rewards::approve", &["rewards.approve.nominations"]),
    HandlerSpec::new("rewards::reject", &["rewards.reject.nominations"]),
];
