use crate::catalog::registry::HandlerSpec;

pub const HANDLERS: &[HandlerSpec] = &[
    HandlerSpec::new("weapons::list", &["weapons.read.inventory"]),
    HandlerSpec::new("weapons::register", &["weapons.create.inventory"]),
    HandlerSpec::new("weapons::update", &["weapons.update.inventory"]),
    HandlerSpec::new("weapons::retire", &["weapons.delete.inventory"]),
    HandlerSpec::new("weapons::custody", &["weapons.read.custody"]),
    HandlerSpec::new("weapons::assign", &["weapons.manage.custody"]),
];
