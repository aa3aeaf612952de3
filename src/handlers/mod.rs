//! Permission requirements of the personnel application's request handlers.
//!
//! Each domain module lists its handlers as a const table; [`registry`]
//! collects them for the startup catalog sync.

pub mod correspondence;
pub mod employees;
pub mod rewards;
pub mod roles;
pub mod salary;
pub mod weapons;

use crate::catalog::registry::HandlerRegistry;

pub fn registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry
        .register_all(employees::HANDLERS)
        .register_all(correspondence::HANDLERS)
        .register_all(salary::HANDLERS)
        .register_all(weapons::HANDLERS)
        .register_all(rewards::HANDLERS)
        .register_all(roles::HANDLERS);
    registry
}
