pub mod permission;
pub mod role;

pub use permission::{NewPermission, Permission};
pub use role::RoleRecord;
