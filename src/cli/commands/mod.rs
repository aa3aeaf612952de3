pub mod catalog;
pub mod cipher;
pub mod policy;
