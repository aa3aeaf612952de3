pub mod catalog_store;
pub mod manager;
pub mod models;

pub use catalog_store::PgCatalogStore;
pub use manager::{DatabaseError, DatabaseManager};
