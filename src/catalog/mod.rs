pub mod declaration;
pub mod memory;
pub mod registry;
pub mod store;
pub mod sync;

pub use declaration::{DeclarationError, PermissionDeclaration};
pub use memory::MemoryCatalogStore;
pub use registry::{HandlerRegistry, HandlerSpec, RequiresPermissions};
pub use store::{CatalogError, CatalogStore};
pub use sync::{discover, Discovery, PermissionCatalogSync, SyncPhase, SyncReport};
