pub mod backend;
pub mod memory;
pub mod models;
pub mod repository;

pub use backend::SwitchBackend;
pub use memory::MemorySwitchBackend;
pub use models::Switch;
pub use repository::{MongoDbContext, SwitchRepository};
