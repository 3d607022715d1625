pub mod memory;
pub mod store;

pub use memory::MemoryItemStore;
pub use store::ItemStore;
