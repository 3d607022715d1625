use async_trait::async_trait;
use models::Item;

use crate::errors::ServiceError;

/// Trait abstraction over the item collection.
/// Each call is one complete operation: it either succeeds or leaves the
/// collection unchanged.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items, in no particular order.
    async fn list(&self) -> Vec<Item>;
    async fn get(&self, id: &str) -> Result<Item, ServiceError>;
    /// Insert a new item; `Conflict` if its id is taken.
    async fn create(&self, item: Item) -> Result<Item, ServiceError>;
    /// Replace the item stored under `id`. The stored copy always carries
    /// `id`, whatever `item.id` says.
    async fn update(&self, id: &str, item: Item) -> Result<Item, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
    async fn contains(&self, id: &str) -> bool;
    async fn len(&self) -> usize;
}
