use std::collections::hash_map::Entry;

use async_trait::async_trait;
use models::Item;
use tracing::debug;

use crate::{errors::ServiceError, items::store::ItemStore, storage::memory_map_store::MemoryMapStore};

/// Process-lifetime item collection. Starts empty, never persisted.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: MemoryMapStore<String, Item>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self { items: MemoryMapStore::new() }
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list(&self) -> Vec<Item> {
        self.items.values().await
    }

    async fn get(&self, id: &str) -> Result<Item, ServiceError> {
        self.items
            .get(&id.to_string())
            .await
            .ok_or_else(|| ServiceError::not_found(id))
    }

    async fn create(&self, item: Item) -> Result<Item, ServiceError> {
        self.items
            .update_map(|m| match m.entry(item.id.clone()) {
                Entry::Occupied(_) => Err(ServiceError::conflict(&item.id)),
                Entry::Vacant(slot) => {
                    slot.insert(item.clone());
                    debug!(id = %item.id, "item inserted");
                    Ok(item)
                }
            })
            .await
    }

    async fn update(&self, id: &str, item: Item) -> Result<Item, ServiceError> {
        self.items
            .update_map(|m| {
                let slot = m.get_mut(id).ok_or_else(|| ServiceError::not_found(id))?;
                *slot = item.with_id(id);
                Ok(slot.clone())
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.items
            .update_map(|m| m.remove(id).map(|_| ()).ok_or_else(|| ServiceError::not_found(id)))
            .await
    }

    async fn contains(&self, id: &str) -> bool {
        self.items.contains_key(&id.to_string()).await
    }

    async fn len(&self) -> usize {
        self.items.len().await
    }
}
