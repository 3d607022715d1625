//! Service layer owning the item collection.
//! - `storage` holds the generic lock-guarded map.
//! - `items` exposes the five item operations behind the `ItemStore` trait.

pub mod errors;
pub mod items;
pub mod storage;
