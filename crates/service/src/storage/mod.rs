//! Storage abstractions for service layer
//!
//! Contains the in-memory keyed map shared by the item store.

pub mod memory_map_store;
