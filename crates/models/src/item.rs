use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A stored record, keyed by its caller-assigned `id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self { id: id.into(), name: name.into(), price }
    }

    /// Decode the first JSON value of a request body. Anything after it is
    /// not read, and a `null` body yields the zero item.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<Option<Item>>();
        match values.next() {
            Some(first) => Ok(first?.unwrap_or_default()),
            None => Err(ModelError::Empty),
        }
    }

    /// Same item keyed under `id`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Keys match field names case-insensitively. Missing and `null` fields keep
/// their zero value; unknown keys are skipped.
impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ItemVisitor)
    }
}

struct ItemVisitor;

impl<'de> Visitor<'de> for ItemVisitor {
    type Value = Item;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an item object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Item, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut item = Item::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.to_lowercase().as_str() {
                "id" => {
                    if let Some(id) = map.next_value::<Option<String>>()? {
                        item.id = id;
                    }
                }
                "name" => {
                    if let Some(name) = map.next_value::<Option<String>>()? {
                        item.name = name;
                    }
                }
                "price" => {
                    if let Some(price) = map.next_value::<Option<f64>>()? {
                        item.price = price;
                    }
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(item)
    }
}
