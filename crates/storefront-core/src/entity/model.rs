//! Entity record models.
//!
//! The remote service owns the shape of these records. The store only relies
//! on the identifying field; everything else is kept verbatim in
//! `attributes` so a record written back to the UI is exactly what the
//! service returned.

use super::id::EntityId;
use super::kind::EntityKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A record held in one of the store's collections.
pub trait Entity: Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &EntityId;

    /// Every field except the id.
    fn attributes(&self) -> &Map<String, Value>;

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes().get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: EntityId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Entity for Company {
    const KIND: EntityKind = EntityKind::Company;

    fn id(&self) -> &EntityId {
        &self.company_id
    }

    fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: EntityId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> &EntityId {
        &self.category_id
    }

    fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: EntityId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Entity for Item {
    const KIND: EntityKind = EntityKind::Item;

    fn id(&self) -> &EntityId {
        &self.item_id
    }

    fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: EntityId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Entity for Order {
    const KIND: EntityKind = EntityKind::Order;

    fn id(&self) -> &EntityId {
        &self.order_id
    }

    fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}
