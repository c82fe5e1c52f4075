//! Entity kind catalogue.
//!
//! Each remote resource the store mirrors is one `EntityKind`. The kind knows
//! its resource path, its id field, the envelopes the service wraps some
//! responses in, and the fallback messages used when the service gives none.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four remote CRUD resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Company,
    Category,
    Item,
    Order,
}

/// One CRUD step, used to pick a fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchAll,
    FetchOne,
    Create,
    Update,
    Delete,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [Self::Company, Self::Category, Self::Item, Self::Order];

    /// Collection path on the remote service, without leading slash.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Company => "companies",
            Self::Category => "categories",
            Self::Item => "items",
            Self::Order => "orders",
        }
    }

    /// Name of the identifying field in records of this kind.
    pub fn id_field(&self) -> &'static str {
        match self {
            Self::Company => "company_id",
            Self::Category => "category_id",
            Self::Item => "item_id",
            Self::Order => "order_id",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::Category => "Category",
            Self::Item => "Item",
            Self::Order => "Order",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::Company => "Companies",
            Self::Category => "Categories",
            Self::Item => "Items",
            Self::Order => "Orders",
        }
    }

    /// `/companies`
    pub fn collection_path(&self) -> String {
        format!("/{}", self.resource())
    }

    /// `/companies/{id}`
    pub fn record_path(&self, id: impl fmt::Display) -> String {
        format!("/{}/{}", self.resource(), id)
    }

    /// Key the list response is nested under, if any.
    pub fn list_envelope(&self) -> Option<&'static str> {
        match self {
            Self::Item => Some("items"),
            _ => None,
        }
    }

    /// Key a created record is nested under, if any.
    pub fn created_envelope(&self) -> Option<&'static str> {
        match self {
            Self::Category => Some("categories"),
            _ => None,
        }
    }

    /// Key a single fetched record is nested under, if any.
    pub fn single_envelope(&self) -> Option<&'static str> {
        match self {
            Self::Company => Some("company"),
            _ => None,
        }
    }

    /// Message used when the service does not supply one.
    pub fn default_message(&self, operation: Operation) -> String {
        match operation {
            Operation::FetchAll => format!("Failed To Fetch {}", self.plural()),
            Operation::FetchOne => format!("Failed To Get {}", self.singular()),
            Operation::Create => format!("Failed To Create {}", self.singular()),
            Operation::Update => format!("Failed To Update {}", self.singular()),
            Operation::Delete => format!("Failed To Delete {}", self.singular()),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "company" | "companies" => Ok(Self::Company),
            "category" | "categories" => Ok(Self::Category),
            "item" | "items" => Ok(Self::Item),
            "order" | "orders" => Ok(Self::Order),
            other => Err(format!("Unknown entity kind: {}", other)),
        }
    }
}
