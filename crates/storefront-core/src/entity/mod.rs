//! Entity domain module.
//!
//! # Module Structure
//!
//! - `kind`: the `EntityKind` catalogue (paths, envelopes, fallback messages)
//! - `id`: the `EntityId` scalar (integer or string)
//! - `model`: record types and the `Entity` trait
//! - `collection`: the ordered, id-unique `EntityCollection`
//! - `envelope`: unwrapping of nested service responses
//!
//! # Usage
//!
//! ```ignore
//! use storefront_core::entity::{Company, Entity, EntityCollection, EntityKind};
//! ```

mod collection;
pub mod envelope;
mod id;
mod kind;
mod model;

pub use collection::EntityCollection;
pub use id::EntityId;
pub use kind::{EntityKind, Operation};
pub use model::{Category, Company, Entity, Item, Order};
