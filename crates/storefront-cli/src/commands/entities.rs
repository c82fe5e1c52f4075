use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;
use storefront_application::EntityCache;
use storefront_core::entity::{Entity, EntityId};

use crate::bootstrap::AppContext;

/// CRUD actions shared by every entity kind.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum EntityAction {
    /// Fetch and print the whole collection
    List,
    /// Create a record from a JSON object
    Create {
        #[arg(long, value_name = "JSON")]
        data: String,
    },
    /// Patch a record with a JSON object
    Update {
        id: EntityId,
        #[arg(long, value_name = "JSON")]
        data: String,
    },
    /// Delete a record
    Delete { id: EntityId },
}

pub async fn run<E: Entity>(cache: &EntityCache<E>, action: EntityAction) -> Result<()> {
    match action {
        EntityAction::List => {
            cache.fetch_all().await?;
            super::print_json(&cache.records())
        }
        EntityAction::Create { data } => {
            let created = cache.create(&parse_data(&data)?).await?;
            super::print_json(&created)
        }
        EntityAction::Update { id, data } => {
            let updated = cache.update(&id, &parse_data(&data)?).await?;
            super::print_json(&updated)
        }
        EntityAction::Delete { id } => {
            cache.delete(&id).await?;
            println!("Deleted {} {}", E::KIND.singular(), id);
            Ok(())
        }
    }
}

pub async fn show_company(app: &AppContext, id: EntityId) -> Result<()> {
    let company = app.store.get_company(&id).await?;
    super::print_json(&company)
}

fn parse_data(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).context("--data must be valid JSON")
}
