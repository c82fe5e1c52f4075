//! UserProfile domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of the authenticated user as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Access-control role (e.g. "Admin").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Remaining service-defined fields.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl UserProfile {
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            attributes: Map::new(),
        }
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}
