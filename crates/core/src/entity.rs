//! Traits and identifiers shared by every stored entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four record kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Property,
    Market,
    Client,
    User,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Property => "property",
            EntityType::Market => "market",
            EntityType::Client => "client",
            EntityType::User => "user",
        }
    }

    /// Name of the backing table / REST collection.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityType::Property => "properties",
            EntityType::Market => "markets",
            EntityType::Client => "clients",
            EntityType::User => "users",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored record with an identity and audit timestamps.
pub trait Timestamped {
    const ENTITY_TYPE: EntityType;

    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

/// Returns the value when it holds something other than whitespace.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
