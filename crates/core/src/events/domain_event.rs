//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;

/// Kind of mutation that produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

/// Domain events emitted by core services after successful mutations.
///
/// These events are facts about stored data. Runtime adapters translate
/// them into refresh notifications for any open view that derives counts or
/// feeds from the affected collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    ClientsChanged {
        ids: Vec<String>,
        mutation: MutationKind,
    },
    MarketsChanged {
        ids: Vec<String>,
        mutation: MutationKind,
    },
    PropertiesChanged {
        ids: Vec<String>,
        mutation: MutationKind,
    },
    UsersChanged {
        ids: Vec<String>,
        mutation: MutationKind,
    },
}

impl DomainEvent {
    /// Creates the change event for a single record of the given type.
    pub fn changed(entity_type: EntityType, id: impl Into<String>, mutation: MutationKind) -> Self {
        let ids = vec![id.into()];
        match entity_type {
            EntityType::Client => Self::ClientsChanged { ids, mutation },
            EntityType::Market => Self::MarketsChanged { ids, mutation },
            EntityType::Property => Self::PropertiesChanged { ids, mutation },
            EntityType::User => Self::UsersChanged { ids, mutation },
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::ClientsChanged { .. } => EntityType::Client,
            Self::MarketsChanged { .. } => EntityType::Market,
            Self::PropertiesChanged { .. } => EntityType::Property,
            Self::UsersChanged { .. } => EntityType::User,
        }
    }

    pub fn ids(&self) -> &[String] {
        match self {
            Self::ClientsChanged { ids, .. }
            | Self::MarketsChanged { ids, .. }
            | Self::PropertiesChanged { ids, .. }
            | Self::UsersChanged { ids, .. } => ids,
        }
    }

    pub fn mutation(&self) -> MutationKind {
        match self {
            Self::ClientsChanged { mutation, .. }
            | Self::MarketsChanged { mutation, .. }
            | Self::PropertiesChanged { mutation, .. }
            | Self::UsersChanged { mutation, .. } => *mutation,
        }
    }
}
