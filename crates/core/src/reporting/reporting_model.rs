//! Derived, never-persisted views over the four entity collections.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clients::Client;
use crate::entity::EntityType;
use crate::markets::Market;
use crate::properties::Property;
use crate::users::User;

/// A client with the number of markets it owns and the properties reachable
/// through those markets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientWithDetails {
    #[serde(flatten)]
    pub client: Client,
    pub market_count: usize,
    pub property_count: usize,
}

/// A market with its owning client (if it still exists) and property count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketWithDetails {
    #[serde(flatten)]
    pub market: Market,
    pub client: Option<Client>,
    pub property_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketPropertyCount {
    pub market_id: String,
    pub property_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_clients: usize,
    pub total_markets: usize,
    pub total_properties: usize,
    pub total_users: usize,
    pub recent_properties: Vec<Property>,
    pub market_property_counts: Vec<MarketPropertyCount>,
}

/// What happened to a record inside the reporting window.
///
/// `Deleted` is part of the vocabulary but is never produced: the source
/// collections only hold records that still exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

/// Copy of the changed record at the time the feed was built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntitySnapshot {
    Property(Property),
    Market(Market),
    Client(Client),
    User(User),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyChange {
    pub entity_id: String,
    pub entity_type: EntityType,
    pub action: ChangeAction,
    pub entity: EntitySnapshot,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WeeklyChangeCounts {
    pub properties: usize,
    pub markets: usize,
    pub clients: usize,
    pub users: usize,
    pub total: usize,
}

/// Change feed for the trailing window `[window_start, window_end]`,
/// most recent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyUpdates {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub changes: Vec<WeeklyChange>,
    pub counts: WeeklyChangeCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientOverview {
    pub client: Client,
    pub markets: Vec<Market>,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketOverview {
    pub market: Market,
    pub client: Option<Client>,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyOverview {
    pub property: Property,
    pub market: Option<Market>,
    pub client: Option<Client>,
}
