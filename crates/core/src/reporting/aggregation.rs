//! Relationship-aware views built by joining the flat collections in memory.
//!
//! Every function here is pure: counts are recomputed from the snapshots
//! passed in and nothing is cached between calls. Dangling `client_id` /
//! `market_id` references are tolerated and simply drop out of the joins.

use std::collections::{HashMap, HashSet};

use super::reporting_model::{
    ClientWithDetails, DashboardStats, MarketPropertyCount, MarketWithDetails,
};
use crate::clients::Client;
use crate::constants::RECENT_PROPERTIES_LIMIT;
use crate::markets::Market;
use crate::properties::Property;
use crate::users::User;

/// Number of properties per referenced market id.
fn property_counts(properties: &[Property]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for market_id in properties.iter().filter_map(|p| p.market_id.as_deref()) {
        *counts.entry(market_id).or_insert(0) += 1;
    }
    counts
}

/// Attaches market and property counts to every client, preserving the
/// order of `clients`. Clients without markets are kept with zero counts.
pub fn clients_with_details(
    clients: &[Client],
    markets: &[Market],
    properties: &[Property],
) -> Vec<ClientWithDetails> {
    clients
        .iter()
        .map(|client| {
            let owned: Vec<&str> = markets
                .iter()
                .filter(|m| m.client_id.as_deref() == Some(client.id.as_str()))
                .map(|m| m.id.as_str())
                .collect();
            let owned_ids: HashSet<&str> = owned.iter().copied().collect();
            let property_count = properties
                .iter()
                .filter(|p| {
                    p.market_id
                        .as_deref()
                        .is_some_and(|market_id| owned_ids.contains(market_id))
                })
                .count();

            ClientWithDetails {
                client: client.clone(),
                market_count: owned.len(),
                property_count,
            }
        })
        .collect()
}

/// Attaches the owning client (first id match) and property count to every
/// market, preserving the order of `markets`.
pub fn markets_with_details(
    markets: &[Market],
    clients: &[Client],
    properties: &[Property],
) -> Vec<MarketWithDetails> {
    let counts = property_counts(properties);
    markets
        .iter()
        .map(|market| MarketWithDetails {
            market: market.clone(),
            client: market
                .client_id
                .as_deref()
                .and_then(|client_id| clients.iter().find(|c| c.id == client_id))
                .cloned(),
            property_count: counts.get(market.id.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

/// One entry per market, in market order, with its property count.
pub fn count_properties_by_market(
    markets: &[Market],
    properties: &[Property],
) -> Vec<MarketPropertyCount> {
    markets
        .iter()
        .map(|market| MarketPropertyCount {
            market_id: market.id.clone(),
            property_count: properties
                .iter()
                .filter(|p| p.market_id.as_deref() == Some(market.id.as_str()))
                .count(),
        })
        .collect()
}

/// Global totals plus the most recently created properties.
///
/// `recent_properties` orders by `created_at` descending with a stable sort,
/// so it matches the store's ordering when the store sorts newest first and
/// stays correct when it does not.
pub fn dashboard_stats(
    clients: &[Client],
    markets: &[Market],
    properties: &[Property],
    users: &[User],
) -> DashboardStats {
    let mut newest_first: Vec<&Property> = properties.iter().collect();
    newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    DashboardStats {
        total_clients: clients.len(),
        total_markets: markets.len(),
        total_properties: properties.len(),
        total_users: users.len(),
        recent_properties: newest_first
            .into_iter()
            .take(RECENT_PROPERTIES_LIMIT)
            .cloned()
            .collect(),
        market_property_counts: count_properties_by_market(markets, properties),
    }
}
