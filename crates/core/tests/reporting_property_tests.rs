//! Property-based integration tests for the reporting views.
//!
//! These tests verify that the aggregation and change-feed rules hold across
//! randomly generated collections, using the `proptest` crate.

use chrono::{DateTime, Duration, TimeZone, Utc};
use franchise_crm_core::clients::Client;
use franchise_crm_core::entity::{EntityType, Timestamped};
use franchise_crm_core::markets::Market;
use franchise_crm_core::properties::Property;
use franchise_crm_core::reporting::{
    clients_with_details, count_properties_by_market, dashboard_stats, markets_with_details,
    weekly_updates, ChangeAction,
};
use franchise_crm_core::users::User;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// =============================================================================
// Generators
// =============================================================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap()
}

/// Created/updated pair, both within 20 days of `now`, updated never before created.
fn arb_timestamps() -> impl Strategy<Value = (DateTime<Utc>, DateTime<Utc>)> {
    (0i64..20 * 24, 0i64..20 * 24).prop_map(|(created_hours_ago, delta)| {
        let created = now() - Duration::hours(created_hours_ago);
        let updated = (created + Duration::hours(delta)).min(now());
        (created, updated)
    })
}

/// Ids drawn from a small pool so references sometimes dangle.
fn arb_ref(prefix: &'static str) -> impl Strategy<Value = Option<String>> {
    proptest::option::of((0u8..6).prop_map(move |n| format!("{}{}", prefix, n)))
}

fn arb_clients() -> impl Strategy<Value = Vec<Client>> {
    proptest::collection::vec(arb_timestamps(), 0..5).prop_map(|stamps| {
        stamps
            .into_iter()
            .enumerate()
            .map(|(i, (created_at, updated_at))| Client {
                id: format!("c{}", i),
                name: format!("Client {}", i),
                created_at,
                updated_at,
                ..Default::default()
            })
            .collect()
    })
}

fn arb_markets() -> impl Strategy<Value = Vec<Market>> {
    proptest::collection::vec((arb_ref("c"), arb_timestamps()), 0..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (client_id, (created_at, updated_at)))| Market {
                id: format!("m{}", i),
                client_id,
                name: format!("Market {}", i),
                created_at,
                updated_at,
                ..Default::default()
            })
            .collect()
    })
}

fn arb_properties() -> impl Strategy<Value = Vec<Property>> {
    proptest::collection::vec((arb_ref("m"), arb_timestamps()), 0..20).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (market_id, (created_at, updated_at)))| Property {
                id: format!("p{}", i),
                market_id,
                created_at,
                updated_at,
                ..Default::default()
            })
            .collect()
    })
}

fn arb_users() -> impl Strategy<Value = Vec<User>> {
    proptest::collection::vec(arb_timestamps(), 0..5).prop_map(|stamps| {
        stamps
            .into_iter()
            .enumerate()
            .map(|(i, (created_at, updated_at))| User {
                id: format!("u{}", i),
                created_at,
                updated_at,
                ..Default::default()
            })
            .collect()
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Per-client property counts sum to the properties whose market is
    /// owned by an existing client.
    #[test]
    fn prop_client_counts_partition_reachable_properties(
        clients in arb_clients(),
        markets in arb_markets(),
        properties in arb_properties(),
    ) {
        let details = clients_with_details(&clients, &markets, &properties);
        prop_assert_eq!(details.len(), clients.len());

        let client_ids: HashSet<&str> = clients.iter().map(|c| c.id.as_str()).collect();
        let owned_markets: HashSet<&str> = markets
            .iter()
            .filter(|m| m.client_id.as_deref().is_some_and(|id| client_ids.contains(id)))
            .map(|m| m.id.as_str())
            .collect();
        let reachable = properties
            .iter()
            .filter(|p| p.market_id.as_deref().is_some_and(|id| owned_markets.contains(id)))
            .count();

        let total: usize = details.iter().map(|d| d.property_count).sum();
        prop_assert_eq!(total, reachable);
        let market_total: usize = details.iter().map(|d| d.market_count).sum();
        prop_assert_eq!(market_total, owned_markets.len());
    }

    /// The two market count paths always agree, market by market.
    #[test]
    fn prop_market_counts_agree(
        clients in arb_clients(),
        markets in arb_markets(),
        properties in arb_properties(),
    ) {
        let detailed = markets_with_details(&markets, &clients, &properties);
        let counted = count_properties_by_market(&markets, &properties);

        prop_assert_eq!(detailed.len(), counted.len());
        for (d, c) in detailed.iter().zip(counted.iter()) {
            prop_assert_eq!(&d.market.id, &c.market_id);
            prop_assert_eq!(d.property_count, c.property_count);
        }
    }

    /// Dashboard totals are collection lengths and recent properties are the
    /// newest ones, at most five.
    #[test]
    fn prop_dashboard_stats_are_consistent(
        clients in arb_clients(),
        markets in arb_markets(),
        properties in arb_properties(),
        users in arb_users(),
    ) {
        let stats = dashboard_stats(&clients, &markets, &properties, &users);

        prop_assert_eq!(stats.total_clients, clients.len());
        prop_assert_eq!(stats.total_markets, markets.len());
        prop_assert_eq!(stats.total_properties, properties.len());
        prop_assert_eq!(stats.total_users, users.len());
        prop_assert_eq!(stats.recent_properties.len(), properties.len().min(5));
        prop_assert!(stats
            .recent_properties
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
        if let Some(oldest_recent) = stats.recent_properties.last() {
            let newer_outside = properties
                .iter()
                .filter(|p| p.created_at > oldest_recent.created_at)
                .count();
            prop_assert!(newer_outside < 5);
        }
    }

    /// Every record appears at most once, with an action consistent with its
    /// timestamps, and the feed is ordered newest first.
    #[test]
    fn prop_weekly_feed_classifies_each_record_once(
        clients in arb_clients(),
        markets in arb_markets(),
        properties in arb_properties(),
        users in arb_users(),
    ) {
        let updates = weekly_updates(&clients, &markets, &properties, &users, now());
        let start = updates.window_start;
        prop_assert_eq!(start, now() - Duration::days(7));

        let mut created: HashMap<(EntityType, &str), DateTime<Utc>> = HashMap::new();
        created.extend(clients.iter().map(|r| ((EntityType::Client, r.id()), r.created_at())));
        created.extend(markets.iter().map(|r| ((EntityType::Market, r.id()), r.created_at())));
        created.extend(properties.iter().map(|r| ((EntityType::Property, r.id()), r.created_at())));
        created.extend(users.iter().map(|r| ((EntityType::User, r.id()), r.created_at())));

        let mut seen = HashSet::new();
        for change in &updates.changes {
            prop_assert!(seen.insert((change.entity_type, change.entity_id.clone())));
            prop_assert!(change.timestamp >= start);
            prop_assert!(change.action != ChangeAction::Deleted);

            let created_at = created.get(&(change.entity_type, change.entity_id.as_str()));
            prop_assert!(created_at.is_some());
            if created_at.is_some_and(|at| *at >= start) {
                prop_assert_eq!(change.action, ChangeAction::Created);
            } else {
                prop_assert_eq!(change.action, ChangeAction::Updated);
            }
        }
        prop_assert!(updates
            .changes
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));

        let expected_properties = properties
            .iter()
            .filter(|p| p.created_at >= start || (p.updated_at >= start && p.updated_at > p.created_at))
            .count();
        prop_assert_eq!(updates.counts.properties, expected_properties);
        prop_assert_eq!(
            updates.counts.total,
            updates.counts.properties + updates.counts.markets + updates.counts.clients + updates.counts.users
        );
        prop_assert_eq!(updates.counts.total, updates.changes.len());
    }

    /// Aggregations are pure: the same collections give the same views.
    #[test]
    fn prop_aggregations_are_idempotent(
        clients in arb_clients(),
        markets in arb_markets(),
        properties in arb_properties(),
        users in arb_users(),
    ) {
        prop_assert_eq!(
            clients_with_details(&clients, &markets, &properties),
            clients_with_details(&clients, &markets, &properties)
        );
        prop_assert_eq!(
            markets_with_details(&markets, &clients, &properties),
            markets_with_details(&markets, &clients, &properties)
        );
        prop_assert_eq!(
            weekly_updates(&clients, &markets, &properties, &users, now()),
            weekly_updates(&clients, &markets, &properties, &users, now())
        );
    }
}
