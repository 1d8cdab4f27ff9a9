//! Change-window reporter: a synthesized feed of records created or updated
//! inside a trailing window.
//!
//! Classification per record, with `start = now - 7 days`:
//! - `created_at >= start` → `Created` at `created_at`
//! - else `updated_at >= start && updated_at > created_at` → `Updated` at `updated_at`
//! - else nothing
//!
//! A record therefore appears at most once, and a record created inside the
//! window is never reported as updated.

use chrono::{DateTime, Utc};

use super::reporting_model::{
    ChangeAction, EntitySnapshot, WeeklyChange, WeeklyChangeCounts, WeeklyUpdates,
};
use crate::clients::Client;
use crate::constants::WEEKLY_WINDOW_DAYS;
use crate::entity::{EntityType, Timestamped};
use crate::markets::Market;
use crate::properties::Property;
use crate::users::User;
use crate::utils::time_utils::{is_within_window, window_start};

/// A record that can appear in the change feed.
trait Reportable: Timestamped {
    fn feed_name(&self) -> &str;
    fn snapshot(&self) -> EntitySnapshot;
}

impl Reportable for Property {
    fn feed_name(&self) -> &str {
        self.display_name()
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot::Property(self.clone())
    }
}

impl Reportable for Market {
    fn feed_name(&self) -> &str {
        &self.name
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot::Market(self.clone())
    }
}

impl Reportable for Client {
    fn feed_name(&self) -> &str {
        &self.name
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot::Client(self.clone())
    }
}

impl Reportable for User {
    fn feed_name(&self) -> &str {
        self.display_name()
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot::User(self.clone())
    }
}

/// Decides whether a record changed inside the window, and how.
pub fn classify<T: Timestamped>(
    entity: &T,
    start: DateTime<Utc>,
) -> Option<(ChangeAction, DateTime<Utc>)> {
    let created = entity.created_at();
    let updated = entity.updated_at();
    if is_within_window(created, start) {
        Some((ChangeAction::Created, created))
    } else if is_within_window(updated, start) && updated > created {
        Some((ChangeAction::Updated, updated))
    } else {
        None
    }
}

/// Feed text such as "New property: Midtown Flagship" or "Client updated: Acme".
pub fn describe(entity_type: EntityType, action: ChangeAction, name: &str) -> String {
    let noun = entity_type.as_str();
    match action {
        ChangeAction::Created => format!("New {}: {}", noun, name),
        ChangeAction::Updated => format!("{} updated: {}", capitalize(noun), name),
        ChangeAction::Deleted => format!("{} deleted: {}", capitalize(noun), name),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn collect_changes<T: Reportable>(
    entities: &[T],
    start: DateTime<Utc>,
    out: &mut Vec<WeeklyChange>,
) {
    out.extend(entities.iter().filter_map(|entity| {
        let (action, timestamp) = classify(entity, start)?;
        Some(WeeklyChange {
            entity_id: entity.id().to_string(),
            entity_type: T::ENTITY_TYPE,
            action,
            entity: entity.snapshot(),
            timestamp,
            description: describe(T::ENTITY_TYPE, action, entity.feed_name()),
        })
    }));
}

/// Builds the merged change feed for the seven days ending at `now`.
pub fn weekly_updates(
    clients: &[Client],
    markets: &[Market],
    properties: &[Property],
    users: &[User],
    now: DateTime<Utc>,
) -> WeeklyUpdates {
    let start = window_start(now, WEEKLY_WINDOW_DAYS);

    let mut changes = Vec::new();
    collect_changes(properties, start, &mut changes);
    collect_changes(markets, start, &mut changes);
    collect_changes(clients, start, &mut changes);
    collect_changes(users, start, &mut changes);

    // Stable: equal timestamps keep concatenation order.
    changes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let count_of = |entity_type: EntityType| {
        changes
            .iter()
            .filter(|c| c.entity_type == entity_type)
            .count()
    };
    let counts = WeeklyChangeCounts {
        properties: count_of(EntityType::Property),
        markets: count_of(EntityType::Market),
        clients: count_of(EntityType::Client),
        users: count_of(EntityType::User),
        total: changes.len(),
    };

    WeeklyUpdates {
        window_start: start,
        window_end: now,
        changes,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap()
    }

    fn property(id: &str, created: DateTime<Utc>, updated: DateTime<Utc>) -> Property {
        Property {
            id: id.to_string(),
            title: Some(format!("Site {}", id)),
            created_at: created,
            updated_at: updated,
            ..Default::default()
        }
    }

    #[test]
    fn test_recent_creation_is_reported_once_as_created() {
        let at = Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap();
        let updates = weekly_updates(&[], &[], &[property("p1", at, at)], &[], now());

        assert_eq!(updates.changes.len(), 1);
        let change = &updates.changes[0];
        assert_eq!(change.action, ChangeAction::Created);
        assert_eq!(change.timestamp, at);
        assert_eq!(change.description, "New property: Site p1");
        assert_eq!(updates.counts.properties, 1);
        assert_eq!(updates.counts.total, 1);
    }

    #[test]
    fn test_created_wins_over_updated_inside_window() {
        let created = now() - Duration::days(3);
        let updated = now() - Duration::hours(1);
        let updates = weekly_updates(&[], &[], &[property("p1", created, updated)], &[], now());

        assert_eq!(updates.changes.len(), 1);
        assert_eq!(updates.changes[0].action, ChangeAction::Created);
        assert_eq!(updates.changes[0].timestamp, created);
    }

    #[test]
    fn test_old_record_updated_recently_is_reported_as_updated() {
        let created = now() - Duration::days(40);
        let updated = now() - Duration::days(2);
        let market = Market {
            id: "m1".to_string(),
            name: "Austin Metro".to_string(),
            created_at: created,
            updated_at: updated,
            ..Default::default()
        };
        let updates = weekly_updates(&[], &[market], &[], &[], now());

        assert_eq!(updates.changes.len(), 1);
        assert_eq!(updates.changes[0].action, ChangeAction::Updated);
        assert_eq!(updates.changes[0].description, "Market updated: Austin Metro");
        assert_eq!(updates.counts.markets, 1);
    }

    #[test]
    fn test_window_lower_bound_is_inclusive() {
        let start = now() - Duration::days(7);
        let inside = property("edge", start, start);
        let outside = property(
            "late",
            start - Duration::seconds(1),
            start - Duration::seconds(1),
        );
        let updates = weekly_updates(&[], &[], &[inside, outside], &[], now());

        let ids: Vec<&str> = updates.changes.iter().map(|c| c.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["edge"]);
        assert_eq!(updates.window_start, start);
        assert_eq!(updates.window_end, now());
    }

    #[test]
    fn test_never_modified_old_record_is_omitted() {
        let old = now() - Duration::days(30);
        assert!(classify(&property("p1", old, old), now() - Duration::days(7)).is_none());
    }

    #[test]
    fn test_feed_is_merged_newest_first_with_stable_ties() {
        let tie = now() - Duration::days(1);
        let client = Client {
            id: "c1".to_string(),
            name: "Acme".to_string(),
            created_at: tie,
            updated_at: tie,
            ..Default::default()
        };
        let user = User {
            id: "u1".to_string(),
            created_at: now() - Duration::hours(2),
            updated_at: now() - Duration::hours(2),
            ..Default::default()
        };
        let properties = vec![property("p1", tie, tie), property("p2", now() - Duration::days(5), now() - Duration::days(5))];

        let updates = weekly_updates(&[client], &[], &properties, &[user], now());
        let ids: Vec<&str> = updates.changes.iter().map(|c| c.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "p1", "c1", "p2"]);
        assert_eq!(updates.changes[0].description, "New user: Unnamed User");
        assert_eq!(updates.changes[2].description, "New client: Acme");
        assert_eq!(
            updates.counts,
            WeeklyChangeCounts {
                properties: 2,
                markets: 0,
                clients: 1,
                users: 1,
                total: 4,
            }
        );
    }

    #[test]
    fn test_describe_variants() {
        assert_eq!(
            describe(EntityType::User, ChangeAction::Updated, "Dana"),
            "User updated: Dana"
        );
        assert_eq!(
            describe(EntityType::Property, ChangeAction::Deleted, "Untitled Property"),
            "Property deleted: Untitled Property"
        );
    }
}
