use futures::try_join;
use log::{debug, error};
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::aggregation::{clients_with_details, dashboard_stats, markets_with_details};
use super::reporting_model::{
    ClientOverview, ClientWithDetails, DashboardStats, MarketOverview, MarketWithDetails,
    PropertyOverview, WeeklyUpdates,
};
use super::reporting_traits::ReportingServiceTrait;
use super::weekly_updates::weekly_updates;
use crate::clients::{Client, ClientRepositoryTrait};
use crate::errors::Result;
use crate::markets::MarketRepositoryTrait;
use crate::properties::{map_points, MapPoint, PropertyRepositoryTrait};
use crate::users::UserRepositoryTrait;

/// Turns a `NotFound` lookup into `None`, leaving other failures intact.
fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn log_failure<T>(view: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        error!("Failed to build {}: {}", view, e);
    }
    result
}

/// Builds derived views by reading the collections through the repositories.
pub struct ReportingService {
    client_repository: Arc<dyn ClientRepositoryTrait>,
    market_repository: Arc<dyn MarketRepositoryTrait>,
    property_repository: Arc<dyn PropertyRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl ReportingService {
    pub fn new(
        client_repository: Arc<dyn ClientRepositoryTrait>,
        market_repository: Arc<dyn MarketRepositoryTrait>,
        property_repository: Arc<dyn PropertyRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self {
            client_repository,
            market_repository,
            property_repository,
            user_repository,
        }
    }

    async fn optional_client(&self, client_id: Option<&str>) -> Result<Option<Client>> {
        match client_id {
            Some(id) => optional(self.client_repository.get_by_id(id).await),
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl ReportingServiceTrait for ReportingService {
    async fn get_clients_with_details(&self) -> Result<Vec<ClientWithDetails>> {
        let fetched = try_join!(
            self.client_repository.list(),
            self.market_repository.list(),
            self.property_repository.list(),
        );
        let (clients, markets, properties) = log_failure("client details", fetched)?;
        Ok(clients_with_details(&clients, &markets, &properties))
    }

    async fn get_markets_with_details(&self) -> Result<Vec<MarketWithDetails>> {
        let fetched = try_join!(
            self.market_repository.list(),
            self.client_repository.list(),
            self.property_repository.list(),
        );
        let (markets, clients, properties) = log_failure("market details", fetched)?;
        Ok(markets_with_details(&markets, &clients, &properties))
    }

    async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        let fetched = try_join!(
            self.client_repository.list(),
            self.market_repository.list(),
            self.property_repository.list(),
            self.user_repository.list(),
        );
        let (clients, markets, properties, users) = log_failure("dashboard stats", fetched)?;
        Ok(dashboard_stats(&clients, &markets, &properties, &users))
    }

    async fn get_weekly_updates(&self, now: DateTime<Utc>) -> Result<WeeklyUpdates> {
        let fetched = try_join!(
            self.client_repository.list(),
            self.market_repository.list(),
            self.property_repository.list(),
            self.user_repository.list(),
        );
        let (clients, markets, properties, users) = log_failure("weekly updates", fetched)?;
        let updates = weekly_updates(&clients, &markets, &properties, &users, now);
        debug!(
            "Weekly updates since {}: {} changes",
            updates.window_start, updates.counts.total
        );
        Ok(updates)
    }

    async fn get_client_overview(&self, client_id: &str) -> Result<Option<ClientOverview>> {
        let Some(client) = optional(self.client_repository.get_by_id(client_id).await)? else {
            return Ok(None);
        };
        let fetched = try_join!(
            self.market_repository.list_by_client(client_id),
            self.property_repository.list(),
        );
        let (markets, properties) = log_failure("client overview", fetched)?;

        let market_ids: HashSet<&str> = markets.iter().map(|m| m.id.as_str()).collect();
        let properties = properties
            .into_iter()
            .filter(|p| {
                p.market_id
                    .as_deref()
                    .is_some_and(|market_id| market_ids.contains(market_id))
            })
            .collect();

        Ok(Some(ClientOverview {
            client,
            markets,
            properties,
        }))
    }

    async fn get_market_overview(&self, market_id: &str) -> Result<Option<MarketOverview>> {
        let Some(market) = optional(self.market_repository.get_by_id(market_id).await)? else {
            return Ok(None);
        };
        let fetched = try_join!(
            self.optional_client(market.client_id.as_deref()),
            self.property_repository.list_by_market(market_id),
        );
        let (client, properties) = log_failure("market overview", fetched)?;

        Ok(Some(MarketOverview {
            market,
            client,
            properties,
        }))
    }

    async fn get_property_overview(&self, property_id: &str) -> Result<Option<PropertyOverview>> {
        let Some(property) = optional(self.property_repository.get_by_id(property_id).await)?
        else {
            return Ok(None);
        };
        let market = match property.market_id.as_deref() {
            Some(id) => optional(self.market_repository.get_by_id(id).await)?,
            None => None,
        };
        let client = self
            .optional_client(market.as_ref().and_then(|m| m.client_id.as_deref()))
            .await?;

        Ok(Some(PropertyOverview {
            property,
            market,
            client,
        }))
    }

    async fn get_map_points(&self) -> Result<Vec<MapPoint>> {
        let properties = log_failure("map points", self.property_repository.list().await)?;
        Ok(map_points(&properties))
    }
}
