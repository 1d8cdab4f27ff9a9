use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::reporting_model::{
    ClientOverview, ClientWithDetails, DashboardStats, MarketOverview, MarketWithDetails,
    PropertyOverview, WeeklyUpdates,
};
use crate::errors::Result;
use crate::properties::MapPoint;

/// Read-only views derived from the four entity collections.
///
/// Each call takes a fresh snapshot of the collections it needs. When any
/// underlying fetch fails the whole call fails; partial views are never
/// returned.
#[async_trait]
pub trait ReportingServiceTrait: Send + Sync {
    async fn get_clients_with_details(&self) -> Result<Vec<ClientWithDetails>>;

    async fn get_markets_with_details(&self) -> Result<Vec<MarketWithDetails>>;

    async fn get_dashboard_stats(&self) -> Result<DashboardStats>;

    /// Change feed for the seven days ending at `now`.
    async fn get_weekly_updates(&self, now: DateTime<Utc>) -> Result<WeeklyUpdates>;

    /// Returns `None` when the client does not exist.
    async fn get_client_overview(&self, client_id: &str) -> Result<Option<ClientOverview>>;

    async fn get_market_overview(&self, market_id: &str) -> Result<Option<MarketOverview>>;

    async fn get_property_overview(&self, property_id: &str) -> Result<Option<PropertyOverview>>;

    async fn get_map_points(&self) -> Result<Vec<MapPoint>>;
}
