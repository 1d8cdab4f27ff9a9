use async_trait::async_trait;

use super::markets_model::{Market, MarketUpdate, NewMarket};
use crate::errors::Result;

/// Trait defining the contract for Market repository operations.
#[async_trait]
pub trait MarketRepositoryTrait: Send + Sync {
    /// Lists every market, ordered by name.
    async fn list(&self) -> Result<Vec<Market>>;

    /// Lists the markets owned by one client, ordered by name.
    async fn list_by_client(&self, client_id: &str) -> Result<Vec<Market>>;

    async fn get_by_id(&self, market_id: &str) -> Result<Market>;

    async fn create(&self, new_market: NewMarket) -> Result<Market>;

    async fn update(&self, market_update: MarketUpdate) -> Result<Market>;

    /// Returns the number of deleted records.
    async fn delete(&self, market_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Market service operations.
#[async_trait]
pub trait MarketServiceTrait: Send + Sync {
    async fn get_markets(&self) -> Result<Vec<Market>>;
    async fn get_markets_by_client(&self, client_id: &str) -> Result<Vec<Market>>;
    async fn get_market(&self, market_id: &str) -> Result<Market>;
    async fn create_market(&self, new_market: NewMarket) -> Result<Market>;
    async fn update_market(&self, market_update: MarketUpdate) -> Result<Market>;
    async fn delete_market(&self, market_id: &str) -> Result<()>;
}
