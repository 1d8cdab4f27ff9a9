use log::debug;
use std::sync::Arc;

use super::markets_model::{Market, MarketUpdate, NewMarket};
use super::markets_traits::{MarketRepositoryTrait, MarketServiceTrait};
use crate::entity::EntityType;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink, MutationKind};

/// Service for managing markets.
pub struct MarketService {
    repository: Arc<dyn MarketRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl MarketService {
    pub fn new(
        repository: Arc<dyn MarketRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }

    fn emit(&self, id: &str, mutation: MutationKind) {
        self.event_sink
            .emit(DomainEvent::changed(EntityType::Market, id, mutation));
    }
}

#[async_trait::async_trait]
impl MarketServiceTrait for MarketService {
    async fn get_markets(&self) -> Result<Vec<Market>> {
        self.repository.list().await
    }

    async fn get_markets_by_client(&self, client_id: &str) -> Result<Vec<Market>> {
        self.repository.list_by_client(client_id).await
    }

    async fn get_market(&self, market_id: &str) -> Result<Market> {
        self.repository.get_by_id(market_id).await
    }

    async fn create_market(&self, new_market: NewMarket) -> Result<Market> {
        new_market.validate()?;
        debug!(
            "Creating market '{}' for client {:?}",
            new_market.name, new_market.client_id
        );
        let market = self.repository.create(new_market).await?;
        self.emit(&market.id, MutationKind::Created);
        Ok(market)
    }

    async fn update_market(&self, market_update: MarketUpdate) -> Result<Market> {
        market_update.validate()?;
        let market = self.repository.update(market_update).await?;
        self.emit(&market.id, MutationKind::Updated);
        Ok(market)
    }

    /// Deletes a market. Removal of the market's properties is left to the
    /// store; properties that survive simply become orphans.
    async fn delete_market(&self, market_id: &str) -> Result<()> {
        let deleted = self.repository.delete(market_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Market {}", market_id)));
        }
        self.emit(market_id, MutationKind::Deleted);
        Ok(())
    }
}
