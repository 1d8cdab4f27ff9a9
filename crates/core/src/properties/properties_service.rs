use log::debug;
use std::sync::Arc;

use super::properties_model::{NewProperty, Property, PropertyUpdate};
use super::properties_traits::{PropertyRepositoryTrait, PropertyServiceTrait};
use crate::entity::EntityType;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink, MutationKind};

/// Service for managing properties.
pub struct PropertyService {
    repository: Arc<dyn PropertyRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl PropertyService {
    pub fn new(
        repository: Arc<dyn PropertyRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }

    fn emit(&self, id: &str, mutation: MutationKind) {
        self.event_sink
            .emit(DomainEvent::changed(EntityType::Property, id, mutation));
    }
}

#[async_trait::async_trait]
impl PropertyServiceTrait for PropertyService {
    async fn get_properties(&self) -> Result<Vec<Property>> {
        self.repository.list().await
    }

    async fn get_properties_by_market(&self, market_id: &str) -> Result<Vec<Property>> {
        self.repository.list_by_market(market_id).await
    }

    async fn get_property(&self, property_id: &str) -> Result<Property> {
        self.repository.get_by_id(property_id).await
    }

    async fn create_property(&self, new_property: NewProperty) -> Result<Property> {
        new_property.validate()?;
        debug!(
            "Creating property in market {:?} (phase {})",
            new_property.market_id, new_property.phase
        );
        let property = self.repository.create(new_property).await?;
        self.emit(&property.id, MutationKind::Created);
        Ok(property)
    }

    async fn update_property(&self, property_update: PropertyUpdate) -> Result<Property> {
        property_update.validate()?;
        let property = self.repository.update(property_update).await?;
        self.emit(&property.id, MutationKind::Updated);
        Ok(property)
    }

    async fn delete_property(&self, property_id: &str) -> Result<()> {
        let deleted = self.repository.delete(property_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Property {}", property_id)));
        }
        self.emit(property_id, MutationKind::Deleted);
        Ok(())
    }
}
