use async_trait::async_trait;

use super::properties_model::{NewProperty, Property, PropertyUpdate};
use crate::errors::Result;

/// Trait defining the contract for Property repository operations.
#[async_trait]
pub trait PropertyRepositoryTrait: Send + Sync {
    /// Lists every property, newest first (created_at descending).
    async fn list(&self) -> Result<Vec<Property>>;

    /// Lists the properties of one market, newest first.
    async fn list_by_market(&self, market_id: &str) -> Result<Vec<Property>>;

    async fn get_by_id(&self, property_id: &str) -> Result<Property>;

    async fn create(&self, new_property: NewProperty) -> Result<Property>;

    async fn update(&self, property_update: PropertyUpdate) -> Result<Property>;

    /// Returns the number of deleted records.
    async fn delete(&self, property_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Property service operations.
#[async_trait]
pub trait PropertyServiceTrait: Send + Sync {
    async fn get_properties(&self) -> Result<Vec<Property>>;
    async fn get_properties_by_market(&self, market_id: &str) -> Result<Vec<Property>>;
    async fn get_property(&self, property_id: &str) -> Result<Property>;
    async fn create_property(&self, new_property: NewProperty) -> Result<Property>;
    async fn update_property(&self, property_update: PropertyUpdate) -> Result<Property>;
    async fn delete_property(&self, property_id: &str) -> Result<()>;
}
