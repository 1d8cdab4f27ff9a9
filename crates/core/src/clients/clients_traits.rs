//! Client repository and service traits.
//!
//! These traits define the contract for client operations without any
//! store-specific types, allowing the hosted backend and the local SQLite
//! store to be swapped.

use async_trait::async_trait;

use super::clients_model::{Client, ClientUpdate, NewClient};
use crate::errors::Result;

/// Trait defining the contract for Client repository operations.
#[async_trait]
pub trait ClientRepositoryTrait: Send + Sync {
    /// Lists every client, ordered by name.
    async fn list(&self) -> Result<Vec<Client>>;

    /// Retrieves a client by its ID.
    async fn get_by_id(&self, client_id: &str) -> Result<Client>;

    async fn create(&self, new_client: NewClient) -> Result<Client>;

    async fn update(&self, client_update: ClientUpdate) -> Result<Client>;

    /// Deletes a client by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, client_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Client service operations.
#[async_trait]
pub trait ClientServiceTrait: Send + Sync {
    async fn get_clients(&self) -> Result<Vec<Client>>;

    async fn get_client(&self, client_id: &str) -> Result<Client>;

    /// Creates a new client with business validation.
    async fn create_client(&self, new_client: NewClient) -> Result<Client>;

    /// Applies a partial update with business validation.
    async fn update_client(&self, client_update: ClientUpdate) -> Result<Client>;

    async fn delete_client(&self, client_id: &str) -> Result<()>;
}
