use log::debug;
use std::sync::Arc;

use super::clients_model::{Client, ClientUpdate, NewClient};
use super::clients_traits::{ClientRepositoryTrait, ClientServiceTrait};
use crate::entity::EntityType;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink, MutationKind};

/// Service for managing clients.
pub struct ClientService {
    repository: Arc<dyn ClientRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ClientService {
    pub fn new(
        repository: Arc<dyn ClientRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }

    fn emit(&self, id: &str, mutation: MutationKind) {
        self.event_sink
            .emit(DomainEvent::changed(EntityType::Client, id, mutation));
    }
}

#[async_trait::async_trait]
impl ClientServiceTrait for ClientService {
    async fn get_clients(&self) -> Result<Vec<Client>> {
        self.repository.list().await
    }

    async fn get_client(&self, client_id: &str) -> Result<Client> {
        self.repository.get_by_id(client_id).await
    }

    async fn create_client(&self, new_client: NewClient) -> Result<Client> {
        new_client.validate()?;
        debug!("Creating client '{}'", new_client.name);
        let client = self.repository.create(new_client).await?;
        self.emit(&client.id, MutationKind::Created);
        Ok(client)
    }

    async fn update_client(&self, client_update: ClientUpdate) -> Result<Client> {
        client_update.validate()?;
        let client = self.repository.update(client_update).await?;
        self.emit(&client.id, MutationKind::Updated);
        Ok(client)
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        let deleted = self.repository.delete(client_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Client {}", client_id)));
        }
        debug!("Deleted client {}", client_id);
        self.emit(client_id, MutationKind::Deleted);
        Ok(())
    }
}
