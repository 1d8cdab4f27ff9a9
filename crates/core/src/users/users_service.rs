use log::debug;
use std::sync::Arc;

use super::users_model::{NewUser, User, UserUpdate};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::entity::EntityType;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink, MutationKind};

/// Service for managing users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }

    fn emit(&self, id: &str, mutation: MutationKind) {
        self.event_sink
            .emit(DomainEvent::changed(EntityType::User, id, mutation));
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn get_users(&self) -> Result<Vec<User>> {
        self.repository.list().await
    }

    async fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id).await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let user = self.repository.create(new_user).await?;
        debug!("Created user {} ({})", user.id, user.display_name());
        self.emit(&user.id, MutationKind::Created);
        Ok(user)
    }

    async fn update_user(&self, user_update: UserUpdate) -> Result<User> {
        user_update.validate()?;
        let user = self.repository.update(user_update).await?;
        self.emit(&user.id, MutationKind::Updated);
        Ok(user)
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        let deleted = self.repository.delete(user_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("User {}", user_id)));
        }
        self.emit(user_id, MutationKind::Deleted);
        Ok(())
    }
}
