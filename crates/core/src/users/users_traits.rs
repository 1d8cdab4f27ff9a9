use async_trait::async_trait;

use super::users_model::{NewUser, User, UserUpdate};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Lists every user, ordered by full name.
    async fn list(&self) -> Result<Vec<User>>;
    async fn get_by_id(&self, user_id: &str) -> Result<User>;
    async fn create(&self, new_user: NewUser) -> Result<User>;
    async fn update(&self, user_update: UserUpdate) -> Result<User>;
    /// Returns the number of deleted records.
    async fn delete(&self, user_id: &str) -> Result<usize>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get_users(&self) -> Result<Vec<User>>;
    async fn get_user(&self, user_id: &str) -> Result<User>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    async fn update_user(&self, user_update: UserUpdate) -> Result<User>;
    async fn delete_user(&self, user_id: &str) -> Result<()>;
}
