//! Repository implementations over the PostgREST client.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use franchise_crm_core::clients::{Client, ClientRepositoryTrait, ClientUpdate, NewClient};
use franchise_crm_core::entity::EntityType;
use franchise_crm_core::errors::{Error, Result, ValidationError};
use franchise_crm_core::markets::{Market, MarketRepositoryTrait, MarketUpdate, NewMarket};
use franchise_crm_core::properties::{
    NewProperty, Property, PropertyRepositoryTrait, PropertyUpdate,
};
use franchise_crm_core::users::{NewUser, User, UserRepositoryTrait, UserUpdate};

use crate::client::{Order, PostgrestClient, Query};

/// PATCH body for a partial update, stamped with the modification time.
fn patch_body<T: Serialize>(update: &T) -> Result<Value> {
    let mut body = serde_json::to_value(update)?;
    match body.as_object_mut() {
        Some(fields) => {
            fields.insert(
                "updated_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
            Ok(body)
        }
        None => Err(Error::Unexpected("Update did not serialize to an object".to_string())),
    }
}

fn required_id(id: Option<&str>, what: &str) -> Result<String> {
    id.filter(|id| !id.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ValidationError::InvalidInput(format!("{} ID is required for updates", what)).into()
        })
}

/// Generic CRUD over one PostgREST collection.
#[derive(Debug, Clone)]
struct Collection {
    client: PostgrestClient,
    entity_type: EntityType,
}

impl Collection {
    fn table(&self) -> &'static str {
        self.entity_type.collection()
    }

    fn not_found(&self, id: &str) -> Error {
        Error::not_found(format!("{} {}", self.entity_type, id))
    }

    async fn list<T: serde::de::DeserializeOwned>(&self, query: Query) -> Result<Vec<T>> {
        Ok(self.client.select(self.table(), &query).await?)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, id: &str) -> Result<T> {
        self.client
            .select_by_id(self.table(), id)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    async fn create<B: Serialize, T: serde::de::DeserializeOwned>(&self, body: &B) -> Result<T> {
        Ok(self.client.insert(self.table(), body).await?)
    }

    async fn update<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        id: &str,
        update: &B,
    ) -> Result<T> {
        let body = patch_body(update)?;
        self.client
            .update_by_id(self.table(), id, &body)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    async fn delete(&self, id: &str) -> Result<usize> {
        Ok(self.client.delete_by_id(self.table(), id).await?)
    }
}

macro_rules! remote_repository {
    ($name:ident, $entity:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            collection: Collection,
        }

        impl $name {
            pub fn new(client: PostgrestClient) -> Self {
                Self {
                    collection: Collection {
                        client,
                        entity_type: $entity,
                    },
                }
            }
        }
    };
}

remote_repository!(SupabaseClientRepository, EntityType::Client);
remote_repository!(SupabaseMarketRepository, EntityType::Market);
remote_repository!(SupabasePropertyRepository, EntityType::Property);
remote_repository!(SupabaseUserRepository, EntityType::User);

#[async_trait]
impl ClientRepositoryTrait for SupabaseClientRepository {
    async fn list(&self) -> Result<Vec<Client>> {
        self.collection
            .list(Query::new().order("name", Order::Asc))
            .await
    }

    async fn get_by_id(&self, client_id: &str) -> Result<Client> {
        self.collection.get(client_id).await
    }

    async fn create(&self, new_client: NewClient) -> Result<Client> {
        self.collection.create(&new_client).await
    }

    async fn update(&self, client_update: ClientUpdate) -> Result<Client> {
        let id = required_id(client_update.id.as_deref(), "Client")?;
        self.collection.update(&id, &client_update).await
    }

    async fn delete(&self, client_id: &str) -> Result<usize> {
        self.collection.delete(client_id).await
    }
}

#[async_trait]
impl MarketRepositoryTrait for SupabaseMarketRepository {
    async fn list(&self) -> Result<Vec<Market>> {
        self.collection
            .list(Query::new().order("name", Order::Asc))
            .await
    }

    async fn list_by_client(&self, client_id: &str) -> Result<Vec<Market>> {
        self.collection
            .list(
                Query::new()
                    .eq("client_id", client_id)
                    .order("name", Order::Asc),
            )
            .await
    }

    async fn get_by_id(&self, market_id: &str) -> Result<Market> {
        self.collection.get(market_id).await
    }

    async fn create(&self, new_market: NewMarket) -> Result<Market> {
        self.collection.create(&new_market).await
    }

    async fn update(&self, market_update: MarketUpdate) -> Result<Market> {
        let id = required_id(market_update.id.as_deref(), "Market")?;
        self.collection.update(&id, &market_update).await
    }

    async fn delete(&self, market_id: &str) -> Result<usize> {
        self.collection.delete(market_id).await
    }
}

#[async_trait]
impl PropertyRepositoryTrait for SupabasePropertyRepository {
    async fn list(&self) -> Result<Vec<Property>> {
        self.collection
            .list(Query::new().order("created_at", Order::Desc))
            .await
    }

    async fn list_by_market(&self, market_id: &str) -> Result<Vec<Property>> {
        self.collection
            .list(
                Query::new()
                    .eq("market_id", market_id)
                    .order("created_at", Order::Desc),
            )
            .await
    }

    async fn get_by_id(&self, property_id: &str) -> Result<Property> {
        self.collection.get(property_id).await
    }

    async fn create(&self, new_property: NewProperty) -> Result<Property> {
        self.collection.create(&new_property).await
    }

    async fn update(&self, property_update: PropertyUpdate) -> Result<Property> {
        let id = required_id(property_update.id.as_deref(), "Property")?;
        self.collection.update(&id, &property_update).await
    }

    async fn delete(&self, property_id: &str) -> Result<usize> {
        self.collection.delete(property_id).await
    }
}

#[async_trait]
impl UserRepositoryTrait for SupabaseUserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        self.collection
            .list(Query::new().order("full_name", Order::Asc))
            .await
    }

    async fn get_by_id(&self, user_id: &str) -> Result<User> {
        self.collection.get(user_id).await
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.collection.create(&new_user).await
    }

    async fn update(&self, user_update: UserUpdate) -> Result<User> {
        let id = required_id(user_update.id.as_deref(), "User")?;
        self.collection.update(&id, &user_update).await
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        self.collection.delete(user_id).await
    }
}
