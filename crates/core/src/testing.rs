//! In-memory repositories shared by service tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::clients::{Client, ClientRepositoryTrait, ClientUpdate, NewClient};
use crate::entity::EntityType;
use crate::errors::{Error, Result};
use crate::markets::{Market, MarketRepositoryTrait, MarketUpdate, NewMarket};
use crate::properties::{NewProperty, Property, PropertyRepositoryTrait, PropertyUpdate};
use crate::users::{NewUser, User, UserRepositoryTrait, UserUpdate};

/// One store backing all four repository traits, with per-collection
/// failure injection for reads.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    pub clients: Mutex<Vec<Client>>,
    pub markets: Mutex<Vec<Market>>,
    pub properties: Mutex<Vec<Property>>,
    pub users: Mutex<Vec<User>>,
    failing: Mutex<HashSet<EntityType>>,
    next_id: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every read of the given collection fail with a store error.
    pub fn fail_reads(&self, entity_type: EntityType) {
        self.failing.lock().unwrap().insert(entity_type);
    }

    pub fn seed_client(&self, client: Client) {
        self.clients.lock().unwrap().push(client);
    }

    pub fn seed_market(&self, market: Market) {
        self.markets.lock().unwrap().push(market);
    }

    pub fn seed_property(&self, property: Property) {
        self.properties.lock().unwrap().push(property);
    }

    pub fn seed_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    fn check(&self, entity_type: EntityType) -> Result<()> {
        if self.failing.lock().unwrap().contains(&entity_type) {
            return Err(Error::Store(format!(
                "{} is unavailable",
                entity_type.collection()
            )));
        }
        Ok(())
    }

    fn id_or_next(&self, id: Option<String>, prefix: &str) -> String {
        id.unwrap_or_else(|| {
            format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
        })
    }
}

fn find<T: Clone>(items: &[T], id: &str, id_of: impl Fn(&T) -> &str, what: &str) -> Result<T> {
    items
        .iter()
        .find(|item| id_of(item) == id)
        .cloned()
        .ok_or_else(|| Error::not_found(format!("{} {}", what, id)))
}

fn remove<T>(items: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &str) -> usize {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    before - items.len()
}

#[async_trait]
impl ClientRepositoryTrait for InMemoryStore {
    async fn list(&self) -> Result<Vec<Client>> {
        self.check(EntityType::Client)?;
        let mut clients = self.clients.lock().unwrap().clone();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn get_by_id(&self, client_id: &str) -> Result<Client> {
        self.check(EntityType::Client)?;
        find(&self.clients.lock().unwrap(), client_id, |c| c.id.as_str(), "Client")
    }

    async fn create(&self, new_client: NewClient) -> Result<Client> {
        let now = Utc::now();
        let client = Client {
            id: self.id_or_next(new_client.id, "client"),
            name: new_client.name,
            client_type: new_client.client_type,
            email: new_client.email,
            phone: new_client.phone,
            address: new_client.address,
            website: new_client.website,
            description: new_client.description,
            status: new_client.status,
            created_at: now,
            updated_at: now,
        };
        self.clients.lock().unwrap().push(client.clone());
        Ok(client)
    }

    async fn update(&self, update: ClientUpdate) -> Result<Client> {
        let id = update.id.clone().unwrap_or_default();
        let mut clients = self.clients.lock().unwrap();
        let client = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found(format!("Client {}", id)))?;
        if let Some(name) = update.name {
            client.name = name;
        }
        if let Some(client_type) = update.client_type {
            client.client_type = client_type;
        }
        if update.email.is_some() {
            client.email = update.email;
        }
        if let Some(status) = update.status {
            client.status = status;
        }
        client.updated_at = Utc::now();
        Ok(client.clone())
    }

    async fn delete(&self, client_id: &str) -> Result<usize> {
        Ok(remove(&mut self.clients.lock().unwrap(), client_id, |c| c.id.as_str()))
    }
}

#[async_trait]
impl MarketRepositoryTrait for InMemoryStore {
    async fn list(&self) -> Result<Vec<Market>> {
        self.check(EntityType::Market)?;
        let mut markets = self.markets.lock().unwrap().clone();
        markets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(markets)
    }

    async fn list_by_client(&self, client_id: &str) -> Result<Vec<Market>> {
        let markets = MarketRepositoryTrait::list(self).await?;
        Ok(markets
            .into_iter()
            .filter(|m| m.client_id.as_deref() == Some(client_id))
            .collect())
    }

    async fn get_by_id(&self, market_id: &str) -> Result<Market> {
        self.check(EntityType::Market)?;
        find(&self.markets.lock().unwrap(), market_id, |m| m.id.as_str(), "Market")
    }

    async fn create(&self, new_market: NewMarket) -> Result<Market> {
        let now = Utc::now();
        let market = Market {
            id: self.id_or_next(new_market.id, "market"),
            client_id: new_market.client_id,
            name: new_market.name,
            territory: new_market.territory,
            created_at: now,
            updated_at: now,
        };
        self.markets.lock().unwrap().push(market.clone());
        Ok(market)
    }

    async fn update(&self, update: MarketUpdate) -> Result<Market> {
        let id = update.id.clone().unwrap_or_default();
        let mut markets = self.markets.lock().unwrap();
        let market = markets
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::not_found(format!("Market {}", id)))?;
        if update.client_id.is_some() {
            market.client_id = update.client_id;
        }
        if let Some(name) = update.name {
            market.name = name;
        }
        if update.territory.is_some() {
            market.territory = update.territory;
        }
        market.updated_at = Utc::now();
        Ok(market.clone())
    }

    async fn delete(&self, market_id: &str) -> Result<usize> {
        Ok(remove(&mut self.markets.lock().unwrap(), market_id, |m| m.id.as_str()))
    }
}

#[async_trait]
impl PropertyRepositoryTrait for InMemoryStore {
    async fn list(&self) -> Result<Vec<Property>> {
        self.check(EntityType::Property)?;
        let mut properties = self.properties.lock().unwrap().clone();
        properties.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(properties)
    }

    async fn list_by_market(&self, market_id: &str) -> Result<Vec<Property>> {
        let properties = PropertyRepositoryTrait::list(self).await?;
        Ok(properties
            .into_iter()
            .filter(|p| p.market_id.as_deref() == Some(market_id))
            .collect())
    }

    async fn get_by_id(&self, property_id: &str) -> Result<Property> {
        self.check(EntityType::Property)?;
        find(&self.properties.lock().unwrap(), property_id, |p| p.id.as_str(), "Property")
    }

    async fn create(&self, new_property: NewProperty) -> Result<Property> {
        let now = Utc::now();
        let property = Property {
            id: self.id_or_next(new_property.id, "property"),
            market_id: new_property.market_id,
            title: new_property.title,
            address_line: new_property.address_line,
            city: new_property.city,
            state: new_property.state,
            postal_code: new_property.postal_code,
            lat: new_property.lat,
            lng: new_property.lng,
            size_sqft: new_property.size_sqft,
            base_rent_psf: new_property.base_rent_psf,
            expenses_psf: new_property.expenses_psf,
            phase: new_property.phase,
            display_number: new_property.display_number,
            photo_url: new_property.photo_url,
            notes: new_property.notes,
            created_at: now,
            updated_at: now,
        };
        self.properties.lock().unwrap().push(property.clone());
        Ok(property)
    }

    async fn update(&self, update: PropertyUpdate) -> Result<Property> {
        let id = update.id.clone().unwrap_or_default();
        let mut properties = self.properties.lock().unwrap();
        let property = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found(format!("Property {}", id)))?;
        if update.market_id.is_some() {
            property.market_id = update.market_id;
        }
        if update.title.is_some() {
            property.title = update.title;
        }
        if let Some(phase) = update.phase {
            property.phase = phase;
        }
        if update.lat.is_some() {
            property.lat = update.lat;
        }
        if update.lng.is_some() {
            property.lng = update.lng;
        }
        property.updated_at = Utc::now();
        Ok(property.clone())
    }

    async fn delete(&self, property_id: &str) -> Result<usize> {
        Ok(remove(&mut self.properties.lock().unwrap(), property_id, |p| p.id.as_str()))
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryStore {
    async fn list(&self) -> Result<Vec<User>> {
        self.check(EntityType::User)?;
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(users)
    }

    async fn get_by_id(&self, user_id: &str) -> Result<User> {
        self.check(EntityType::User)?;
        find(&self.users.lock().unwrap(), user_id, |u| u.id.as_str(), "User")
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: self.id_or_next(new_user.id, "user"),
            full_name: new_user.full_name,
            role: new_user.role,
            email: new_user.email,
            phone: new_user.phone,
            avatar_url: new_user.avatar_url,
            department: new_user.department,
            status: new_user.status,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, update: UserUpdate) -> Result<User> {
        let id = update.id.clone().unwrap_or_default();
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| Error::not_found(format!("User {}", id)))?;
        if update.full_name.is_some() {
            user.full_name = update.full_name;
        }
        if update.role.is_some() {
            user.role = update.role;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        Ok(remove(&mut self.users.lock().unwrap(), user_id, |u| u.id.as_str()))
    }
}
