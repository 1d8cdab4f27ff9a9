use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use franchise_crm_core::errors::{Error, Result};
use franchise_crm_core::properties::{
    NewProperty, Property, PropertyRepositoryTrait, PropertyUpdate,
};

use super::model::{PropertyChangesetDB, PropertyDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::properties;
use crate::schema::properties::dsl::*;

/// Repository for managing property data in the database
pub struct PropertyRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PropertyRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }

    /// Newest first, optionally restricted to one market.
    fn load(&self, market: Option<&str>) -> Result<Vec<Property>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = properties.select(PropertyDB::as_select()).into_boxed();
        if let Some(market) = market {
            query = query.filter(market_id.eq(market));
        }
        let rows = query
            .order((created_at.desc(), id.asc()))
            .load::<PropertyDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Property::from).collect())
    }
}

#[async_trait]
impl PropertyRepositoryTrait for PropertyRepository {
    async fn list(&self) -> Result<Vec<Property>> {
        self.load(None)
    }

    async fn list_by_market(&self, market: &str) -> Result<Vec<Property>> {
        self.load(Some(market))
    }

    async fn get_by_id(&self, property_id: &str) -> Result<Property> {
        let mut conn = get_connection(&self.pool)?;
        let row = properties
            .select(PropertyDB::as_select())
            .find(property_id)
            .first::<PropertyDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found(format!("Property {}", property_id)))?;
        Ok(Property::from(row))
    }

    async fn create(&self, new_property: NewProperty) -> Result<Property> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Property> {
                let mut property_db: PropertyDB = new_property.into();
                if property_db.id.is_empty() {
                    property_db.id = Uuid::new_v4().to_string();
                }

                let inserted = diesel::insert_into(properties::table)
                    .values(&property_db)
                    .returning(PropertyDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Property::from(inserted))
            })
            .await
    }

    async fn update(&self, property_update: PropertyUpdate) -> Result<Property> {
        let property_id = property_update.id.clone().unwrap_or_default();
        let changeset: PropertyChangesetDB = property_update.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Property> {
                let updated = diesel::update(properties.find(&property_id))
                    .set(&changeset)
                    .returning(PropertyDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found(format!("Property {}", property_id)))?;
                Ok(Property::from(updated))
            })
            .await
    }

    async fn delete(&self, property_id: &str) -> Result<usize> {
        let property_id = property_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(properties.find(property_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
