use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use franchise_crm_core::errors::{Error, Result};
use franchise_crm_core::markets::{Market, MarketRepositoryTrait, MarketUpdate, NewMarket};

use super::model::{MarketChangesetDB, MarketDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::markets;
use crate::schema::markets::dsl::*;

/// Repository for managing market data in the database
pub struct MarketRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl MarketRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }

    fn load(&self, owner: Option<&str>) -> Result<Vec<Market>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = markets.select(MarketDB::as_select()).into_boxed();
        if let Some(owner) = owner {
            query = query.filter(client_id.eq(owner));
        }
        let rows = query
            .order(name.asc())
            .load::<MarketDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Market::from).collect())
    }
}

#[async_trait]
impl MarketRepositoryTrait for MarketRepository {
    async fn list(&self) -> Result<Vec<Market>> {
        self.load(None)
    }

    async fn list_by_client(&self, owner_id: &str) -> Result<Vec<Market>> {
        self.load(Some(owner_id))
    }

    async fn get_by_id(&self, market_id: &str) -> Result<Market> {
        let mut conn = get_connection(&self.pool)?;
        let row = markets
            .select(MarketDB::as_select())
            .find(market_id)
            .first::<MarketDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found(format!("Market {}", market_id)))?;
        Ok(Market::from(row))
    }

    async fn create(&self, new_market: NewMarket) -> Result<Market> {
        let mut market_db = MarketDB::try_from(new_market)?;
        if market_db.id.is_empty() {
            market_db.id = Uuid::new_v4().to_string();
        }

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Market> {
                let inserted = diesel::insert_into(markets::table)
                    .values(&market_db)
                    .returning(MarketDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Market::from(inserted))
            })
            .await
    }

    async fn update(&self, market_update: MarketUpdate) -> Result<Market> {
        let market_id = market_update.id.clone().unwrap_or_default();
        let changeset = MarketChangesetDB::try_from(market_update)?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Market> {
                let updated = diesel::update(markets.find(&market_id))
                    .set(&changeset)
                    .returning(MarketDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found(format!("Market {}", market_id)))?;
                Ok(Market::from(updated))
            })
            .await
    }

    /// Deletes the market row only. Its properties keep their `market_id`.
    async fn delete(&self, market_id: &str) -> Result<usize> {
        let market_id = market_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(markets.find(market_id)).execute(conn).into_core()
            })
            .await
    }
}
