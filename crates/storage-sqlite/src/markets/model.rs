//! Database model for markets.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use franchise_crm_core::errors::{Error, Result};
use franchise_crm_core::markets::{Market, MarketUpdate, NewMarket, Territory};
use franchise_crm_core::utils::lenient;

/// Database model for markets. The territory selection is stored as JSON text.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::markets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarketDB {
    pub id: String,
    pub client_id: Option<String>,
    pub name: String,
    pub territory: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::markets)]
pub struct MarketChangesetDB {
    pub client_id: Option<String>,
    pub name: Option<String>,
    pub territory: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

fn encode_territory(territory: Option<&Territory>) -> Result<Option<String>> {
    territory
        .map(serde_json::to_string)
        .transpose()
        .map_err(Error::from)
}

impl From<MarketDB> for Market {
    fn from(db: MarketDB) -> Self {
        Self {
            territory: lenient::parse_json_option(db.territory.as_deref()),
            id: db.id,
            client_id: db.client_id,
            name: db.name,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl TryFrom<NewMarket> for MarketDB {
    type Error = Error;

    fn try_from(domain: NewMarket) -> std::result::Result<Self, Self::Error> {
        let now = Utc::now().naive_utc();
        Ok(Self {
            territory: encode_territory(domain.territory.as_ref())?,
            id: domain.id.unwrap_or_default(),
            client_id: domain.client_id,
            name: domain.name,
            created_at: now,
            updated_at: now,
        })
    }
}

impl TryFrom<MarketUpdate> for MarketChangesetDB {
    type Error = Error;

    fn try_from(domain: MarketUpdate) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            territory: encode_territory(domain.territory.as_ref())?,
            client_id: domain.client_id,
            name: domain.name,
            updated_at: Some(Utc::now().naive_utc()),
        })
    }
}
