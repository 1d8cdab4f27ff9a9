//! Database model for clients.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use franchise_crm_core::clients::{Client, ClientUpdate, NewClient};
use franchise_crm_core::utils::lenient;

/// Database model for clients
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClientDB {
    pub id: String,
    pub name: String,
    pub client_type: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update; `None` columns are left out of the UPDATE statement.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::clients)]
pub struct ClientChangesetDB {
    pub name: Option<String>,
    pub client_type: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<ClientDB> for Client {
    fn from(db: ClientDB) -> Self {
        Self {
            client_type: lenient::parse_or_default(&db.client_type),
            status: lenient::parse_or_default(&db.status),
            id: db.id,
            name: db.name,
            email: db.email,
            phone: db.phone,
            address: db.address,
            website: db.website,
            description: db.description,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl From<NewClient> for ClientDB {
    fn from(domain: NewClient) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            client_type: domain.client_type.as_str().to_string(),
            email: domain.email,
            phone: domain.phone,
            address: domain.address,
            website: domain.website,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<ClientUpdate> for ClientChangesetDB {
    fn from(domain: ClientUpdate) -> Self {
        Self {
            name: domain.name,
            client_type: domain.client_type.map(|t| t.as_str().to_string()),
            email: domain.email,
            phone: domain.phone,
            address: domain.address,
            website: domain.website,
            description: domain.description,
            status: domain.status.map(|s| s.as_str().to_string()),
            updated_at: Some(Utc::now().naive_utc()),
        }
    }
}
