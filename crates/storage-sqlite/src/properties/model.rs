//! Database model for properties.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use franchise_crm_core::utils::lenient;
use franchise_crm_core::properties::{NewProperty, Property, PropertyUpdate};

/// Database model for properties
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::properties)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PropertyDB {
    pub id: String,
    pub market_id: Option<String>,
    pub title: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub size_sqft: Option<f64>,
    pub base_rent_psf: Option<f64>,
    pub expenses_psf: Option<f64>,
    pub phase: String,
    pub display_number: Option<i32>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::properties)]
pub struct PropertyChangesetDB {
    pub market_id: Option<String>,
    pub title: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub size_sqft: Option<f64>,
    pub base_rent_psf: Option<f64>,
    pub expenses_psf: Option<f64>,
    pub phase: Option<String>,
    pub display_number: Option<i32>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<PropertyDB> for Property {
    fn from(db: PropertyDB) -> Self {
        Self {
            phase: lenient::parse_or_default(&db.phase),
            id: db.id,
            market_id: db.market_id,
            title: db.title,
            address_line: db.address_line,
            city: db.city,
            state: db.state,
            postal_code: db.postal_code,
            lat: db.lat,
            lng: db.lng,
            size_sqft: db.size_sqft,
            base_rent_psf: db.base_rent_psf,
            expenses_psf: db.expenses_psf,
            display_number: db.display_number,
            photo_url: db.photo_url,
            notes: db.notes,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl From<NewProperty> for PropertyDB {
    fn from(domain: NewProperty) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            market_id: domain.market_id,
            title: domain.title,
            address_line: domain.address_line,
            city: domain.city,
            state: domain.state,
            postal_code: domain.postal_code,
            lat: domain.lat,
            lng: domain.lng,
            size_sqft: domain.size_sqft,
            base_rent_psf: domain.base_rent_psf,
            expenses_psf: domain.expenses_psf,
            phase: domain.phase.as_str().to_string(),
            display_number: domain.display_number,
            photo_url: domain.photo_url,
            notes: domain.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<PropertyUpdate> for PropertyChangesetDB {
    fn from(domain: PropertyUpdate) -> Self {
        Self {
            market_id: domain.market_id,
            title: domain.title,
            address_line: domain.address_line,
            city: domain.city,
            state: domain.state,
            postal_code: domain.postal_code,
            lat: domain.lat,
            lng: domain.lng,
            size_sqft: domain.size_sqft,
            base_rent_psf: domain.base_rent_psf,
            expenses_psf: domain.expenses_psf,
            phase: domain.phase.map(|p| p.as_str().to_string()),
            display_number: domain.display_number,
            photo_url: domain.photo_url,
            notes: domain.notes,
            updated_at: Some(Utc::now().naive_utc()),
        }
    }
}
