//! Database model for users.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use franchise_crm_core::utils::lenient;
use franchise_crm_core::users::{NewUser, User, UserUpdate};

/// Database model for users
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChangesetDB {
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            role: lenient::parse_option(db.role.as_deref()),
            status: lenient::parse_or_default(&db.status),
            id: db.id,
            full_name: db.full_name,
            email: db.email,
            phone: db.phone,
            avatar_url: db.avatar_url,
            department: db.department,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            full_name: domain.full_name,
            role: domain.role.map(|r| r.as_str().to_string()),
            email: domain.email,
            phone: domain.phone,
            avatar_url: domain.avatar_url,
            department: domain.department,
            status: domain.status.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<UserUpdate> for UserChangesetDB {
    fn from(domain: UserUpdate) -> Self {
        Self {
            full_name: domain.full_name,
            role: domain.role.map(|r| r.as_str().to_string()),
            email: domain.email,
            phone: domain.phone,
            avatar_url: domain.avatar_url,
            department: domain.department,
            status: domain.status.map(|s| s.as_str().to_string()),
            updated_at: Some(Utc::now().naive_utc()),
        }
    }
}
