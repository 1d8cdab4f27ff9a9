use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use franchise_crm_core::errors::{Error, Result};
use franchise_crm_core::users::{NewUser, User, UserRepositoryTrait, UserUpdate};

use super::model::{UserChangesetDB, UserDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;
use crate::schema::users::dsl::*;

/// Repository for managing user data in the database
pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users
            .select(UserDB::as_select())
            .order(full_name.asc())
            .load::<UserDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let row = users
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found(format!("User {}", user_id)))?;
        Ok(User::from(row))
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let mut user_db: UserDB = new_user.into();
                if user_db.id.is_empty() {
                    user_db.id = Uuid::new_v4().to_string();
                }

                let inserted = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(User::from(inserted))
            })
            .await
    }

    async fn update(&self, user_update: UserUpdate) -> Result<User> {
        let user_id = user_update.id.clone().unwrap_or_default();
        let changeset: UserChangesetDB = user_update.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let updated = diesel::update(users.find(&user_id))
                    .set(&changeset)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found(format!("User {}", user_id)))?;
                Ok(User::from(updated))
            })
            .await
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(users.find(user_id)).execute(conn).into_core()
            })
            .await
    }
}
