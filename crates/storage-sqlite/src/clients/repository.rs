use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use franchise_crm_core::clients::{Client, ClientRepositoryTrait, ClientUpdate, NewClient};
use franchise_crm_core::errors::{Error, Result};

use super::model::{ClientChangesetDB, ClientDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::clients;
use crate::schema::clients::dsl::*;

/// Repository for managing client data in the database
pub struct ClientRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ClientRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ClientRepositoryTrait for ClientRepository {
    async fn list(&self) -> Result<Vec<Client>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = clients
            .select(ClientDB::as_select())
            .order(name.asc())
            .load::<ClientDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn get_by_id(&self, client_id: &str) -> Result<Client> {
        let mut conn = get_connection(&self.pool)?;
        let row = clients
            .select(ClientDB::as_select())
            .find(client_id)
            .first::<ClientDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found(format!("Client {}", client_id)))?;
        Ok(Client::from(row))
    }

    async fn create(&self, new_client: NewClient) -> Result<Client> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Client> {
                let mut client_db: ClientDB = new_client.into();
                if client_db.id.is_empty() {
                    client_db.id = Uuid::new_v4().to_string();
                }

                let inserted = diesel::insert_into(clients::table)
                    .values(&client_db)
                    .returning(ClientDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Client::from(inserted))
            })
            .await
    }

    async fn update(&self, client_update: ClientUpdate) -> Result<Client> {
        let client_id = client_update.id.clone().unwrap_or_default();
        let changeset: ClientChangesetDB = client_update.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Client> {
                let updated = diesel::update(clients.find(&client_id))
                    .set(&changeset)
                    .returning(ClientDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found(format!("Client {}", client_id)))?;
                Ok(Client::from(updated))
            })
            .await
    }

    /// Deletes a client by its ID and returns the number of deleted records
    async fn delete(&self, client_id: &str) -> Result<usize> {
        let client_id = client_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(clients.find(client_id)).execute(conn).into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_db;
    use franchise_crm_core::clients::{ClientStatus, ClientType};

    fn new_client(client_name: &str) -> NewClient {
        NewClient {
            name: client_name.to_string(),
            client_type: ClientType::Corporate,
            email: Some("deals@example.com".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get_client() {
        let (pool, writer, _dir) = test_db();
        let repo = ClientRepository::new(pool, writer);

        let created = repo.create(new_client("Acme")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.client_type, ClientType::Corporate);
        assert_eq!(created.status, ClientStatus::Active);

        let fetched = repo.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_list_orders_by_name() {
        let (pool, writer, _dir) = test_db();
        let repo = ClientRepository::new(pool, writer);
        for client_name in ["Zeta Homes", "Alpha Realty", "Metro Group"] {
            repo.create(new_client(client_name)).await.unwrap();
        }

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Alpha Realty", "Metro Group", "Zeta Homes"]);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_untouched_columns() {
        let (pool, writer, _dir) = test_db();
        let repo = ClientRepository::new(pool, writer);
        let created = repo.create(new_client("Acme")).await.unwrap();

        let updated = repo
            .update(ClientUpdate {
                id: Some(created.id.clone()),
                status: Some(ClientStatus::Inactive),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Acme");
        assert_eq!(updated.email.as_deref(), Some("deals@example.com"));
        assert_eq!(updated.status, ClientStatus::Inactive);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_missing_client_is_not_found() {
        let (pool, writer, _dir) = test_db();
        let repo = ClientRepository::new(pool, writer);

        assert!(repo.get_by_id("ghost").await.unwrap_err().is_not_found());
        let update = ClientUpdate {
            id: Some("ghost".to_string()),
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(repo.update(update).await.unwrap_err().is_not_found());
        assert_eq!(repo.delete("ghost").await.unwrap(), 0);
    }
}
