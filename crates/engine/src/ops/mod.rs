//! Database backed store. Every operation is a single statement, upserts and
//! updates then read the affected row back by primary key.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::store::{DatabaseStatus, Store};

mod months;
mod pending_users;
mod users;

#[derive(Debug, Clone)]
pub struct DatabaseStore {
    database: DatabaseConnection,
}

impl DatabaseStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Store for DatabaseStore {
    async fn database_status(&self) -> DatabaseStatus {
        match self.database.ping().await {
            Ok(()) => DatabaseStatus::Connected,
            Err(err) => {
                tracing::warn!("database ping failed: {err}");
                DatabaseStatus::Disconnected
            }
        }
    }
}
