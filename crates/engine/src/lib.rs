use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use error::EngineError;
pub use fixtures::{FIXTURE_PENDING_USER_ID, FIXTURE_USER_ID, FixtureStore};
pub use months::{Assignment, Month, MonthData, is_year_month};
pub use ops::DatabaseStore;
pub use pending_users::PendingUser;
pub use store::{DatabaseStatus, MonthStore, PendingUserStore, Store, UserStore};
pub use users::{Role, User, UserFields};

mod error;
mod fixtures;
mod months;
mod ops;
mod pending_users;
mod store;
mod users;

type ResultEngine<T> = Result<T, EngineError>;

/// Entry point to the calendar data.
///
/// The backend is chosen once, when the engine is built: a database store if
/// a connection was given, the fixture store otherwise.
#[derive(Debug, Clone)]
pub struct Engine {
    store: Arc<dyn Store>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn users(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    pub fn pending_users(&self) -> &dyn PendingUserStore {
        self.store.as_ref()
    }

    pub fn months(&self) -> &dyn MonthStore {
        self.store.as_ref()
    }

    pub async fn database_status(&self) -> DatabaseStatus {
        self.store.database_status().await
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: Option<DatabaseConnection>,
}

impl EngineBuilder {
    /// Pass the database to store data in
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = Some(db);
        self
    }

    /// Serve fixtures instead of stored data
    pub fn fixtures(mut self) -> EngineBuilder {
        self.database = None;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        let store: Arc<dyn Store> = match self.database {
            Some(database) => Arc::new(DatabaseStore::new(database)),
            None => {
                tracing::warn!("no database attached, serving fixture data");
                Arc::new(FixtureStore)
            }
        };
        Engine { store }
    }
}
