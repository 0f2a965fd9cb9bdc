//! Storage abstraction shared by the database and the fixture backends.
//!
//! Absence is reported as `Ok(None)` by lookups; only deletes turn a missing
//! row into [`EngineError::KeyNotFound`].
//!
//! [`EngineError::KeyNotFound`]: crate::EngineError::KeyNotFound

use std::fmt::Debug;

use async_trait::async_trait;

use crate::{Month, MonthData, PendingUser, ResultEngine, User, UserFields};

/// Reachability of the backing database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
    /// No database is attached, fixtures are served.
    NotInitialized,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Active users ordered by name.
    async fn list(&self) -> ResultEngine<Vec<User>>;

    /// The user with `telegram_id`, if it exists and is active.
    async fn get(&self, telegram_id: &str) -> ResultEngine<Option<User>>;

    /// Inserts the user or replaces the fields of the existing one.
    async fn create(&self, telegram_id: &str, fields: UserFields) -> ResultEngine<User>;

    /// Updates an existing user, active or not. `None` when no row matched.
    async fn update(&self, telegram_id: &str, fields: UserFields) -> ResultEngine<Option<User>>;

    async fn delete(&self, telegram_id: &str) -> ResultEngine<()>;
}

#[async_trait]
pub trait PendingUserStore: Send + Sync {
    /// Requests, newest first.
    async fn list(&self) -> ResultEngine<Vec<PendingUser>>;

    async fn get(&self, telegram_id: &str) -> ResultEngine<Option<PendingUser>>;

    /// Files a request. A repeated request for the same id refreshes name and
    /// username but keeps the original request time.
    async fn create(
        &self,
        telegram_id: &str,
        name: &str,
        username: &str,
    ) -> ResultEngine<PendingUser>;

    async fn delete(&self, telegram_id: &str) -> ResultEngine<()>;
}

#[async_trait]
pub trait MonthStore: Send + Sync {
    /// Never fails on a missing or unreadable row: both yield [`Month::empty`].
    async fn get(&self, year_month: &str) -> ResultEngine<Month>;

    /// Replaces all four documents of the month.
    async fn update(&self, year_month: &str, data: MonthData) -> ResultEngine<()>;
}

/// A complete backend.
#[async_trait]
pub trait Store: UserStore + PendingUserStore + MonthStore + Debug {
    async fn database_status(&self) -> DatabaseStatus;
}
