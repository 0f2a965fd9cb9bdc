//! Access requests waiting for an admin decision.
//!
//! A request has no status column: while the row exists the user is pending,
//! approving or rejecting it deletes the row.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingUser {
    pub telegram_id: String,
    pub name: String,
    pub username: String,
    pub requested_at: DateTime<Utc>,
}

impl PendingUser {
    pub fn new(telegram_id: &str, name: &str, username: &str) -> Self {
        Self {
            telegram_id: telegram_id.to_string(),
            name: name.to_string(),
            username: username.to_string(),
            requested_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pending_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub telegram_id: String,
    pub name: String,
    pub username: String,
    pub requested_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PendingUser {
    fn from(value: Model) -> Self {
        Self {
            telegram_id: value.telegram_id,
            name: value.name,
            username: value.username,
            requested_at: value.requested_at,
        }
    }
}
