//! The module contains the `User` struct and the `users` table entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::EngineError;

/// Access level of a calendar user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Boss,
    Worker,
    Guest,
}

impl Role {
    /// Returns the canonical role string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Boss => "boss",
            Self::Worker => "worker",
            Self::Guest => "guest",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Self::Admin),
            "boss" => Ok(Self::Boss),
            "worker" => Ok(Self::Worker),
            "guest" => Ok(Self::Guest),
            other => Err(EngineError::InvalidRole(other.to_string())),
        }
    }
}

/// A user allowed to use the calendar, identified by its telegram id.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub telegram_id: String,
    pub name: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable part of a user, shared by create and update.
#[derive(Clone, Debug, PartialEq)]
pub struct UserFields {
    pub name: String,
    pub role: Role,
    pub active: bool,
}

impl User {
    /// Builds a user stamped with the current time. Nothing is persisted.
    pub fn new(telegram_id: &str, fields: UserFields) -> Self {
        let now = Utc::now();
        Self {
            telegram_id: telegram_id.to_string(),
            name: fields.name,
            role: fields.role,
            active: fields.active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub telegram_id: String,
    pub name: String,
    pub role: String,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            role: Role::try_from(value.role.as_str())?,
            telegram_id: value.telegram_id,
            name: value.name,
            active: value.active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}
