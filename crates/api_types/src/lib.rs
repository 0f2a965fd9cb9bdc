use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome tag carried by every enveloped response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
}

/// Uniform response body: `{status, data}` on success, `{status, error}` on
/// failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Plain acknowledgement returned by deletes and month updates.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub mod user {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Role {
        Admin,
        Boss,
        Worker,
        Guest,
    }

    fn default_active() -> bool {
        true
    }

    /// Body of `POST /users`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserNew {
        pub telegram_id: String,
        pub name: String,
        pub role: Role,
        #[serde(default = "default_active")]
        pub active: bool,
    }

    /// Body of `PUT /users/{telegramId}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserUpdate {
        pub name: String,
        pub role: Role,
        #[serde(default = "default_active")]
        pub active: bool,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct UserView {
        pub telegram_id: String,
        pub name: String,
        pub role: Role,
        pub active: bool,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod pending_user {
    use super::*;

    /// Body of `POST /pending-users`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PendingUserNew {
        pub telegram_id: String,
        pub name: String,
        #[serde(default)]
        pub username: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct PendingUserView {
        pub telegram_id: String,
        pub name: String,
        pub username: String,
        pub requested_at: DateTime<Utc>,
    }
}

pub mod month {
    use std::collections::BTreeMap;

    use super::*;

    /// A person on a shift for a given day. Missing fields read as empty.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Assignment {
        pub person: String,
        pub shift: String,
    }

    fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: serde::Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
    }

    /// Body of `PUT /months/{yearMonth}`. Omitted or `null` fields are stored
    /// as empty maps.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthUpdate {
        #[serde(default, deserialize_with = "null_as_empty")]
        pub duties: BTreeMap<String, String>,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub tech_duties: BTreeMap<String, Vec<Assignment>>,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub general_schedule: BTreeMap<String, Vec<Assignment>>,
        #[serde(default, deserialize_with = "null_as_empty")]
        pub colors: BTreeMap<String, String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthView {
        pub id: String,
        pub duties: BTreeMap<String, String>,
        pub tech_duties: BTreeMap<String, Vec<Assignment>>,
        pub general_schedule: BTreeMap<String, Vec<Assignment>>,
        pub colors: BTreeMap<String, String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod health {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum HealthStatus {
        Healthy,
        Degraded,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum DatabaseHealth {
        Connected,
        Disconnected,
        NotInitialized,
    }

    /// Body of `GET /health`. Not enveloped.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: HealthStatus,
        pub database: DatabaseHealth,
    }
}
