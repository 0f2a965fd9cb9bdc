//! Monthly duty calendar.
//!
//! A month is keyed by a `"<year>_<month>"` string (`"2025_6"`) and carries
//! four independent JSON documents. Days are keyed by their number as a
//! string.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A person on a shift for a given day.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assignment {
    pub person: String,
    pub shift: String,
}

impl Assignment {
    pub fn new(person: &str, shift: &str) -> Self {
        Self {
            person: person.to_string(),
            shift: shift.to_string(),
        }
    }
}

/// The four documents stored for a month. Always written as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonthData {
    /// Day → person on duty.
    pub duties: BTreeMap<String, String>,
    /// Day → technical duty assignments, in order.
    pub tech_duties: BTreeMap<String, Vec<Assignment>>,
    /// Day → general schedule assignments, in order.
    pub general_schedule: BTreeMap<String, Vec<Assignment>>,
    /// Person → colour code.
    pub colors: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Month {
    pub id: String,
    pub data: MonthData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Month {
    /// A month with nothing scheduled, as returned for unknown ids.
    pub fn empty(id: &str) -> Self {
        Self::with_data(id, MonthData::default())
    }

    pub fn with_data(id: &str, data: MonthData) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            data,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Checks the `YYYY_M` / `YYYY_MM` shape of a month id.
pub fn is_year_month(value: &str) -> bool {
    let Some((year, month)) = value.split_once('_') else {
        return false;
    };
    year.len() == 4
        && (1..=2).contains(&month.len())
        && year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "months")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub duties: Json,
    pub tech_duties: Json,
    pub general_schedule: Json,
    pub colors: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A stored `null` reads as an empty document.
fn decode<T: DeserializeOwned + Default>(value: Json) -> Result<T, serde_json::Error> {
    serde_json::from_value::<Option<T>>(value).map(Option::unwrap_or_default)
}

impl TryFrom<Model> for Month {
    type Error = serde_json::Error;

    fn try_from(value: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            data: MonthData {
                duties: decode(value.duties)?,
                tech_duties: decode(value.tech_duties)?,
                general_schedule: decode(value.general_schedule)?,
                colors: decode(value.colors)?,
            },
            id: value.id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}
