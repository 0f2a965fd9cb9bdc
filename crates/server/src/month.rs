//! Duty calendar endpoints

use std::collections::BTreeMap;

use api_types::{
    Message,
    month::{Assignment as ApiAssignment, MonthUpdate, MonthView},
};
use axum::extract::State;
use engine::{Assignment, Month, MonthData, is_year_month};

use crate::{
    ServerError,
    extract::{ApiJson, ApiPath},
    response::Success,
    server::ServerState,
};

type Days<T> = BTreeMap<String, Vec<T>>;

fn map_days(days: Days<ApiAssignment>) -> Days<Assignment> {
    days.into_iter()
        .map(|(day, list)| {
            let list = list
                .into_iter()
                .map(|a| Assignment {
                    person: a.person,
                    shift: a.shift,
                })
                .collect();
            (day, list)
        })
        .collect()
}

fn map_api_days(days: Days<Assignment>) -> Days<ApiAssignment> {
    days.into_iter()
        .map(|(day, list)| {
            let list = list
                .into_iter()
                .map(|a| ApiAssignment {
                    person: a.person,
                    shift: a.shift,
                })
                .collect();
            (day, list)
        })
        .collect()
}

fn view(month: Month) -> MonthView {
    MonthView {
        id: month.id,
        duties: month.data.duties,
        tech_duties: map_api_days(month.data.tech_duties),
        general_schedule: map_api_days(month.data.general_schedule),
        colors: month.data.colors,
        created_at: month.created_at,
        updated_at: month.updated_at,
    }
}

fn check_year_month(year_month: &str) -> Result<(), ServerError> {
    if is_year_month(year_month) {
        Ok(())
    } else {
        Err(ServerError::BadRequest(
            "Invalid month ID format (expected: YYYY_M)".to_string(),
        ))
    }
}

/// Months never stored come back empty, not as a 404.
pub async fn get(
    State(state): State<ServerState>,
    ApiPath(year_month): ApiPath<String>,
) -> Result<Success<MonthView>, ServerError> {
    check_year_month(&year_month)?;
    let month = state.engine.months().get(&year_month).await?;
    Ok(Success::ok(view(month)))
}

pub async fn update(
    State(state): State<ServerState>,
    ApiPath(year_month): ApiPath<String>,
    ApiJson(payload): ApiJson<MonthUpdate>,
) -> Result<Success<Message>, ServerError> {
    check_year_month(&year_month)?;
    let data = MonthData {
        duties: payload.duties,
        tech_duties: map_days(payload.tech_duties),
        general_schedule: map_days(payload.general_schedule),
        colors: payload.colors,
    };

    state.engine.months().update(&year_month, data).await?;
    Ok(Success::ok(Message::new("Month data updated successfully")))
}
