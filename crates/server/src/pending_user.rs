//! Access request endpoints

use std::collections::BTreeMap;

use api_types::{
    Message,
    pending_user::{PendingUserNew, PendingUserView},
};
use axum::extract::State;
use engine::PendingUser;

use crate::{
    ServerError,
    extract::{ApiJson, ApiPath, NAME_LENGTH, USERNAME_LENGTH, bounded, required},
    response::Success,
    server::ServerState,
};

fn view(pending: PendingUser) -> PendingUserView {
    PendingUserView {
        telegram_id: pending.telegram_id,
        name: pending.name,
        username: pending.username,
        requested_at: pending.requested_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Success<BTreeMap<String, PendingUserView>>, ServerError> {
    let pending = state
        .engine
        .pending_users()
        .list()
        .await?
        .into_iter()
        .map(|pending| (pending.telegram_id.clone(), view(pending)))
        .collect();

    Ok(Success::ok(pending))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(telegram_id): ApiPath<String>,
) -> Result<Success<PendingUserView>, ServerError> {
    let pending = state
        .engine
        .pending_users()
        .get(&telegram_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Pending user not found".to_string()))?;

    Ok(Success::ok(view(pending)))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<PendingUserNew>,
) -> Result<Success<PendingUserView>, ServerError> {
    let telegram_id = required(&payload.telegram_id, "telegramId")?;
    let name = bounded(required(&payload.name, "name")?, "name", NAME_LENGTH)?;
    let username = bounded(payload.username.trim(), "username", USERNAME_LENGTH)?;

    let pending = state
        .engine
        .pending_users()
        .create(telegram_id, name, username)
        .await?;

    Ok(Success::created(view(pending)))
}

/// Removes the request, whether it was approved or rejected.
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(telegram_id): ApiPath<String>,
) -> Result<Success<Message>, ServerError> {
    state.engine.pending_users().delete(&telegram_id).await?;
    Ok(Success::ok(Message::new("Access request deleted successfully")))
}
