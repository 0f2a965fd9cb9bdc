//! Users API endpoints

use std::collections::BTreeMap;

use api_types::{
    Message,
    user::{Role as ApiRole, UserNew, UserUpdate, UserView},
};
use axum::extract::State;
use engine::{Role, User, UserFields};

use crate::{
    ServerError,
    extract::{ApiJson, ApiPath, NAME_LENGTH, bounded, required},
    response::Success,
    server::ServerState,
};

fn map_role(role: ApiRole) -> Role {
    match role {
        ApiRole::Admin => Role::Admin,
        ApiRole::Boss => Role::Boss,
        ApiRole::Worker => Role::Worker,
        ApiRole::Guest => Role::Guest,
    }
}

fn map_api_role(role: Role) -> ApiRole {
    match role {
        Role::Admin => ApiRole::Admin,
        Role::Boss => ApiRole::Boss,
        Role::Worker => ApiRole::Worker,
        Role::Guest => ApiRole::Guest,
    }
}

fn view(user: User) -> UserView {
    UserView {
        telegram_id: user.telegram_id,
        name: user.name,
        role: map_api_role(user.role),
        active: user.active,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

fn user_not_found() -> ServerError {
    ServerError::NotFound("User not found".to_string())
}

/// Active users keyed by telegram id.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Success<BTreeMap<String, UserView>>, ServerError> {
    let users = state
        .engine
        .users()
        .list()
        .await?
        .into_iter()
        .map(|user| (user.telegram_id.clone(), view(user)))
        .collect();

    Ok(Success::ok(users))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(telegram_id): ApiPath<String>,
) -> Result<Success<UserView>, ServerError> {
    let user = state
        .engine
        .users()
        .get(&telegram_id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Success::ok(view(user)))
}

/// Creates the user, or overwrites the one with the same telegram id.
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<UserNew>,
) -> Result<Success<UserView>, ServerError> {
    let telegram_id = required(&payload.telegram_id, "telegramId")?;
    let fields = UserFields {
        name: bounded(required(&payload.name, "name")?, "name", NAME_LENGTH)?.to_string(),
        role: map_role(payload.role),
        active: payload.active,
    };

    let user = state.engine.users().create(telegram_id, fields).await?;
    Ok(Success::created(view(user)))
}

pub async fn update(
    State(state): State<ServerState>,
    ApiPath(telegram_id): ApiPath<String>,
    ApiJson(payload): ApiJson<UserUpdate>,
) -> Result<Success<UserView>, ServerError> {
    let fields = UserFields {
        name: bounded(required(&payload.name, "name")?, "name", NAME_LENGTH)?.to_string(),
        role: map_role(payload.role),
        active: payload.active,
    };

    let user = state
        .engine
        .users()
        .update(&telegram_id, fields)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Success::ok(view(user)))
}

pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(telegram_id): ApiPath<String>,
) -> Result<Success<Message>, ServerError> {
    state.engine.users().delete(&telegram_id).await?;
    Ok(Success::ok(Message::new("User deleted successfully")))
}
