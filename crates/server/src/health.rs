//! Liveness probe. Always answers 200, the body tells whether the database
//! is reachable.

use api_types::health::{DatabaseHealth, Health, HealthStatus};
use axum::{Json, extract::State};
use engine::DatabaseStatus;

use crate::server::ServerState;

pub async fn get(State(state): State<ServerState>) -> Json<Health> {
    let database = match state.engine.database_status().await {
        DatabaseStatus::Connected => DatabaseHealth::Connected,
        DatabaseStatus::Disconnected => DatabaseHealth::Disconnected,
        DatabaseStatus::NotInitialized => DatabaseHealth::NotInitialized,
    };
    let status = match database {
        DatabaseHealth::Connected => HealthStatus::Healthy,
        _ => HealthStatus::Degraded,
    };

    Json(Health { status, database })
}
