use api_types::Envelope;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerOptions, router, run_with_listener};

mod extract;
mod health;
mod month;
mod pending_user;
mod response;
mod server;
mod user;

/// Every way a request can fail. Rendered as the error envelope.
#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    MethodNotAllowed,
    Internal(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidRole(_)
        | EngineError::Serialization(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::KeyNotFound(_) => err.to_string(),
        other => {
            tracing::error!("engine error: {other}");
            "internal server error".to_string()
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::BadRequest(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Unauthorized(err) => (StatusCode::UNAUTHORIZED, err),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            ServerError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err),
        };

        (status, Json(Envelope::error(error))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
