use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
    typed_header::TypedHeaderRejection,
};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::{ServerError, health, month, pending_user, user};
use engine::Engine;

static AUTHORIZATION: header::HeaderName = header::AUTHORIZATION;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Settings the HTTP layer needs besides the engine.
#[derive(Clone, Debug)]
pub struct ServerOptions {
    /// Secret every protected request must present as a bearer token. An
    /// empty key rejects all protected requests with a 500.
    pub api_key: String,
    /// Origins allowed by CORS. `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub api_key: Arc<str>,
    pub allowed_origins: Arc<[String]>,
}

/// `TypedHeader` for `Authorization: Bearer <token>`.
///
/// The value must be exactly two space separated parts, the first being the
/// literal `Bearer`.
#[derive(Debug)]
struct BearerToken(String);

impl Header for BearerToken {
    fn name() -> &'static header::HeaderName {
        &AUTHORIZATION
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };

        let mut parts = value.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("Bearer"), Some(token), None) => Ok(BearerToken(token.to_string())),
            _ => Err(AxumError::invalid()),
        }
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match HeaderValue::from_str(&format!("Bearer {}", self.0)) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode authorization header"),
        }
    }
}

async fn auth(
    State(state): State<ServerState>,
    bearer: Result<TypedHeader<BearerToken>, TypedHeaderRejection>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = match bearer {
        Ok(TypedHeader(BearerToken(token))) => token,
        Err(rejection) if rejection.is_missing() => {
            tracing::warn!("{} {}: missing authorization", request.method(), request.uri().path());
            return Err(ServerError::Unauthorized(
                "Missing Authorization header".to_string(),
            ));
        }
        Err(_) => {
            tracing::warn!("{} {}: malformed authorization", request.method(), request.uri().path());
            return Err(ServerError::Unauthorized(
                "Invalid Authorization header format".to_string(),
            ));
        }
    };

    if state.api_key.is_empty() {
        tracing::error!("API key is not configured, refusing protected request");
        return Err(ServerError::Internal("API key not configured".to_string()));
    }

    if token != *state.api_key {
        tracing::warn!("{} {}: invalid API key", request.method(), request.uri().path());
        return Err(ServerError::Unauthorized("Invalid API key".to_string()));
    }

    Ok(next.run(request).await)
}

fn allowed_origin(allowed: &[String], origin: Option<&HeaderValue>) -> Option<HeaderValue> {
    if allowed.iter().any(|o| o == "*") {
        return Some(HeaderValue::from_static("*"));
    }
    let origin = origin?;
    let requested = origin.to_str().ok()?;
    allowed
        .iter()
        .any(|o| o == requested)
        .then(|| origin.clone())
}

/// Stamps CORS headers on every response and answers preflights directly.
async fn cors(State(state): State<ServerState>, request: Request, next: Next) -> Response {
    let origin = allowed_origin(
        &state.allowed_origins,
        request.headers().get(header::ORIGIN),
    );

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    if let Some(origin) = origin {
        if origin != "*" {
            headers.append(header::VARY, HeaderValue::from_static("origin"));
        }
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}

async fn not_found() -> ServerError {
    ServerError::NotFound("Not found".to_string())
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

/// Builds the full application router.
pub fn router(engine: Engine, options: ServerOptions) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        api_key: options.api_key.into(),
        allowed_origins: options.allowed_origins.into(),
    };

    let protected = Router::new()
        .route("/users", get(user::list).post(user::create))
        .route(
            "/users/{telegram_id}",
            get(user::get).put(user::update).delete(user::delete),
        )
        .route(
            "/pending-users",
            get(pending_user::list).post(pending_user::create),
        )
        .route(
            "/pending-users/{telegram_id}",
            get(pending_user::get).delete(pending_user::delete),
        )
        .route("/months/{year_month}", get(month::get).put(month::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/health", get(health::get))
        .merge(protected)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    options: ServerOptions,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine, options)).await
}
