use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use std::sync::Arc;

use crate::{TokenKeys, session, statements, user};
use engine::{Engine, EngineError};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub tokens: Arc<TokenKeys>,
}

/// Resolves the bearer token into an [`engine::User`] stored in the request
/// extensions. Missing, invalid or expired tokens and tokens of deleted users
/// are rejected with 401.
async fn auth(
    State(state): State<ServerState>,
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Ok(TypedHeader(Authorization(bearer))) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let user_id = state.tokens.verify(bearer.token()).map_err(|err| {
        tracing::debug!("rejected bearer token: {err}");
        StatusCode::UNAUTHORIZED
    })?;

    let user = match state.engine.user(user_id).await {
        Ok(user) => user,
        Err(EngineError::KeyNotFound(_)) => return Err(StatusCode::UNAUTHORIZED),
        Err(err) => {
            tracing::error!("failed to load authenticated user: {err}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/users", post(user::create))
        .route("/sessions", post(session::create));

    let protected = Router::new()
        .route("/profile", get(user::profile))
        .route("/statements/deposit", post(statements::deposit))
        .route("/statements/withdraw", post(statements::withdraw))
        .route("/statements/transfer/{user_id}", post(statements::transfer))
        .route("/statements/balance", get(statements::balance))
        .route("/statements/{statement_id}", get(statements::get))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .nest("/api/v1", public.merge(protected))
        .with_state(state)
}

/// Build the application router around an engine and token keys.
pub fn app(engine: Engine, tokens: TokenKeys) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
        tokens: Arc::new(tokens),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    tokens: TokenKeys,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, tokens)).await
}
