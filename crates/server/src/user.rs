//! User registration and profile endpoints.

use api_types::user::{UserNew, UserView};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::User;

use crate::{ServerError, server::ServerState};

pub(crate) fn view(user: User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// Register a new user
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .create_user(engine::UserNew::new(
            payload.name,
            payload.email,
            payload.password,
        ))
        .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(view(user))))
}

/// Show the authenticated user
pub async fn profile(Extension(user): Extension<User>) -> Json<UserView> {
    Json(view(user))
}
