//! Session endpoint: exchanges credentials for a bearer token.

use api_types::session::{SessionCreated, SessionNew, SessionUser};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SessionNew>,
) -> Result<Json<SessionCreated>, ServerError> {
    let user = state
        .engine
        .authenticate(&payload.email, &payload.password)
        .await?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|err| ServerError::Internal(format!("failed to sign token: {err}")))?;

    Ok(Json(SessionCreated {
        user: SessionUser {
            id: user.id,
            name: user.name,
            email: user.email,
        },
        token,
    }))
}
