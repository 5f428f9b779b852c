use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};

use linkvault_types::models::User;

use crate::auth::AppState;

/// Resolve the bearer auth key to a user and attach it to the request.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let auth_key = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let user = state
        .db
        .get_user_by_auth_key(auth_key)
        .map_err(|e| {
            error!("Auth lookup failed: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or_else(|| {
            warn!("Rejected unknown auth key");
            StatusCode::UNAUTHORIZED
        })?;

    req.extensions_mut().insert(User { id: user.id });
    Ok(next.run(req).await)
}
