use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use linkvault_types::api::{StoreWalletRequest, UpdateTokenRequest, WalletLookupQuery};
use linkvault_types::models::{PlatformDescriptor, User};

use crate::auth::AppState;
use crate::error::WalletError;

pub async fn list_platforms(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, WalletError> {
    let platforms: Vec<PlatformDescriptor> = state
        .db
        .list_platforms()?
        .into_iter()
        .map(|row| PlatformDescriptor {
            id: row.id,
            name: row.name,
        })
        .collect();

    Ok(Json(platforms))
}

/// Resolve a platform by name, ignoring case and surrounding whitespace.
/// The caller's spelling is kept; the writer matches it case-insensitively.
fn resolve_platform(state: &AppState, name: &str) -> Result<PlatformDescriptor, WalletError> {
    let name = name.trim();
    let row = state
        .db
        .get_platform_by_name(name)?
        .ok_or(WalletError::NotFound)?;

    Ok(PlatformDescriptor {
        id: row.id,
        name: name.to_string(),
    })
}

pub async fn store_wallet(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<StoreWalletRequest>,
) -> Result<impl IntoResponse, WalletError> {
    let platform = resolve_platform(&state, &req.platform)?;

    let stored = state
        .wallets
        .store_wallet(&user, &platform, &req.result)
        .await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list_wallets(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, WalletError> {
    Ok(Json(state.wallets.list_wallets(&user).await?))
}

pub async fn get_wallet(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, WalletError> {
    Ok(Json(state.wallets.reveal_wallet(&user, id).await?))
}

pub async fn delete_wallet(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, WalletError> {
    state.wallets.remove_wallet(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_wallet_token(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTokenRequest>,
) -> Result<impl IntoResponse, WalletError> {
    Ok(Json(state.wallets.update_wallet_token(&user, id, &req.token).await?))
}

pub async fn find_platform_wallet(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(name): Path<String>,
    Query(query): Query<WalletLookupQuery>,
) -> Result<impl IntoResponse, WalletError> {
    let platform = resolve_platform(&state, &name)?;
    let wallet = state
        .wallets
        .find_wallet(&user, &platform, &query.identifier)
        .await?
        .ok_or(WalletError::NotFound)?;

    Ok(Json(wallet))
}

pub async fn update_platform_token(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(name): Path<String>,
    Query(query): Query<WalletLookupQuery>,
    Json(req): Json<UpdateTokenRequest>,
) -> Result<impl IntoResponse, WalletError> {
    let platform = resolve_platform(&state, &name)?;
    let updated = state
        .wallets
        .update_token(&user, &platform, &query.identifier, &req.token)
        .await?;

    Ok(Json(updated))
}
