use std::sync::Arc;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{
        SaltString,
        rand_core::{OsRng, RngCore},
    },
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use tracing::{error, info};
use uuid::Uuid;

use linkvault_db::Database;
use linkvault_types::api::{CreateUserRequest, CreateUserResponse};

use crate::wallet::WalletWriter;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub wallets: WalletWriter<Database>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.password.len() < 8 {
        return Err(StatusCode::BAD_REQUEST);
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .to_string();

    let user_id = Uuid::new_v4().to_string();
    let auth_key = generate_auth_key();

    state
        .db
        .create_user(&user_id, &password_hash, &auth_key)
        .map_err(|e| {
            error!("Error creating user: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Created user {}", user_id);

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse { user_id, auth_key }),
    ))
}

/// 256 random bits, URL-safe base64.
fn generate_auth_key() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
