use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::middleware::require_auth;
use crate::wallets;

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/users", post(auth::create_user))
        .route("/platforms", get(wallets::list_platforms))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/wallets", get(wallets::list_wallets).post(wallets::store_wallet))
        .route(
            "/wallets/{id}",
            get(wallets::get_wallet)
                .put(wallets::update_wallet_token)
                .delete(wallets::delete_wallet),
        )
        .route(
            "/platforms/{name}/wallets",
            get(wallets::find_platform_wallet).put(wallets::update_platform_token),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}
