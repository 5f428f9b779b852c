use serde::{Deserialize, Serialize};
use serde_json::Value;

// -- Users --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user_id: String,
    /// Bearer credential for the wallet routes. Shown once.
    pub auth_key: String,
}

// -- Wallets --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreWalletRequest {
    /// Platform name, matched case-insensitively.
    pub platform: String,
    /// Auth result as returned by the platform's login flow.
    pub result: Value,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTokenRequest {
    pub token: Value,
}

/// Query string of the per-platform wallet routes.
#[derive(Debug, Deserialize)]
pub struct WalletLookupQuery {
    /// Plaintext account identifier: the email, the screen name, or the
    /// serialized telegram auth result.
    pub identifier: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
