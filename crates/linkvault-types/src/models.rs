use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An account that wallets hang off. Only the id is needed to link wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
}

/// A row of the platforms table as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    pub id: String,
    pub name: String,
}

// -- Auth results --
//
// Shapes of the auth payloads handed over by the upstream login flow.
// Telegram has no fixed shape and is carried as raw JSON.

#[derive(Debug, Clone, Deserialize)]
pub struct GmailResult {
    pub profile: GmailProfile,
    pub token: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GmailProfile {
    pub data: GmailProfileData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GmailProfileData {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterResult {
    pub profile: TwitterProfile,
    pub token: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterProfile {
    pub name: String,
    pub screen_name: String,
}

// -- Wallets --

/// Wallet listing entry. Never carries plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSummary {
    pub id: i64,
    pub platform_id: String,
    pub platform: String,
    pub created_at: String,
}

/// A wallet with its encrypted fields opened for the owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealedWallet {
    pub id: i64,
    pub platform: String,
    pub username: Option<Value>,
    pub token: Value,
    pub unique_id: Value,
    pub created_at: String,
}
