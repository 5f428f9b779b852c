/// Database row types — these map directly to SQLite rows.
/// Distinct from linkvault-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub password: String,
    pub auth_key: String,
    pub created_at: String,
}

pub struct PlatformRow {
    pub id: String,
    pub name: String,
}

/// Columns supplied by the caller when linking a wallet.
/// Every field except the ids is already encrypted or hashed.
#[derive(Debug, Clone)]
pub struct NewWallet {
    pub user_id: String,
    pub platform_id: String,
    pub username: Option<String>,
    pub token: String,
    pub unique_id: String,
    pub unique_id_hash: String,
    pub iv: String,
}

/// Re-encrypted columns of an existing wallet. The lookup hash never changes.
#[derive(Debug, Clone)]
pub struct WalletUpdate {
    pub id: i64,
    pub user_id: String,
    pub username: Option<String>,
    pub token: String,
    pub unique_id: String,
    pub iv: String,
}

#[derive(Debug, Clone)]
pub struct WalletRow {
    pub id: i64,
    pub user_id: String,
    pub platform_id: String,
    pub platform_name: String,
    pub username: Option<String>,
    pub token: String,
    pub unique_id: String,
    pub unique_id_hash: String,
    pub iv: String,
    pub created_at: String,
}
