use anyhow::Result;
use rusqlite::{ErrorCode, ffi};
use tracing::warn;

use crate::Database;
use crate::models::{NewWallet, WalletRow, WalletUpdate};
use crate::queries;

/// Result of a wallet insert.
///
/// Duplicate keys are an expected outcome (the identity is already linked)
/// and get their own variant instead of travelling inside an error.
#[derive(Debug)]
pub enum InsertOutcome {
    Inserted(WalletRow),
    DuplicateKey,
    Failed(anyhow::Error),
}

/// Storage used by the wallet writer.
pub trait WalletStore: Send + Sync + 'static {
    fn create(&self, wallet: &NewWallet) -> InsertOutcome;

    fn wallets_for_user(&self, user_id: &str) -> Result<Vec<WalletRow>>;

    fn wallet(&self, id: i64) -> Result<Option<WalletRow>>;

    fn wallet_by_hash(&self, platform_id: &str, unique_id_hash: &str) -> Result<Option<WalletRow>>;

    fn update(&self, update: &WalletUpdate) -> Result<bool>;

    fn remove(&self, id: i64, user_id: &str) -> Result<bool>;
}

impl WalletStore for Database {
    fn create(&self, wallet: &NewWallet) -> InsertOutcome {
        let attempt = self.with_conn(|conn| Ok(queries::insert_wallet(conn, wallet)));

        match attempt {
            Ok(Ok(row)) => InsertOutcome::Inserted(row),
            Ok(Err(e)) if is_duplicate_key(&e) => {
                warn!(platform_id = %wallet.platform_id, "Duplicate wallet rejected by unique constraint");
                InsertOutcome::DuplicateKey
            }
            Ok(Err(e)) => InsertOutcome::Failed(e.into()),
            Err(e) => InsertOutcome::Failed(e),
        }
    }

    fn wallets_for_user(&self, user_id: &str) -> Result<Vec<WalletRow>> {
        self.list_wallets_for_user(user_id)
    }

    fn wallet(&self, id: i64) -> Result<Option<WalletRow>> {
        self.get_wallet(id)
    }

    fn wallet_by_hash(&self, platform_id: &str, unique_id_hash: &str) -> Result<Option<WalletRow>> {
        self.find_wallet_by_hash(platform_id, unique_id_hash)
    }

    fn update(&self, update: &WalletUpdate) -> Result<bool> {
        self.update_wallet_fields(update)
    }

    fn remove(&self, id: i64, user_id: &str) -> Result<bool> {
        self.delete_wallet(id, user_id)
    }
}

/// UNIQUE and PRIMARY KEY violations count as duplicates. Other constraint
/// failures (foreign keys, NOT NULL, CHECK) do not.
fn is_duplicate_key(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && matches!(
                    e.extended_code,
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                )
        }
        _ => false,
    }
}
