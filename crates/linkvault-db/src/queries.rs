use crate::Database;
use crate::models::{NewWallet, PlatformRow, UserRow, WalletRow, WalletUpdate};
use anyhow::Result;
use rusqlite::{Connection, Row};

const WALLET_SELECT: &str = "
    SELECT w.id, w.user_id, w.platform_id, p.name, w.username, w.token,
           w.unique_id, w.unique_id_hash, w.iv, w.created_at
    FROM wallets w
    JOIN platforms p ON w.platform_id = p.id";

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, password_hash: &str, auth_key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, password, auth_key) VALUES (?1, ?2, ?3)",
                (id, password_hash, auth_key),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    pub fn get_user_by_auth_key(&self, auth_key: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "auth_key", auth_key))
    }

    // -- Platforms --

    /// Case-insensitive: the name column is declared `COLLATE NOCASE`.
    pub fn get_platform_by_name(&self, name: &str) -> Result<Option<PlatformRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name FROM platforms WHERE name = ?1",
                [name],
                |row| {
                    Ok(PlatformRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
        })
    }

    pub fn list_platforms(&self) -> Result<Vec<PlatformRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM platforms ORDER BY name")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(PlatformRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Wallets --

    pub fn list_wallets_for_user(&self, user_id: &str) -> Result<Vec<WalletRow>> {
        self.with_conn(|conn| {
            let sql = format!("{} WHERE w.user_id = ?1 ORDER BY w.id", WALLET_SELECT);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id], wallet_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_wallet(&self, id: i64) -> Result<Option<WalletRow>> {
        self.with_conn(|conn| query_wallet_by_id(conn, id).optional())
    }

    pub fn find_wallet_by_hash(
        &self,
        platform_id: &str,
        unique_id_hash: &str,
    ) -> Result<Option<WalletRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{} WHERE w.platform_id = ?1 AND w.unique_id_hash = ?2",
                WALLET_SELECT
            );
            conn.query_row(&sql, [platform_id, unique_id_hash], wallet_from_row)
                .optional()
        })
    }

    /// Overwrite the encrypted columns of a wallet owned by `update.user_id`.
    /// Returns false when nothing matched.
    pub fn update_wallet_fields(&self, update: &WalletUpdate) -> Result<bool> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE wallets SET username = ?1, token = ?2, unique_id = ?3, iv = ?4
                 WHERE id = ?5 AND user_id = ?6",
                rusqlite::params![
                    update.username,
                    update.token,
                    update.unique_id,
                    update.iv,
                    update.id,
                    update.user_id,
                ],
            )?;
            Ok(updated > 0)
        })
    }

    /// Delete a wallet owned by `user_id`. Returns false when nothing matched.
    pub fn delete_wallet(&self, id: i64, user_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM wallets WHERE id = ?1 AND user_id = ?2",
                rusqlite::params![id, user_id],
            )?;
            Ok(deleted > 0)
        })
    }
}

/// Insert a wallet and read it back. Errors are returned untouched so the
/// caller can tell constraint violations apart from everything else.
pub(crate) fn insert_wallet(conn: &Connection, wallet: &NewWallet) -> rusqlite::Result<WalletRow> {
    conn.execute(
        "INSERT INTO wallets (user_id, platform_id, username, token, unique_id, unique_id_hash, iv)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            wallet.user_id,
            wallet.platform_id,
            wallet.username,
            wallet.token,
            wallet.unique_id,
            wallet.unique_id_hash,
            wallet.iv,
        ],
    )?;

    query_wallet_by_id(conn, conn.last_insert_rowid())
}

fn query_wallet_by_id(conn: &Connection, id: i64) -> rusqlite::Result<WalletRow> {
    let sql = format!("{} WHERE w.id = ?1", WALLET_SELECT);
    conn.query_row(&sql, [id], wallet_from_row)
}

fn wallet_from_row(row: &Row<'_>) -> rusqlite::Result<WalletRow> {
    Ok(WalletRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        platform_id: row.get(2)?,
        platform_name: row.get(3)?,
        username: row.get(4)?,
        token: row.get(5)?,
        unique_id: row.get(6)?,
        unique_id_hash: row.get(7)?,
        iv: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    let sql = format!(
        "SELECT id, password, auth_key, created_at FROM users WHERE {} = ?1",
        column
    );
    let mut stmt = conn.prepare(&sql)?;

    stmt.query_row([value], |row| {
        Ok(UserRow {
            id: row.get(0)?,
            password: row.get(1)?,
            auth_key: row.get(2)?,
            created_at: row.get(3)?,
        })
    })
    .optional()
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
