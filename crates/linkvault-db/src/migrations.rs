use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub const GMAIL_PLATFORM_ID: &str = "00000000-0000-0000-0000-000000000001";
pub const TWITTER_PLATFORM_ID: &str = "00000000-0000-0000-0000-000000000002";
pub const TELEGRAM_PLATFORM_ID: &str = "00000000-0000-0000-0000-000000000003";

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY CHECK (length(id) <= 64),
            password    TEXT NOT NULL,
            auth_key    TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS platforms (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL UNIQUE COLLATE NOCASE
        );

        -- username is NULL for platforms without a display name (telegram).
        -- unique_id is ciphertext, so uniqueness rides on its keyed hash.
        CREATE TABLE IF NOT EXISTS wallets (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            platform_id     TEXT NOT NULL REFERENCES platforms(id),
            username        TEXT,
            token           TEXT NOT NULL,
            unique_id       TEXT NOT NULL,
            unique_id_hash  TEXT NOT NULL,
            iv              TEXT NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(platform_id, unique_id_hash)
        );

        CREATE INDEX IF NOT EXISTS idx_wallets_user
            ON wallets(user_id);
        ",
    )?;

    seed_platforms(conn)?;

    info!("Database migrations complete");
    Ok(())
}

fn seed_platforms(conn: &Connection) -> Result<()> {
    let seeds = [
        (GMAIL_PLATFORM_ID, "gmail"),
        (TWITTER_PLATFORM_ID, "twitter"),
        (TELEGRAM_PLATFORM_ID, "telegram"),
    ];

    for (id, name) in seeds {
        conn.execute(
            "INSERT OR IGNORE INTO platforms (id, name) VALUES (?1, ?2)",
            (id, name),
        )?;
    }

    Ok(())
}
