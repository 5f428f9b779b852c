use std::path::PathBuf;

use anyhow::{Context, Result};

use linkvault_crypto::keys::{KEY_LEN, key_from_base64};

pub struct Config {
    pub key: [u8; KEY_LEN],
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Read settings from the environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let encoded = get("LINKVAULT_KEY").context("LINKVAULT_KEY is not set")?;
        let key = key_from_base64(&encoded).context("LINKVAULT_KEY must be 32 bytes of base64")?;

        let db_path = get("LINKVAULT_DB_PATH").unwrap_or_else(|| "linkvault.db".into());
        let host = get("LINKVAULT_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("LINKVAULT_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("LINKVAULT_PORT must be a port number")?;

        Ok(Self {
            key,
            db_path: PathBuf::from(db_path),
            host,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use linkvault_crypto::keys::{generate_key, key_to_base64};

    use super::*;

    fn lookup(vars: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply() {
        let key = generate_key();
        let config = Config::from_lookup(lookup(&[("LINKVAULT_KEY", key_to_base64(&key))])).unwrap();

        assert_eq!(config.key, key);
        assert_eq!(config.db_path, PathBuf::from("linkvault.db"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn key_is_required() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn bad_port_rejected() {
        let vars = [
            ("LINKVAULT_KEY", key_to_base64(&generate_key())),
            ("LINKVAULT_PORT", "eighty".to_string()),
        ];
        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }
}
