use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity platforms a wallet can link to.
///
/// Platform names coming from the database or from callers are matched
/// case-insensitively through [`Platform::from_name`]. Adding a platform here
/// forces every `match` over it to handle the new variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Gmail,
    Twitter,
    Telegram,
}

impl Platform {
    /// Resolve a platform from its display name, ignoring case and
    /// surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "gmail" => Some(Self::Gmail),
            "twitter" => Some(Self::Twitter),
            "telegram" => Some(Self::Telegram),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gmail => "gmail",
            Self::Twitter => "twitter",
            Self::Telegram => "telegram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
