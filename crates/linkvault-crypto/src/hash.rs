//! Keyed lookup hashes.
//!
//! Wallet identifiers are stored encrypted with a random IV, so the
//! ciphertext cannot back a uniqueness constraint. The HMAC-SHA512 digest of
//! the plaintext identifier can.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::CryptoError;

pub type HmacSha512 = Hmac<Sha512>;

/// MAC key for lookup hashes, derived from the process key.
pub fn derive_hash_key(key: &[u8; 32]) -> [u8; 32] {
    Sha256::new()
        .chain_update(b"linkvault-uid-hash-v1\x00")
        .chain_update(key)
        .finalize()
        .into()
}

pub fn new_mac(hash_key: &[u8]) -> Result<HmacSha512, CryptoError> {
    HmacSha512::new_from_slice(hash_key).map_err(|e| CryptoError::InvalidKey(e.to_string()))
}

/// Hex digest of `data` under a prepared MAC.
pub fn digest(mac: &HmacSha512, data: &[u8]) -> String {
    let mut mac = mac.clone();
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}
