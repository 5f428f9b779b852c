use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit, OsRng, Payload, rand_core::RngCore},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::CryptoError;
use crate::hash::{self, HmacSha512};

pub const IV_LEN: usize = 12;

/// Encrypted slots of a wallet record.
///
/// Each slot gets its own nonce derived from the record IV and is bound to
/// its slot name as associated data, so ciphertexts cannot be swapped between
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Token,
    UniqueId,
}

impl Field {
    fn slot(self) -> u8 {
        match self {
            Self::Username => 0,
            Self::Token => 1,
            Self::UniqueId => 2,
        }
    }

    fn aad(self) -> &'static [u8] {
        match self {
            Self::Username => b"linkvault-wallet-v1:username",
            Self::Token => b"linkvault-wallet-v1:token",
            Self::UniqueId => b"linkvault-wallet-v1:unique_id",
        }
    }

    fn nonce(self, iv: &[u8; IV_LEN]) -> [u8; IV_LEN] {
        let mut nonce = *iv;
        nonce[IV_LEN - 1] ^= self.slot();
        nonce
    }
}

/// Output of one field encryption. Both values are base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encrypted {
    pub e_info: String,
    pub iv: String,
}

/// Encryption and hashing under the process key.
#[derive(Clone)]
pub struct Security {
    cipher: Aes256Gcm,
    mac: HmacSha512,
}

impl Security {
    pub fn new(key: &[u8; 32]) -> Result<Self, CryptoError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        let mac = hash::new_mac(&hash::derive_hash_key(key))?;
        Ok(Self { cipher, mac })
    }

    /// Start encrypting one record under a fresh random IV.
    pub fn record(&self) -> RecordCipher<'_> {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);
        RecordCipher { security: self, iv }
    }

    /// Deterministic hex digest of `plaintext`, used as a lookup hash.
    pub fn hash(&self, plaintext: &str) -> String {
        hash::digest(&self.mac, plaintext.as_bytes())
    }

    /// Open a field encrypted by [`RecordCipher::encrypt`].
    pub fn decrypt(&self, field: Field, e_info: &str, iv: &str) -> Result<String, CryptoError> {
        let ciphertext = BASE64.decode(e_info)?;
        let iv = decode_iv(iv)?;
        let nonce = field.nonce(&iv);

        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &ciphertext,
                    aad: field.aad(),
                },
            )
            .map_err(|_| CryptoError::Decrypt)?;

        Ok(String::from_utf8(plaintext)?)
    }
}

/// Encrypts the fields of a single record. All fields share the record IV.
pub struct RecordCipher<'a> {
    security: &'a Security,
    iv: [u8; IV_LEN],
}

impl RecordCipher<'_> {
    /// Base64 IV to store next to the record.
    pub fn iv(&self) -> String {
        BASE64.encode(self.iv)
    }

    pub fn encrypt(&self, field: Field, plaintext: &str) -> Result<Encrypted, CryptoError> {
        let nonce = field.nonce(&self.iv);

        let ciphertext = self
            .security
            .cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: plaintext.as_bytes(),
                    aad: field.aad(),
                },
            )
            .map_err(|_| CryptoError::Encrypt)?;

        Ok(Encrypted {
            e_info: BASE64.encode(ciphertext),
            iv: self.iv(),
        })
    }
}

fn decode_iv(encoded: &str) -> Result<[u8; IV_LEN], CryptoError> {
    let bytes = BASE64.decode(encoded)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| CryptoError::InvalidIv(len))
}
