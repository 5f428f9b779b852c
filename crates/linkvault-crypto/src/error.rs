use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("AEAD encryption failed")]
    Encrypt,

    #[error("AEAD decryption failed (authentication tag mismatch)")]
    Decrypt,

    #[error("Invalid IV length: expected 12 bytes, got {0}")]
    InvalidIv(usize),

    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("Decrypted value is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
