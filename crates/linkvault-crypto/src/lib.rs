/// Linkvault Crypto Library
///
/// The security helper behind wallet storage:
/// - AES-256-GCM field encryption, one IV per stored record
/// - Keyed HMAC-SHA512 digests used as lookup hashes for encrypted identifiers
///
/// A single process key drives both. It is loaded once at startup and handed
/// to [`Security::new`]; nothing in here reads configuration on its own.
pub mod encrypt;
pub mod error;
pub mod hash;
pub mod keys;

pub use encrypt::{Encrypted, Field, RecordCipher, Security};
pub use error::CryptoError;
