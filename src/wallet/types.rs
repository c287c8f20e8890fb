//! Key material types and wallet errors.

use k256::ecdsa::{SigningKey, VerifyingKey};
use thiserror::Error;

/// Length of a secp256k1 secret scalar in bytes.
const PRIVATE_KEY_LEN: usize = 32;

/// A secp256k1 key pair in its stored text form.
///
/// `public_key` is the account identifier sent to the server (hex of the
/// uncompressed SEC1 point). `private_key` never leaves the local store.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

impl KeyPair {
    /// Encode a signing key and its public half as lowercase hex.
    pub fn from_signing_key(signing_key: &SigningKey) -> Self {
        let public = signing_key.verifying_key().to_encoded_point(false);
        Self {
            public_key: hex::encode(public.as_bytes()),
            private_key: hex::encode(signing_key.to_bytes()),
        }
    }

    /// Parse the private half back into a signing key.
    pub fn signing_key(&self) -> WalletResult<SigningKey> {
        parse_private_key(&self.private_key)
    }

    /// Check that the stored public key belongs to the stored private key.
    pub fn check_consistent(&self) -> WalletResult<()> {
        let signing_key = self.signing_key()?;
        let derived = signing_key.verifying_key();
        let stored = parse_public_key(&self.public_key)?;
        if *derived != stored {
            return Err(WalletError::KeyMismatch);
        }
        Ok(())
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Parse a hex private key. Accepts an optional `0x` prefix and hex with
/// leading zero bytes stripped.
pub fn parse_private_key(private_key_hex: &str) -> WalletResult<SigningKey> {
    let key_hex = private_key_hex.trim();
    let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

    if key_hex.is_empty() || key_hex.len() > PRIVATE_KEY_LEN * 2 {
        return Err(WalletError::InvalidKey(format!(
            "private key must be 1..={} hex characters",
            PRIVATE_KEY_LEN * 2
        )));
    }

    let padded = format!("{:0>width$}", key_hex, width = PRIVATE_KEY_LEN * 2);
    let bytes = hex::decode(&padded)
        .map_err(|e| WalletError::InvalidKey(format!("private key is not hex: {}", e)))?;

    SigningKey::from_slice(&bytes)
        .map_err(|_| WalletError::InvalidKey("private key is not a valid scalar".to_string()))
}

/// Parse a hex SEC1 public key (compressed or uncompressed).
pub fn parse_public_key(public_key_hex: &str) -> WalletResult<VerifyingKey> {
    let key_hex = public_key_hex.trim();
    let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);
    let bytes = hex::decode(key_hex)
        .map_err(|e| WalletError::InvalidKey(format!("public key is not hex: {}", e)))?;

    VerifyingKey::from_sec1_bytes(&bytes)
        .map_err(|_| WalletError::InvalidKey("public key is not a curve point".to_string()))
}

/// Errors from key handling and signing.
#[derive(Debug, Error)]
pub enum WalletError {
    /// No key pair has been generated yet.
    #[error("no key pair available")]
    NoKey,

    /// Amount is zero, negative, NaN or infinite.
    #[error("amount must be a finite positive number, got {0}")]
    InvalidAmount(f64),

    /// Stored key text could not be parsed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Stored public key does not match the stored private key.
    #[error("stored public key does not match private key")]
    KeyMismatch,

    /// ECDSA signing or verification failed.
    #[error("signature error: {0}")]
    Signature(String),

    /// Key store read or write failed.
    #[error("key store error: {0}")]
    Store(String),
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    // Fixed scalar so the hex forms are stable
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_key_pair_encoding() {
        let signing_key = parse_private_key(TEST_PRIVATE_KEY).unwrap();
        let pair = KeyPair::from_signing_key(&signing_key);

        assert_eq!(pair.private_key, TEST_PRIVATE_KEY);
        assert_eq!(pair.public_key.len(), 130);
        assert!(pair.public_key.starts_with("04"));
        assert!(pair.check_consistent().is_ok());
    }

    #[test]
    fn test_private_key_with_prefix_and_short_hex() {
        let with_prefix = parse_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        let plain = parse_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(with_prefix.to_bytes(), plain.to_bytes());

        // Leading zeros dropped by some encoders
        let short = parse_private_key("1").unwrap();
        let full = parse_private_key(&format!("{:0>64}", "1")).unwrap();
        assert_eq!(short.to_bytes(), full.to_bytes());
    }

    #[test]
    fn test_invalid_private_key() {
        assert!(parse_private_key("").is_err());
        assert!(parse_private_key("zz").is_err());
        // Zero is not a valid scalar
        assert!(parse_private_key("00").is_err());
        let result = parse_private_key(&"f".repeat(66));
        assert!(result.unwrap_err().to_string().contains("hex characters"));
    }

    #[test]
    fn test_mismatched_pair() {
        let a = KeyPair::from_signing_key(&parse_private_key("01").unwrap());
        let b = KeyPair::from_signing_key(&parse_private_key("02").unwrap());
        let mixed = KeyPair {
            public_key: a.public_key,
            private_key: b.private_key,
        };
        assert!(matches!(mixed.check_consistent(), Err(WalletError::KeyMismatch)));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let pair = KeyPair::from_signing_key(&parse_private_key(TEST_PRIVATE_KEY).unwrap());
        let debug = format!("{:?}", pair);
        assert!(!debug.contains(TEST_PRIVATE_KEY));
        assert!(debug.contains("<redacted>"));
    }
}
