//! Key pair lifecycle: generate, persist, load.

use k256::ecdsa::SigningKey;
use std::sync::Arc;

use crate::wallet::store::{KeyStore, PRIVATE_KEY_SLOT, PUBLIC_KEY_SLOT};
use crate::wallet::types::{KeyPair, WalletResult};

/// Owns access to the persisted key pair.
///
/// Regeneration is the only writer; it runs from a single user action.
#[derive(Clone)]
pub struct KeyManager {
    /// Where both halves of the pair live.
    store: Arc<dyn KeyStore>,
}

impl KeyManager {
    /// Create a manager over `store`.
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self { store }
    }

    /// Generate a fresh secp256k1 key pair, overwriting any stored pair.
    ///
    /// The pair is persisted before it is returned, so a following
    /// [`load`](Self::load) yields the same value.
    pub fn generate(&self) -> WalletResult<KeyPair> {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let pair = KeyPair::from_signing_key(&signing_key);

        self.store.save_all(&[
            (PRIVATE_KEY_SLOT, pair.private_key.as_str()),
            (PUBLIC_KEY_SLOT, pair.public_key.as_str()),
        ])?;

        tracing::info!(public_key = %pair.public_key, "Generated new key pair");
        Ok(pair)
    }

    /// Read the stored pair. `None` until both halves have been stored.
    pub fn load(&self) -> WalletResult<Option<KeyPair>> {
        let public_key = self.store.load(PUBLIC_KEY_SLOT)?;
        let private_key = self.store.load(PRIVATE_KEY_SLOT)?;

        match (public_key, private_key) {
            (Some(public_key), Some(private_key))
                if !public_key.is_empty() && !private_key.is_empty() =>
            {
                let pair = KeyPair {
                    public_key,
                    private_key,
                };
                pair.check_consistent()?;
                Ok(Some(pair))
            }
            _ => Ok(None),
        }
    }
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::store::MemoryKeyStore;
    use crate::wallet::types::WalletError;

    fn manager() -> (KeyManager, Arc<MemoryKeyStore>) {
        let store = Arc::new(MemoryKeyStore::new());
        (KeyManager::new(store.clone()), store)
    }

    #[test]
    fn test_load_before_generate_is_absent() {
        let (keys, _) = manager();
        assert!(keys.load().unwrap().is_none());
    }

    #[test]
    fn test_generate_then_load_is_idempotent() {
        let (keys, _) = manager();
        let generated = keys.generate().unwrap();

        assert_eq!(keys.load().unwrap(), Some(generated.clone()));
        assert_eq!(keys.load().unwrap(), Some(generated));
    }

    #[test]
    fn test_regenerate_overwrites() {
        let (keys, _) = manager();
        let first = keys.generate().unwrap();
        let second = keys.generate().unwrap();

        assert_ne!(first.public_key, second.public_key);
        assert_eq!(keys.load().unwrap(), Some(second));
    }

    #[test]
    fn test_half_stored_pair_is_absent() {
        let (keys, store) = manager();
        store.save(PUBLIC_KEY_SLOT, "04aa").unwrap();
        assert!(keys.load().unwrap().is_none());
    }

    #[test]
    fn test_tampered_store_is_rejected() {
        let (keys, store) = manager();
        keys.generate().unwrap();
        let other = KeyPair::from_signing_key(&SigningKey::random(&mut rand::thread_rng()));
        store.save(PUBLIC_KEY_SLOT, &other.public_key).unwrap();

        assert!(matches!(keys.load(), Err(WalletError::KeyMismatch)));
    }
}
