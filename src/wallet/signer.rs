//! Transaction signing.
//!
//! # Algorithm
//! ```text
//! TransactionDraft
//!     → canonical JSON (sender_public_key, recipient_public_key, amount)
//!     → SHA-256 digest
//!     → ECDSA/secp256k1 over the digest (RFC 6979, low-S)
//!     → DER → lowercase hex
//! ```

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey};
use sha2::{Digest, Sha256};

use crate::ledger::transaction::{SignedTransaction, TransactionDraft};
use crate::wallet::types::{parse_public_key, KeyPair, WalletError, WalletResult};

/// SHA-256 of the draft's canonical form.
pub fn digest(draft: &TransactionDraft) -> [u8; 32] {
    Sha256::digest(draft.canonical_bytes()).into()
}

/// Signs drafts with one private key.
pub struct Signer {
    signing_key: SigningKey,
}

impl Signer {
    pub fn new(key_pair: &KeyPair) -> WalletResult<Self> {
        Ok(Self {
            signing_key: key_pair.signing_key()?,
        })
    }

    /// Build a signer from whatever the key manager loaded.
    pub fn from_loaded(key_pair: Option<&KeyPair>) -> WalletResult<Self> {
        key_pair.ok_or(WalletError::NoKey).and_then(Self::new)
    }

    /// Sign a draft, consuming it so it cannot change after signing.
    pub fn sign(&self, draft: TransactionDraft) -> WalletResult<SignedTransaction> {
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(WalletError::InvalidAmount(draft.amount));
        }

        let hash = digest(&draft);
        let signature: Signature = self
            .signing_key
            .sign_prehash(&hash)
            .map_err(|e| WalletError::Signature(e.to_string()))?;
        let encoded = hex::encode(signature.to_der().as_bytes());

        tracing::debug!(
            recipient = %draft.recipient_public_key,
            amount = draft.amount,
            "Signed transaction"
        );

        Ok(SignedTransaction::new(draft, encoded))
    }
}

/// Check a signature against the sender key embedded in the draft.
pub fn verify(signed: &SignedTransaction) -> WalletResult<()> {
    verify_with_key(signed.draft(), signed.signature(), &signed.draft().sender_public_key)
}

/// Check a hex DER signature over `draft` against a hex public key.
pub fn verify_with_key(
    draft: &TransactionDraft,
    signature_hex: &str,
    public_key_hex: &str,
) -> WalletResult<()> {
    let verifying_key = parse_public_key(public_key_hex)?;
    let der = hex::decode(signature_hex)
        .map_err(|e| WalletError::Signature(format!("signature is not hex: {}", e)))?;
    let signature =
        Signature::from_der(&der).map_err(|e| WalletError::Signature(e.to_string()))?;

    verifying_key
        .verify_prehash(&digest(draft), &signature)
        .map_err(|_| WalletError::Signature("verification failed".to_string()))
}
