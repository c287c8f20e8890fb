//! Local key material and signing.
//!
//! # Data Flow
//! ```text
//! KeyStore (store.rs: file or memory)
//!     ⇄ KeyManager (manager.rs: generate / load)
//!     → KeyPair (types.rs)
//!     → Signer (signer.rs: canonical form → SHA-256 → ECDSA)
//! ```
//!
//! # Security Constraints
//! - The private key is only read from the key store
//! - Private keys are never logged; `KeyPair`'s `Debug` redacts them

pub mod manager;
pub mod signer;
pub mod store;
pub mod types;

pub use manager::KeyManager;
pub use signer::Signer;
pub use store::{FileKeyStore, KeyStore, MemoryKeyStore};
pub use types::{KeyPair, WalletError, WalletResult};
