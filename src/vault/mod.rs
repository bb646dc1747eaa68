//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - The plaintext `Vault` map and `Lookup` results (`model`)
//! - The persisted KDF salt (`salt`)
//! - The authenticated blob format (`codec`)
//! - The blob file with atomic saves (`store`)
//! - `VaultManager`, the public orchestrator (`manager`)

pub mod codec;
pub mod manager;
pub mod model;
pub mod salt;
pub mod store;

// Re-export the most commonly used items.
pub use codec::{BlobInfo, DecodeError};
pub use manager::{
    validate_new_master_password, AddedCredential, VaultManager, VaultStatus,
    MIN_MASTER_PASSWORD_LEN,
};
pub use model::{Credentials, Lookup, ServiceMap, Vault};
pub use salt::SaltStore;
pub use store::VaultStore;
