//! VaultBlob encoding: the authenticated, encrypted on-disk form of a `Vault`.
//!
//! A blob has this layout:
//!
//! ```text
//! [PVLT: 4][version: 1][written_at: 8 BE][m_cost: 4 BE][t_cost: 4 BE][p_cost: 4 BE][nonce: 12][ciphertext + tag]
//! ```
//!
//! - **Magic** (`PVLT`): identifies the file as a PassVault blob.
//! - **Version**: format version (currently `1`).
//! - **Written at**: unix seconds when the blob was produced.
//! - **Argon2 params**: the cost the key was derived with, so opening the
//!   vault never depends on what the config file says today.
//! - **Nonce / ciphertext / tag**: AES-256-GCM output over the vault JSON.
//!
//! The 25-byte prefix is fed to AES-GCM as associated data, so every byte
//! of the blob is covered by the authentication tag.

use chrono::{DateTime, Utc};
use thiserror::Error;
use zeroize::Zeroizing;

use super::model::Vault;
use crate::crypto::encryption::{self, NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::Argon2Params;
use crate::crypto::keys::MasterKey;
use crate::errors::{PassVaultError, Result};

/// Magic bytes at the start of every blob.
const MAGIC: &[u8; 4] = b"PVLT";

/// Current blob format version.
pub const FORMAT_VERSION: u8 = 1;

/// Fixed-size cleartext prefix: 4 (magic) + 1 (version) + 8 (timestamp)
/// + 3 * 4 (Argon2 params).
const PREFIX_LEN: usize = 25;

const TIMESTAMP_AT: usize = 5;
const PARAMS_AT: usize = 13;

/// Smallest possible blob: prefix, nonce and tag around an empty payload.
pub const MIN_BLOB_LEN: usize = PREFIX_LEN + NONCE_LEN + TAG_LEN;

/// A blob could not be turned back into a vault.
///
/// Carries no detail on purpose: a wrong key, a flipped bit, a truncated
/// file and an unknown format all look the same from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("vault blob failed authentication")]
pub struct DecodeError;

impl From<DecodeError> for PassVaultError {
    fn from(_: DecodeError) -> Self {
        PassVaultError::WrongPasswordOrCorrupt
    }
}

/// Authenticated metadata from a blob's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobInfo {
    pub version: u8,
    pub written_at: DateTime<Utc>,
    pub kdf: Argon2Params,
}

/// Serialize `vault` and encrypt it under `key` with a fresh nonce.
///
/// `kdf` must be the params `key` was derived with; they are stored in
/// the prefix for the next open.
pub fn encode(vault: &Vault, key: &MasterKey, kdf: &Argon2Params) -> Result<Vec<u8>> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(vault)
            .map_err(|e| PassVaultError::SerializationError(format!("vault: {e}")))?,
    );

    let mut prefix = [0u8; PREFIX_LEN];
    prefix[..4].copy_from_slice(MAGIC);
    prefix[4] = FORMAT_VERSION;
    prefix[TIMESTAMP_AT..PARAMS_AT].copy_from_slice(&Utc::now().timestamp().to_be_bytes());
    prefix[PARAMS_AT..PARAMS_AT + 4].copy_from_slice(&kdf.memory_kib.to_be_bytes());
    prefix[PARAMS_AT + 4..PARAMS_AT + 8].copy_from_slice(&kdf.iterations.to_be_bytes());
    prefix[PARAMS_AT + 8..PREFIX_LEN].copy_from_slice(&kdf.parallelism.to_be_bytes());

    let sealed = encryption::encrypt(key.as_bytes(), &plaintext, &prefix)?;

    let mut blob = Vec::with_capacity(PREFIX_LEN + sealed.len());
    blob.extend_from_slice(&prefix);
    blob.extend_from_slice(&sealed);
    Ok(blob)
}

/// Read the Argon2 params a blob was written with.
///
/// These are not authenticated yet; they only decide how to derive the
/// key, and a doctored value then fails the tag check in `decode`.
/// Values outside the supported range are rejected here so they never
/// reach the KDF.
pub fn kdf_params(blob: &[u8]) -> std::result::Result<Argon2Params, DecodeError> {
    let prefix = checked_prefix(blob)?;
    let params = read_params(prefix);
    params.validate().map_err(|_| DecodeError)?;
    Ok(params)
}

/// Authenticate and decrypt `blob`, returning the vault it holds.
pub fn decode(blob: &[u8], key: &MasterKey) -> std::result::Result<Vault, DecodeError> {
    decode_with_info(blob, key).map(|(vault, _)| vault)
}

/// Like `decode`, also returning the authenticated prefix metadata.
pub fn decode_with_info(
    blob: &[u8],
    key: &MasterKey,
) -> std::result::Result<(Vault, BlobInfo), DecodeError> {
    let prefix = checked_prefix(blob)?;
    let sealed = &blob[PREFIX_LEN..];

    // Nothing from the prefix is trusted until the tag has been checked.
    let plaintext = Zeroizing::new(
        encryption::decrypt(key.as_bytes(), sealed, prefix).map_err(|_| DecodeError)?,
    );

    let vault: Vault = serde_json::from_slice(&plaintext).map_err(|_| DecodeError)?;

    let mut ts = [0u8; 8];
    ts.copy_from_slice(&prefix[TIMESTAMP_AT..PARAMS_AT]);
    let written_at =
        DateTime::<Utc>::from_timestamp(i64::from_be_bytes(ts), 0).ok_or(DecodeError)?;

    Ok((
        vault,
        BlobInfo {
            version: prefix[4],
            written_at,
            kdf: read_params(prefix),
        },
    ))
}

fn checked_prefix(blob: &[u8]) -> std::result::Result<&[u8], DecodeError> {
    if blob.len() < MIN_BLOB_LEN {
        return Err(DecodeError);
    }
    let prefix = &blob[..PREFIX_LEN];
    if &prefix[..4] != MAGIC || prefix[4] != FORMAT_VERSION {
        return Err(DecodeError);
    }
    Ok(prefix)
}

fn read_params(prefix: &[u8]) -> Argon2Params {
    let word = |at: usize| {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&prefix[at..at + 4]);
        u32::from_be_bytes(buf)
    };
    Argon2Params {
        memory_kib: word(PARAMS_AT),
        iterations: word(PARAMS_AT + 4),
        parallelism: word(PARAMS_AT + 8),
    }
}
