//! Hash chain used by address derivation.
//!
//! Every function builds and drops its own hasher; no hashing state is shared
//! between stages.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length of the content digest.
pub const CONTENT_DIGEST_LEN: usize = 20;

/// Length of the checksum appended to the versioned payload.
pub const CHECKSUM_LEN: usize = 4;

/// Compute SHA-256 hash
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 hash
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute RIPEMD-160 hash
#[inline]
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Content digest of a serialized public key: RIPEMD-160 of its SHA-256.
#[inline]
pub fn hash160(data: &[u8]) -> [u8; CONTENT_DIGEST_LEN] {
    ripemd160(&sha256(data))
}

/// First four bytes of the double SHA-256 of `payload`.
#[inline]
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = double_sha256(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}
