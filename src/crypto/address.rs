//! Versioned payload, address bytes and the textual address.

use std::fmt;

use super::hash::{self, CHECKSUM_LEN, CONTENT_DIGEST_LEN};
use crate::base58;

/// Length of the version byte plus content digest.
pub const PAYLOAD_LEN: usize = 1 + CONTENT_DIGEST_LEN;

/// Length of the binary address.
pub const ADDRESS_LEN: usize = PAYLOAD_LEN + CHECKSUM_LEN;

/// Version byte followed by the 20-byte content digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionedPayload([u8; PAYLOAD_LEN]);

impl VersionedPayload {
    pub fn new(version: u8, content_digest: &[u8; CONTENT_DIGEST_LEN]) -> Self {
        let mut bytes = [0u8; PAYLOAD_LEN];
        bytes[0] = version;
        bytes[1..].copy_from_slice(content_digest);
        Self(bytes)
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.0[0]
    }

    pub fn content_digest(&self) -> [u8; CONTENT_DIGEST_LEN] {
        let mut digest = [0u8; CONTENT_DIGEST_LEN];
        digest.copy_from_slice(&self.0[1..]);
        digest
    }

    /// Checksum protecting this payload.
    pub fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        hash::checksum(&self.0)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }
}

impl fmt::Debug for VersionedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionedPayload({})", hex::encode(self.0))
    }
}

/// Versioned payload with its checksum appended: the 25-byte binary address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressBytes([u8; ADDRESS_LEN]);

impl AddressBytes {
    /// Appends the payload's checksum.
    pub fn from_payload(payload: &VersionedPayload) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[..PAYLOAD_LEN].copy_from_slice(payload.as_bytes());
        bytes[PAYLOAD_LEN..].copy_from_slice(&payload.checksum());
        Self(bytes)
    }

    pub fn payload(&self) -> VersionedPayload {
        let mut bytes = [0u8; PAYLOAD_LEN];
        bytes.copy_from_slice(&self.0[..PAYLOAD_LEN]);
        VersionedPayload(bytes)
    }

    pub fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&self.0[PAYLOAD_LEN..]);
        checksum
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Renders the address text.
    pub fn to_address(&self) -> Address {
        Address(base58::encode(&self.0))
    }
}

impl fmt::Debug for AddressBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressBytes({})", self.to_hex())
    }
}

/// A Base58 address string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
