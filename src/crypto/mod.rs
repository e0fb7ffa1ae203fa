//! Cryptographic building blocks for address derivation.
//!
//! This module provides:
//! - Curve selection and public point representation
//! - Key pair generation on secp256k1 and P-256
//! - The SHA-256 / RIPEMD-160 hash chain
//! - Versioned payload and checksummed address bytes

mod address;
mod curve;
pub mod hash;
mod keypair;

pub use address::{Address, AddressBytes, VersionedPayload, ADDRESS_LEN, PAYLOAD_LEN};
pub use curve::{Curve, PublicPoint};
pub(crate) use keypair::Keypair;
