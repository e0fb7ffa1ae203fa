//! # btc_address
//!
//! Derives Base58Check addresses from elliptic-curve public keys.
//!
//! ## Architecture
//!
//! - `provider`: Injected key material sources
//! - `serializer`: Fixed-width public key serialization
//! - `crypto`: Curves, key pairs, hash chain and address bytes
//! - `base58`: Base58 text encoding
//! - `deriver`: The derivation pipeline
//! - `worker`: Parallel bulk generation
//! - `config`: Derivation configuration

pub mod base58;
pub mod config;
pub mod crypto;
pub mod deriver;
pub mod error;
pub mod provider;
pub mod serializer;
pub mod worker;

pub use config::{Config, ConfigError, Network};
pub use crypto::{Address, AddressBytes, Curve, PublicPoint, VersionedPayload};
pub use deriver::{AddressDeriver, Derivation};
pub use error::{Error, Result};
pub use provider::{KeyMaterial, OsKeyMaterial, SecretKeyMaterial};
pub use serializer::SerializedPublicKey;
pub use worker::{GeneratedAddress, WorkerPool};
