//! Error types for address derivation.

use crate::config::ConfigError;

/// Errors that can occur while deriving an address.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The key material provider could not produce a key pair.
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// The public key cannot be serialized under the configured curve and marker.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Text that is not valid Base58.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
