//! Derivation configuration.
//!
//! The version byte, the curve and the serialization marker are independent
//! fields. Their consistency is checked by [`Config::check_serialization`] and
//! again by the serializer, never assumed.

use std::fmt;
use std::str::FromStr;

use crate::crypto::Curve;
use crate::error::Error;
use crate::serializer::{Marker, SERIALIZED_LEN};

/// Target network, selecting the address version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Version byte prefixed to the content digest.
    #[inline]
    pub const fn version_byte(self) -> u8 {
        match self {
            Self::Mainnet => 0x00,
            Self::Testnet => 0x6f,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            _ => Err(ConfigError::UnknownNetwork(s.into())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration for an [`AddressDeriver`](crate::AddressDeriver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Version byte identifying the target network or namespace
    pub version: u8,
    /// Curve the public key lives on; fixes the coordinate width
    pub curve: Curve,
    /// First byte of the serialized public key
    pub marker: u8,
    /// Number of worker threads for bulk generation (default: number of CPU cores)
    pub workers: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

impl Config {
    /// Secp256k1, uncompressed marker, version byte of `network`.
    pub fn for_network(network: Network) -> Self {
        Self {
            version: network.version_byte(),
            curve: Curve::Secp256k1,
            marker: Marker::UNCOMPRESSED,
            workers: None,
        }
    }

    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_marker(mut self, marker: u8) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Length of the serialized public key this configuration produces.
    pub fn serialized_len(&self) -> usize {
        1 + 2 * self.curve.coordinate_width()
    }

    /// Checks that the curve and marker describe a consistent serialization.
    ///
    /// Fails with [`Error::InvalidKey`]: no key of this configuration could be
    /// serialized.
    pub fn check_serialization(&self) -> crate::Result<()> {
        Marker::new(self.marker)?;

        if self.serialized_len() != SERIALIZED_LEN {
            return Err(Error::InvalidKey(format!(
                "coordinate width {} of curve {} is not supported",
                self.curve.coordinate_width(),
                self.curve
            )));
        }

        Ok(())
    }

    /// Validates the non-key settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::NoWorkers);
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Unknown curve: {0}")]
    UnknownCurve(String),
}
