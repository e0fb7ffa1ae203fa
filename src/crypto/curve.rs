//! Supported curves and the public point handed over by key providers.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::error::{Error, Result};

/// Elliptic curve a key pair is generated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Curve {
    /// secp256k1, the curve conventionally used with this address scheme
    #[default]
    Secp256k1,
    /// NIST P-256 (secp256r1)
    P256,
}

impl Curve {
    /// Byte width of one field coordinate.
    #[inline]
    pub const fn coordinate_width(self) -> usize {
        match self {
            Self::Secp256k1 | Self::P256 => 32,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Secp256k1 => "secp256k1",
            Self::P256 => "p256",
        }
    }

    /// Checks that a SEC1 uncompressed encoding (`0x04 || X || Y`) is a point
    /// on this curve.
    pub fn contains(self, sec1_uncompressed: &[u8]) -> bool {
        match self {
            Self::Secp256k1 => secp256k1::PublicKey::from_slice(sec1_uncompressed).is_ok(),
            Self::P256 => p256::PublicKey::from_sec1_bytes(sec1_uncompressed).is_ok(),
        }
    }
}

impl FromStr for Curve {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "secp256k1" | "k256" => Ok(Curve::Secp256k1),
            "p256" | "p-256" | "secp256r1" | "prime256v1" => Ok(Curve::P256),
            _ => Err(ConfigError::UnknownCurve(s.into())),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A public point as two big-endian unsigned integers.
///
/// The coordinates carry no fixed width; providers may hand over minimal
/// encodings (leading zeros stripped) or already padded ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPoint {
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

impl PublicPoint {
    pub fn new(x: impl Into<Vec<u8>>, y: impl Into<Vec<u8>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Splits a 65-byte SEC1 uncompressed encoding into its coordinates.
    pub fn from_sec1_uncompressed(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 65 || bytes[0] != 0x04 {
            return Err(Error::InvalidKey(format!(
                "expected 65-byte uncompressed SEC1 point, got {} bytes",
                bytes.len()
            )));
        }
        Ok(Self::new(&bytes[1..33], &bytes[33..]))
    }

    /// Returns true if the Y coordinate is odd.
    pub fn y_is_odd(&self) -> bool {
        self.y.last().is_some_and(|b| b & 1 == 1)
    }
}
