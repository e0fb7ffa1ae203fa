//! Key pair generation on the supported curves.

use std::fmt;

use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{PublicKey, Secp256k1, SecretKey};

use super::{Curve, PublicPoint};
use crate::error::{Error, Result};

/// Attempts at drawing an in-range scalar before giving up.
const MAX_SCALAR_ATTEMPTS: usize = 8;

/// A key pair: secret scalar plus the public point it generates.
///
/// Only reachable through the key material providers: the secret stays inside
/// this type, `Debug` does not print it and it is zeroed on drop.
#[derive(Clone)]
pub(crate) struct Keypair {
    curve: Curve,
    secret_key: [u8; 32],
    public: PublicPoint,
}

impl Keypair {
    /// Generates a new random keypair from the operating system's entropy source.
    pub(crate) fn generate(curve: Curve) -> Result<Self> {
        let mut secret = [0u8; 32];

        for _ in 0..MAX_SCALAR_ATTEMPTS {
            OsRng
                .try_fill_bytes(&mut secret)
                .map_err(|e| Error::KeyGeneration(format!("entropy source failed: {e}")))?;

            // A zero or out-of-order scalar is rejected by the curve library; draw again.
            match Self::from_secret_key(curve, secret) {
                Ok(keypair) => return Ok(keypair),
                Err(Error::KeyGeneration(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(Error::KeyGeneration(format!(
            "no valid {curve} scalar after {MAX_SCALAR_ATTEMPTS} attempts"
        )))
    }

    /// Builds a keypair from an existing secret scalar.
    pub(crate) fn from_secret_key(curve: Curve, secret_bytes: [u8; 32]) -> Result<Self> {
        let sec1 = match curve {
            Curve::Secp256k1 => {
                let secp = Secp256k1::signing_only();
                let secret_key = SecretKey::from_slice(&secret_bytes)
                    .map_err(|e| Error::KeyGeneration(format!("invalid secp256k1 scalar: {e}")))?;
                PublicKey::from_secret_key(&secp, &secret_key)
                    .serialize_uncompressed()
                    .to_vec()
            }
            Curve::P256 => {
                let secret_key = p256::SecretKey::from_slice(&secret_bytes)
                    .map_err(|e| Error::KeyGeneration(format!("invalid p256 scalar: {e}")))?;
                secret_key
                    .public_key()
                    .to_encoded_point(false)
                    .as_bytes()
                    .to_vec()
            }
        };

        Ok(Self {
            curve,
            secret_key: secret_bytes,
            public: PublicPoint::from_sec1_uncompressed(&sec1)?,
        })
    }

    /// Consumes the keypair, keeping only the public point.
    pub(crate) fn into_public_point(mut self) -> PublicPoint {
        std::mem::replace(&mut self.public, PublicPoint::new(Vec::new(), Vec::new()))
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        self.secret_key.fill(0);
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("curve", &self.curve)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
