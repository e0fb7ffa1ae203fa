//! Key material providers.
//!
//! The derivation pipeline never generates randomness itself. It asks a
//! [`KeyMaterial`] implementation for a public point and only ever sees the
//! public half of the key pair.

use crate::crypto::{Curve, Keypair, PublicPoint};
use crate::error::Result;

/// Source of public keys on a given curve.
pub trait KeyMaterial: Send + Sync {
    /// Generates a key pair on `curve` and returns its public point.
    ///
    /// Fails with [`Error::KeyGeneration`](crate::Error::KeyGeneration) when
    /// the entropy source or the curve parameters fail.
    fn generate_public_key(&self, curve: Curve) -> Result<PublicPoint>;
}

impl<F> KeyMaterial for F
where
    F: Fn(Curve) -> Result<PublicPoint> + Send + Sync,
{
    fn generate_public_key(&self, curve: Curve) -> Result<PublicPoint> {
        self(curve)
    }
}

/// Fresh random key pairs from the operating system's entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeyMaterial;

impl KeyMaterial for OsKeyMaterial {
    fn generate_public_key(&self, curve: Curve) -> Result<PublicPoint> {
        Keypair::generate(curve).map(Keypair::into_public_point)
    }
}

/// Always derives the public point of one fixed secret scalar.
///
/// Useful for reproducible derivations.
#[derive(Clone)]
pub struct SecretKeyMaterial {
    secret: [u8; 32],
}

impl SecretKeyMaterial {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }
}

impl KeyMaterial for SecretKeyMaterial {
    fn generate_public_key(&self, curve: Curve) -> Result<PublicPoint> {
        Keypair::from_secret_key(curve, self.secret).map(Keypair::into_public_point)
    }
}
