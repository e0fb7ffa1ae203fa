//! The address derivation pipeline.
//!
//! Process:
//! 1. Serialize the public point (`marker || X || Y`, 65 bytes)
//! 2. SHA-256, then RIPEMD-160 of the result (20-byte content digest)
//! 3. Prefix the version byte (21-byte payload)
//! 4. Append the first 4 bytes of the payload's double SHA-256 (25 bytes)
//! 5. Base58-encode the result

use rayon::prelude::*;
use tracing::debug;

use crate::config::Config;
use crate::crypto::{hash, Address, AddressBytes, PublicPoint, VersionedPayload};
use crate::error::Result;
use crate::provider::KeyMaterial;
use crate::serializer::{self, SerializedPublicKey};

/// Every intermediate value of one derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub serialized: SerializedPublicKey,
    pub content_digest: [u8; 20],
    pub payload: VersionedPayload,
    pub checksum: [u8; 4],
    pub address_bytes: AddressBytes,
    pub address: Address,
}

/// Derives addresses under a validated [`Config`].
#[derive(Debug, Clone)]
pub struct AddressDeriver {
    config: Config,
}

impl AddressDeriver {
    /// Creates a deriver, rejecting inconsistent configurations up front.
    pub fn new(config: Config) -> Result<Self> {
        config.check_serialization()?;
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the full pipeline on a public point.
    pub fn derive_from_point(&self, point: &PublicPoint) -> Result<Derivation> {
        let serialized = serializer::serialize(point, self.config.curve, self.config.marker)?;
        let content_digest = hash::hash160(serialized.as_bytes());
        let payload = VersionedPayload::new(self.config.version, &content_digest);
        let address_bytes = AddressBytes::from_payload(&payload);
        let address = address_bytes.to_address();

        debug!(
            curve = %self.config.curve,
            version = self.config.version,
            digest = %hex::encode(content_digest),
            %address,
            "derived address"
        );

        Ok(Derivation {
            serialized,
            content_digest,
            payload,
            checksum: address_bytes.checksum(),
            address_bytes,
            address,
        })
    }

    /// Requests a fresh public key from `keys` and derives its address.
    pub fn derive<K: KeyMaterial + ?Sized>(&self, keys: &K) -> Result<Address> {
        let point = keys.generate_public_key(self.config.curve)?;
        self.derive_from_point(&point).map(|d| d.address)
    }

    /// Derives the address of each point in parallel, preserving input order.
    pub fn derive_batch(&self, points: &[PublicPoint]) -> Vec<Result<Address>> {
        points
            .par_iter()
            .map(|point| self.derive_from_point(point).map(|d| d.address))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use crate::crypto::{Curve, Keypair};
    use crate::provider::SecretKeyMaterial;
    use crate::Error;

    fn secret(n: u8) -> [u8; 32] {
        let mut secret = [0u8; 32];
        secret[31] = n;
        secret
    }

    fn generator() -> PublicPoint {
        Keypair::from_secret_key(Curve::Secp256k1, secret(1))
            .unwrap()
            .into_public_point()
    }

    #[test]
    fn test_known_address_secret_one() {
        let deriver = AddressDeriver::new(Config::default()).unwrap();
        let derivation = deriver.derive_from_point(&generator()).unwrap();

        assert_eq!(
            hex::encode(derivation.content_digest),
            "91b24bf9f5288532960ac687abb035127b1d28a5"
        );
        assert_eq!(
            derivation.address_bytes.to_hex(),
            "0091b24bf9f5288532960ac687abb035127b1d28a50074ffe0"
        );
        assert_eq!(derivation.checksum, [0x00, 0x74, 0xff, 0xe0]);
        assert_eq!(derivation.address.as_str(), "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");
    }

    #[test]
    fn test_testnet_address() {
        let deriver = AddressDeriver::new(Config::for_network(Network::Testnet)).unwrap();
        let address = deriver.derive(&SecretKeyMaterial::new(secret(1))).unwrap();
        assert_eq!(address.as_str(), "mtoKs9V381UAhUia3d7Vb9GNak8Qvmcsme");
    }

    #[test]
    fn test_hybrid_marker_address() {
        let deriver = AddressDeriver::new(Config::default().with_marker(0x06)).unwrap();
        let address = deriver.derive(&SecretKeyMaterial::new(secret(1))).unwrap();
        assert_eq!(address.as_str(), "1H7NX5uHwz2Ks5JSqeDcUpvRPNubMhLoLN");
    }

    #[test]
    fn test_p256_address() {
        let deriver = AddressDeriver::new(Config::default().with_curve(Curve::P256)).unwrap();
        let address = deriver.derive(&SecretKeyMaterial::new(secret(1))).unwrap();
        assert_eq!(address.as_str(), "181hWi59qk5Uxxi9jZysHvYVE8B8a6sPVJ");
    }

    #[test]
    fn test_fixed_lengths() {
        let deriver = AddressDeriver::new(Config::default()).unwrap();
        let derivation = deriver.derive_from_point(&generator()).unwrap();
        assert_eq!(derivation.serialized.as_bytes().len(), 65);
        assert_eq!(derivation.payload.as_bytes().len(), 21);
        assert_eq!(derivation.address_bytes.as_bytes().len(), 25);
    }

    #[test]
    fn test_checksum_round_trip() {
        let deriver = AddressDeriver::new(Config::default()).unwrap();
        let derivation = deriver.derive_from_point(&generator()).unwrap();
        let bytes = derivation.address_bytes.as_bytes();
        assert_eq!(hash::checksum(&bytes[..21]), bytes[21..]);
    }

    #[test]
    fn test_compressed_marker_fails_fast() {
        let err = AddressDeriver::new(Config::default().with_marker(0x02)).unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));

        let err = AddressDeriver::new(Config::default().with_workers(0)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_key_generation_error_propagates() {
        let deriver = AddressDeriver::new(Config::default()).unwrap();
        let failing =
            |_: Curve| -> Result<PublicPoint> { Err(Error::KeyGeneration("no entropy".into())) };
        assert!(matches!(
            deriver.derive(&failing),
            Err(Error::KeyGeneration(_))
        ));
    }

    #[test]
    fn test_batch_preserves_order() {
        let deriver = AddressDeriver::new(Config::default()).unwrap();
        let points: Vec<PublicPoint> = (1..=8)
            .map(|i| {
                Keypair::from_secret_key(Curve::Secp256k1, secret(i))
                    .unwrap()
                    .into_public_point()
            })
            .collect();

        let batch = deriver.derive_batch(&points);
        assert_eq!(batch.len(), points.len());
        for (point, result) in points.iter().zip(batch) {
            let expected = deriver.derive_from_point(point).unwrap().address;
            assert_eq!(result.unwrap(), expected);
        }
    }

    #[test]
    fn test_batch_reports_bad_points() {
        let deriver = AddressDeriver::new(Config::default()).unwrap();
        let points = vec![generator(), PublicPoint::new(vec![1], vec![2])];
        let batch = deriver.derive_batch(&points);
        assert!(batch[0].is_ok());
        assert!(matches!(batch[1], Err(Error::InvalidKey(_))));
    }
}
