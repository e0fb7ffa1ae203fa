//! Base58 text encoding with the Bitcoin alphabet.
//!
//! Each leading `0x00` byte maps to one leading [`ZERO_CHAR`], independently of
//! the numeral conversion of the remaining bytes.

use crate::error::{Error, Result};

/// The 58-character alphabet; `0`, `O`, `I` and `l` are excluded.
pub const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Alphabet character for digit zero.
pub const ZERO_CHAR: char = '1';

/// Encodes bytes as Base58. Empty input encodes to an empty string.
pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decodes Base58 text back to bytes.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    bs58::decode(text)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| Error::InvalidEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_excludes_ambiguous() {
        assert_eq!(ALPHABET.len(), 58);
        for c in ['0', 'O', 'I', 'l'] {
            assert!(!ALPHABET.contains(c));
        }
        assert_eq!(ALPHABET.chars().next(), Some(ZERO_CHAR));
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(encode(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(encode(&[0x00]), "1");
        assert_eq!(encode(&[0x00, 0x00, 0x01]), "112");
        assert_eq!(encode(&[57]), "z");
        assert_eq!(encode(&[58]), "21");
    }

    #[test]
    fn test_leading_zero_law() {
        let tails: [&[u8]; 3] = [&[0x01], &[0xff, 0xff], &[0x12, 0x34, 0x56, 0x78]];
        for k in 0..6 {
            for tail in tails {
                let mut bytes = vec![0u8; k];
                bytes.extend_from_slice(tail);
                let encoded = encode(&bytes);
                let leading = encoded.chars().take_while(|&c| c == ZERO_CHAR).count();
                assert_eq!(leading, k, "input {}", hex::encode(&bytes));
            }
        }
    }

    #[test]
    fn test_all_zero_input() {
        assert_eq!(encode(&[0u8; 4]), "1111");
    }

    #[test]
    fn test_round_trip() {
        let samples: [&[u8]; 4] = [
            b"",
            &[0, 0, 0],
            &[0, 0, 0xde, 0xad, 0xbe, 0xef],
            &[0xff; 25],
        ];
        for bytes in samples {
            assert_eq!(decode(&encode(bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_decode_rejects_ambiguous_chars() {
        assert!(matches!(decode("10OIl"), Err(Error::InvalidEncoding(_))));
    }
}
