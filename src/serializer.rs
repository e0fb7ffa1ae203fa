//! Fixed-width public key serialization.
//!
//! Layout: `marker || X || Y`, each coordinate big-endian and left-zero-padded
//! to the curve's coordinate width.

use std::fmt;

use crate::crypto::{Curve, PublicPoint};
use crate::error::{Error, Result};

/// Coordinate width of every supported curve.
pub const COORDINATE_WIDTH: usize = 32;

/// Length of a serialized public key: marker plus two coordinates.
pub const SERIALIZED_LEN: usize = 1 + 2 * COORDINATE_WIDTH;

/// A marker byte that announces both coordinates follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker(u8);

impl Marker {
    pub const UNCOMPRESSED: u8 = 0x04;
    pub const HYBRID_EVEN: u8 = 0x06;
    pub const HYBRID_ODD: u8 = 0x07;

    /// Accepts only the SEC1 full-point markers.
    ///
    /// `0x02`/`0x03` announce a compressed point carrying X alone and are
    /// rejected since this layout always writes Y.
    pub fn new(byte: u8) -> Result<Self> {
        match byte {
            Self::UNCOMPRESSED | Self::HYBRID_EVEN | Self::HYBRID_ODD => Ok(Self(byte)),
            0x02 | 0x03 => Err(Error::InvalidKey(format!(
                "marker 0x{byte:02x} denotes a compressed point but both coordinates are written"
            ))),
            _ => Err(Error::InvalidKey(format!(
                "marker 0x{byte:02x} is not a SEC1 point encoding"
            ))),
        }
    }

    #[inline]
    pub fn byte(self) -> u8 {
        self.0
    }

    /// Hybrid markers commit to the parity of Y.
    fn check_parity(self, point: &PublicPoint) -> Result<()> {
        let expected_odd = match self.0 {
            Self::HYBRID_EVEN => false,
            Self::HYBRID_ODD => true,
            _ => return Ok(()),
        };
        if point.y_is_odd() != expected_odd {
            return Err(Error::InvalidKey(format!(
                "hybrid marker 0x{:02x} does not match the parity of Y",
                self.0
            )));
        }
        Ok(())
    }
}

/// The serialized public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SerializedPublicKey([u8; SERIALIZED_LEN]);

impl SerializedPublicKey {
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; SERIALIZED_LEN] {
        &self.0
    }

    #[inline]
    pub fn marker(&self) -> u8 {
        self.0[0]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SerializedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerializedPublicKey({})", self.to_hex())
    }
}

/// Serializes `point` for `curve` under `marker`.
///
/// Fails with [`Error::InvalidKey`] when a coordinate does not fit the curve's
/// width, the marker cannot describe a two-coordinate layout, or the point is
/// not on the curve.
pub fn serialize(point: &PublicPoint, curve: Curve, marker: u8) -> Result<SerializedPublicKey> {
    let width = curve.coordinate_width();
    if width != COORDINATE_WIDTH {
        return Err(Error::InvalidKey(format!(
            "{curve} coordinate width {width} does not match serialized width {COORDINATE_WIDTH}"
        )));
    }

    let marker = Marker::new(marker)?;

    let mut bytes = [0u8; SERIALIZED_LEN];
    bytes[0] = Marker::UNCOMPRESSED;
    write_padded(&mut bytes[1..1 + COORDINATE_WIDTH], &point.x, "x")?;
    write_padded(&mut bytes[1 + COORDINATE_WIDTH..], &point.y, "y")?;

    if !curve.contains(&bytes) {
        return Err(Error::InvalidKey(format!("point is not on {curve}")));
    }

    marker.check_parity(point)?;
    bytes[0] = marker.byte();

    Ok(SerializedPublicKey(bytes))
}

/// Copies a big-endian integer into `out`, left-padding with zeros.
fn write_padded(out: &mut [u8], value: &[u8], name: &str) -> Result<()> {
    let start = value.iter().position(|&b| b != 0).unwrap_or(value.len());
    let significant = &value[start..];

    if significant.len() > out.len() {
        return Err(Error::InvalidKey(format!(
            "{name} coordinate needs {} bytes, curve width is {}",
            significant.len(),
            out.len()
        )));
    }

    let offset = out.len() - significant.len();
    out[..offset].fill(0);
    out[offset..].copy_from_slice(significant);
    Ok(())
}
