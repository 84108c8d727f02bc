//! ARGB colour value and its byte-level encodings.
//!
//! Palette tables are written as packed `0xAARRGGBB` literals. Bitmap
//! surfaces store the same colour little-endian, so a pixel is laid out
//! in memory as B, G, R, A (or B, G, R for 24-bit surfaces).

use thiserror::Error;

/// Bytes per pixel in a 32-bit BGRA surface.
pub const BGRA_DEPTH: usize = 4;

/// Bytes per pixel in a 24-bit BGR surface.
pub const BGR_DEPTH: usize = 3;

/// Errors raised when writing a colour into a pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The pixel at `offset` does not fit in a buffer of `len` bytes.
    #[error("pixel at offset {offset} ({depth} bytes) overruns a {len}-byte buffer")]
    OutOfBounds {
        offset: usize,
        depth: usize,
        len: usize,
    },
}

/// A 32-bit colour with separate alpha, red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u32", into = "u32"))]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque colour from RGB components.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xFF, r, g, b)
    }

    /// Decode a packed `0xAARRGGBB` literal.
    #[must_use]
    pub const fn from_argb(value: u32) -> Self {
        Self {
            a: (value >> 24) as u8,
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Encode as a packed `0xAARRGGBB` literal.
    #[must_use]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Same colour with a different alpha channel.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// In-memory pixel bytes for a 32-bit surface: B, G, R, A.
    #[must_use]
    pub const fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// Read a pixel stored as B, G, R, A.
    ///
    /// Channels missing from a short slice read as zero, so an empty
    /// slice yields [`Color::TRANSPARENT`].
    #[must_use]
    pub fn from_bgra(bytes: &[u8]) -> Self {
        let channel = |i: usize| bytes.get(i).copied().unwrap_or(0);
        Self {
            b: channel(0),
            g: channel(1),
            r: channel(2),
            a: channel(3),
        }
    }

    /// Write this colour as B, G, R, A starting at `offset`.
    pub fn write_bgra(self, pixels: &mut [u8], offset: usize) -> Result<(), ColorError> {
        let slot = pixel_slot(pixels, offset, BGRA_DEPTH)?;
        slot.copy_from_slice(&self.to_bgra());
        Ok(())
    }

    /// Write this colour as B, G, R starting at `offset`. Alpha is dropped.
    pub fn write_bgr(self, pixels: &mut [u8], offset: usize) -> Result<(), ColorError> {
        let slot = pixel_slot(pixels, offset, BGR_DEPTH)?;
        slot.copy_from_slice(&[self.b, self.g, self.r]);
        Ok(())
    }
}

fn pixel_slot(pixels: &mut [u8], offset: usize, depth: usize) -> Result<&mut [u8], ColorError> {
    let len = pixels.len();
    offset
        .checked_add(depth)
        .and_then(|end| pixels.get_mut(offset..end))
        .ok_or(ColorError::OutOfBounds { offset, depth, len })
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self::from_argb(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_argb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_literal_channels() {
        let c = Color::from_argb(0xFF11_2233);
        assert_eq!(c, Color::new(0xFF, 0x11, 0x22, 0x33));
        assert_eq!(c.to_argb(), 0xFF11_2233);
    }

    #[test]
    fn bgra_byte_order() {
        let c = Color::from_argb(0x8011_2233);
        assert_eq!(c.to_bgra(), [0x33, 0x22, 0x11, 0x80]);
        assert_eq!(Color::from_bgra(&c.to_bgra()), c);
    }

    #[test]
    fn short_slice_reads_missing_channels_as_zero() {
        assert_eq!(Color::from_bgra(&[]), Color::TRANSPARENT);
        assert_eq!(Color::from_bgra(&[0x10, 0x20]), Color::new(0, 0, 0x20, 0x10));
    }

    #[test]
    fn write_bgra_at_offset() {
        let mut pixels = [0u8; 8];
        Color::from_argb(0xFF93_3A4C)
            .write_bgra(&mut pixels, 4)
            .expect("fits");
        assert_eq!(pixels, [0, 0, 0, 0, 0x4C, 0x3A, 0x93, 0xFF]);
    }

    #[test]
    fn write_bgr_drops_alpha() {
        let mut pixels = [0u8; 3];
        Color::from_argb(0x7F01_0203)
            .write_bgr(&mut pixels, 0)
            .expect("fits");
        assert_eq!(pixels, [0x03, 0x02, 0x01]);
    }

    #[test]
    fn write_past_end_is_an_error() {
        let mut pixels = [0u8; 6];
        let err = Color::opaque(1, 2, 3).write_bgra(&mut pixels, 4);
        assert_eq!(
            err,
            Err(ColorError::OutOfBounds {
                offset: 4,
                depth: 4,
                len: 6
            })
        );
        assert!(Color::opaque(1, 2, 3).write_bgr(&mut pixels, usize::MAX).is_err());
        assert_eq!(pixels, [0; 6]);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Color::opaque(9, 8, 7).with_alpha(0);
        assert!(c.is_transparent());
        assert_eq!((c.r, c.g, c.b), (9, 8, 7));
    }
}
