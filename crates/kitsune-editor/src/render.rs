//! Expand packed surfaces into indexed or 32-bit bitmaps.

use c64_bitplane::PackedSurface;
use c64_palette::{BGRA_DEPTH, Color, PALETTE_SIZE, Palette};

use crate::error::{EditorError, Result};

/// Palette index shown for each plane value (0-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorMap(pub [u8; 4]);

impl ColorMap {
    /// Map for a sprite: 0 is background, 1 the sprite colour, 2 and 3 the
    /// shared multicolours.
    ///
    /// With a widened palette the background maps to index 16, the
    /// transparent copy of black.
    #[must_use]
    pub fn sprite(color: u8, multicolors: [u8; 2], transparent: bool) -> Self {
        let background = if transparent { PALETTE_SIZE as u8 } else { 0 };
        Self([background, color, multicolors[0], multicolors[1]])
    }

    /// Palette index for a plane value.
    #[must_use]
    pub fn index(&self, value: u8) -> u8 {
        self.0[usize::from(value & 0x03)]
    }
}

/// One palette index per pixel, row-major.
#[must_use]
pub fn render_indexed(surface: &PackedSurface, map: &ColorMap) -> Vec<u8> {
    let rows = (0..surface.height()).filter_map(|y| i32::try_from(y).ok());
    let mut out = Vec::with_capacity(surface.width() as usize * surface.height() as usize);
    for y in rows {
        for x in (0..surface.width()).filter_map(|x| i32::try_from(x).ok()) {
            out.push(map.index(surface.get_pixel(x, y)));
        }
    }
    out
}

/// Write the surface as B, G, R, A pixels into `pixels`.
///
/// Indices missing from `palette` render fully transparent.
pub fn render_bgra(
    surface: &PackedSurface,
    palette: &Palette,
    map: &ColorMap,
    pixels: &mut [u8],
) -> Result<()> {
    let expected = surface.width() as usize * surface.height() as usize * BGRA_DEPTH;
    if pixels.len() < expected {
        return Err(EditorError::BufferTooSmall {
            expected,
            actual: pixels.len(),
        });
    }
    for (i, index) in render_indexed(surface, map).into_iter().enumerate() {
        let color = palette
            .get(usize::from(index))
            .unwrap_or(Color::TRANSPARENT);
        color.write_bgra(pixels, i * BGRA_DEPTH)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use c64_bitplane::ColorMode;
    use c64_palette::PaletteName;

    use super::*;

    fn striped() -> PackedSurface {
        // 0 1 2 3 in the first row.
        PackedSurface::from_bytes(4, 1, ColorMode::MultiColor, vec![0b0001_1011])
            .expect("valid buffer")
    }

    #[test]
    fn sprite_map_background() {
        assert_eq!(ColorMap::sprite(5, [11, 12], true).0, [16, 5, 11, 12]);
        assert_eq!(ColorMap::sprite(5, [11, 12], false).0, [0, 5, 11, 12]);
    }

    #[test]
    fn indexed_output() {
        let map = ColorMap([0, 7, 8, 9]);
        assert_eq!(render_indexed(&striped(), &map), vec![0, 7, 8, 9]);
    }

    #[test]
    fn indexed_output_covers_every_row() {
        let mut surface =
            PackedSurface::new(8, 3, ColorMode::HighRes).expect("valid dimensions");
        surface.set_pixel(7, 2, 1);
        let indexed = render_indexed(&surface, &ColorMap([0, 9, 0, 0]));
        assert_eq!(indexed.len(), 24);
        assert_eq!(indexed[23], 9);
        assert!(indexed[..23].iter().all(|&i| i == 0));
    }

    #[test]
    fn unaddressable_surface_never_reaches_rendering() {
        assert!(PackedSurface::new(1 << 31, 1, ColorMode::HighRes).is_err());
    }

    #[test]
    fn bgra_output_uses_palette() {
        let palette = Palette::transparent(PaletteName::Ccs64);
        let map = ColorMap::sprite(2, [1, 15], true);
        let mut pixels = vec![0xAA; 16];
        render_bgra(&striped(), &palette, &map, &mut pixels).expect("buffer fits");

        // Background: transparent copy of CCS64 black (0x191D19).
        assert_eq!(&pixels[0..4], &[0x19, 0x1D, 0x19, 0x00]);
        // Sprite colour 2: 0xFF933A4C.
        assert_eq!(&pixels[4..8], &[0x4C, 0x3A, 0x93, 0xFF]);
        assert_eq!(&pixels[8..12], &[0xFC, 0xF9, 0xFC, 0xFF]);
        assert_eq!(&pixels[12..16], &[0xE7, 0xE9, 0xEF, 0xFF]);
    }

    #[test]
    fn missing_index_is_transparent() {
        let palette = Palette::new(PaletteName::Vice);
        let map = ColorMap([16, 16, 16, 16]);
        let mut pixels = vec![0xAA; 16];
        render_bgra(&striped(), &palette, &map, &mut pixels).expect("buffer fits");
        assert!(pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let palette = Palette::new(PaletteName::Vice);
        let mut pixels = vec![0; 15];
        let err = render_bgra(&striped(), &palette, &ColorMap::default(), &mut pixels)
            .expect_err("too small");
        assert!(matches!(
            err,
            EditorError::BufferTooSmall {
                expected: 16,
                actual: 15
            }
        ));
    }
}
