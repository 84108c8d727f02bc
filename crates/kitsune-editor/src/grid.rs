//! Pixel grid overlay.
//!
//! The overlay is drawn at zoomed resolution: each source pixel spans
//! `separation` output pixels, plus one extra row and column so the
//! closing lines fit. Everything off the lines is transparent.

use c64_palette::{BGRA_DEPTH, Color};
use log::warn;

use crate::config::GridConfig;
use crate::error::{EditorError, Result};

/// A BGRA overlay image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl GridImage {
    #[must_use]
    pub fn stride(&self) -> usize {
        self.width * BGRA_DEPTH
    }

    /// Colour at `(x, y)`; transparent outside the image or past the end
    /// of `pixels`.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        if x >= self.width || y >= self.height {
            return Color::TRANSPARENT;
        }
        let offset = y * self.stride() + x * BGRA_DEPTH;
        self.pixels
            .get(offset..)
            .map_or(Color::TRANSPARENT, Color::from_bgra)
    }
}

/// Render the grid for a `width x height` source surface.
pub fn render_grid(width: u32, height: u32, grid: &GridConfig) -> Result<GridImage> {
    if let Err(err) = grid.validate() {
        warn!("rejected grid {grid:?}: {err}");
        return Err(err);
    }
    let separation = grid.separation as usize;
    let overflow = || EditorError::InvalidGrid("overlay dimensions overflow");
    let out_width = (width as usize)
        .checked_mul(separation)
        .and_then(|w| w.checked_add(1))
        .ok_or_else(overflow)?;
    let out_height = (height as usize)
        .checked_mul(separation)
        .and_then(|h| h.checked_add(1))
        .ok_or_else(overflow)?;
    let stride = out_width.checked_mul(BGRA_DEPTH).ok_or_else(overflow)?;
    let size = stride.checked_mul(out_height).ok_or_else(overflow)?;

    let mut pixels = vec![0; size];
    let row_step = separation.saturating_mul(grid.cell_size_y as usize);
    let col_step = separation.saturating_mul(grid.cell_size_x as usize);

    for y in (0..out_height).step_by(row_step) {
        for x in (0..out_width).step_by(grid.offset_x as usize) {
            grid.color.write_bgra(&mut pixels, y * stride + x * BGRA_DEPTH)?;
        }
    }
    for x in (0..out_width).step_by(col_step) {
        for y in (0..out_height).step_by(grid.offset_y as usize) {
            grid.color.write_bgra(&mut pixels, y * stride + x * BGRA_DEPTH)?;
        }
    }

    Ok(GridImage {
        width: out_width,
        height: out_height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::opaque(0xFF, 0, 0);

    fn config(separation: u32) -> GridConfig {
        GridConfig {
            color: RED,
            separation,
            ..GridConfig::default()
        }
    }

    #[test]
    fn dimensions_include_closing_line() {
        let image = render_grid(24, 21, &config(16)).expect("valid grid");
        assert_eq!((image.width, image.height), (385, 337));
        assert_eq!(image.pixels.len(), 385 * 337 * 4);
    }

    #[test]
    fn solid_lines_every_separation() {
        let image = render_grid(2, 2, &config(4)).expect("valid grid");
        assert_eq!((image.width, image.height), (9, 9));
        for i in 0..9 {
            assert_eq!(image.pixel(i, 0), RED);
            assert_eq!(image.pixel(i, 4), RED);
            assert_eq!(image.pixel(i, 8), RED);
            assert_eq!(image.pixel(0, i), RED);
            assert_eq!(image.pixel(8, i), RED);
        }
        assert_eq!(image.pixel(1, 1), Color::TRANSPARENT);
        assert_eq!(image.pixel(9, 0), Color::TRANSPARENT);
    }

    #[test]
    fn dotted_lines_and_cells() {
        let grid = GridConfig {
            offset_x: 2,
            cell_size_x: 2,
            ..config(2)
        };
        let image = render_grid(4, 1, &grid).expect("valid grid");
        assert_eq!((image.width, image.height), (9, 3));
        // Horizontal lines dotted every second column.
        assert_eq!(image.pixel(2, 0), RED);
        assert_eq!(image.pixel(3, 0), Color::TRANSPARENT);
        // Vertical lines only every 2 cells (4 output pixels).
        assert_eq!(image.pixel(4, 1), RED);
        assert_eq!(image.pixel(2, 1), Color::TRANSPARENT);
    }

    #[test]
    fn short_pixel_buffer_reads_transparent() {
        let image = GridImage {
            width: 4,
            height: 4,
            pixels: RED.to_bgra().to_vec(),
        };
        assert_eq!(image.pixel(0, 0), RED);
        assert_eq!(image.pixel(3, 3), Color::TRANSPARENT);
        assert_eq!(image.pixel(1, 0), Color::TRANSPARENT);
    }

    #[test]
    fn zero_steps_are_rejected() {
        assert!(matches!(
            render_grid(8, 8, &config(0)),
            Err(EditorError::InvalidGrid(_))
        ));
        let grid = GridConfig {
            cell_size_y: 0,
            ..config(4)
        };
        assert!(render_grid(8, 8, &grid).is_err());
    }
}
