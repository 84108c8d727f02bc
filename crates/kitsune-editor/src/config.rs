//! Editor configuration.
//!
//! Loaded from JSON; every field is optional and falls back to the
//! defaults below.

use c64_bitplane::{ColorMode, FOREGROUND};
use c64_palette::{Color, PALETTE_SIZE, PaletteName};
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};

/// Overlay grid drawn over the zoomed sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Line colour as an `0xAARRGGBB` literal.
    pub color: Color,
    /// Output pixels per source pixel.
    pub separation: u32,
    /// Dot spacing along horizontal lines (1 draws a solid line).
    pub offset_x: u32,
    /// Dot spacing along vertical lines.
    pub offset_y: u32,
    /// Source pixels between vertical lines.
    pub cell_size_x: u32,
    /// Source pixels between horizontal lines.
    pub cell_size_y: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            color: Color::opaque(0xFF, 0xFF, 0xFF),
            separation: 16,
            offset_x: 1,
            offset_y: 1,
            cell_size_x: 1,
            cell_size_y: 1,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.separation == 0 {
            return Err(EditorError::InvalidGrid("separation must be non-zero"));
        }
        if self.offset_x == 0 || self.offset_y == 0 {
            return Err(EditorError::InvalidGrid("offsets must be non-zero"));
        }
        if self.cell_size_x == 0 || self.cell_size_y == 0 {
            return Err(EditorError::InvalidGrid("cell sizes must be non-zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub palette: PaletteName,
    /// Widen the palette with transparent copies so background pixels
    /// render see-through.
    pub transparent_palette: bool,
    pub sprite_mode: ColorMode,
    /// Palette index of the sprite's foreground colour.
    pub sprite_color: u8,
    /// Plane value written by the primary button.
    pub pen: u8,
    /// Palette indices shown for multicolour plane values 2 and 3.
    pub multicolors: [u8; 2],
    pub grid: GridConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            palette: PaletteName::Ccs64,
            transparent_palette: true,
            sprite_mode: ColorMode::HighRes,
            sprite_color: 1,
            pen: FOREGROUND,
            multicolors: [11, 12],
            grid: GridConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject grids with zero steps and colour indices beyond the
    /// hardware palette.
    pub fn validate(&self) -> Result<()> {
        check_color("sprite_color", self.sprite_color)?;
        for index in self.multicolors {
            check_color("multicolors", index)?;
        }
        self.grid.validate()
    }
}

fn check_color(field: &'static str, index: u8) -> Result<()> {
    if usize::from(index) < PALETTE_SIZE {
        Ok(())
    } else {
        Err(EditorError::InvalidColor { field, index })
    }
}
