//! Hardware-sized sprite bitplane.

use crate::geometry::Rect;
use crate::mode::ColorMode;
use crate::observable::{Observable, Value};
use crate::surface::{ObserverId, PackedSurface, SurfaceChanged};

/// Sprite width in pixels.
pub const SPRITE_WIDTH: u32 = 24;

/// Sprite height in pixels.
pub const SPRITE_HEIGHT: u32 = 21;

/// Number of selectable sprite colours (4-bit colour registers).
pub const SPRITE_COLORS: u8 = 16;

/// A 24x21 packed surface plus the sprite's own colour index.
#[derive(Debug)]
pub struct SpriteSurface {
    surface: PackedSurface,
    color: u8,
}

impl SpriteSurface {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            surface: Self::blank(mode),
            color: 0,
        }
    }

    // 24x21 packs exactly in both modes (63 or 126 bytes).
    fn blank(mode: ColorMode) -> PackedSurface {
        match PackedSurface::new(SPRITE_WIDTH, SPRITE_HEIGHT, mode) {
            Ok(surface) => surface,
            Err(err) => unreachable!("sprite geometry rejected: {err}"),
        }
    }

    /// Foreground colour index, in `0..16`.
    #[must_use]
    pub fn color(&self) -> u8 {
        self.color
    }

    /// Set the foreground colour index.
    ///
    /// Indices outside `0..16` reset the colour to 0 rather than clamping.
    pub fn set_color(&mut self, index: u8) {
        self.color = if index < SPRITE_COLORS { index } else { 0 };
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    #[must_use]
    pub fn mode(&self) -> ColorMode {
        self.surface.mode()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.surface.bytes()
    }

    #[must_use]
    pub fn get_pixel(&self, x: i32, y: i32) -> u8 {
        self.surface.get_pixel(x, y)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: i32) {
        self.surface.set_pixel(x, y, color);
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, SPRITE_WIDTH, SPRITE_HEIGHT)
    }

    pub fn on_changed<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&SurfaceChanged<'_>) + 'static,
    {
        self.surface.on_changed(callback)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.surface.remove_observer(id)
    }

    /// The underlying plane.
    #[must_use]
    pub fn surface(&self) -> &PackedSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PackedSurface {
        &mut self.surface
    }
}

impl Default for SpriteSurface {
    fn default() -> Self {
        Self::new(ColorMode::HighRes)
    }
}

impl Observable for SpriteSurface {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "color" => Some(self.color.into()),
            _ => self.surface.query(path),
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "color",
            "width",
            "height",
            "mode",
            "size",
            "observers",
            "pixel.<x>.<y>",
            "byte.<index>",
        ]
    }
}
