//! Byte-packed pixel surface.
//!
//! Pixels are stored row-major with no per-row padding: pixel `(x, y)` is
//! linear index `y * width + x`, byte `index / pixels_per_byte`, and the
//! first pixel of a byte occupies its most significant bit(s).
//!
//! ```text
//! HighRes     bit  7   6   5   4   3   2   1   0
//!             px   0   1   2   3   4   5   6   7
//!
//! MultiColor  bits 7-6 5-4 3-2 1-0
//!             px    0   1   2   3
//! ```

use std::fmt;

use thiserror::Error;

use crate::geometry::{Rect, is_inside};
use crate::mode::{BACKGROUND, ColorMode};
use crate::observable::{Observable, Value, parse_hex_or_dec};

/// Errors raised when constructing a surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// A side exceeds `i32::MAX`, or `width * height` does not pack into
    /// whole bytes for `mode`.
    #[error(
        "invalid dimensions {width}x{height} for {} mode: sides are limited to {} and the pixel count must be a multiple of {}",
        .mode.name(),
        i32::MAX,
        .mode.pixels_per_byte()
    )]
    InvalidDimensions {
        width: u32,
        height: u32,
        mode: ColorMode,
    },
    /// A supplied buffer does not match the surface size.
    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
}

/// Change notification passed to observers.
///
/// Observers only get a shared reference to the surface, so they cannot
/// write back into it while the notification is being delivered.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceChanged<'a> {
    /// Pixels touched by the write. 1x1 for [`PackedSurface::set_pixel`].
    pub area: Rect,
    pub surface: &'a PackedSurface,
}

impl SurfaceChanged<'_> {
    #[must_use]
    pub fn x(&self) -> i32 {
        self.area.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.area.y
    }
}

/// Handle returned by [`PackedSurface::on_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type ChangedCallback = Box<dyn FnMut(&SurfaceChanged<'_>)>;

/// A fixed-size grid of 1- or 2-bit pixels packed into bytes.
pub struct PackedSurface {
    width: u32,
    height: u32,
    mode: ColorMode,
    buffer: Vec<u8>,
    observers: Vec<(ObserverId, ChangedCallback)>,
    next_observer: u64,
}

impl PackedSurface {
    /// Allocate a zero-filled surface.
    pub fn new(width: u32, height: u32, mode: ColorMode) -> Result<Self, SurfaceError> {
        let len = Self::buffer_len(width, height, mode)?;
        Ok(Self::with_buffer(width, height, mode, vec![0; len]))
    }

    /// Wrap existing packed data.
    pub fn from_bytes(
        width: u32,
        height: u32,
        mode: ColorMode,
        buffer: Vec<u8>,
    ) -> Result<Self, SurfaceError> {
        let expected = Self::buffer_len(width, height, mode)?;
        if buffer.len() != expected {
            return Err(SurfaceError::BufferLength {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self::with_buffer(width, height, mode, buffer))
    }

    /// Byte length of a `width x height` surface in `mode`.
    pub fn buffer_len(width: u32, height: u32, mode: ColorMode) -> Result<usize, SurfaceError> {
        let invalid = SurfaceError::InvalidDimensions {
            width,
            height,
            mode,
        };
        // Coordinates are i32; larger sides would be unaddressable.
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(invalid);
        }
        let pixels = u64::from(width) * u64::from(height);
        let per_byte = mode.pixels_per_byte() as u64;
        if pixels % per_byte != 0 {
            return Err(invalid);
        }
        usize::try_from(pixels / per_byte).map_err(|_| invalid)
    }

    fn with_buffer(width: u32, height: u32, mode: ColorMode, buffer: Vec<u8>) -> Self {
        Self {
            width,
            height,
            mode,
            buffer,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Size of the packed buffer in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// The packed pixel data.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Clamp a value into the range storable in this surface's mode.
    #[must_use]
    pub fn clamp_color(&self, color: i32) -> u8 {
        self.mode.clamp(color)
    }

    /// Byte index and bit shift of the pixel at `(x, y)`.
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u32)> {
        if !is_inside(x, y, self.width, self.height) {
            return None;
        }
        let position = y as usize * self.width as usize + x as usize;
        let per_byte = self.mode.pixels_per_byte();
        let offset = (position % per_byte) as u32;
        let shift = 8 - self.mode.bits_per_pixel() * (offset + 1);
        Some((position / per_byte, shift))
    }

    /// Read a pixel. Out-of-bounds coordinates read as background.
    #[must_use]
    pub fn get_pixel(&self, x: i32, y: i32) -> u8 {
        self.locate(x, y).map_or(BACKGROUND, |(index, shift)| {
            (self.buffer[index] >> shift) & self.mode.mask()
        })
    }

    /// Write a pixel, clamping `color` to the mode's range.
    ///
    /// Out-of-bounds writes are ignored and do not notify. Every in-bounds
    /// write notifies, even if the stored value did not change.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: i32) {
        let Some((index, shift)) = self.locate(x, y) else {
            return;
        };
        let value = self.mode.clamp(color);
        let mask = self.mode.mask() << shift;
        self.buffer[index] = (self.buffer[index] & !mask) | (value << shift);
        self.notify(Rect::pixel(x, y));
    }

    /// Reset every pixel to background. Notifies once for the whole area.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
        self.notify(Rect::new(0, 0, self.width, self.height));
    }

    /// Register a change observer.
    ///
    /// Observers run synchronously on the writer's call stack, in
    /// registration order.
    pub fn on_changed<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&SurfaceChanged<'_>) + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Unregister an observer. Returns `false` if it was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    ///
    /// Reads as 0 from inside a notification.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, area: Rect) {
        if self.observers.is_empty() {
            return;
        }
        let mut observers = std::mem::take(&mut self.observers);
        let event = SurfaceChanged {
            area,
            surface: &*self,
        };
        for (_, callback) in &mut observers {
            callback(&event);
        }
        self.observers = observers;
    }
}

impl fmt::Debug for PackedSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mode", &self.mode)
            .field("size", &self.buffer.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Observable for PackedSurface {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("pixel.") {
            let (x, y) = rest.split_once('.')?;
            let x = i32::try_from(parse_hex_or_dec(x)?).ok()?;
            let y = i32::try_from(parse_hex_or_dec(y)?).ok()?;
            is_inside(x, y, self.width, self.height).then(|| self.get_pixel(x, y).into())
        } else if let Some(rest) = path.strip_prefix("byte.") {
            let index = usize::try_from(parse_hex_or_dec(rest)?).ok()?;
            self.buffer.get(index).map(|&b| b.into())
        } else {
            match path {
                "width" => Some(self.width.into()),
                "height" => Some(self.height.into()),
                "mode" => Some(self.mode.name().into()),
                "size" => Some(self.buffer.len().into()),
                "observers" => Some(self.observers.len().into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
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
