//! Packed bitplane surfaces matching the VIC-II bitmap modes.
//!
//! A surface is a fixed grid of low-depth pixels packed into bytes, most
//! significant pixel first. High-resolution surfaces store 1 bit per pixel
//! (8 per byte); multicolour surfaces store 2 bits per pixel (4 per byte).
//! All pixel operations are total: out-of-range coordinates read as
//! background and ignore writes, out-of-range values are clamped.

pub mod geometry;
pub mod mode;
mod observable;
pub mod sprite;
pub mod surface;

pub use geometry::{Rect, is_inside};
pub use mode::{BACKGROUND, ColorMode, FIRST_MULTICOLOR, FOREGROUND, SECOND_MULTICOLOR};
pub use observable::{Observable, Value, parse_hex_or_dec};
pub use sprite::{SPRITE_COLORS, SPRITE_HEIGHT, SPRITE_WIDTH, SpriteSurface};
pub use surface::{ObserverId, PackedSurface, SurfaceChanged, SurfaceError};
