//! Commodore 64 colour tables.
//!
//! The VIC-II has 16 fixed colours but no agreed RGB rendition of them.
//! This crate carries the common tables as `0xAARRGGBB` literals and the
//! codecs needed to push them into 32-bit (BGRA) or 24-bit (BGR) bitmaps.

pub mod color;
pub mod palette;

pub use color::{BGR_DEPTH, BGRA_DEPTH, Color, ColorError};
pub use palette::{
    COLOR_NAMES, PALETTE_SIZE, Palette, PaletteName, UnknownPalette, WIDE_PALETTE_SIZE,
};
