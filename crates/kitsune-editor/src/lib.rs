//! Editing layer over C64 sprite bitplanes.
//!
//! [`EditorContext`] is an explicit, caller-owned value holding the current
//! palette, sprite and editing state. The windowing shell passes it to
//! whichever component needs it; nothing here is global.

pub mod config;
pub mod context;
mod error;
pub mod grid;
pub mod render;

pub use config::{EditorConfig, GridConfig};
pub use context::{Button, EditorContext};
pub use error::{EditorError, Result};
pub use grid::{GridImage, render_grid};
pub use render::{ColorMap, render_bgra, render_indexed};
