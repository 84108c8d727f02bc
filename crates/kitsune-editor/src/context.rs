//! Editing session state.

use std::cell::Cell;
use std::rc::Rc;

use c64_bitplane::{
    BACKGROUND, ColorMode, Observable, SPRITE_HEIGHT, SPRITE_WIDTH, SpriteSurface, Value,
};
use c64_palette::{BGRA_DEPTH, PALETTE_SIZE, Palette, PaletteName};
use log::debug;

use crate::config::EditorConfig;
use crate::error::Result;
use crate::grid::{GridImage, render_grid};
use crate::render::{ColorMap, render_bgra};

/// Lowest index reachable by [`EditorContext::cycle_color`]; 0 is the
/// background.
const FIRST_CYCLED_COLOR: u8 = 1;
const LAST_CYCLED_COLOR: u8 = PALETTE_SIZE as u8 - 1;

/// Pointer button driving a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Paints with the pen value.
    Primary,
    /// Erases to background.
    Secondary,
}

/// The current palette, sprite and editing state.
///
/// Owned by the caller and passed by reference to whatever needs it.
#[derive(Debug)]
pub struct EditorContext {
    config: EditorConfig,
    palette: Palette,
    sprite: SpriteSurface,
    pen: u8,
    modified: Rc<Cell<bool>>,
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let palette = build_palette(config.palette, config.transparent_palette);
        let modified = Rc::new(Cell::new(false));
        let sprite = tracked_sprite(config.sprite_mode, config.sprite_color, &modified);
        let pen = config.sprite_mode.clamp(i32::from(config.pen));
        debug!(
            "editor context: palette {}, {} sprite, pen {pen}",
            palette.name(),
            sprite.mode().name()
        );
        Ok(Self {
            config,
            palette,
            sprite,
            pen,
            modified,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Switch to another colour table, keeping the transparency setting.
    pub fn set_palette(&mut self, name: PaletteName) {
        debug!("palette {} -> {name}", self.palette.name());
        self.config.palette = name;
        self.palette = build_palette(name, self.config.transparent_palette);
    }

    #[must_use]
    pub fn sprite(&self) -> &SpriteSurface {
        &self.sprite
    }

    /// Mutable access to the sprite. Pixel writes through it still mark
    /// the session modified.
    pub fn sprite_mut(&mut self) -> &mut SpriteSurface {
        &mut self.sprite
    }

    /// Discard the current sprite and start a blank one.
    pub fn new_sprite(&mut self, mode: ColorMode) {
        debug!("new {} sprite", mode.name());
        let color = self.sprite.color();
        self.config.sprite_mode = mode;
        self.sprite = tracked_sprite(mode, color, &self.modified);
        self.pen = mode.clamp(i32::from(self.pen));
        self.modified.set(false);
    }

    /// Plane value written by [`Button::Primary`].
    #[must_use]
    pub fn pen(&self) -> u8 {
        self.pen
    }

    pub fn set_pen(&mut self, value: i32) {
        self.pen = self.sprite.mode().clamp(value);
    }

    /// Paint or erase one sprite pixel. Off-sprite positions are ignored.
    pub fn draw(&mut self, x: i32, y: i32, button: Button) {
        let value = match button {
            Button::Primary => self.pen,
            Button::Secondary => BACKGROUND,
        };
        self.sprite.set_pixel(x, y, i32::from(value));
    }

    /// Palette index of the sprite's foreground.
    #[must_use]
    pub fn current_color(&self) -> u8 {
        self.sprite.color()
    }

    /// Step the sprite colour by one index in the direction of `delta`,
    /// wrapping within 1..=15.
    pub fn cycle_color(&mut self, delta: i32) -> u8 {
        let current = self.sprite.color();
        let next = match delta.signum() {
            1 if current >= LAST_CYCLED_COLOR => FIRST_CYCLED_COLOR,
            1 => current + 1,
            -1 if current <= FIRST_CYCLED_COLOR => LAST_CYCLED_COLOR,
            -1 => current - 1,
            _ => current,
        };
        self.sprite.set_color(next);
        next
    }

    /// Whether the sprite changed since it was created or last saved.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified.get()
    }

    pub fn mark_saved(&mut self) {
        self.modified.set(false);
    }

    /// Palette indices used to display the sprite.
    #[must_use]
    pub fn color_map(&self) -> ColorMap {
        ColorMap::sprite(
            self.sprite.color(),
            self.config.multicolors,
            self.palette.is_widened(),
        )
    }

    /// The sprite as a 24x21 BGRA bitmap.
    pub fn render_sprite(&self) -> Result<Vec<u8>> {
        let mut pixels = vec![0; SPRITE_WIDTH as usize * SPRITE_HEIGHT as usize * BGRA_DEPTH];
        render_bgra(
            self.sprite.surface(),
            &self.palette,
            &self.color_map(),
            &mut pixels,
        )?;
        Ok(pixels)
    }

    /// Grid overlay sized for the sprite.
    pub fn grid(&self) -> Result<GridImage> {
        render_grid(SPRITE_WIDTH, SPRITE_HEIGHT, &self.config.grid)
    }
}

fn build_palette(name: PaletteName, transparent: bool) -> Palette {
    if transparent {
        Palette::transparent(name)
    } else {
        Palette::new(name)
    }
}

fn tracked_sprite(mode: ColorMode, color: u8, modified: &Rc<Cell<bool>>) -> SpriteSurface {
    let mut sprite = SpriteSurface::new(mode);
    sprite.set_color(color);
    let flag = Rc::clone(modified);
    sprite.on_changed(move |_| flag.set(true));
    sprite
}

impl Observable for EditorContext {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("sprite.") {
            self.sprite.query(rest)
        } else {
            match path {
                "modified" => Some(self.is_modified().into()),
                "color" => Some(self.sprite.color().into()),
                "pen" => Some(self.pen.into()),
                "palette" => Some(self.palette.name().name().into()),
                "palette.size" => Some(self.palette.len().into()),
                "palette.colors" => Some(Value::Array(
                    self.palette
                        .colors()
                        .iter()
                        .map(|c| Value::U32(c.to_argb()))
                        .collect(),
                )),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "modified",
            "color",
            "pen",
            "palette",
            "palette.size",
            "palette.colors",
            "sprite.<sprite_paths>",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> EditorContext {
        EditorContext::new(EditorConfig::default()).expect("default config is valid")
    }

    #[test_log::test]
    fn starts_unmodified_with_configured_state() {
        let ctx = context();
        assert!(!ctx.is_modified());
        assert_eq!(ctx.current_color(), 1);
        assert_eq!(ctx.pen(), 1);
        assert_eq!(ctx.palette().name(), PaletteName::Ccs64);
        assert!(ctx.palette().is_widened());
    }

    #[test_log::test]
    fn drawing_marks_modified() {
        let mut ctx = context();
        ctx.draw(0, 0, Button::Primary);
        assert!(ctx.is_modified());
        assert_eq!(ctx.sprite().get_pixel(0, 0), 1);

        ctx.mark_saved();
        ctx.draw(0, 0, Button::Secondary);
        assert!(ctx.is_modified());
        assert_eq!(ctx.sprite().get_pixel(0, 0), 0);
    }

    #[test_log::test]
    fn off_sprite_draw_does_not_mark_modified() {
        let mut ctx = context();
        ctx.draw(24, 0, Button::Primary);
        ctx.draw(-1, 5, Button::Primary);
        assert!(!ctx.is_modified());
    }

    #[test_log::test]
    fn writes_through_sprite_mut_are_tracked() {
        let mut ctx = context();
        ctx.sprite_mut().set_pixel(3, 3, 1);
        assert!(ctx.is_modified());
    }

    #[test_log::test]
    fn cycle_wraps_and_skips_background() {
        let mut ctx = context();
        assert_eq!(ctx.cycle_color(-1), 15);
        assert_eq!(ctx.cycle_color(1), 1);
        assert_eq!(ctx.cycle_color(120), 2);
        assert_eq!(ctx.cycle_color(0), 2);
        ctx.sprite_mut().set_color(15);
        assert_eq!(ctx.cycle_color(1), 1);
    }

    #[test_log::test]
    fn cycle_from_background_goes_to_last() {
        let mut ctx = EditorContext::new(EditorConfig {
            sprite_color: 0,
            ..EditorConfig::default()
        })
        .expect("valid config");
        assert_eq!(ctx.cycle_color(-1), 15);
    }

    #[test_log::test]
    fn out_of_palette_color_is_rejected_not_reset() {
        let config = EditorConfig {
            sprite_color: 99,
            ..EditorConfig::default()
        };
        assert!(matches!(
            EditorContext::new(config),
            Err(crate::EditorError::InvalidColor { index: 99, .. })
        ));
    }

    #[test_log::test]
    fn pen_follows_mode() {
        let mut ctx = context();
        ctx.set_pen(3);
        assert_eq!(ctx.pen(), 1);

        ctx.new_sprite(ColorMode::MultiColor);
        ctx.set_pen(3);
        ctx.draw(1, 0, Button::Primary);
        assert_eq!(ctx.sprite().bytes()[0], 0x30);
    }

    #[test_log::test]
    fn new_sprite_resets_modified_and_keeps_color() {
        let mut ctx = context();
        ctx.cycle_color(1);
        ctx.draw(0, 0, Button::Primary);
        ctx.new_sprite(ColorMode::MultiColor);
        assert!(!ctx.is_modified());
        assert_eq!(ctx.current_color(), 2);
        assert_eq!(ctx.sprite().mode(), ColorMode::MultiColor);
        assert!(ctx.sprite().bytes().iter().all(|&b| b == 0));
        ctx.draw(0, 0, Button::Primary);
        assert!(ctx.is_modified());
    }

    #[test_log::test]
    fn palette_switch_keeps_transparency() {
        let mut ctx = context();
        ctx.set_palette(PaletteName::Colodore);
        assert_eq!(ctx.palette().name(), PaletteName::Colodore);
        assert_eq!(ctx.palette().len(), 32);
        assert_eq!(ctx.config().palette, PaletteName::Colodore);
    }

    #[test_log::test]
    fn render_sprite_pixels() {
        let mut ctx = context();
        ctx.draw(1, 0, Button::Primary);
        let pixels = ctx.render_sprite().expect("rendered");
        assert_eq!(pixels.len(), 24 * 21 * 4);
        // Background is see-through; pixel 1 is CCS64 white.
        assert_eq!(pixels[3], 0);
        assert_eq!(&pixels[4..8], &[0xFC, 0xF9, 0xFC, 0xFF]);
    }

    #[test_log::test]
    fn observable_paths() {
        let mut ctx = context();
        ctx.draw(0, 0, Button::Primary);
        assert_eq!(ctx.query("modified"), Some(Value::Bool(true)));
        assert_eq!(ctx.query("palette"), Some(Value::String("ccs64".into())));
        assert_eq!(ctx.query("palette.size"), Some(Value::U64(32)));
        assert_eq!(ctx.query("sprite.pixel.0.0"), Some(Value::U8(1)));
        assert_eq!(ctx.query("sprite.color"), Some(Value::U8(1)));
        match ctx.query("palette.colors") {
            Some(Value::Array(colors)) => {
                assert_eq!(colors.len(), 32);
                assert_eq!(colors[2], Value::U32(0xFF93_3A4C));
                assert_eq!(colors[18], Value::U32(0x0093_3A4C));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
