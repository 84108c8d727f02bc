//! Bounds checks shared by surfaces and renderers.

/// Whether `(x, y)` lies in `[0, width) x [0, height)`.
#[must_use]
pub fn is_inside(x: i32, y: i32, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
}

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A single pixel.
    #[must_use]
    pub const fn pixel(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Whether `(x, y)` lies inside this rectangle.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        left <= x
            && x < left + i64::from(self.width)
            && top <= y
            && y < top + i64::from(self.height)
    }

    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
