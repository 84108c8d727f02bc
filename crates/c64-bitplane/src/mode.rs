//! Colour depth of a bitplane.

/// Background value in either mode.
pub const BACKGROUND: u8 = 0;

/// Foreground value in either mode.
pub const FOREGROUND: u8 = 1;

/// First extra value of a multicolour plane.
pub const FIRST_MULTICOLOR: u8 = 2;

/// Second extra value of a multicolour plane.
pub const SECOND_MULTICOLOR: u8 = 3;

/// Addressing mode of a packed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ColorMode {
    /// 1 bit per pixel, two values.
    #[default]
    HighRes,
    /// 2 bits per pixel, four values.
    MultiColor,
}

impl ColorMode {
    #[must_use]
    pub const fn pixels_per_byte(self) -> usize {
        match self {
            Self::HighRes => 8,
            Self::MultiColor => 4,
        }
    }

    #[must_use]
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::HighRes => 1,
            Self::MultiColor => 2,
        }
    }

    /// Largest storable pixel value.
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::HighRes => FOREGROUND,
            Self::MultiColor => SECOND_MULTICOLOR,
        }
    }

    /// Bit mask of one pixel, right-aligned.
    #[must_use]
    pub const fn mask(self) -> u8 {
        match self {
            Self::HighRes => 0x01,
            Self::MultiColor => 0x03,
        }
    }

    /// Clamp an arbitrary value into `0..=max_value()`.
    #[must_use]
    pub fn clamp(self, color: i32) -> u8 {
        color.clamp(i32::from(BACKGROUND), i32::from(self.max_value())) as u8
    }

    #[must_use]
    pub const fn is_multicolor(self) -> bool {
        matches!(self, Self::MultiColor)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HighRes => "high-res",
            Self::MultiColor => "multi-color",
        }
    }
}
