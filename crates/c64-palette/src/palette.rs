//! Named C64 colour tables.
//!
//! Every table holds the 16 VIC-II hardware colours as packed `0xAARRGGBB`
//! literals. Different emulators and paint programs disagree on the exact
//! RGB values, so the editor ships several of them.
//!
//! Some indexed bitmap formats reserve the upper half of the index range
//! for transparent copies of the lower half; [`Palette::widen`] builds that
//! 32-entry form.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::color::Color;

/// Number of hardware colours.
pub const PALETTE_SIZE: usize = 16;

/// Number of entries in a widened (opaque + transparent) palette.
pub const WIDE_PALETTE_SIZE: usize = PALETTE_SIZE * 2;

/// Hardware colour names, by index.
pub const COLOR_NAMES: [&str; PALETTE_SIZE] = [
    "Black",
    "White",
    "Red",
    "Cyan",
    "Purple",
    "Green",
    "Blue",
    "Yellow",
    "Orange",
    "Brown",
    "Light Red",
    "Dark Grey",
    "Grey",
    "Light Green",
    "Light Blue",
    "Light Grey",
];

/// CCS64 emulator colours.
pub const CCS64: [u32; PALETTE_SIZE] = [
    0xFF19_1D19, // 0: Black
    0xFFFC_F9FC, // 1: White
    0xFF93_3A4C, // 2: Red
    0xFFB6_FAFA, // 3: Cyan
    0xFFD2_7DED, // 4: Purple
    0xFF6A_CF6F, // 5: Green
    0xFF4F_44D8, // 6: Blue
    0xFFFB_FB8B, // 7: Yellow
    0xFFD8_9C5B, // 8: Orange
    0xFF7F_5307, // 9: Brown
    0xFFEF_839F, // 10: Light Red
    0xFF57_5753, // 11: Dark Grey
    0xFFA3_A7A7, // 12: Grey
    0xFFB7_FBBF, // 13: Light Green
    0xFFA3_97FF, // 14: Light Blue
    0xFFEF_E9E7, // 15: Light Grey
];

/// Brighter, flatter CCS64 variant.
pub const CCS64_V2: [u32; PALETTE_SIZE] = [
    0xFF10_1010, 0xFFFF_FFFF, 0xFFE0_4040, 0xFF60_FFFF,
    0xFFE0_60E0, 0xFF40_E040, 0xFF40_40E0, 0xFFFF_FF40,
    0xFFE0_A040, 0xFF9C_7448, 0xFFFF_A0A0, 0xFF54_5454,
    0xFF88_8888, 0xFFA0_FFA0, 0xFFA0_A0FF, 0xFFC0_C0C0,
];

/// VICE emulator default colours.
pub const VICE: [u32; PALETTE_SIZE] = [
    0xFF00_0000, 0xFFFD_FEFC, 0xFFBE_1A24, 0xFF30_E6C6,
    0xFFB4_1AE2, 0xFF1F_D21E, 0xFF21_1BAE, 0xFFDF_F60A,
    0xFFB8_4104, 0xFF6A_3304, 0xFFFE_4A57, 0xFF42_4540,
    0xFF70_746F, 0xFF59_FE59, 0xFF5F_53FE, 0xFFA4_A7A2,
];

/// Colours from the Wikipedia C64 article.
pub const WIKIPEDIA: [u32; PALETTE_SIZE] = [
    0xFF00_0000, 0xFFFF_FFFF, 0xFF9F_4E44, 0xFF6A_BFC6,
    0xFFA0_57A3, 0xFF5C_AB5E, 0xFF50_459B, 0xFFC9_D487,
    0xFFA1_683C, 0xFF6D_5412, 0xFFCB_7E75, 0xFF62_6262,
    0xFF89_8989, 0xFF9A_E29B, 0xFF88_7ECB, 0xFFAD_ADAD,
];

/// Aseprite's C64 preset.
pub const ASESPRITE: [u32; PALETTE_SIZE] = [
    0xFF00_0000, 0xFFFF_FFFF, 0xFF88_3932, 0xFF67_B6BD,
    0xFF8B_3F96, 0xFF55_A049, 0xFF40_318D, 0xFFBF_CE72,
    0xFF8B_5429, 0xFF57_4200, 0xFFB8_6962, 0xFF50_5050,
    0xFF78_7878, 0xFF94_E089, 0xFF78_69C4, 0xFF9F_9F9F,
];

/// Colodore (Pepto, 2017) colours.
pub const COLODORE: [u32; PALETTE_SIZE] = [
    0xFF00_0000, 0xFFFF_FFFF, 0xFF96_282E, 0xFF5B_D6CE,
    0xFF9F_2DAD, 0xFF41_B936, 0xFF27_24C4, 0xFFEF_F347,
    0xFF9F_4815, 0xFF5E_3500, 0xFFDA_5F66, 0xFF47_4747,
    0xFF78_7878, 0xFF91_FF84, 0xFF68_64FF, 0xFFAE_AEAE,
];

/// MultiPaint editor colours.
pub const MULTIPAINT: [u32; PALETTE_SIZE] = [
    0xFF00_0000, 0xFFFF_FFFF, 0xFF81_3338, 0xFF75_CEC8,
    0xFF8E_3C97, 0xFF56_AC4D, 0xFF2E_2C9B, 0xFFED_F171,
    0xFF8E_5029, 0xFF55_3800, 0xFFC4_6C71, 0xFF4A_4A4A,
    0xFF7B_7B7B, 0xFFA9_FF9F, 0xFF70_6DEB, 0xFFB2_B2B2,
];

/// Pepto's NTSC measurements.
pub const PEPTO_NTSC: [u32; PALETTE_SIZE] = [
    0xFF00_0000, 0xFFFF_FFFF, 0xFF67_372B, 0xFF70_A3B1,
    0xFF6F_3D86, 0xFF58_8C42, 0xFF34_2879, 0xFFB7_C66E,
    0xFF6F_4E25, 0xFF42_3800, 0xFF99_6659, 0xFF43_4343,
    0xFF6B_6B6B, 0xFF9A_D183, 0xFF6B_5EB5, 0xFF95_9595,
];

/// Pepto's PAL measurements.
pub const PEPTO_PAL: [u32; PALETTE_SIZE] = [
    0xFF00_0000, 0xFFFF_FFFF, 0xFF68_372B, 0xFF70_A4B2,
    0xFF6F_3D86, 0xFF58_8D43, 0xFF35_2879, 0xFFB8_C76F,
    0xFF6F_4F25, 0xFF43_3900, 0xFF9A_6759, 0xFF44_4444,
    0xFF6C_6C6C, 0xFF9A_D284, 0xFF6C_5EB5, 0xFF95_9595,
];

/// Early VIC-II revision (old luminances).
pub const VIC2_OLD: [u32; PALETTE_SIZE] = [
    0xFF00_0000, 0xFFFF_FFFF, 0xFF58_291D, 0xFF91_C6D5,
    0xFF91_5CA8, 0xFF58_8D43, 0xFF35_2879, 0xFFB8_C76F,
    0xFF91_6F43, 0xFF43_3900, 0xFF9A_6759, 0xFF35_3535,
    0xFF74_7474, 0xFF9A_D284, 0xFF74_66BE, 0xFFB8_B8B8,
];

/// VIC-II PAL colours.
pub const VIC2_PAL: [u32; PALETTE_SIZE] = [
    0xFF00_0000, 0xFFFF_FFFF, 0xFF68_372B, 0xFF70_A4B2,
    0xFF6F_3D86, 0xFF58_8D43, 0xFF35_2879, 0xFFB8_C76F,
    0xFF6F_4F25, 0xFF43_3900, 0xFF9A_6759, 0xFF44_4444,
    0xFF6C_6C6C, 0xFF9A_D284, 0xFF6C_5EB5, 0xFF95_9595,
];

/// Error returned when a palette name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown palette name: {0:?}")]
pub struct UnknownPalette(pub String);

/// The named colour tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "&'static str"))]
pub enum PaletteName {
    #[default]
    Ccs64,
    Ccs64V2,
    Vice,
    Wikipedia,
    AseSprite,
    Colodore,
    MultiPaint,
    PeptoNtsc,
    PeptoPal,
    Vic2Old,
    Vic2Pal,
}

impl PaletteName {
    pub const ALL: [Self; 11] = [
        Self::Ccs64,
        Self::Ccs64V2,
        Self::Vice,
        Self::Wikipedia,
        Self::AseSprite,
        Self::Colodore,
        Self::MultiPaint,
        Self::PeptoNtsc,
        Self::PeptoPal,
        Self::Vic2Old,
        Self::Vic2Pal,
    ];

    /// Canonical name, as used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ccs64 => "ccs64",
            Self::Ccs64V2 => "ccs64-v2",
            Self::Vice => "vice",
            Self::Wikipedia => "wikipedia",
            Self::AseSprite => "asesprite",
            Self::Colodore => "colodore",
            Self::MultiPaint => "multipaint",
            Self::PeptoNtsc => "pepto-ntsc",
            Self::PeptoPal => "pepto-pal",
            Self::Vic2Old => "vic2-old",
            Self::Vic2Pal => "vic2-pal",
        }
    }

    /// Raw `0xAARRGGBB` literals for this table.
    #[must_use]
    pub const fn table(self) -> &'static [u32; PALETTE_SIZE] {
        match self {
            Self::Ccs64 => &CCS64,
            Self::Ccs64V2 => &CCS64_V2,
            Self::Vice => &VICE,
            Self::Wikipedia => &WIKIPEDIA,
            Self::AseSprite => &ASESPRITE,
            Self::Colodore => &COLODORE,
            Self::MultiPaint => &MULTIPAINT,
            Self::PeptoNtsc => &PEPTO_NTSC,
            Self::PeptoPal => &PEPTO_PAL,
            Self::Vic2Old => &VIC2_OLD,
            Self::Vic2Pal => &VIC2_PAL,
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteName {
    type Err = UnknownPalette;

    /// Case-insensitive; `-`, `_` and spaces are ignored, so `VIC2PAL`,
    /// `vic2-pal` and `Vic2_Pal` all name the same table.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalise(s);
        Self::ALL
            .into_iter()
            .find(|name| normalise(name.name()) == key)
            .ok_or_else(|| UnknownPalette(s.to_string()))
    }
}

impl TryFrom<String> for PaletteName {
    type Error = UnknownPalette;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaletteName> for &'static str {
    fn from(name: PaletteName) -> Self {
        name.name()
    }
}

fn normalise(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn decode(table: &[u32; PALETTE_SIZE]) -> [Color; PALETTE_SIZE] {
    table.map(Color::from_argb)
}

#[must_use]
pub fn ccs64() -> [Color; PALETTE_SIZE] {
    decode(&CCS64)
}

#[must_use]
pub fn ccs64_v2() -> [Color; PALETTE_SIZE] {
    decode(&CCS64_V2)
}

#[must_use]
pub fn vice() -> [Color; PALETTE_SIZE] {
    decode(&VICE)
}

#[must_use]
pub fn wikipedia() -> [Color; PALETTE_SIZE] {
    decode(&WIKIPEDIA)
}

#[must_use]
pub fn asesprite() -> [Color; PALETTE_SIZE] {
    decode(&ASESPRITE)
}

#[must_use]
pub fn colodore() -> [Color; PALETTE_SIZE] {
    decode(&COLODORE)
}

#[must_use]
pub fn multipaint() -> [Color; PALETTE_SIZE] {
    decode(&MULTIPAINT)
}

#[must_use]
pub fn pepto_ntsc() -> [Color; PALETTE_SIZE] {
    decode(&PEPTO_NTSC)
}

#[must_use]
pub fn pepto_pal() -> [Color; PALETTE_SIZE] {
    decode(&PEPTO_PAL)
}

#[must_use]
pub fn vic2_old() -> [Color; PALETTE_SIZE] {
    decode(&VIC2_OLD)
}

#[must_use]
pub fn vic2_pal() -> [Color; PALETTE_SIZE] {
    decode(&VIC2_PAL)
}

/// A decoded colour table, optionally widened with transparent copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    name: PaletteName,
    colors: Vec<Color>,
}

impl Palette {
    /// Decode the 16 colours of a named table.
    #[must_use]
    pub fn build(name: PaletteName) -> [Color; PALETTE_SIZE] {
        decode(name.table())
    }

    /// Append a copy of `palette` with alpha forced to zero.
    ///
    /// Entry `i + 16` differs from entry `i` only in alpha.
    #[must_use]
    pub fn widen(palette: &[Color; PALETTE_SIZE]) -> [Color; WIDE_PALETTE_SIZE] {
        std::array::from_fn(|i| {
            let color = palette[i % PALETTE_SIZE];
            if i < PALETTE_SIZE {
                color
            } else {
                color.with_alpha(0)
            }
        })
    }

    /// The 16 opaque colours of `name`.
    #[must_use]
    pub fn new(name: PaletteName) -> Self {
        Self {
            name,
            colors: Self::build(name).to_vec(),
        }
    }

    /// The 32-entry form of `name`: opaque colours then transparent copies.
    #[must_use]
    pub fn transparent(name: PaletteName) -> Self {
        Self {
            name,
            colors: Self::widen(&Self::build(name)).to_vec(),
        }
    }

    #[must_use]
    pub fn name(&self) -> PaletteName {
        self.name
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Whether the transparent copies are present.
    #[must_use]
    pub fn is_widened(&self) -> bool {
        self.colors.len() == WIDE_PALETTE_SIZE
    }
}
