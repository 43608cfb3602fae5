//! Fixed color palettes used when the terminal lacks true-color support.
//!
//! Both tables are built once on first use and never change. Table order is
//! significant: [`nearest`] breaks ties in favor of the earlier entry.

use std::sync::LazyLock;

use super::Rgb;

/// One palette slot: canonical hex, decoded channels, and palette index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LutEntry {
    /// Lowercase 6-digit hex without a marker
    pub hex: String,
    pub rgb: Rgb,
    /// Palette index used in the emitted escape code
    pub code: u8,
}

impl LutEntry {
    fn new(code: u8, rgb: Rgb) -> Self {
        Self {
            hex: rgb.to_hex(),
            rgb,
            code,
        }
    }
}

/// xterm default values for the 16 standard colors.
const STANDARD_16: [Rgb; 16] = [
    Rgb::new(0x00, 0x00, 0x00), // 0  Black
    Rgb::new(0xcd, 0x00, 0x00), // 1  Red
    Rgb::new(0x00, 0xcd, 0x00), // 2  Green
    Rgb::new(0xcd, 0xcd, 0x00), // 3  Yellow
    Rgb::new(0x00, 0x00, 0xee), // 4  Blue
    Rgb::new(0xcd, 0x00, 0xcd), // 5  Magenta
    Rgb::new(0x00, 0xcd, 0xcd), // 6  Cyan
    Rgb::new(0xe5, 0xe5, 0xe5), // 7  White
    Rgb::new(0x7f, 0x7f, 0x7f), // 8  Bright black
    Rgb::new(0xff, 0x00, 0x00), // 9  Bright red
    Rgb::new(0x00, 0xff, 0x00), // 10 Bright green
    Rgb::new(0xff, 0xff, 0x00), // 11 Bright yellow
    Rgb::new(0x5c, 0x5c, 0xff), // 12 Bright blue
    Rgb::new(0xff, 0x00, 0xff), // 13 Bright magenta
    Rgb::new(0x00, 0xff, 0xff), // 14 Bright cyan
    Rgb::new(0xff, 0xff, 0xff), // 15 Bright white
];

/// Channel levels of the 6x6x6 color cube (indices 16..=231).
const CUBE_LEVELS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

/// The 16 standard ANSI colors.
pub static ANSI_16: LazyLock<Vec<LutEntry>> = LazyLock::new(|| {
    STANDARD_16
        .iter()
        .zip(0u8..)
        .map(|(rgb, code)| LutEntry::new(code, *rgb))
        .collect()
});

/// The full xterm 256-color palette: standard colors, color cube, grayscale ramp.
pub static XTERM_256: LazyLock<Vec<LutEntry>> = LazyLock::new(|| {
    let mut table = ANSI_16.clone();
    table.reserve(240);

    let mut code: u8 = 16;
    for r in CUBE_LEVELS {
        for g in CUBE_LEVELS {
            for b in CUBE_LEVELS {
                table.push(LutEntry::new(code, Rgb::new(r, g, b)));
                code += 1;
            }
        }
    }

    for step in 0u8..24 {
        let level = 8 + step * 10;
        table.push(LutEntry::new(232 + step, Rgb::new(level, level, level)));
    }
    table
});

/// Find the entry closest to `rgb`, returning it with its squared distance.
///
/// Ties go to the first entry in table order. `None` for an empty table.
pub fn nearest(rgb: Rgb, table: &[LutEntry]) -> Option<(&LutEntry, u32)> {
    table
        .iter()
        .map(|entry| (entry, rgb.distance_sq(entry.rgb)))
        .reduce(|best, candidate| if candidate.1 < best.1 { candidate } else { best })
}
