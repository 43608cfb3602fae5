//! Hex color to terminal escape sequence resolution.
//!
//! True-color terminals get a direct 24-bit sequence. Lesser terminals get
//! the nearest entry of a fixed palette ([`lut`]), measured by Euclidean
//! distance in RGB space. Resolution is a pure function of its inputs.

pub mod detect;
pub mod lut;

pub use consol_config::ColorCapability;
pub use detect::{capability_from_hints, detect_capability};
pub use lut::{ANSI_16, LutEntry, XTERM_256, nearest};

use crate::error::{ConsolError, Result};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance. Monotonic in the true distance, so
    /// nearest-neighbor comparisons give the same answer without a sqrt.
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Lowercase 6-digit hex without a marker.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Normalize a hex color to 6 lowercase digits.
///
/// Accepts 3 or 6 digits with an optional leading `#`. Three-digit input is
/// expanded by duplicating each digit (`0f0` becomes `00ff00`).
pub fn normalize_hex(hex: &str) -> Result<String> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    let expanded: String = if digits.chars().count() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    if expanded.len() != 6 || !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConsolError::InvalidColor(hex.to_string()));
    }
    Ok(expanded.to_ascii_lowercase())
}

/// Decode a hex color into its RGB channels.
pub fn parse_hex(hex: &str) -> Result<Rgb> {
    let normalized = normalize_hex(hex)?;
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&normalized[range], 16)
            .map_err(|_| ConsolError::InvalidColor(hex.to_string()))
    };
    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Resolve a hex color to the best escape sequence `capability` supports.
///
/// `background` selects the background rather than foreground slot. Under
/// [`ColorCapability::None`] the neutral reset sequence is returned. The
/// color is validated on every tier, so an invalid hex always fails.
pub fn resolve_color(hex: &str, background: bool, capability: ColorCapability) -> Result<String> {
    let rgb = parse_hex(hex)?;
    Ok(match capability {
        ColorCapability::TrueColor => truecolor_sequence(rgb, background),
        ColorCapability::Ansi256 => match nearest(rgb, &XTERM_256) {
            Some((entry, _)) => {
                let slot = if background { 48 } else { 38 };
                format!("\x1b[{slot};5;{}m", entry.code)
            }
            None => truecolor_sequence(rgb, background),
        },
        ColorCapability::Basic => match nearest(rgb, &ANSI_16) {
            Some((entry, _)) => basic_sequence(entry.code, background),
            None => truecolor_sequence(rgb, background),
        },
        ColorCapability::None => consol_config::defaults::RESET.to_string(),
    })
}

fn truecolor_sequence(rgb: Rgb, background: bool) -> String {
    let slot = if background { 48 } else { 38 };
    format!("\x1b[{slot};2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

/// SGR code for one of the 16 standard colors.
fn basic_sequence(index: u8, background: bool) -> String {
    let code = match (index < 8, background) {
        (true, false) => 30 + index,
        (true, true) => 40 + index,
        (false, false) => 90 + (index - 8),
        (false, true) => 100 + (index - 8),
    };
    format!("\x1b[{code}m")
}
