//! Terminal color capability tiers.

use serde::{Deserialize, Serialize};

/// Color depth the output terminal supports.
///
/// Ordered from least to most capable, so `a < b` means `b` can render
/// everything `a` can.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorCapability {
    /// No color output at all
    None,
    /// The 16 standard ANSI colors
    Basic,
    /// The xterm 256-color palette
    #[serde(rename = "256", alias = "ansi256")]
    Ansi256,
    /// 24-bit RGB
    #[default]
    #[serde(alias = "24bit")]
    TrueColor,
}

impl ColorCapability {
    /// Display name for diagnostics
    pub fn display_name(&self) -> &'static str {
        match self {
            ColorCapability::None => "none",
            ColorCapability::Basic => "basic",
            ColorCapability::Ansi256 => "256",
            ColorCapability::TrueColor => "truecolor",
        }
    }

    /// Parse a capability name. Accepts the display names plus common aliases.
    pub fn from_slug(slug: &str) -> Option<ColorCapability> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "no" => Some(ColorCapability::None),
            "basic" | "16" | "ansi" => Some(ColorCapability::Basic),
            "256" | "ansi256" => Some(ColorCapability::Ansi256),
            "truecolor" | "24bit" => Some(ColorCapability::TrueColor),
            _ => None,
        }
    }
}
