//! Color resolution across capability tiers.

use consol::color::{ANSI_16, XTERM_256, capability_from_hints, nearest, parse_hex};
use consol::{ColorCapability, ConsolError, resolve_color};

const TIERS: [ColorCapability; 4] = [
    ColorCapability::None,
    ColorCapability::Basic,
    ColorCapability::Ansi256,
    ColorCapability::TrueColor,
];

#[test]
fn test_every_three_digit_color_matches_its_expansion() {
    let digits = "0123456789abcdef";
    for r in digits.chars() {
        for g in digits.chars() {
            for b in digits.chars() {
                let short = format!("{r}{g}{b}");
                let long = format!("#{r}{r}{g}{g}{b}{b}");
                assert_eq!(parse_hex(&short).unwrap(), parse_hex(&long).unwrap());
                for tier in TIERS {
                    assert_eq!(
                        resolve_color(&short, false, tier).unwrap(),
                        resolve_color(&long, false, tier).unwrap()
                    );
                }
            }
        }
    }
}

#[test]
fn test_palette_colors_match_exactly() {
    for table in [&*ANSI_16, &*XTERM_256] {
        for entry in table.iter() {
            let (found, distance) = nearest(entry.rgb, table).unwrap();
            assert_eq!(distance, 0, "{}", entry.hex);
            assert_eq!(found.hex, entry.hex);
            assert!(found.code <= entry.code, "ties resolve to the first entry");
        }
    }
}

#[test]
fn test_red_on_each_tier() {
    assert_eq!(
        resolve_color("#FF0000", false, ColorCapability::TrueColor).unwrap(),
        "\x1b[38;2;255;0;0m"
    );
    assert_eq!(
        resolve_color("#FF0000", false, ColorCapability::None).unwrap(),
        "\x1b[0m"
    );
    assert_eq!(
        resolve_color("#FF0000", false, ColorCapability::Ansi256).unwrap(),
        "\x1b[38;5;9m"
    );
    assert_eq!(
        resolve_color("#FF0000", true, ColorCapability::Basic).unwrap(),
        "\x1b[101m"
    );
}

#[test]
fn test_resolution_is_deterministic() {
    for tier in TIERS {
        let first = resolve_color("#3a7bd5", true, tier).unwrap();
        for _ in 0..3 {
            assert_eq!(resolve_color("#3a7bd5", true, tier).unwrap(), first);
        }
    }
}

#[test]
fn test_invalid_color_fails_on_every_tier() {
    for tier in TIERS {
        assert!(matches!(
            resolve_color("#12", false, tier),
            Err(ConsolError::InvalidColor(_))
        ));
    }
}

#[test]
fn test_capability_hints() {
    assert_eq!(
        capability_from_hints(false, Some("truecolor"), Some("xterm")),
        ColorCapability::TrueColor
    );
    assert_eq!(
        capability_from_hints(true, Some("truecolor"), Some("xterm-256color")),
        ColorCapability::None
    );
}
