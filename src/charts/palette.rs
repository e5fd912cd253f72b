//! Chart colors

use plotters::style::RGBColor;

pub const DIED: RGBColor = RGBColor(0xFF, 0x00, 0x00);
pub const SURVIVED: RGBColor = RGBColor(0x00, 0xAA, 0x00);

/// Soft categorical palette for grouped bars and pair plots
pub const PASTEL: [RGBColor; 6] = [
    RGBColor(0xA1, 0xC9, 0xF4),
    RGBColor(0xFF, 0xB4, 0x82),
    RGBColor(0x8D, 0xE5, 0xA1),
    RGBColor(0xFF, 0x9F, 0x9B),
    RGBColor(0xD0, 0xBB, 0xFF),
    RGBColor(0xDE, 0xBB, 0x9B),
];

pub fn pastel(index: usize) -> RGBColor {
    PASTEL[index % PASTEL.len()]
}

/// Color for an outcome value (0 died, anything else survived)
pub fn outcome_color(outcome: i64) -> RGBColor {
    if outcome == 0 {
        DIED
    } else {
        SURVIVED
    }
}

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Diverging blue-white-red map for values in [-1, 1]
pub fn coolwarm(value: f64) -> RGBColor {
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 {
        (COOL, NEUTRAL, v + 1.0)
    } else {
        (NEUTRAL, WARM, v)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}
