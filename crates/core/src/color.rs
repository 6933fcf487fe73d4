//! Color utilities for AuraWall configurations.
//!
//! Config colors are strings: hex (`#rrggbb` or `#rgb`) or css-style
//! `hsl(h, s%, l%)`. All generation logic works in HSL, so this module
//! provides the [`Hsl`] type, conversions in both directions, and the
//! hue/saturation/lightness shifting used by variation transforms.
//!
//! Parsing is deliberately forgiving: an unrecognized color reads as black,
//! matching how the renderer treats malformed input. Strict validation is
//! available via [`Hsl::parse_css`].

use crate::config::{Background, Gradient};

/// A color in HSL space: hue in degrees, saturation and lightness in percent.
///
/// Values are not constrained on construction; [`Hsl::to_css`] normalizes
/// hue into [0, 360) and clamps saturation/lightness into [0, 100] when
/// re-encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Formats as a normalized `hsl(h, s%, l%)` string.
    ///
    /// Hue wraps into [0, 360); saturation and lightness clamp into
    /// [0, 100]. Components are rounded to two decimals so repeated
    /// shift/re-encode cycles do not accrete float noise.
    pub fn to_css(self) -> String {
        let h = round2(self.h.rem_euclid(360.0));
        let s = round2(self.s.clamp(0.0, 100.0));
        let l = round2(self.l.clamp(0.0, 100.0));
        format!("hsl({h}, {s}%, {l}%)")
    }

    /// Parses an `hsl(h, s%, l%)` string.
    ///
    /// Returns `None` for anything else, including `hsla()` (alpha is not
    /// part of the config model).
    pub fn parse_css(input: &str) -> Option<Hsl> {
        let inner = input
            .trim()
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))?;
        let mut parts = inner.split(',');
        let h = parts.next()?.trim().parse::<f64>().ok()?;
        let s = parse_percent(parts.next()?)?;
        let l = parse_percent(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Hsl { h, s, l })
    }

    /// Converts to a `#rrggbb` hex string via the standard sector formula.
    pub fn to_hex(self) -> String {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 100.0) / 100.0;
        let l = self.l.clamp(0.0, 100.0) / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_byte = |v: f64| ((v + m) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))
    }
}

fn parse_percent(part: &str) -> Option<f64> {
    part.trim().strip_suffix('%')?.trim().parse::<f64>().ok()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Converts a hex color (`#rgb` or `#rrggbb`) to HSL.
///
/// Hue is rounded to the nearest degree and saturation/lightness to the
/// nearest percent, matching the quantization the rest of the pipeline
/// expects. Unrecognized input reads as black.
pub fn hex_to_hsl(hex: &str) -> Hsl {
    let digits = match hex.strip_prefix('#') {
        Some(d) => d,
        None => return Hsl::new(0.0, 0.0, 0.0),
    };

    let (r, g, b) = match digits.len() {
        3 => {
            let mut chars = digits.chars();
            let (a, b_, c) = (chars.next(), chars.next(), chars.next());
            match (
                a.and_then(|c| c.to_digit(16)),
                b_.and_then(|c| c.to_digit(16)),
                c.and_then(|c| c.to_digit(16)),
            ) {
                (Some(r), Some(g), Some(b)) => (r * 17, g * 17, b * 17),
                _ => return Hsl::new(0.0, 0.0, 0.0),
            }
        }
        6 => {
            let parse2 = |s: &str| u32::from_str_radix(s, 16).ok();
            match (
                parse2(&digits[0..2]),
                parse2(&digits[2..4]),
                parse2(&digits[4..6]),
            ) {
                (Some(r), Some(g), Some(b)) => (r, g, b),
                _ => return Hsl::new(0.0, 0.0, 0.0),
            }
        }
        _ => return Hsl::new(0.0, 0.0, 0.0),
    };

    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let delta = cmax - cmin;

    let mut h = if delta == 0.0 {
        0.0
    } else if cmax == r {
        ((g - b) / delta) % 6.0
    } else if cmax == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    h = (h * 60.0).round();
    if h < 0.0 {
        h += 360.0;
    }

    let l = (cmax + cmin) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    Hsl::new(h, (s * 100.0).round(), (l * 100.0).round())
}

/// Reads any config color string as HSL: hex via [`hex_to_hsl`], `hsl()`
/// via [`Hsl::parse_css`], everything else as black.
pub fn color_to_hsl(color: &str) -> Hsl {
    if color.starts_with('#') {
        hex_to_hsl(color)
    } else {
        Hsl::parse_css(color).unwrap_or(Hsl::new(0.0, 0.0, 0.0))
    }
}

/// Shifts a color string by (Δhue, Δsaturation, Δlightness) and re-encodes
/// it as a normalized `hsl()` string.
pub fn shift_color(color: &str, dh: f64, ds: f64, dl: f64) -> String {
    let hsl = color_to_hsl(color);
    Hsl::new(hsl.h + dh, hsl.s + ds, hsl.l + dl).to_css()
}

/// Shifts every stop of a background by the same HSL offsets.
pub fn shift_background(bg: &Background, dh: f64, ds: f64, dl: f64) -> Background {
    match bg {
        Background::Solid(color) => Background::Solid(shift_color(color, dh, ds, dl)),
        Background::Gradient(g) => Background::Gradient(Gradient {
            kind: g.kind,
            color1: shift_color(&g.color1, dh, ds, dl),
            color2: shift_color(&g.color2, dh, ds, dl),
            color3: g.color3.as_deref().map(|c| shift_color(c, dh, ds, dl)),
            angle: g.angle,
        }),
    }
}
