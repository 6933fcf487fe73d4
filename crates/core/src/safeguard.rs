//! Visibility safeguard: contrast correction for generated shape stacks.
//!
//! Randomized generation can easily land on "black on black" or "white on
//! white": a darkening blend mode over an already-dark background, or a
//! near-white shape in normal mode over a near-white base. This pass
//! classifies the background lightness into regimes and rewrites blend
//! modes, lightness, saturation, opacity, and size so every shape stays
//! perceptible.
//!
//! The rule set is best-effort, not provably exhaustive: a borderline-gray
//! shape over a background sitting exactly on a regime boundary can still
//! come out low-contrast. That is an accepted limitation.

use crate::color::{color_to_hsl, Hsl};
use crate::config::{Background, BlendMode, Shape};
use crate::prng::RandomSource;

/// Lightness below which the background counts as pitch-black.
const PITCH_BLACK_MAX: f64 = 10.0;
/// Lightness below which the background counts as dark.
const DARK_MAX: f64 = 40.0;
/// Lightness above which the background counts as light.
const LIGHT_MIN: f64 = 60.0;

/// Global opacity ceiling; fully opaque stacks wash out the grain layer.
const OPACITY_CEILING: f64 = 0.9;
/// Opacity floor applied in every regime.
const OPACITY_FLOOR: f64 = 0.4;
/// Size floor (percent) applied in every regime.
const SIZE_FLOOR: f64 = 30.0;

/// Rewrites `shapes` so they stay visible against `base`.
///
/// The reference color is the background's primary stop. Shape order, ids,
/// kinds, positions, blur, and complexity are preserved; colors are
/// re-encoded as normalized `hsl()` strings. Output opacity is in
/// [0.4, 0.9] and size is at least 30.
pub fn ensure_visibility(
    shapes: &[Shape],
    base: &Background,
    rng: &mut dyn RandomSource,
) -> Vec<Shape> {
    let mut base_hsl = color_to_hsl(base.primary());
    // Never classify against a truly pure black/white reference.
    base_hsl.l = base_hsl.l.clamp(5.0, 95.0);

    let is_pitch_black = base_hsl.l < PITCH_BLACK_MAX;
    let is_dark = base_hsl.l < DARK_MAX;
    let is_light = base_hsl.l > LIGHT_MIN;

    shapes
        .iter()
        .map(|s| {
            // Whiteout guard: cap opacity, and knock back high-opacity
            // screen shapes before any blend rewriting happens.
            let mut opacity = s.opacity.min(OPACITY_CEILING);
            if s.blend_mode == BlendMode::Screen && opacity > 0.6 {
                opacity = 0.5;
            }
            opacity = opacity.max(OPACITY_FLOOR);

            let mut hsl = color_to_hsl(&s.color);
            let mut blend = s.blend_mode;

            if is_pitch_black {
                rewrite_for_pitch_black(&mut blend, &mut hsl, rng);
            } else if is_dark {
                rewrite_for_dark(&mut blend, &mut hsl, rng);
            } else if is_light {
                rewrite_for_light(&mut blend, &mut hsl, base_hsl.l, rng);
            }

            Shape {
                color: hsl.to_css(),
                opacity,
                size: s.size.max(SIZE_FLOOR),
                blend_mode: blend,
                ..s.clone()
            }
        })
        .collect()
}

/// Pitch-black rules: only light-emitting or inverting modes survive, and
/// the shape itself must be bright and saturated enough to register.
fn rewrite_for_pitch_black(blend: &mut BlendMode, hsl: &mut Hsl, rng: &mut dyn RandomSource) {
    const ALLOWED: [BlendMode; 6] = [
        BlendMode::Screen,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::Normal,
        BlendMode::Difference,
        BlendMode::Exclusion,
    ];
    if !ALLOWED.contains(blend) {
        *blend = if rng.next_f64() > 0.4 {
            BlendMode::Screen
        } else {
            BlendMode::Difference
        };
    }
    // Even screen mode cannot rescue a dark color on black.
    if hsl.l < 40.0 {
        hsl.l = 40.0 + rng.next_f64() * 50.0;
    }
    if hsl.s < 50.0 {
        hsl.s = 50.0 + rng.next_f64() * 50.0;
    }
}

/// Dark (but not pitch-black) rules: no darkening modes, and overlay-family
/// modes need a light shape to bite on.
fn rewrite_for_dark(blend: &mut BlendMode, hsl: &mut Hsl, rng: &mut dyn RandomSource) {
    if matches!(
        blend,
        BlendMode::Multiply | BlendMode::Darken | BlendMode::ColorBurn
    ) {
        *blend = if rng.next_f64() > 0.5 {
            BlendMode::Overlay
        } else {
            BlendMode::Screen
        };
    }
    // Overlay darkens the darks; a dark shape on a dark base vanishes.
    if matches!(blend, BlendMode::Overlay | BlendMode::SoftLight) && hsl.l < 60.0 {
        hsl.l = 60.0 + rng.next_f64() * 30.0;
    }
    if hsl.l < 30.0 {
        hsl.l = 40.0 + rng.next_f64() * 40.0;
    }
}

/// Light rules: no lightening modes, shapes must read darker than the base.
fn rewrite_for_light(blend: &mut BlendMode, hsl: &mut Hsl, base_l: f64, rng: &mut dyn RandomSource) {
    if matches!(
        blend,
        BlendMode::Screen | BlendMode::Lighten | BlendMode::ColorDodge
    ) {
        *blend = if rng.next_f64() > 0.5 {
            BlendMode::Multiply
        } else {
            BlendMode::Difference
        };
    }
    if hsl.l > 60.0 {
        hsl.l = rng.next_f64() * 50.0;
    }
    // Normal mode needs real lightness separation from the base.
    if *blend == BlendMode::Normal && hsl.l > base_l - 20.0 {
        hsl.l = (base_l - 40.0).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeKind;
    use crate::prng::Xorshift64;

    fn shape(color: &str, opacity: f64, blend_mode: BlendMode) -> Shape {
        Shape {
            id: "t0".into(),
            kind: ShapeKind::Circle,
            x: 50.0,
            y: 50.0,
            size: 80.0,
            color: color.into(),
            opacity,
            blur: 40.0,
            blend_mode,
            complexity: None,
        }
    }

    fn all_mode_shapes() -> Vec<Shape> {
        BlendMode::ALL
            .iter()
            .enumerate()
            .map(|(i, &m)| {
                let mut s = shape("hsl(240, 30%, 20%)", 0.7, m);
                s.id = format!("t{i}");
                s
            })
            .collect()
    }

    // -- Pitch-black regime --

    #[test]
    fn pitch_black_forbids_darkening_and_overlay_modes() {
        for seed in 0..50u64 {
            let mut rng = Xorshift64::new(seed + 1);
            let out = ensure_visibility(
                &all_mode_shapes(),
                &Background::solid("#000000"),
                &mut rng,
            );
            for s in &out {
                assert!(
                    !matches!(
                        s.blend_mode,
                        BlendMode::Multiply
                            | BlendMode::Overlay
                            | BlendMode::SoftLight
                            | BlendMode::Darken
                            | BlendMode::ColorBurn
                            | BlendMode::HardLight
                    ),
                    "forbidden mode {:?} survived on pitch black",
                    s.blend_mode
                );
            }
        }
    }

    #[test]
    fn pitch_black_boosts_lightness_and_saturation() {
        let mut rng = Xorshift64::new(7);
        let input = vec![shape("hsl(200, 10%, 5%)", 0.7, BlendMode::Screen)];
        let out = ensure_visibility(&input, &Background::solid("#020202"), &mut rng);
        let hsl = color_to_hsl(&out[0].color);
        assert!(hsl.l >= 40.0 && hsl.l <= 90.0, "lightness {} not boosted", hsl.l);
        assert!(hsl.s >= 50.0, "saturation {} not boosted", hsl.s);
    }

    // -- Dark regime --

    #[test]
    fn dark_replaces_darkening_modes_with_overlay_or_screen() {
        for seed in 0..50u64 {
            let mut rng = Xorshift64::new(seed + 1);
            let input = vec![
                shape("hsl(30, 80%, 70%)", 0.7, BlendMode::Multiply),
                shape("hsl(30, 80%, 70%)", 0.7, BlendMode::Darken),
                shape("hsl(30, 80%, 70%)", 0.7, BlendMode::ColorBurn),
            ];
            // #1d2233-ish: lightness around 15, dark but not pitch black.
            let out = ensure_visibility(&input, &Background::solid("hsl(220, 30%, 15%)"), &mut rng);
            for s in &out {
                assert!(
                    matches!(s.blend_mode, BlendMode::Overlay | BlendMode::Screen),
                    "unexpected replacement {:?}",
                    s.blend_mode
                );
            }
        }
    }

    #[test]
    fn dark_overlay_with_dark_shape_gets_lightness_bump() {
        let mut rng = Xorshift64::new(3);
        let input = vec![shape("hsl(220, 50%, 20%)", 0.7, BlendMode::Overlay)];
        let out = ensure_visibility(&input, &Background::solid("hsl(220, 30%, 15%)"), &mut rng);
        let hsl = color_to_hsl(&out[0].color);
        assert!(hsl.l >= 60.0, "overlay shape lightness {} still dark", hsl.l);
    }

    #[test]
    fn dark_floors_general_lightness() {
        for seed in 0..20u64 {
            let mut rng = Xorshift64::new(seed + 1);
            let input = vec![shape("hsl(220, 50%, 10%)", 0.7, BlendMode::Normal)];
            let out =
                ensure_visibility(&input, &Background::solid("hsl(220, 30%, 15%)"), &mut rng);
            let hsl = color_to_hsl(&out[0].color);
            assert!(hsl.l >= 40.0, "lightness {} below dark-regime floor", hsl.l);
        }
    }

    // -- Light regime --

    #[test]
    fn light_forbids_lightening_modes_and_bright_shapes() {
        for seed in 0..50u64 {
            let mut rng = Xorshift64::new(seed + 1);
            let out = ensure_visibility(
                &all_mode_shapes(),
                &Background::solid("#ffffff"),
                &mut rng,
            );
            for s in &out {
                assert!(
                    !matches!(
                        s.blend_mode,
                        BlendMode::Screen | BlendMode::Lighten | BlendMode::ColorDodge
                    ),
                    "lightening mode {:?} survived on light base",
                    s.blend_mode
                );
                let hsl = color_to_hsl(&s.color);
                assert!(hsl.l <= 60.0, "shape lightness {} too bright", hsl.l);
            }
        }
    }

    #[test]
    fn light_normal_mode_pushes_lightness_well_below_base() {
        let mut rng = Xorshift64::new(9);
        // Base lightness 95 (white clamps down); a shape at 85 is too close.
        let input = vec![shape("hsl(0, 20%, 85%)", 0.7, BlendMode::Normal)];
        let out = ensure_visibility(&input, &Background::solid("#ffffff"), &mut rng);
        let hsl = color_to_hsl(&out[0].color);
        assert!(
            hsl.l <= 95.0 - 40.0,
            "normal-mode shape lightness {} too close to base",
            hsl.l
        );
    }

    // -- Global bounds --

    #[test]
    fn opacity_and_size_bounds_hold_in_every_regime() {
        for base in ["#000000", "hsl(220, 30%, 15%)", "hsl(0, 0%, 50%)", "#ffffff"] {
            for seed in 0..20u64 {
                let mut rng = Xorshift64::new(seed + 1);
                let mut input = all_mode_shapes();
                input[0].opacity = 0.05;
                input[1].opacity = 1.0;
                input[2].size = 4.0;
                let out = ensure_visibility(&input, &Background::solid(base), &mut rng);
                for s in &out {
                    assert!(
                        (0.4..=0.9).contains(&s.opacity),
                        "opacity {} out of bounds on {base}",
                        s.opacity
                    );
                    assert!(s.size >= 30.0, "size {} below floor on {base}", s.size);
                }
            }
        }
    }

    #[test]
    fn screen_shapes_with_high_opacity_drop_to_half() {
        let mut rng = Xorshift64::new(2);
        let input = vec![shape("hsl(200, 80%, 70%)", 0.85, BlendMode::Screen)];
        let out = ensure_visibility(&input, &Background::solid("hsl(0, 0%, 50%)"), &mut rng);
        assert_eq!(out[0].opacity, 0.5);
    }

    // -- Mid-lightness no-op zone --

    #[test]
    fn mid_zone_leaves_blend_and_color_untouched() {
        let mut rng = Xorshift64::new(4);
        let input = vec![shape("hsl(100, 40%, 35%)", 0.7, BlendMode::Multiply)];
        let out = ensure_visibility(&input, &Background::solid("hsl(0, 0%, 50%)"), &mut rng);
        assert_eq!(out[0].blend_mode, BlendMode::Multiply);
        assert_eq!(color_to_hsl(&out[0].color), color_to_hsl(&input[0].color));
    }

    // -- Structure preservation --

    #[test]
    fn order_ids_and_geometry_survive() {
        let mut rng = Xorshift64::new(5);
        let mut input = all_mode_shapes();
        input[3].kind = ShapeKind::Blob;
        input[3].complexity = Some(6);
        let out = ensure_visibility(&input, &Background::solid("#000000"), &mut rng);
        assert_eq!(out.len(), input.len());
        for (a, b) in input.iter().zip(out.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
            assert_eq!(a.blur, b.blur);
            assert_eq!(a.complexity, b.complexity);
        }
    }

    #[test]
    fn gradient_background_uses_primary_stop() {
        use crate::config::{Gradient, GradientKind};
        let mut rng = Xorshift64::new(6);
        let bg = Background::Gradient(Gradient {
            kind: GradientKind::Linear,
            color1: "#000000".into(),
            color2: "#ffffff".into(),
            color3: None,
            angle: None,
        });
        // Primary stop is black, so pitch-black rules apply even though the
        // second stop is white.
        let input = vec![shape("hsl(0, 10%, 10%)", 0.7, BlendMode::Multiply)];
        let out = ensure_visibility(&input, &bg, &mut rng);
        assert!(matches!(
            out[0].blend_mode,
            BlendMode::Screen | BlendMode::Difference
        ));
    }
}
