//! Compact positional wire format (v2).
//!
//! The config is flattened into a JSON array, stripped of ids and default
//! values, then LZ-string compressed into a URI-safe token. The layout is
//! frozen; already-issued share links must keep decoding byte-for-byte:
//!
//! `[width, height, noise, noiseScale, background, shapes, animation?, vignette?]`
//!
//! Shapes are `[kind, x, y, size, color, opacity*100, blur, blend, complexity?]`.
//! Shape ids are not encoded; decode regenerates them as `s0`, `s1`, ….

use aurawall_core::config::{
    AnimationSettings, Background, BlendMode, Gradient, GradientKind, Shape, ShapeKind,
    VignetteSettings, WallpaperConfig, DEFAULT_GRADIENT_ANGLE,
};
use serde_json::Value;

use crate::legacy;

/// Compresses a config into a URI-safe token.
pub fn encode(config: &WallpaperConfig) -> String {
    lz_str::compress_to_encoded_uri_component(to_compact(config).to_string().as_str())
}

/// Decompresses and decodes a token produced by [`encode`] or by the older
/// keyed object format. Returns `None` on any malformed input.
pub fn decode(compressed: &str) -> Option<WallpaperConfig> {
    let units = lz_str::decompress_from_encoded_uri_component(compressed)?;
    let json = String::from_utf16(&units).ok()?;
    let value: Value = serde_json::from_str(&json).ok()?;
    match value {
        Value::Array(arr) => from_compact(&arr),
        Value::Object(map) => legacy::decode_v1(&map),
        _ => None,
    }
}

/// Builds the positional array for a config.
pub(crate) fn to_compact(config: &WallpaperConfig) -> Value {
    let mut arr = vec![
        Value::from(config.width),
        Value::from(config.height),
        num(config.noise.round()),
        num((config.noise_scale * 10.0).round() / 10.0),
        encode_background(&config.base_color),
        Value::Array(config.shapes.iter().map(encode_shape).collect()),
    ];

    let anim = encode_animation(&config.animation);
    let vig = encode_vignette(&config.vignette);
    if anim.is_some() || vig.is_some() {
        // The animation slot is positional: when only the vignette is
        // non-default it still occupies index 6 as an explicit null.
        arr.push(anim.unwrap_or(Value::Null));
        if let Some(v) = vig {
            arr.push(v);
        }
    }
    Value::Array(arr)
}

/// Decodes the positional array back into a config.
pub(crate) fn from_compact(arr: &[Value]) -> Option<WallpaperConfig> {
    let shapes = arr
        .get(5)?
        .as_array()?
        .iter()
        .enumerate()
        .map(|(i, s)| decode_shape(s, i))
        .collect::<Option<Vec<_>>>()?;

    Some(WallpaperConfig {
        width: arr.first()?.as_u64()? as u32,
        height: arr.get(1)?.as_u64()? as u32,
        noise: arr.get(2)?.as_f64()?,
        noise_scale: arr.get(3)?.as_f64()?,
        base_color: decode_background(arr.get(4)?)?,
        shapes,
        animation: Some(decode_animation(arr.get(6))),
        vignette: Some(decode_vignette(arr.get(7))),
    })
}

/// Emits integral floats as JSON integers, matching the original wire text.
fn num(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < 9.0e15 {
        Value::from(v as i64)
    } else {
        Value::from(v)
    }
}

/// Strips the leading `#` from hex colors and shortens `aabbcc` to `abc`.
/// `hsl(...)` strings pass through untouched.
pub(crate) fn strip_hash(color: &str) -> String {
    if color.starts_with("hsl(") || color.starts_with("hsla(") {
        return color.to_owned();
    }
    let Some(h) = color.strip_prefix('#') else {
        return color.to_owned();
    };
    let h = h.to_ascii_lowercase();
    let b = h.as_bytes();
    if b.len() == 6 && b[0] == b[1] && b[2] == b[3] && b[4] == b[5] {
        return String::from_utf8_lossy(&[b[0], b[2], b[4]]).into_owned();
    }
    h
}

/// Inverse of [`strip_hash`]: re-expands short hex and restores the `#`.
/// Anything unrecognized passes through unchanged.
pub(crate) fn add_hash(color: &str) -> String {
    if color.starts_with("hsl(") || color.starts_with("hsla(") || color.starts_with('#') {
        return color.to_owned();
    }
    let b = color.as_bytes();
    if b.len() == 3 && b.iter().all(u8::is_ascii_hexdigit) {
        let c: Vec<u8> = vec![b'#', b[0], b[0], b[1], b[1], b[2], b[2]];
        return String::from_utf8_lossy(&c).into_owned();
    }
    if b.len() == 6 && b.iter().all(u8::is_ascii_hexdigit) {
        return format!("#{color}");
    }
    color.to_owned()
}

fn encode_shape(s: &Shape) -> Value {
    let mut arr = vec![
        Value::from(match s.kind {
            ShapeKind::Circle => 0,
            ShapeKind::Blob => 1,
        }),
        num(s.x.round()),
        num(s.y.round()),
        num(s.size.round()),
        Value::from(strip_hash(&s.color)),
        num((s.opacity * 100.0).round()),
        num(s.blur.round()),
        Value::from(s.blend_mode.code()),
    ];
    if let Some(c) = s.complexity {
        arr.push(Value::from(c));
    }
    Value::Array(arr)
}

fn decode_shape(v: &Value, index: usize) -> Option<Shape> {
    let arr = v.as_array()?;
    Some(Shape {
        id: format!("s{index}"),
        kind: if arr.first()?.as_i64()? == 0 {
            ShapeKind::Circle
        } else {
            ShapeKind::Blob
        },
        x: arr.get(1)?.as_f64()?,
        y: arr.get(2)?.as_f64()?,
        size: arr.get(3)?.as_f64()?,
        color: add_hash(arr.get(4)?.as_str()?),
        opacity: arr.get(5)?.as_f64()? / 100.0,
        blur: arr.get(6)?.as_f64()?,
        blend_mode: arr
            .get(7)
            .and_then(Value::as_u64)
            .and_then(|c| BlendMode::from_code(c as u8))
            .unwrap_or(BlendMode::Normal),
        complexity: arr.get(8).and_then(Value::as_u64).map(|c| c as u32),
    })
}

/// Solid backgrounds collapse to a bare color string; gradients become
/// `[1|2, color1, color2, angle?]` with the stock angle omitted.
fn encode_background(bg: &Background) -> Value {
    match bg {
        Background::Solid(c) => Value::from(strip_hash(c)),
        Background::Gradient(g) => match g.kind {
            GradientKind::Solid => Value::from(strip_hash(&g.color1)),
            GradientKind::Linear | GradientKind::Radial => {
                let mut arr = vec![
                    Value::from(if g.kind == GradientKind::Linear { 1 } else { 2 }),
                    Value::from(strip_hash(&g.color1)),
                    Value::from(strip_hash(&g.color2)),
                ];
                if let Some(angle) = g.angle {
                    if angle != DEFAULT_GRADIENT_ANGLE {
                        arr.push(num(angle));
                    }
                }
                Value::Array(arr)
            }
        },
    }
}

pub(crate) fn decode_background(v: &Value) -> Option<Background> {
    if let Some(s) = v.as_str() {
        return Some(Background::Solid(add_hash(s)));
    }
    let arr = v.as_array()?;
    Some(Background::Gradient(Gradient {
        kind: if arr.first()?.as_i64()? == 1 {
            GradientKind::Linear
        } else {
            GradientKind::Radial
        },
        color1: add_hash(arr.get(1)?.as_str()?),
        color2: add_hash(arr.get(2).and_then(Value::as_str).unwrap_or("000")),
        color3: None,
        angle: arr.get(3).and_then(Value::as_f64),
    }))
}

/// Animation is omitted entirely when disabled with stock values.
fn encode_animation(anim: &Option<AnimationSettings>) -> Option<Value> {
    let a = anim.as_ref()?;
    let d = AnimationSettings::default();
    if !a.enabled
        && a.speed == d.speed
        && a.flow == d.flow
        && a.pulse == d.pulse
        && a.rotate == d.rotate
        && a.noise_anim == d.noise_anim
        && !a.color_cycle
    {
        return None;
    }
    Some(Value::Array(vec![
        Value::from(u8::from(a.enabled)),
        num(a.speed),
        num(a.flow),
        num(a.pulse),
        num(a.rotate),
        num(a.noise_anim),
        Value::from(u8::from(a.color_cycle)),
        num(a.color_cycle_speed),
    ]))
}

pub(crate) fn decode_animation(v: Option<&Value>) -> AnimationSettings {
    let d = AnimationSettings::default();
    let Some(arr) = v.and_then(Value::as_array) else {
        return d;
    };
    AnimationSettings {
        enabled: arr.first().and_then(Value::as_i64) == Some(1),
        speed: arr.get(1).and_then(Value::as_f64).unwrap_or(d.speed),
        flow: arr.get(2).and_then(Value::as_f64).unwrap_or(d.flow),
        pulse: arr.get(3).and_then(Value::as_f64).unwrap_or(d.pulse),
        rotate: arr.get(4).and_then(Value::as_f64).unwrap_or(d.rotate),
        noise_anim: arr.get(5).and_then(Value::as_f64).unwrap_or(d.noise_anim),
        color_cycle: arr.get(6).and_then(Value::as_i64) == Some(1),
        color_cycle_speed: arr
            .get(7)
            .and_then(Value::as_f64)
            .unwrap_or(d.color_cycle_speed),
    }
}

/// Vignette is omitted when disabled with stock color, intensity, and size.
fn encode_vignette(vig: &Option<VignetteSettings>) -> Option<Value> {
    let v = vig.as_ref()?;
    let d = VignetteSettings::default();
    if !v.enabled && v.color == d.color && v.intensity == d.intensity && v.size == d.size {
        return None;
    }
    Some(Value::Array(vec![
        Value::from(u8::from(v.enabled)),
        Value::from(strip_hash(&v.color)),
        num((v.intensity * 100.0).round()),
        num(v.size),
        num(v.offset_x),
        num(v.offset_y),
        Value::from(u8::from(v.inverted)),
        num(v.shape_x),
        num(v.shape_y),
    ]))
}

pub(crate) fn decode_vignette(v: Option<&Value>) -> VignetteSettings {
    let d = VignetteSettings::default();
    let Some(arr) = v.and_then(Value::as_array) else {
        return d;
    };
    VignetteSettings {
        enabled: arr.first().and_then(Value::as_i64) == Some(1),
        color: add_hash(arr.get(1).and_then(Value::as_str).unwrap_or("000")),
        intensity: arr.get(2).and_then(Value::as_f64).unwrap_or(60.0) / 100.0,
        size: arr.get(3).and_then(Value::as_f64).unwrap_or(d.size),
        offset_x: arr.get(4).and_then(Value::as_f64).unwrap_or(d.offset_x),
        offset_y: arr.get(5).and_then(Value::as_f64).unwrap_or(d.offset_y),
        inverted: arr.get(6).and_then(Value::as_i64) == Some(1),
        shape_x: arr.get(7).and_then(Value::as_f64).unwrap_or(d.shape_x),
        shape_y: arr.get(8).and_then(Value::as_f64).unwrap_or(d.shape_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(id: &str) -> Shape {
        Shape {
            id: id.into(),
            kind: ShapeKind::Blob,
            x: 20.4,
            y: 79.6,
            size: 120.0,
            color: "#d8b4fe".into(),
            opacity: 0.6,
            blur: 100.0,
            blend_mode: BlendMode::Multiply,
            complexity: Some(5),
        }
    }

    // -- Hex shortening --

    #[test]
    fn strip_hash_shortens_doubled_hex() {
        assert_eq!(strip_hash("#aabbcc"), "abc");
        assert_eq!(strip_hash("#000000"), "000");
        assert_eq!(strip_hash("#d8b4fe"), "d8b4fe");
        assert_eq!(strip_hash("hsl(240, 30%, 10%)"), "hsl(240, 30%, 10%)");
        assert_eq!(strip_hash("#AABBCC"), "abc");
    }

    #[test]
    fn add_hash_expands_short_hex() {
        assert_eq!(add_hash("abc"), "#aabbcc");
        assert_eq!(add_hash("d8b4fe"), "#d8b4fe");
        assert_eq!(add_hash("hsl(240, 30%, 10%)"), "hsl(240, 30%, 10%)");
        assert_eq!(add_hash("#aabbcc"), "#aabbcc");
        assert_eq!(add_hash("not-a-color"), "not-a-color");
    }

    #[test]
    fn hex_round_trips_through_shortening() {
        for color in ["#aabbcc", "#d8b4fe", "#000000", "#ffffff", "#0f0c29"] {
            assert_eq!(add_hash(&strip_hash(color)), color);
        }
    }

    // -- Shape encoding --

    #[test]
    fn shape_array_rounds_and_scales_fields() {
        let v = encode_shape(&shape("x"));
        let arr = v.as_array().unwrap();
        assert_eq!(arr[0], 1);
        assert_eq!(arr[1], 20);
        assert_eq!(arr[2], 80);
        assert_eq!(arr[3], 120);
        assert_eq!(arr[4], "d8b4fe");
        assert_eq!(arr[5], 60);
        assert_eq!(arr[6], 100);
        assert_eq!(arr[7], 3);
        assert_eq!(arr[8], 5);
    }

    #[test]
    fn circle_without_complexity_has_eight_fields() {
        let mut s = shape("x");
        s.kind = ShapeKind::Circle;
        s.complexity = None;
        let v = encode_shape(&s);
        assert_eq!(v.as_array().unwrap().len(), 8);
        assert_eq!(v.as_array().unwrap()[0], 0);
    }

    #[test]
    fn decode_regenerates_ids_from_index() {
        let mut cfg = WallpaperConfig::default();
        cfg.shapes = vec![shape("first"), shape("second"), shape("third")];
        let decoded = decode(&encode(&cfg)).unwrap();
        let ids: Vec<&str> = decoded.shapes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["s0", "s1", "s2"]);
    }

    #[test]
    fn unknown_blend_code_falls_back_to_normal() {
        let v = serde_json::json!([0, 10, 10, 50, "abc", 70, 5, 99]);
        let s = decode_shape(&v, 0).unwrap();
        assert_eq!(s.blend_mode, BlendMode::Normal);
    }

    // -- Optional section omission --

    #[test]
    fn quiescent_config_omits_animation_and_vignette() {
        let cfg = WallpaperConfig::default();
        let top = to_compact(&cfg);
        assert_eq!(top.as_array().unwrap().len(), 6);
    }

    #[test]
    fn enabled_animation_occupies_index_six() {
        let mut cfg = WallpaperConfig::default();
        let mut anim = AnimationSettings::default();
        anim.enabled = true;
        anim.flow = 8.0;
        cfg.animation = Some(anim);
        let top = to_compact(&cfg);
        let arr = top.as_array().unwrap();
        assert_eq!(arr.len(), 7);
        assert_eq!(arr[6].as_array().unwrap()[0], 1);
    }

    #[test]
    fn vignette_alone_leaves_null_animation_placeholder() {
        let mut cfg = WallpaperConfig::default();
        let mut vig = VignetteSettings::default();
        vig.enabled = true;
        cfg.vignette = Some(vig);
        let top = to_compact(&cfg);
        let arr = top.as_array().unwrap();
        assert_eq!(arr.len(), 8);
        assert!(arr[6].is_null());
        assert!(arr[7].is_array());
    }

    // -- Background --

    #[test]
    fn gradient_background_omits_stock_angle() {
        let g = Background::Gradient(Gradient {
            kind: GradientKind::Linear,
            color1: "#aabbcc".into(),
            color2: "#000000".into(),
            color3: None,
            angle: Some(DEFAULT_GRADIENT_ANGLE),
        });
        let v = encode_background(&g);
        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0], 1);
        assert_eq!(arr[1], "abc");
    }

    #[test]
    fn gradient_background_keeps_custom_angle() {
        let g = Background::Gradient(Gradient {
            kind: GradientKind::Radial,
            color1: "#aabbcc".into(),
            color2: "#112233".into(),
            color3: None,
            angle: Some(45.0),
        });
        let decoded = decode_background(&encode_background(&g)).unwrap();
        match decoded {
            Background::Gradient(g) => {
                assert_eq!(g.kind, GradientKind::Radial);
                assert_eq!(g.color1, "#aabbcc");
                assert_eq!(g.color2, "#112233");
                assert_eq!(g.angle, Some(45.0));
            }
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    // -- Full round trips --

    #[test]
    fn stock_config_round_trips() {
        let cfg = WallpaperConfig::default();
        let decoded = decode(&encode(&cfg)).unwrap();
        assert_eq!(decoded.width, cfg.width);
        assert_eq!(decoded.height, cfg.height);
        assert_eq!(decoded.noise, cfg.noise);
        assert_eq!(decoded.noise_scale, cfg.noise_scale);
        assert_eq!(decoded.base_color, cfg.base_color);
        assert_eq!(decoded.shapes.len(), cfg.shapes.len());
        // Optional sections come back materialized at their defaults.
        assert_eq!(decoded.animation, Some(AnimationSettings::default()));
        assert_eq!(decoded.vignette, Some(VignetteSettings::default()));
    }

    #[test]
    fn rich_config_round_trips_with_integer_precision() {
        let mut cfg = WallpaperConfig::default();
        cfg.width = 2560;
        cfg.height = 1440;
        cfg.noise = 42.0;
        cfg.noise_scale = 2.3;
        cfg.base_color = Background::Solid("hsl(220, 30%, 8%)".into());
        cfg.shapes = vec![shape("a"), shape("b")];
        let mut anim = AnimationSettings::default();
        anim.enabled = true;
        anim.color_cycle = true;
        cfg.animation = Some(anim.clone());
        let mut vig = VignetteSettings::default();
        vig.enabled = true;
        vig.intensity = 0.45;
        cfg.vignette = Some(vig.clone());

        let decoded = decode(&encode(&cfg)).unwrap();
        assert_eq!(decoded.width, 2560);
        assert_eq!(decoded.noise_scale, 2.3);
        assert_eq!(decoded.base_color, cfg.base_color);
        assert_eq!(decoded.animation, Some(anim));
        assert_eq!(decoded.vignette, Some(vig));
        for (orig, dec) in cfg.shapes.iter().zip(&decoded.shapes) {
            assert_eq!(dec.x, orig.x.round());
            assert_eq!(dec.opacity, (orig.opacity * 100.0).round() / 100.0);
            assert_eq!(dec.blend_mode, orig.blend_mode);
            assert_eq!(dec.complexity, orig.complexity);
        }
    }

    #[test]
    fn empty_and_twelve_shape_lists_round_trip_in_order() {
        let mut cfg = WallpaperConfig::default();
        cfg.shapes = Vec::new();
        let decoded = decode(&encode(&cfg)).unwrap();
        assert!(decoded.shapes.is_empty());

        cfg.shapes = (0..12)
            .map(|i| {
                let mut s = shape(&format!("layer-{i}"));
                s.size = 40.0 + f64::from(i);
                s.blend_mode = BlendMode::from_code(i as u8).unwrap();
                s
            })
            .collect();
        let decoded = decode(&encode(&cfg)).unwrap();
        assert_eq!(decoded.shapes.len(), 12);
        for (i, d) in decoded.shapes.iter().enumerate() {
            assert_eq!(d.id, format!("s{i}"));
            assert_eq!(d.size, 40.0 + i as f64);
            assert_eq!(d.blend_mode, BlendMode::from_code(i as u8).unwrap());
        }
    }

    #[test]
    fn garbage_tokens_decode_to_none() {
        assert!(decode("").is_none());
        assert!(decode("!!!not-lz!!!").is_none());
        // Valid compression of something that is not a config.
        let token = lz_str::compress_to_encoded_uri_component("\"just a string\"");
        assert!(decode(&token).is_none());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Doubled hex (shortening-eligible), plain hex, and `hsl()` colors.
        fn arb_color() -> impl Strategy<Value = String> {
            prop_oneof![
                (0u8..16, 0u8..16, 0u8..16)
                    .prop_map(|(r, g, b)| format!("#{r:x}{r:x}{g:x}{g:x}{b:x}{b:x}")),
                (0u32..0x0100_0000).prop_map(|rgb| format!("#{rgb:06x}")),
                (0u32..360, 0u32..=100, 0u32..=100)
                    .prop_map(|(h, s, l)| format!("hsl({h}, {s}%, {l}%)")),
            ]
        }

        fn arb_shape() -> impl Strategy<Value = Shape> {
            (
                0.0_f64..100.0,
                0.0_f64..100.0,
                30.0_f64..150.0,
                0.0_f64..=1.0,
                0.0_f64..150.0,
                0u8..12,
                proptest::option::of(3u32..10),
                proptest::bool::ANY,
                arb_color(),
            )
                .prop_map(
                    |(x, y, size, opacity, blur, blend, complexity, blob, color)| Shape {
                        id: "p".into(),
                        kind: if blob { ShapeKind::Blob } else { ShapeKind::Circle },
                        x,
                        y,
                        size,
                        color,
                        opacity,
                        blur,
                        blend_mode: BlendMode::from_code(blend).unwrap(),
                        complexity,
                    },
                )
        }

        proptest! {
            #[test]
            fn any_shape_survives_a_round_trip_modulo_rounding(s in arb_shape()) {
                let mut cfg = WallpaperConfig::default();
                cfg.shapes = vec![s.clone()];
                let decoded = decode(&encode(&cfg)).unwrap();
                let d = &decoded.shapes[0];
                prop_assert_eq!(d.kind, s.kind);
                prop_assert_eq!(d.x, s.x.round());
                prop_assert_eq!(d.y, s.y.round());
                prop_assert_eq!(d.size, s.size.round());
                prop_assert_eq!(d.blur, s.blur.round());
                prop_assert_eq!(d.blend_mode, s.blend_mode);
                prop_assert_eq!(d.complexity, s.complexity);
                prop_assert_eq!(&d.color, &s.color);
                prop_assert!((d.opacity - s.opacity).abs() <= 0.005);
            }

            #[test]
            fn shape_lists_up_to_twelve_survive_a_round_trip(
                shapes in proptest::collection::vec(arb_shape(), 0..=12),
            ) {
                let mut cfg = WallpaperConfig::default();
                cfg.shapes = shapes.clone();
                let decoded = decode(&encode(&cfg)).unwrap();
                prop_assert_eq!(decoded.shapes.len(), shapes.len());
                for (i, (d, s)) in decoded.shapes.iter().zip(&shapes).enumerate() {
                    prop_assert_eq!(d.id.clone(), format!("s{i}"));
                    prop_assert_eq!(d.kind, s.kind);
                    prop_assert_eq!(d.size, s.size.round());
                    prop_assert_eq!(d.blend_mode, s.blend_mode);
                    prop_assert_eq!(&d.color, &s.color);
                }
            }

            #[test]
            fn encoded_tokens_are_uri_safe(noise in 0.0_f64..100.0, w in 1u32..4000) {
                let mut cfg = WallpaperConfig::default();
                cfg.noise = noise;
                cfg.width = w;
                let token = encode(&cfg);
                prop_assert!(token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "+-$".contains(c)));
            }
        }
    }
}
