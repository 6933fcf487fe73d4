//! Decoder for the original keyed-object wire format (v1).
//!
//! Early share links compressed a JSON object with single-letter keys
//! (`w`, `h`, `n`, `l`, `g`, `s`, `a`, `v`; shapes use `i`, `t`, `x`, `y`,
//! `z`, `c`, `o`, `u`, `b`, `p`). There is no v1 encoder; the format is
//! decode-only for backward compatibility.

use aurawall_core::config::{
    Background, BlendMode, Gradient, GradientKind, Shape, ShapeKind, WallpaperConfig,
};
use serde_json::{Map, Value};

use crate::compact::{add_hash, decode_animation, decode_background, decode_vignette};

/// Decodes a v1 keyed object. Returns `None` on any missing or mistyped
/// required field.
pub(crate) fn decode_v1(obj: &Map<String, Value>) -> Option<WallpaperConfig> {
    let shapes = obj
        .get("s")?
        .as_array()?
        .iter()
        .enumerate()
        .map(|(i, s)| decode_v1_shape(s, i))
        .collect::<Option<Vec<_>>>()?;

    Some(WallpaperConfig {
        width: obj.get("w")?.as_u64()? as u32,
        height: obj.get("h")?.as_u64()? as u32,
        noise: obj.get("n")?.as_f64()?,
        noise_scale: obj.get("l")?.as_f64()?,
        base_color: decode_v1_background(obj.get("g")?)?,
        shapes,
        animation: Some(decode_animation(obj.get("a"))),
        vignette: Some(decode_vignette(obj.get("v"))),
    })
}

fn decode_v1_shape(v: &Value, index: usize) -> Option<Shape> {
    let s = v.as_object()?;
    Some(Shape {
        id: s
            .get("i")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("s{index}")),
        kind: if s.get("t").and_then(Value::as_str) == Some("c") {
            ShapeKind::Circle
        } else {
            ShapeKind::Blob
        },
        x: s.get("x")?.as_f64()?,
        y: s.get("y")?.as_f64()?,
        size: s.get("z")?.as_f64()?,
        color: add_hash(s.get("c")?.as_str()?),
        opacity: s.get("o")?.as_f64()?,
        blur: s.get("u")?.as_f64()?,
        blend_mode: decode_v1_blend(s.get("b")),
        complexity: s.get("p").and_then(Value::as_u64).map(|c| c as u32),
    })
}

/// v1 stored the blend either as a numeric code or as its css name.
fn decode_v1_blend(v: Option<&Value>) -> BlendMode {
    match v {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|c| BlendMode::from_code(c as u8))
            .unwrap_or(BlendMode::Normal),
        Some(Value::String(name)) => BlendMode::from_name(name).unwrap_or(BlendMode::Normal),
        _ => BlendMode::Normal,
    }
}

/// v1 backgrounds appear as a bare string, a v2-style array, or a keyed
/// object (`t`, `a`, `b`, `g`).
fn decode_v1_background(v: &Value) -> Option<Background> {
    match v {
        Value::String(s) => Some(Background::Solid(add_hash(s))),
        Value::Array(_) => decode_background(v),
        Value::Object(o) => Some(Background::Gradient(Gradient {
            kind: match o.get("t").and_then(Value::as_str) {
                Some("l") => GradientKind::Linear,
                Some("r") => GradientKind::Radial,
                _ => GradientKind::Solid,
            },
            color1: add_hash(o.get("a")?.as_str()?),
            color2: add_hash(o.get("b").and_then(Value::as_str).unwrap_or("000")),
            color3: None,
            angle: o.get("g").and_then(Value::as_f64),
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact;
    use serde_json::json;

    fn v1_token(obj: &Value) -> String {
        lz_str::compress_to_encoded_uri_component(obj.to_string().as_str())
    }

    #[test]
    fn keyed_object_decodes_with_numeric_blend_codes() {
        let obj = json!({
            "w": 1920, "h": 1080, "n": 25, "l": 1.5,
            "g": "0f0c29",
            "s": [
                {"i": "def1", "t": "c", "x": 20, "y": 20, "z": 120,
                 "c": "d8b4fe", "o": 0.6, "u": 100, "b": 1},
                {"t": "b", "x": 50, "y": 50, "z": 80,
                 "c": "abc", "o": 0.5, "u": 40, "b": 2, "p": 6}
            ]
        });
        let cfg = compact::decode(&v1_token(&obj)).unwrap();
        assert_eq!(cfg.width, 1920);
        assert_eq!(cfg.noise_scale, 1.5);
        assert_eq!(cfg.base_color, Background::Solid("#0f0c29".into()));
        assert_eq!(cfg.shapes[0].id, "def1");
        assert_eq!(cfg.shapes[0].kind, ShapeKind::Circle);
        assert_eq!(cfg.shapes[0].blend_mode, BlendMode::Screen);
        // Shape without an id gets one from its index.
        assert_eq!(cfg.shapes[1].id, "s1");
        assert_eq!(cfg.shapes[1].kind, ShapeKind::Blob);
        assert_eq!(cfg.shapes[1].color, "#aabbcc");
        assert_eq!(cfg.shapes[1].complexity, Some(6));
    }

    #[test]
    fn blend_stored_as_name_still_decodes() {
        let obj = json!({
            "w": 100, "h": 100, "n": 0, "l": 1,
            "g": "000",
            "s": [{"t": "c", "x": 0, "y": 0, "z": 50,
                   "c": "fff", "o": 0.5, "u": 0, "b": "soft-light"}]
        });
        let cfg = compact::decode(&v1_token(&obj)).unwrap();
        assert_eq!(cfg.shapes[0].blend_mode, BlendMode::SoftLight);
    }

    #[test]
    fn object_background_with_gradient_keys_decodes() {
        let obj = json!({
            "w": 100, "h": 100, "n": 0, "l": 1,
            "g": {"t": "l", "a": "aabbcc", "b": "112233", "g": 90},
            "s": []
        });
        let cfg = compact::decode(&v1_token(&obj)).unwrap();
        match cfg.base_color {
            Background::Gradient(g) => {
                assert_eq!(g.kind, GradientKind::Linear);
                assert_eq!(g.color1, "#aabbcc");
                assert_eq!(g.color2, "#112233");
                assert_eq!(g.angle, Some(90.0));
            }
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_field_fails_cleanly() {
        let obj = json!({"w": 100, "h": 100, "n": 0, "l": 1, "g": "000"});
        assert!(compact::decode(&v1_token(&obj)).is_none());
    }
}
