//! Wallpaper configuration data model.
//!
//! A [`WallpaperConfig`] is everything the external renderer needs: canvas
//! size, grain settings, a background, and an ordered shape stack (index 0
//! is drawn first, so list order is z-order). Serde renames keep the JSON
//! schema byte-compatible with previously issued share links, which use
//! camelCase keys and `"type"` discriminators.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gradient angle that the compact codec treats as implicit.
pub const DEFAULT_GRADIENT_ANGLE: f64 = 135.0;

/// Blend mode applied when compositing a shape over the stack below it.
///
/// A closed 12-value set; the renderer consumes the kebab-case names
/// opaquely and the compact codec uses the declaration order as wire codes
/// 0–11. Do not reorder variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Screen,
    Overlay,
    Multiply,
    ColorDodge,
    SoftLight,
    Difference,
    Lighten,
    Darken,
    ColorBurn,
    Exclusion,
    HardLight,
}

impl BlendMode {
    /// All blend modes in wire-code order.
    pub const ALL: [BlendMode; 12] = [
        BlendMode::Normal,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Multiply,
        BlendMode::ColorDodge,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Lighten,
        BlendMode::Darken,
        BlendMode::ColorBurn,
        BlendMode::Exclusion,
        BlendMode::HardLight,
    ];

    /// The stable numeric wire code (0–11) used by the compact codec.
    pub fn code(self) -> u8 {
        Self::ALL.iter().position(|&m| m == self).unwrap_or(0) as u8
    }

    /// Looks up a blend mode by wire code.
    pub fn from_code(code: u8) -> Option<BlendMode> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// The kebab-case name the renderer consumes.
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Multiply => "multiply",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Lighten => "lighten",
            BlendMode::Darken => "darken",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::Exclusion => "exclusion",
            BlendMode::HardLight => "hard-light",
        }
    }

    /// Looks up a blend mode by its kebab-case name.
    pub fn from_name(name: &str) -> Option<BlendMode> {
        Self::ALL.iter().copied().find(|m| m.as_str() == name)
    }
}

/// The kind of geometry a shape renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Blob,
}

/// A single layer in the wallpaper stack.
///
/// Coordinates are percentages of the canvas and may overflow the edges
/// (roughly -50 to 150). `size` is a percentage relative to the canvas
/// width. `complexity` is only meaningful for blobs: it is the vertex count
/// of the seeded spline, and the shape `id` doubles as the geometry seed so
/// re-renders of the same shape never redraw differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: String,
    pub opacity: f64,
    pub blur: f64,
    pub blend_mode: BlendMode,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub complexity: Option<u32>,
}

/// Gradient form discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Solid,
    Linear,
    Radial,
}

/// A multi-stop background.
///
/// `angle` only applies to linear gradients; `None` means the default 135°.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub color1: String,
    pub color2: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub angle: Option<f64>,
}

/// Background of a configuration: a bare color string or a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Background {
    Solid(String),
    Gradient(Gradient),
}

impl Background {
    /// The primary color, used as the contrast reference by the visibility
    /// safeguard (first stop of a gradient).
    pub fn primary(&self) -> &str {
        match self {
            Background::Solid(c) => c,
            Background::Gradient(g) => &g.color1,
        }
    }

    pub fn solid(color: impl Into<String>) -> Background {
        Background::Solid(color.into())
    }
}

impl From<&str> for Background {
    fn from(color: &str) -> Self {
        Background::Solid(color.to_owned())
    }
}

/// Animation knobs; `enabled: false` with default knobs is the quiescent
/// state the compact codec omits entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSettings {
    pub enabled: bool,
    pub speed: f64,
    pub flow: f64,
    pub pulse: f64,
    pub rotate: f64,
    pub noise_anim: f64,
    pub color_cycle: bool,
    pub color_cycle_speed: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 5.0,
            flow: 2.0,
            pulse: 2.0,
            rotate: 2.0,
            noise_anim: 0.0,
            color_cycle: false,
            color_cycle_speed: 5.0,
        }
    }
}

/// Vignette overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VignetteSettings {
    pub enabled: bool,
    pub color: String,
    pub intensity: f64,
    pub size: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub inverted: bool,
    pub shape_x: f64,
    pub shape_y: f64,
}

impl Default for VignetteSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            color: "#000000".to_owned(),
            intensity: 0.6,
            size: 40.0,
            offset_x: 0.0,
            offset_y: 0.0,
            inverted: false,
            shape_x: 50.0,
            shape_y: 50.0,
        }
    }
}

/// A complete wallpaper configuration.
///
/// Shape order is z-order and must survive every transform and codec round
/// trip. A config is only considered render-safe after passing through the
/// visibility safeguard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallpaperConfig {
    pub width: u32,
    pub height: u32,
    /// Grain amount, 0–100.
    pub noise: f64,
    /// Grain scale, 1–100 with one decimal of precision.
    pub noise_scale: f64,
    pub base_color: Background,
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub animation: Option<AnimationSettings>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vignette: Option<VignetteSettings>,
}

impl Default for WallpaperConfig {
    /// The stock canvas: deep indigo with three glowing circles.
    fn default() -> Self {
        let circle = |id: &str, x, y, size, color: &str, opacity, blur, blend_mode| Shape {
            id: id.to_owned(),
            kind: ShapeKind::Circle,
            x,
            y,
            size,
            color: color.to_owned(),
            opacity,
            blur,
            blend_mode,
            complexity: None,
        };
        Self {
            width: 1920,
            height: 1080,
            noise: 25.0,
            noise_scale: 1.5,
            base_color: Background::solid("#0f0c29"),
            shapes: vec![
                circle("def1", 80.0, 20.0, 100.0, "#ff00cc", 0.4, 100.0, BlendMode::Screen),
                circle("def2", 20.0, 80.0, 120.0, "#333399", 0.6, 120.0, BlendMode::Screen),
                circle("def3", 50.0, 50.0, 80.0, "#00d4ff", 0.3, 80.0, BlendMode::Overlay),
            ],
            animation: Some(AnimationSettings::default()),
            vignette: Some(VignetteSettings::default()),
        }
    }
}

impl WallpaperConfig {
    /// Checks the structural invariants a caller can get wrong.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(())
    }

    /// True when all shape ids are distinct.
    pub fn shape_ids_unique(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.shapes.iter().all(|s| seen.insert(s.id.as_str()))
    }
}

/// A partial configuration supplied by the external preset catalog.
///
/// Missing fields fall back to the stock 1920×1080 canvas when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub noise: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub noise_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_color: Option<Background>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shapes: Option<Vec<Shape>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub animation: Option<AnimationSettings>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vignette: Option<VignetteSettings>,
}

impl ConfigPatch {
    /// Overlays the patch onto the default 1920×1080 canvas.
    pub fn apply(&self) -> WallpaperConfig {
        let base = WallpaperConfig::default();
        WallpaperConfig {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            noise: self.noise.unwrap_or(base.noise),
            noise_scale: self.noise_scale.unwrap_or(base.noise_scale),
            base_color: self.base_color.clone().unwrap_or(base.base_color),
            shapes: self.shapes.clone().unwrap_or(base.shapes),
            animation: self.animation.clone().or(base.animation),
            vignette: self.vignette.clone().or(base.vignette),
        }
    }
}
