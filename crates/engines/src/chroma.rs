//! Chroma: acid digital distortion.
//!
//! Near-black base, max-saturation neon shapes, low blur, and aggressive
//! blend modes (difference, exclusion, hard-light).

use aurawall_core::color::{shift_background, shift_color, Hsl};
use aurawall_core::config::{Background, BlendMode, Shape, ShapeKind, WallpaperConfig};
use aurawall_core::prng::{jitter, pick, RandomSource};
use aurawall_core::safeguard::ensure_visibility;

use crate::{
    finish_variation, shape_tag, EngineId, EngineMeta, GenerationEngine, RandomizeOptions,
    Variation,
};

pub struct Chroma;

static META: EngineMeta = EngineMeta {
    name: "Chroma",
    tagline: "Liquid distortion and acid color.",
    description: "A digital-acid aesthetic: neon hues at full saturation over \
                  a near-black base, mixed with aggressive blend modes.",
};

static VARIATIONS: [Variation; 5] = [
    Variation {
        name: "Liquid Distort",
        apply: liquid_distort,
    },
    Variation {
        name: "Acid Wash",
        apply: acid_wash,
    },
    Variation {
        name: "Thermal Shift",
        apply: thermal_shift,
    },
    Variation {
        name: "Glass Shards",
        apply: glass_shards,
    },
    Variation {
        name: "Dark Matter",
        apply: dark_matter,
    },
];

const ACID_MODES: [BlendMode; 5] = [
    BlendMode::Difference,
    BlendMode::Exclusion,
    BlendMode::HardLight,
    BlendMode::ColorDodge,
    BlendMode::Overlay,
];

fn hsl(h: f64, s: f64, l: f64) -> String {
    Hsl { h, s, l }.to_css()
}

impl GenerationEngine for Chroma {
    fn id(&self) -> EngineId {
        EngineId::Chroma
    }

    fn meta(&self) -> &'static EngineMeta {
        &META
    }

    fn randomize(
        &self,
        base: &WallpaperConfig,
        opts: RandomizeOptions,
        rng: &mut dyn RandomSource,
    ) -> WallpaperConfig {
        let num_shapes = rng.next_usize(3) + 3;
        let base_hue = (rng.next_f64() * 360.0).floor();
        // Liquid light reads best over a nearly black base.
        let background = Background::solid(hsl(base_hue, 10.0, 5.0));

        let (noise, noise_scale) = if opts.grain_locked {
            (base.noise, base.noise_scale)
        } else {
            (
                (rng.next_f64() * 40.0).floor() + 30.0,
                rng.next_f64() * 2.0 + 2.0,
            )
        };

        let tag = shape_tag(rng);
        let mut shapes = Vec::with_capacity(num_shapes);
        for i in 0..num_shapes {
            shapes.push(Shape {
                id: format!("rand-c-{tag}-{i}"),
                kind: if rng.next_f64() > 0.3 {
                    ShapeKind::Blob
                } else {
                    ShapeKind::Circle
                },
                x: rng.next_f64() * 80.0 + 10.0,
                y: rng.next_f64() * 80.0 + 10.0,
                size: rng.next_f64() * 100.0 + 50.0,
                color: hsl(rng.next_f64() * 360.0, 100.0, 50.0),
                opacity: rng.next_f64() * 0.5 + 0.5,
                // Low blur keeps the distortion defined.
                blur: rng.next_f64() * 40.0 + 10.0,
                blend_mode: *pick(rng, &ACID_MODES),
                complexity: Some(rng.next_usize(5) as u32 + 5),
            });
        }

        let shapes = ensure_visibility(&shapes, &background, rng);
        WallpaperConfig {
            base_color: background,
            noise,
            noise_scale,
            shapes,
            ..base.clone()
        }
    }

    fn variations(&self) -> &'static [Variation] {
        &VARIATIONS
    }
}

fn liquid_distort(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            x: jitter(rng, s.x, 20.0).clamp(20.0, 80.0),
            y: jitter(rng, s.y, 20.0).clamp(20.0, 80.0),
            size: jitter(rng, s.size, 40.0).clamp(50.0, 150.0),
            blur: jitter(rng, s.blur, 20.0).clamp(10.0, 60.0),
            blend_mode: if rng.next_f64() > 0.5 {
                BlendMode::Difference
            } else {
                BlendMode::Exclusion
            },
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-chroma-distort", &cfg.base_color, rng),
        ..cfg.clone()
    }
}

fn acid_wash(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = shift_background(&cfg.base_color, 120.0, 20.0, 0.0);
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: shift_color(&s.color, 120.0, 40.0, 0.0),
            blend_mode: BlendMode::Difference,
            ..s.clone()
        });
    }
    WallpaperConfig {
        noise: 60.0,
        noise_scale: 4.0,
        shapes: finish_variation(shapes, "-chroma-acid", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

fn thermal_shift(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = shift_background(&cfg.base_color, 180.0, 0.0, 10.0);
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: shift_color(&s.color, 180.0, 0.0, 0.0),
            blur: (s.blur - 30.0).max(20.0),
            blend_mode: BlendMode::HardLight,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-chroma-thermal", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

fn glass_shards(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            blur: 10.0,
            opacity: 0.4,
            size: s.size * 1.2,
            blend_mode: BlendMode::Overlay,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-chroma-glass", &cfg.base_color, rng),
        ..cfg.clone()
    }
}

fn dark_matter(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#000000");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            blur: 80.0,
            opacity: 1.0,
            // White on black under exclusion inverts everything beneath.
            color: "#ffffff".into(),
            blend_mode: BlendMode::Exclusion,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-chroma-dark", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}
