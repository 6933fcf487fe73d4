//! Boreal: soft aurora-like gradients.
//!
//! High Gaussian blur, analogous hues stepped 40 degrees apart, and a blend
//! pool chosen to match the light or dark base so shapes glow instead of
//! muddying.

use aurawall_core::color::{shift_background, shift_color, Hsl};
use aurawall_core::config::{Background, BlendMode, Shape, ShapeKind, WallpaperConfig};
use aurawall_core::prng::{jitter, pick, RandomSource};
use aurawall_core::safeguard::ensure_visibility;

use crate::{
    finish_variation, shape_tag, EngineId, EngineMeta, GenerationEngine, RandomizeOptions,
    Variation,
};

pub struct Boreal;

static META: EngineMeta = EngineMeta {
    name: "Boreal",
    tagline: "Soft ethereal gradients inspired by the northern lights.",
    description: "High Gaussian blur and gentle blend modes build fluid, \
                  dreamlike backgrounds out of drifting analogous hues.",
};

static VARIATIONS: [Variation; 5] = [
    Variation {
        name: "Composition Remix",
        apply: composition_remix,
    },
    Variation {
        name: "Atmosphere Shift",
        apply: atmosphere_shift,
    },
    Variation {
        name: "Deep Contrast",
        apply: deep_contrast,
    },
    Variation {
        name: "Analogous Flow",
        apply: analogous_flow,
    },
    Variation {
        name: "Vibrant Pop",
        apply: vibrant_pop,
    },
];

fn hsl(h: f64, s: f64, l: f64) -> String {
    Hsl { h, s, l }.to_css()
}

impl GenerationEngine for Boreal {
    fn id(&self) -> EngineId {
        EngineId::Boreal
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
        let dark_theme = rng.next_f64() > 0.4;

        let base_color = if dark_theme {
            hsl(base_hue, 40.0, (rng.next_f64() * 10.0).floor() + 5.0)
        } else {
            hsl(base_hue, 20.0, (rng.next_f64() * 10.0).floor() + 88.0)
        };

        let noise = if opts.grain_locked {
            base.noise
        } else {
            (rng.next_f64() * 25.0).floor() + 20.0
        };

        let pool: &[BlendMode] = if dark_theme {
            &[
                BlendMode::Screen,
                BlendMode::ColorDodge,
                BlendMode::Normal,
                BlendMode::Lighten,
            ]
        } else {
            &[
                BlendMode::Multiply,
                BlendMode::Overlay,
                BlendMode::Normal,
                BlendMode::Difference,
            ]
        };

        let tag = shape_tag(rng);
        let mut shapes = Vec::with_capacity(num_shapes);
        for i in 0..num_shapes {
            let h = (base_hue + i as f64 * 40.0) % 360.0;
            let s = rng.next_f64() * 40.0 + 60.0;
            let l = if dark_theme {
                rng.next_f64() * 40.0 + 50.0
            } else {
                rng.next_f64() * 40.0 + 10.0
            };
            shapes.push(Shape {
                id: format!("rand-b-{tag}-{i}"),
                kind: if rng.next_f64() > 0.7 {
                    ShapeKind::Blob
                } else {
                    ShapeKind::Circle
                },
                x: rng.next_f64() * 100.0,
                y: rng.next_f64() * 100.0,
                size: rng.next_f64() * 80.0 + 60.0,
                color: hsl(h, s, l),
                opacity: rng.next_f64() * 0.4 + 0.5,
                blur: rng.next_f64() * 60.0 + 60.0,
                blend_mode: *pick(rng, pool),
                complexity: Some(rng.next_usize(4) as u32 + 4),
            });
        }

        let background = Background::solid(base_color);
        let shapes = ensure_visibility(&shapes, &background, rng);
        WallpaperConfig {
            base_color: background,
            noise,
            shapes,
            ..base.clone()
        }
    }

    fn variations(&self) -> &'static [Variation] {
        &VARIATIONS
    }
}

fn composition_remix(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            x: jitter(rng, s.x, 40.0).clamp(0.0, 100.0),
            y: jitter(rng, s.y, 40.0).clamp(0.0, 100.0),
            size: jitter(rng, s.size, 30.0).clamp(25.0, 150.0),
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-remix", &cfg.base_color, rng),
        ..cfg.clone()
    }
}

fn atmosphere_shift(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = shift_background(&cfg.base_color, 10.0, -5.0, 5.0);
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            blur: (s.blur * 1.3).min(150.0),
            blend_mode: if rng.next_f64() > 0.5 {
                BlendMode::Screen
            } else {
                BlendMode::SoftLight
            },
            opacity: (s.opacity * 0.9).clamp(0.4, 0.9),
            ..s.clone()
        });
    }
    WallpaperConfig {
        noise: (cfg.noise - 10.0).clamp(10.0, 50.0),
        shapes: finish_variation(shapes, "-atmos", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

fn deep_contrast(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = shift_background(&cfg.base_color, 0.0, 10.0, -10.0);
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: shift_color(&s.color, 0.0, 20.0, 5.0),
            blend_mode: if rng.next_f64() > 0.5 {
                BlendMode::ColorDodge
            } else {
                BlendMode::Normal
            },
            opacity: (s.opacity + 0.2).clamp(0.6, 1.0),
            ..s.clone()
        });
    }
    WallpaperConfig {
        noise: (cfg.noise + 15.0).clamp(20.0, 80.0),
        shapes: finish_variation(shapes, "-deep", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

fn analogous_flow(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let hue_shift = 30.0 + rng.next_f64() * 30.0;
    let background = shift_background(&cfg.base_color, hue_shift, 0.0, 0.0);
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: shift_color(&s.color, hue_shift, 0.0, 0.0),
            x: jitter(rng, s.x, 15.0).clamp(-10.0, 110.0),
            y: jitter(rng, s.y, 15.0).clamp(-10.0, 110.0),
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-flow", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

fn vibrant_pop(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = shift_background(&cfg.base_color, 180.0, 0.0, 0.0);
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: shift_color(&s.color, 180.0, 20.0, 0.0),
            blend_mode: BlendMode::Normal,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-pop", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}
