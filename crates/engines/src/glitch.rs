//! Glitch: digital decay and signal error.
//!
//! Each logical shape is spawned as three offset pure-RGB channels blended
//! additively, simulating chromatic aberration, with occasional dead-pixel
//! artifacts on top.

use aurawall_core::config::{
    AnimationSettings, Background, BlendMode, Shape, ShapeKind, WallpaperConfig,
};
use aurawall_core::prng::RandomSource;
use aurawall_core::safeguard::ensure_visibility;

use crate::{
    finish_variation, shape_tag, EngineId, EngineMeta, GenerationEngine, RandomizeOptions,
    Variation,
};

pub struct Glitch;

static META: EngineMeta = EngineMeta {
    name: "Glitch",
    tagline: "The beautiful system error.",
    description: "Digital decay and signal failure: chromatic aberration, \
                  heavy noise, and visual chaos.",
};

static VARIATIONS: [Variation; 2] = [
    Variation {
        name: "Terminal Failure",
        apply: terminal_failure,
    },
    Variation {
        name: "Blue Screen",
        apply: blue_screen,
    },
];

impl GenerationEngine for Glitch {
    fn id(&self) -> EngineId {
        EngineId::Glitch
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
        let num_clusters = rng.next_usize(6) + 3;
        let background = Background::solid("#050505");

        let tag = shape_tag(rng);
        let mut shapes = Vec::new();
        for i in 0..num_clusters {
            let cx = rng.next_f64() * 100.0;
            let cy = rng.next_f64() * 100.0;
            let base_size = rng.next_f64() * 50.0 + 10.0;
            // Channel offset is the glitch intensity.
            let offset = rng.next_f64() * 4.0 + 1.0;

            let channels = [
                ("r", "#ff0000", (cx - offset).clamp(0.0, 100.0), cy),
                ("g", "#00ff00", cx, (cy - offset).clamp(0.0, 100.0)),
                ("b", "#0000ff", (cx + offset).clamp(0.0, 100.0), cy),
            ];
            for (channel, color, x, y) in channels {
                shapes.push(Shape {
                    id: format!("glitch-{tag}-{i}-{channel}"),
                    kind: ShapeKind::Circle,
                    x,
                    y,
                    size: base_size,
                    color: color.into(),
                    opacity: 0.8,
                    blur: 2.0,
                    blend_mode: BlendMode::Screen,
                    complexity: None,
                });
            }

            // Occasional dead-pixel block.
            if rng.next_f64() > 0.7 {
                shapes.push(Shape {
                    id: format!("artifact-{tag}-{i}"),
                    kind: ShapeKind::Blob,
                    x: rng.next_f64() * 100.0,
                    y: rng.next_f64() * 100.0,
                    size: rng.next_f64() * 30.0 + 5.0,
                    color: "#ffffff".into(),
                    opacity: 1.0,
                    blur: 0.0,
                    blend_mode: BlendMode::Difference,
                    complexity: Some(10),
                });
            }
        }

        let (noise, noise_scale) = if opts.grain_locked {
            (base.noise, base.noise_scale)
        } else {
            (60.0, 4.0)
        };

        let shapes = ensure_visibility(&shapes, &background, rng);
        WallpaperConfig {
            base_color: background,
            noise,
            noise_scale,
            shapes,
            animation: Some(AnimationSettings {
                enabled: true,
                noise_anim: 8.0,
                speed: 5.0,
                ..base.animation.clone().unwrap_or_default()
            }),
            ..base.clone()
        }
    }

    fn variations(&self) -> &'static [Variation] {
        &VARIATIONS
    }
}

fn terminal_failure(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#001100");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: "#00ff44".into(),
            blend_mode: BlendMode::Lighten,
            blur: 0.0,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-terminal", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

fn blue_screen(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#0000aa");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: "#ffffff".into(),
            blend_mode: BlendMode::Overlay,
            opacity: 0.5,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-bsod", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}
