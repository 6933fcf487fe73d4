//! Geometrica: Bauhaus grid compositions.
//!
//! A handful of sharp circles snapped to a five-step grid, primary colors on
//! off-white paper, no animation.

use aurawall_core::color::color_to_hsl;
use aurawall_core::config::{
    AnimationSettings, Background, BlendMode, Shape, ShapeKind, WallpaperConfig,
};
use aurawall_core::prng::{jitter, pick, RandomSource};
use aurawall_core::safeguard::ensure_visibility;

use crate::{
    finish_variation, shape_tag, EngineId, EngineMeta, GenerationEngine, RandomizeOptions,
    Variation,
};

pub struct Geometrica;

static META: EngineMeta = EngineMeta {
    name: "Geometrica",
    tagline: "Order, grid and function.",
    description: "Mathematical precision and Bauhaus structure: pure shapes \
                  aligned to a grid, primary colors, balanced composition.",
};

static VARIATIONS: [Variation; 2] = [
    Variation {
        name: "Dark Mode Architect",
        apply: dark_mode_architect,
    },
    Variation {
        name: "Deconstructed",
        apply: deconstructed,
    },
];

/// Swiss-style print palette.
const COLORS: [&str; 5] = ["#E4002B", "#1244A4", "#F3A200", "#000000", "#FFFFFF"];
const GRID_STEPS: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];
const SIZE_STEPS: [f64; 4] = [10.0, 25.0, 50.0, 75.0];

impl GenerationEngine for Geometrica {
    fn id(&self) -> EngineId {
        EngineId::Geometrica
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
        let num_shapes = rng.next_usize(4) + 2;
        let background = Background::solid("#f0f0f0");

        let tag = shape_tag(rng);
        let mut shapes = Vec::with_capacity(num_shapes);
        for i in 0..num_shapes {
            let color = *pick(rng, &COLORS);
            shapes.push(Shape {
                id: format!("geo-{tag}-{i}"),
                kind: ShapeKind::Circle,
                x: *pick(rng, &GRID_STEPS),
                y: *pick(rng, &GRID_STEPS),
                size: *pick(rng, &SIZE_STEPS),
                color: color.into(),
                opacity: 0.95,
                blur: 0.0,
                // Overprint effect for black ink.
                blend_mode: if color == "#000000" {
                    BlendMode::Multiply
                } else {
                    BlendMode::Normal
                },
                complexity: None,
            });
        }

        let shapes = ensure_visibility(&shapes, &background, rng);
        WallpaperConfig {
            base_color: background,
            noise: if opts.grain_locked { base.noise } else { 8.0 },
            shapes,
            animation: Some(AnimationSettings {
                enabled: false,
                ..base.animation.clone().unwrap_or_default()
            }),
            ..base.clone()
        }
    }

    fn variations(&self) -> &'static [Variation] {
        &VARIATIONS
    }
}

fn dark_mode_architect(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#101010");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            blend_mode: BlendMode::Screen,
            opacity: 0.9,
            // Black ink cannot screen over a dark base; lift it to charcoal.
            color: if color_to_hsl(&s.color).l < 5.0 {
                "#333333".into()
            } else {
                s.color.clone()
            },
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-architect", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

fn deconstructed(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            // Nudge slightly off-grid.
            x: jitter(rng, s.x, 10.0),
            y: jitter(rng, s.y, 10.0),
            opacity: 0.7,
            blend_mode: BlendMode::Multiply,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-deconstructed", &cfg.base_color, rng),
        ..cfg.clone()
    }
}
