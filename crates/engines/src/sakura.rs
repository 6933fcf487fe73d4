//! Sakura: Japanese spring.
//!
//! Twelve small petal blobs in pink pastels over a soft light base, with a
//! gentle windy animation.

use aurawall_core::color::Hsl;
use aurawall_core::config::{
    AnimationSettings, Background, BlendMode, Shape, ShapeKind, WallpaperConfig,
};
use aurawall_core::prng::RandomSource;
use aurawall_core::safeguard::ensure_visibility;

use crate::{
    finish_variation, shape_tag, EngineId, EngineMeta, GenerationEngine, RandomizeOptions,
    Variation,
};

pub struct Sakura;

static META: EngineMeta = EngineMeta {
    name: "Sakura",
    tagline: "Petals on the wind, serenity beneath.",
    description: "The delicacy of Japanese spring: dancing petals, pastel \
                  tones, and soft breezes.",
};

static VARIATIONS: [Variation; 1] = [Variation {
    name: "Night Blossom",
    apply: night_blossom,
}];

const PETAL_COUNT: usize = 12;

fn hsl(h: f64, s: f64, l: f64) -> String {
    Hsl { h, s, l }.to_css()
}

impl GenerationEngine for Sakura {
    fn id(&self) -> EngineId {
        EngineId::Sakura
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
        let background = Background::solid(hsl(340.0 + rng.next_f64() * 20.0, 30.0, 90.0));

        let tag = shape_tag(rng);
        let mut shapes = Vec::with_capacity(PETAL_COUNT);
        for i in 0..PETAL_COUNT {
            shapes.push(Shape {
                id: format!("petal-{tag}-{i}"),
                kind: ShapeKind::Blob,
                x: rng.next_f64() * 100.0,
                y: rng.next_f64() * 100.0,
                size: rng.next_f64() * 20.0 + 10.0,
                color: hsl(340.0 + rng.next_f64() * 30.0, 80.0, 85.0),
                opacity: 0.6,
                blur: 5.0,
                // Subtle darkening against the light base.
                blend_mode: BlendMode::Multiply,
                complexity: Some(3),
            });
        }

        let shapes = ensure_visibility(&shapes, &background, rng);
        WallpaperConfig {
            base_color: background,
            noise: if opts.grain_locked { base.noise } else { 15.0 },
            shapes,
            animation: Some(AnimationSettings {
                enabled: true,
                flow: 8.0,
                speed: 1.0,
                ..base.animation.clone().unwrap_or_default()
            }),
            ..base.clone()
        }
    }

    fn variations(&self) -> &'static [Variation] {
        &VARIATIONS
    }
}

fn night_blossom(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#1a0b10");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            blend_mode: BlendMode::Screen,
            opacity: 0.8,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-night", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}
