//! Ember: embers and smoke.
//!
//! Three rising smoke blobs behind a handful of hot sparks over a coal-dark
//! base, animated with a slow upward drift.

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

pub struct Ember;

static META: EngineMeta = EngineMeta {
    name: "Ember",
    tagline: "Live coals and dancing smoke.",
    description: "The warmth of embers and the dance of smoke: earthy tones, \
                  vibrant oranges, and a cozy atmosphere.",
};

static VARIATIONS: [Variation; 1] = [Variation {
    name: "Blue Flame",
    apply: blue_flame,
}];

const SMOKE_COUNT: usize = 3;
const SPARK_COUNT: usize = 8;

fn hsl(h: f64, s: f64, l: f64) -> String {
    Hsl { h, s, l }.to_css()
}

impl GenerationEngine for Ember {
    fn id(&self) -> EngineId {
        EngineId::Ember
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
        let background = Background::solid("#100502");

        let tag = shape_tag(rng);
        let mut shapes = Vec::with_capacity(SMOKE_COUNT + SPARK_COUNT);
        for i in 0..SMOKE_COUNT {
            shapes.push(Shape {
                id: format!("smoke-{tag}-{i}"),
                kind: ShapeKind::Blob,
                x: rng.next_f64() * 100.0,
                // Rising: weighted toward the top.
                y: rng.next_f64() * 80.0,
                size: 100.0,
                color: "#302020".into(),
                opacity: 0.4,
                blur: 80.0,
                blend_mode: BlendMode::Screen,
                complexity: Some(6),
            });
        }
        for i in 0..SPARK_COUNT {
            shapes.push(Shape {
                id: format!("spark-{tag}-{i}"),
                kind: ShapeKind::Circle,
                x: rng.next_f64() * 100.0,
                y: rng.next_f64() * 100.0,
                size: rng.next_f64() * 5.0 + 2.0,
                color: hsl(10.0 + rng.next_f64() * 30.0, 100.0, 60.0),
                opacity: 0.9,
                blur: 4.0,
                blend_mode: BlendMode::Screen,
                complexity: None,
            });
        }

        let shapes = ensure_visibility(&shapes, &background, rng);
        WallpaperConfig {
            base_color: background,
            noise: if opts.grain_locked { base.noise } else { 25.0 },
            shapes,
            animation: Some(AnimationSettings {
                enabled: true,
                flow: 2.0,
                speed: 0.5,
                ..base.animation.clone().unwrap_or_default()
            }),
            ..base.clone()
        }
    }

    fn variations(&self) -> &'static [Variation] {
        &VARIATIONS
    }
}

/// Cools the fire: blue sparks, near-black blue smoke.
fn blue_flame(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#020510");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: if s.id.contains("spark") {
                "#0088ff".into()
            } else {
                "#051020".into()
            },
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-blueflame", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}
