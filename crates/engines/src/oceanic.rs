//! Oceanic: deep water currents.
//!
//! Wave blobs weighted toward the lower half of the canvas in a cyan-blue
//! palette, an optional foam highlight, and a constant gentle flow with
//! color cycling.

use aurawall_core::color::{shift_color, Hsl};
use aurawall_core::config::{
    AnimationSettings, Background, BlendMode, Shape, ShapeKind, WallpaperConfig,
};
use aurawall_core::prng::RandomSource;
use aurawall_core::safeguard::ensure_visibility;

use crate::{
    finish_variation, shape_tag, EngineId, EngineMeta, GenerationEngine, RandomizeOptions,
    Variation,
};

pub struct Oceanic;

static META: EngineMeta = EngineMeta {
    name: "Oceanic",
    tagline: "Blue depths and living tides.",
    description: "The calm and fury of the seas: organic waves, deep blues, \
                  and constant fluid motion.",
};

static VARIATIONS: [Variation; 2] = [
    Variation {
        name: "Stormy Seas",
        apply: stormy_seas,
    },
    Variation {
        name: "Coral Reef",
        apply: coral_reef,
    },
];

fn hsl(h: f64, s: f64, l: f64) -> String {
    Hsl { h, s, l }.to_css()
}

impl GenerationEngine for Oceanic {
    fn id(&self) -> EngineId {
        EngineId::Oceanic
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
        let num_shapes = rng.next_usize(4) + 3;
        let base_hue = 190.0 + rng.next_f64() * 40.0;
        let background = Background::solid(hsl(base_hue, 60.0, 10.0));

        let tag = shape_tag(rng);
        let mut shapes = Vec::with_capacity(num_shapes + 1);
        for i in 0..num_shapes {
            let h = (base_hue + rng.next_f64() * 40.0 - 20.0) % 360.0;
            shapes.push(Shape {
                id: format!("ocean-{tag}-{i}"),
                kind: ShapeKind::Blob,
                x: rng.next_f64() * 100.0,
                // Currents sit in the lower half.
                y: rng.next_f64() * 80.0 + 20.0,
                size: rng.next_f64() * 100.0 + 50.0,
                color: hsl(h, 60.0 + rng.next_f64() * 30.0, 20.0 + rng.next_f64() * 40.0),
                opacity: 0.6,
                blur: 40.0,
                // Overlay for depth, screen for highlights.
                blend_mode: if rng.next_f64() > 0.6 {
                    BlendMode::Overlay
                } else {
                    BlendMode::Screen
                },
                complexity: Some(rng.next_usize(3) as u32 + 4),
            });
        }

        if rng.next_f64() > 0.3 {
            shapes.push(Shape {
                id: format!("foam-{tag}"),
                kind: ShapeKind::Blob,
                x: rng.next_f64() * 100.0,
                y: rng.next_f64() * 100.0,
                size: 40.0,
                color: "#ffffff".into(),
                opacity: 0.3,
                blur: 20.0,
                blend_mode: BlendMode::Overlay,
                complexity: Some(6),
            });
        }

        let shapes = ensure_visibility(&shapes, &background, rng);
        WallpaperConfig {
            base_color: background,
            noise: if opts.grain_locked { base.noise } else { 15.0 },
            shapes,
            animation: Some(AnimationSettings {
                enabled: true,
                flow: 4.0,
                speed: 1.5,
                color_cycle: true,
                color_cycle_speed: 2.0,
                ..base.animation.clone().unwrap_or_default()
            }),
            ..base.clone()
        }
    }

    fn variations(&self) -> &'static [Variation] {
        &VARIATIONS
    }
}

fn stormy_seas(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#0a1015");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: shift_color(&s.color, 0.0, -20.0, -10.0),
            blend_mode: BlendMode::HardLight,
            // Sharper waves.
            blur: s.blur * 0.8,
            ..s.clone()
        });
    }
    WallpaperConfig {
        noise: 40.0,
        shapes: finish_variation(shapes, "-storm", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

fn coral_reef(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#002030");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for (i, s) in cfg.shapes.iter().enumerate() {
        shapes.push(Shape {
            // Inject coral orange on alternating shapes.
            color: if i % 2 == 0 {
                s.color.clone()
            } else {
                "#ff7f50".into()
            },
            blend_mode: BlendMode::Screen,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-coral", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}
