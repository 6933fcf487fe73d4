//! Lava: molten psychedelic flows.
//!
//! Large soft blobs in a warm or toxic palette over a dark base, always
//! animated with a slow flow.

use aurawall_core::color::{shift_color, Hsl};
use aurawall_core::config::{
    AnimationSettings, Background, BlendMode, Shape, ShapeKind, WallpaperConfig,
};
use aurawall_core::prng::{pick, RandomSource};
use aurawall_core::safeguard::ensure_visibility;

use crate::{
    finish_variation, shape_tag, EngineId, EngineMeta, GenerationEngine, RandomizeOptions,
    Variation,
};

pub struct Lava;

static META: EngineMeta = EngineMeta {
    name: "Lava",
    tagline: "Hypnotic fluidity and retro heat.",
    description: "Psychedelic molten flows in the spirit of sixties lava \
                  lamps: big simple blobs, screen blending, slow motion.",
};

static VARIATIONS: [Variation; 2] = [
    Variation {
        name: "Magma Flow",
        apply: magma_flow,
    },
    Variation {
        name: "Toxic Sludge",
        apply: toxic_sludge,
    },
];

/// Base hue and spread of the warm and psychedelic palettes.
const PALETTES: [(f64, f64); 3] = [(0.0, 60.0), (260.0, 60.0), (120.0, 60.0)];

fn hsl(h: f64, s: f64, l: f64) -> String {
    Hsl { h, s, l }.to_css()
}

impl GenerationEngine for Lava {
    fn id(&self) -> EngineId {
        EngineId::Lava
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
        let &(palette_base, palette_range) = pick(rng, &PALETTES);
        let background = Background::solid(hsl(palette_base, 20.0, 10.0));

        let tag = shape_tag(rng);
        let mut shapes = Vec::with_capacity(num_shapes);
        for i in 0..num_shapes {
            let h = (palette_base + rng.next_f64() * palette_range) % 360.0;
            shapes.push(Shape {
                id: format!("lava-{tag}-{i}"),
                kind: ShapeKind::Blob,
                x: rng.next_f64() * 60.0 + 20.0,
                y: rng.next_f64() * 80.0 + 10.0,
                size: rng.next_f64() * 80.0 + 80.0,
                color: hsl(h, 80.0 + rng.next_f64() * 20.0, 40.0 + rng.next_f64() * 30.0),
                opacity: 0.8,
                blur: 40.0,
                blend_mode: BlendMode::Screen,
                complexity: Some(rng.next_usize(2) as u32 + 3),
            });
        }

        let shapes = ensure_visibility(&shapes, &background, rng);
        WallpaperConfig {
            base_color: background,
            noise: if opts.grain_locked { base.noise } else { 15.0 },
            shapes,
            animation: Some(AnimationSettings {
                enabled: true,
                flow: 5.0,
                speed: 2.0,
                ..base.animation.clone().unwrap_or_default()
            }),
            ..base.clone()
        }
    }

    fn variations(&self) -> &'static [Variation] {
        &VARIATIONS
    }
}

fn magma_flow(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#1a0500");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: shift_color(&s.color, 0.0, 0.0, 10.0),
            blend_mode: BlendMode::Screen,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-magma", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

fn toxic_sludge(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let background = Background::solid("#051a05");
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        shapes.push(Shape {
            color: shift_color(&s.color, 120.0, 0.0, 0.0),
            blend_mode: BlendMode::HardLight,
            ..s.clone()
        });
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-toxic", &background, rng),
        base_color: background,
        ..cfg.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurawall_core::color::color_to_hsl;
    use aurawall_core::prng::Xorshift64;

    #[test]
    fn randomize_yields_large_animated_blobs() {
        let base = WallpaperConfig::default();
        for seed in 0..30u64 {
            let mut rng = Xorshift64::new(seed + 1);
            let out = Lava.randomize(&base, RandomizeOptions::default(), &mut rng);
            assert!((3..=6).contains(&out.shapes.len()));
            for s in &out.shapes {
                assert_eq!(s.kind, ShapeKind::Blob);
                assert!(s.size >= 80.0);
            }
            let anim = out.animation.expect("lava always animates");
            assert!(anim.enabled);
            assert_eq!(anim.flow, 5.0);
            assert_eq!(anim.speed, 2.0);
        }
    }

    #[test]
    fn base_comes_from_one_of_the_palettes() {
        let base = WallpaperConfig::default();
        for seed in 0..30u64 {
            let mut rng = Xorshift64::new(seed + 1);
            let out = Lava.randomize(&base, RandomizeOptions::default(), &mut rng);
            let bg = color_to_hsl(out.base_color.primary());
            assert!(
                [0.0, 260.0, 120.0].contains(&bg.h),
                "unexpected palette hue {}",
                bg.h
            );
            assert_eq!(bg.l, 10.0);
        }
    }

    #[test]
    fn toxic_sludge_shifts_everything_toward_green() {
        let base = WallpaperConfig::default();
        let mut rng = Xorshift64::new(4);
        let generated = Lava.randomize(&base, RandomizeOptions::default(), &mut rng);
        let out = toxic_sludge(&generated, &mut rng);
        assert_eq!(out.base_color, Background::solid("#051a05"));
        for s in &out.shapes {
            assert!(s.id.ends_with("-toxic"));
        }
    }
}
