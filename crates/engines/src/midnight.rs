//! Midnight: deep space.
//!
//! Three big nebula blobs behind a field of tiny stars over a near-black
//! blue-purple base. Shape ids are positional (`nebula-N`, `star-N`) so the
//! supernova variation can tell the layers apart.

use aurawall_core::color::Hsl;
use aurawall_core::config::{Background, BlendMode, Shape, ShapeKind, WallpaperConfig};
use aurawall_core::prng::RandomSource;
use aurawall_core::safeguard::ensure_visibility;

use crate::{
    finish_variation, EngineId, EngineMeta, GenerationEngine, RandomizeOptions, Variation,
};

pub struct Midnight;

static META: EngineMeta = EngineMeta {
    name: "Midnight",
    tagline: "Stardust and deep silence.",
    description: "The vastness of the cosmos: distant stars, subtle nebulae, \
                  and the stillness of deep space.",
};

static VARIATIONS: [Variation; 1] = [Variation {
    name: "Supernova",
    apply: supernova,
}];

const NEBULA_COUNT: usize = 3;
const STAR_COUNT: usize = 15;

fn hsl(h: f64, s: f64, l: f64) -> String {
    Hsl { h, s, l }.to_css()
}

impl GenerationEngine for Midnight {
    fn id(&self) -> EngineId {
        EngineId::Midnight
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
        let background = Background::solid(hsl(240.0 + rng.next_f64() * 40.0, 30.0, 4.0));

        let mut shapes = Vec::with_capacity(NEBULA_COUNT + STAR_COUNT);
        for i in 0..NEBULA_COUNT {
            shapes.push(Shape {
                id: format!("nebula-{i}"),
                kind: ShapeKind::Blob,
                x: rng.next_f64() * 100.0,
                y: rng.next_f64() * 100.0,
                size: 150.0,
                color: hsl(200.0 + rng.next_f64() * 100.0, 60.0, 20.0),
                opacity: 0.3,
                blur: 100.0,
                blend_mode: BlendMode::Screen,
                complexity: Some(5),
            });
        }
        for i in 0..STAR_COUNT {
            shapes.push(Shape {
                id: format!("star-{i}"),
                kind: ShapeKind::Circle,
                x: rng.next_f64() * 100.0,
                y: rng.next_f64() * 100.0,
                size: rng.next_f64() * 2.0 + 1.0,
                color: "#ffffff".into(),
                opacity: rng.next_f64() * 0.5 + 0.5,
                blur: if rng.next_f64() > 0.8 { 2.0 } else { 0.0 },
                blend_mode: BlendMode::Normal,
                complexity: None,
            });
        }

        let (noise, noise_scale) = if opts.grain_locked {
            (base.noise, base.noise_scale)
        } else {
            (10.0, 1.0)
        };

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

/// Ignites the nebula layer into a hot orange glow; stars pass through.
fn supernova(cfg: &WallpaperConfig, rng: &mut dyn RandomSource) -> WallpaperConfig {
    let mut shapes = Vec::with_capacity(cfg.shapes.len());
    for s in &cfg.shapes {
        if s.id.contains("nebula") {
            shapes.push(Shape {
                color: "#ffaa00".into(),
                opacity: 0.5,
                blend_mode: BlendMode::Screen,
                ..s.clone()
            });
        } else {
            shapes.push(s.clone());
        }
    }
    WallpaperConfig {
        shapes: finish_variation(shapes, "-nova", &cfg.base_color, rng),
        ..cfg.clone()
    }
}
