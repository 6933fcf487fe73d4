#![deny(unsafe_code)]
//! Generation engine registry: maps engine names to implementations.
//!
//! This crate sits between `aurawall-core` (data model, randomness, safeguard)
//! and the callers that drive generation (CLI, share links). Each engine is a
//! stateless unit struct implementing [`GenerationEngine`]; the [`EngineId`]
//! enum is the closed set of recognized engines, so an unknown name fails at
//! the registry boundary instead of deep inside generation.

pub mod boreal;
pub mod chroma;
pub mod ember;
pub mod geometrica;
pub mod glitch;
pub mod lava;
pub mod midnight;
pub mod oceanic;
pub mod sakura;

use aurawall_core::config::{Background, Shape, WallpaperConfig};
use aurawall_core::prng::RandomSource;
use aurawall_core::safeguard::ensure_visibility;

/// Static descriptive metadata for an engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineMeta {
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
}

/// Enumeration of all available generation engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineId {
    Boreal,
    Chroma,
    Lava,
    Midnight,
    Geometrica,
    Glitch,
    Sakura,
    Ember,
    Oceanic,
}

impl EngineId {
    /// All engines, in presentation order.
    pub const ALL: [EngineId; 9] = [
        EngineId::Boreal,
        EngineId::Chroma,
        EngineId::Lava,
        EngineId::Midnight,
        EngineId::Geometrica,
        EngineId::Glitch,
        EngineId::Sakura,
        EngineId::Ember,
        EngineId::Oceanic,
    ];

    /// The stable string id used by the CLI and share links.
    pub fn name(self) -> &'static str {
        match self {
            EngineId::Boreal => "boreal",
            EngineId::Chroma => "chroma",
            EngineId::Lava => "lava",
            EngineId::Midnight => "midnight",
            EngineId::Geometrica => "geometrica",
            EngineId::Glitch => "glitch",
            EngineId::Sakura => "sakura",
            EngineId::Ember => "ember",
            EngineId::Oceanic => "oceanic",
        }
    }

    /// Looks up an engine id by its string name.
    pub fn from_name(name: &str) -> Option<EngineId> {
        EngineId::ALL.into_iter().find(|id| id.name() == name)
    }
}

/// Options threaded into [`GenerationEngine::randomize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomizeOptions {
    /// When set, the engine keeps the incoming grain settings (`noise`,
    /// `noise_scale`) instead of rolling its own.
    pub grain_locked: bool,
}

/// A named pure transform producing a themed variant of a composition.
pub type VariationFn = fn(&WallpaperConfig, &mut dyn RandomSource) -> WallpaperConfig;

/// A variation entry: display name plus transform.
#[derive(Clone, Copy)]
pub struct Variation {
    pub name: &'static str,
    pub apply: VariationFn,
}

/// A generation engine: a themed randomizer plus its variations.
///
/// Implementations are stateless; all randomness flows through the
/// `RandomSource` argument, so a seeded source reproduces a full run.
pub trait GenerationEngine: Sync {
    fn id(&self) -> EngineId;

    fn meta(&self) -> &'static EngineMeta;

    /// Produces a fresh composition in this engine's style.
    ///
    /// Canvas dimensions and any settings the engine does not own carry over
    /// from `base`. The result has already passed the visibility safeguard.
    fn randomize(
        &self,
        base: &WallpaperConfig,
        opts: RandomizeOptions,
        rng: &mut dyn RandomSource,
    ) -> WallpaperConfig;

    /// The engine's variation transforms, in presentation order.
    fn variations(&self) -> &'static [Variation];
}

/// Returns the engine for an id.
pub fn get(id: EngineId) -> &'static dyn GenerationEngine {
    match id {
        EngineId::Boreal => &boreal::Boreal,
        EngineId::Chroma => &chroma::Chroma,
        EngineId::Lava => &lava::Lava,
        EngineId::Midnight => &midnight::Midnight,
        EngineId::Geometrica => &geometrica::Geometrica,
        EngineId::Glitch => &glitch::Glitch,
        EngineId::Sakura => &sakura::Sakura,
        EngineId::Ember => &ember::Ember,
        EngineId::Oceanic => &oceanic::Oceanic,
    }
}

/// Looks up an engine by string name.
pub fn by_name(name: &str) -> Option<&'static dyn GenerationEngine> {
    EngineId::from_name(name).map(get)
}

/// Iterates all engines in presentation order.
pub fn all() -> impl Iterator<Item = &'static dyn GenerationEngine> {
    EngineId::ALL.into_iter().map(get)
}

/// A short random hex tag for freshly generated shape ids.
///
/// Ids only need to be unique within one composition; the tag plus a per-shape
/// index guarantees that while keeping generation reproducible from the seed.
pub(crate) fn shape_tag(rng: &mut dyn RandomSource) -> String {
    format!("{:06x}", (rng.next_f64() * 16_777_216.0) as u32)
}

/// Shared tail of every variation transform: append the variation's id suffix
/// to each shape, then run the visibility safeguard against the (possibly
/// changed) background.
pub(crate) fn finish_variation(
    mut shapes: Vec<Shape>,
    suffix: &str,
    base: &Background,
    rng: &mut dyn RandomSource,
) -> Vec<Shape> {
    for s in &mut shapes {
        s.id.push_str(suffix);
    }
    ensure_visibility(&shapes, base, rng)
}
