#![deny(unsafe_code)]
//! Core types for the aurawall generative wallpaper system.
//!
//! Provides the wallpaper data model (`WallpaperConfig`, `Shape`, `Background`,
//! `BlendMode`, animation and vignette settings), HSL color math, the
//! `RandomSource` trait with the `Xorshift64` PRNG, deterministic blob
//! geometry, and the visibility safeguard.

pub mod blob;
pub mod color;
pub mod config;
pub mod error;
pub mod prng;
pub mod safeguard;

pub use color::{color_to_hsl, hex_to_hsl, shift_background, shift_color, Hsl};
pub use config::{
    AnimationSettings, Background, BlendMode, ConfigPatch, Gradient, GradientKind, Shape,
    ShapeKind, VignetteSettings, WallpaperConfig,
};
pub use error::ConfigError;
pub use prng::{RandomSource, Xorshift64};
pub use safeguard::ensure_visibility;
