//! Share-link fragments.
//!
//! New links carry `#c=<token>` with the compact positional format. Two older
//! generations still resolve: `#cfg=<token>` (LZ-compressed full JSON) and
//! preset references, which take priority over any fragment.

use aurawall_core::config::{ConfigPatch, WallpaperConfig};

use crate::compact;

/// Builds the `#c=` fragment for a config.
pub fn encode_fragment(config: &WallpaperConfig) -> String {
    format!("#c={}", compact::encode(config))
}

/// Decodes a location fragment, with or without the leading `#`.
///
/// Recognizes the compact `c=` format and the legacy `cfg=` full-JSON format.
/// Returns `None` for unrecognized prefixes or undecodable tokens.
pub fn decode_fragment(fragment: &str) -> Option<WallpaperConfig> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if let Some(token) = fragment.strip_prefix("c=") {
        return compact::decode(token);
    }
    if let Some(token) = fragment.strip_prefix("cfg=") {
        let units = lz_str::decompress_from_encoded_uri_component(token)?;
        let json = String::from_utf16(&units).ok()?;
        return serde_json::from_str(&json).ok();
    }
    None
}

/// Resolves what a shared link should display.
///
/// A preset reference wins over the fragment; otherwise the fragment decides.
/// Preset patches are completed against the stock canvas.
pub fn resolve_shared(preset: Option<&ConfigPatch>, fragment: &str) -> Option<WallpaperConfig> {
    if let Some(patch) = preset {
        return Some(patch.apply());
    }
    decode_fragment(fragment)
}
