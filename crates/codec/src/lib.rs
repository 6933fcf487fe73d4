#![deny(unsafe_code)]
//! Share-link codec for wallpaper configs.
//!
//! Configs travel in URL fragments as LZ-string compressed JSON. The current
//! wire format is a compact positional array (`compact`); the original keyed
//! object format (`legacy`) and raw-JSON `#cfg=` fragments remain decodable
//! so old links keep working. Encoding always emits the compact format.

pub mod compact;
mod legacy;
pub mod url;

pub use compact::{decode, encode};
pub use url::{decode_fragment, encode_fragment, resolve_shared};
