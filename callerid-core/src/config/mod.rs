//! Configuration types
//!
//! Board-agnostic bridge configuration. With the `toml` feature the whole
//! structure can be loaded from a TOML document.

pub mod hardware;
#[cfg(feature = "toml")]
pub mod loader;
pub mod types;

pub use hardware::*;
pub use types::*;
