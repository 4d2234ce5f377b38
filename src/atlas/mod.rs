//! Atlas: deterministic sprite sheet packing.
//!
//! The atlas module turns an ordered batch of same-size sprites into a
//! single composed sheet plus addressing metadata:
//!
//! 1. **Layout**: near-square grid geometry from the item count
//! 2. **Sanitize**: strip checksum-fragile PNG chunks before decoding
//! 3. **Pack**: decode, normalize, and composite each sprite into its
//!    cell, isolating per-item failures
//! 4. **Manifest**: package placements and fingerprints for persistence
//!
//! ## Core Contract
//!
//! The same item list at the same cell size produces an identical sheet,
//! identical placements, and an identical content fingerprint.

pub mod layout;
pub mod manifest;
pub mod packer;
pub mod sanitize;

// Re-exports
pub use layout::GridLayout;
pub use manifest::AtlasManifest;
pub use packer::{PackError, PackResult, PackedSheet, SpriteSheetPacker};
pub use sanitize::clean_png;

/// Atlas schema version. Increment on breaking changes.
pub const ATLAS_SCHEMA_VERSION: &str = "sprite_atlas_v1";
