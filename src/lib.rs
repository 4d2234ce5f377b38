//! # evolution-atlas
//!
//! Deterministic evolution-chain analysis and sprite atlas packing for
//! creature dex datasets.
//!
//! The crate answers two questions about a fetched dex batch:
//!
//! > For every species, how long is its evolution line, who is in its
//! > family, and does it evolve early or late?
//!
//! > Where does every species' sprite live on one packed sheet?
//!
//! ## Core Contract
//!
//! 1. Given one evolution chain tree, derive a per-species annotation:
//!    tree-wide depth, shared ascending family id list, and an
//!    early/late classification from each node's own edge metadata
//! 2. Given an ordered sprite batch, compose a near-square grid sheet
//!    and record every item's cell, isolating per-item decode failures
//! 3. Merge both outputs into final species records via a stateless
//!    batch pipeline
//!
//! ## Architecture
//!
//! ```text
//! ChainNode → EvolutionTreeAnalyzer → AnnotationRegistry ─┐
//!                                                          ├→ SpeciesRecord
//! SpriteItem → SpriteSheetPacker → PackedSheet + Manifest ─┘
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same chains + same profiles + same sprites → identical records,
//!   sheet pixels, and fingerprints
//! - Family ordering is canonical (ascending species id)
//! - Record ordering is canonical (ascending species id)
//! - Placement is positional: item `i` → cell `(i % cols, i / cols)`
//!   regardless of image presence or decodability

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod atlas;
pub mod fingerprint;
pub mod pipeline;
pub mod registry;
pub mod types;

// Re-exports
pub use types::{ChainNode, EvolutionDetails, EvolutionTrigger};
pub use types::{Classification, EvolutionAnnotation};
pub use types::{SpeciesId, SpeciesIdParseError};
pub use types::{CellCoord, Placement, SpriteFailure, SpriteItem};
pub use types::{SpeciesProfile, SpeciesRecord, StatBlock};

pub use analyzer::{AnalyzerError, EvolutionTreeAnalyzer, LATE_LEVEL_THRESHOLD};
pub use registry::{analyze_forest, AnnotationRegistry, RegistryError};
pub use fingerprint::{fingerprint_bytes, fingerprint_value, sheet_fingerprint};

// Atlas re-exports
pub use atlas::{
    clean_png, AtlasManifest, GridLayout, PackError, PackResult, PackedSheet, SpriteSheetPacker,
    ATLAS_SCHEMA_VERSION,
};

pub use pipeline::{DatasetPipeline, DexDataset, PipelineError, DEFAULT_CELL_SIZE};

/// Schema version for all evolution-atlas types.
/// Increment on breaking changes to any schema type.
pub const EVOLUTION_ATLAS_SCHEMA_VERSION: &str = "1.0.0";
