//! Core types for the evolution atlas.

pub mod annotation;
pub mod chain;
pub mod record;
pub mod species;
pub mod sprite;

pub use annotation::{Classification, EvolutionAnnotation};
pub use chain::{ChainNode, EvolutionDetails, EvolutionTrigger};
pub use record::{
    canonical_egg_group, capitalize, SpeciesProfile, SpeciesRecord, StatBlock, PSEUDO_BST_FLOOR,
};
pub use species::{SpeciesId, SpeciesIdParseError};
pub use sprite::{CellCoord, Placement, SpriteFailure, SpriteItem};
