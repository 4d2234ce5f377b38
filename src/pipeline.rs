//! Batch pipeline: from fetched inputs to a finished dataset.
//!
//! One pipeline run consumes already-fetched species profiles, evolution
//! chain trees, and raw sprite bytes, and produces the final record set
//! plus the packed sheet and its manifest:
//!
//! ```text
//! chains  → EvolutionTreeAnalyzer → AnnotationRegistry ─┐
//! profiles ──────────────────────────────────────────────┼→ SpeciesRecords
//! sprites → SpriteSheetPacker → PackedSheet + Manifest ─┘
//! ```
//!
//! The pipeline holds no state across runs; every run is independent.

use std::collections::BTreeMap;

use crate::analyzer::EvolutionTreeAnalyzer;
use crate::atlas::{AtlasManifest, PackError, PackedSheet, SpriteSheetPacker};
use crate::registry::{analyze_forest, RegistryError};
use crate::types::{ChainNode, SpeciesId, SpeciesProfile, SpeciesRecord, SpriteItem};

/// Standard sprite cell edge length, matching the upstream front-sprite
/// dimensions.
pub const DEFAULT_CELL_SIZE: u32 = 96;

/// Error type for pipeline runs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// Evolution analysis failed for the batch.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Sheet-level packing failure.
    #[error(transparent)]
    Pack(#[from] PackError),
}

/// Finished output of one pipeline run.
#[derive(Debug, Clone)]
pub struct DexDataset {
    /// Final records, sorted by species id.
    pub records: Vec<SpeciesRecord>,
    /// The composed sprite sheet.
    pub sheet: PackedSheet,
    /// Addressing and integrity metadata for the sheet.
    pub manifest: AtlasManifest,
    /// Fingerprint of the annotation registry, for golden comparisons.
    pub registry_fingerprint: String,
}

/// Batch pipeline over profiles, chains, and sprites.
#[derive(Debug, Clone)]
pub struct DatasetPipeline {
    analyzer: EvolutionTreeAnalyzer,
    packer: SpriteSheetPacker,
}

impl DatasetPipeline {
    /// Create a pipeline with the given sprite cell size.
    pub fn new(cell_size: u32) -> Result<Self, PackError> {
        Ok(Self {
            analyzer: EvolutionTreeAnalyzer::new(),
            packer: SpriteSheetPacker::new(cell_size)?,
        })
    }

    /// Run the full batch.
    ///
    /// Records come back sorted by species id. A species appearing in no
    /// chain keeps the no-chain defaults (depth 1, family of itself, not
    /// late). A sprite that fails to decode leaves its cell blank and is
    /// reported in the manifest; it never aborts the run.
    pub fn build(
        &self,
        profiles: Vec<SpeciesProfile>,
        chains: &[ChainNode],
        sprites: &BTreeMap<SpeciesId, Vec<u8>>,
    ) -> Result<DexDataset, PipelineError> {
        let registry = analyze_forest(&self.analyzer, chains)?;

        let mut records: Vec<SpeciesRecord> =
            profiles.iter().map(SpeciesRecord::from_profile).collect();
        records.sort_by_key(|r| r.id);

        for record in &mut records {
            if let Some(annotation) = registry.get(record.id) {
                record.apply_annotation(annotation);
            }
        }

        // Sprites pack in record order so cell indices line up with the
        // sorted dataset.
        let items: Vec<SpriteItem> = records
            .iter()
            .map(|record| SpriteItem {
                identifier: record.id.to_string(),
                bytes: sprites.get(&record.id).cloned(),
            })
            .collect();

        let result = self.packer.pack(&items);
        for (record, placement) in records.iter_mut().zip(&result.placements) {
            record.apply_cell(placement.cell);
        }

        let manifest = AtlasManifest::from_result(&result);
        tracing::info!(
            records = records.len(),
            cols = manifest.cols,
            rows = manifest.rows,
            sprite_failures = manifest.failures.len(),
            "dataset built"
        );

        Ok(DexDataset {
            records,
            sheet: result.sheet,
            manifest,
            registry_fingerprint: registry.fingerprint(),
        })
    }
}
