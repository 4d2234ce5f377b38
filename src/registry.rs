//! Per-batch annotation registry.
//!
//! One batch analyzes many independent evolution trees. The registry
//! merges their per-tree annotation maps into a single id-keyed view,
//! replacing the hidden accumulator caches the upstream pipeline used to
//! keep between runs. Each tree stays independently testable; the
//! registry is the only merge point.

use std::collections::BTreeMap;

use crate::analyzer::{AnalyzerError, EvolutionTreeAnalyzer};
use crate::fingerprint::fingerprint_value;
use crate::types::{ChainNode, EvolutionAnnotation, SpeciesId};

/// Error type for registry operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    /// A species id appeared in two different trees of one batch.
    #[error("Species {species_id} belongs to more than one evolution family")]
    FamilyCollision {
        /// The colliding id.
        species_id: SpeciesId,
    },
    /// A tree failed structural analysis.
    #[error(transparent)]
    Analysis(#[from] AnalyzerError),
}

/// Id-keyed annotations for one batch of evolution trees.
#[derive(Debug, Clone, Default)]
pub struct AnnotationRegistry {
    annotations: BTreeMap<SpeciesId, EvolutionAnnotation>,
}

impl AnnotationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one tree's annotation map into the registry.
    ///
    /// A species id already present from an earlier tree is a batch-level
    /// contract violation: families are disjoint by construction.
    pub fn merge_tree(
        &mut self,
        tree: BTreeMap<SpeciesId, EvolutionAnnotation>,
    ) -> Result<(), RegistryError> {
        for (species_id, annotation) in tree {
            if self.annotations.contains_key(&species_id) {
                return Err(RegistryError::FamilyCollision { species_id });
            }
            self.annotations.insert(species_id, annotation);
        }
        Ok(())
    }

    /// Look up the annotation for a species.
    pub fn get(&self, id: SpeciesId) -> Option<&EvolutionAnnotation> {
        self.annotations.get(&id)
    }

    /// All annotations, ordered by species id.
    pub fn annotations(&self) -> &BTreeMap<SpeciesId, EvolutionAnnotation> {
        &self.annotations
    }

    /// Number of annotated species.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Deterministic fingerprint of the registry contents.
    pub fn fingerprint(&self) -> String {
        fingerprint_value(&self.annotations)
    }
}

/// Analyze a whole batch of independent trees into one registry.
///
/// Any structural failure (revisited id within a tree, shared id across
/// trees) aborts the batch: a partial registry would corrupt depth and
/// family values for downstream records.
pub fn analyze_forest(
    analyzer: &EvolutionTreeAnalyzer,
    roots: &[ChainNode],
) -> Result<AnnotationRegistry, RegistryError> {
    let mut registry = AnnotationRegistry::new();

    for root in roots {
        let tree = analyzer.analyze(root)?;
        tracing::debug!(
            root = %root.species_name,
            species = tree.len(),
            "analyzed evolution chain"
        );
        registry.merge_tree(tree)?;
    }

    tracing::info!(
        chains = roots.len(),
        species = registry.len(),
        "annotation registry built"
    );

    Ok(registry)
}
