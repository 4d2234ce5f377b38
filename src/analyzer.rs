//! Recursive evolution tree analysis.
//!
//! The analyzer walks one evolution chain tree and derives, for every
//! species in it, an [`EvolutionAnnotation`]: the tree-wide depth, the
//! shared family id list, and an early/late classification.

use std::collections::BTreeMap;

use crate::types::{ChainNode, Classification, EvolutionAnnotation, SpeciesId};

/// Minimum-level cutoff at or above which a level-up evolution counts as
/// late-game.
pub const LATE_LEVEL_THRESHOLD: u8 = 40;

/// Error type for tree analysis.
///
/// Structural failures are fatal to the whole tree: no partial
/// annotation map is ever returned, since sibling depth and family
/// values depend on every node being visited.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalyzerError {
    /// The same species id appears more than once in one tree.
    #[error("Species {species_id} appears more than once in chain rooted at '{root_name}'")]
    DuplicateSpecies {
        /// The revisited id.
        species_id: SpeciesId,
        /// Root species name, for error context.
        root_name: String,
    },
}

/// Evolution tree analyzer.
///
/// ## Algorithm
///
/// 1. Depth pass: `max_depth(node)` is 1 for a leaf, otherwise
///    `1 + max(max_depth(child))`. The tree-wide maximum is recorded as
///    the `depth` of **every** node: depth models "how long is this
///    family's evolution line", not distance from the root.
/// 2. Family pass: collect every species id into one flat list, sort
///    ascending, share it across all nodes of the tree.
/// 3. Classification pass: the root classifies as `None`; every other
///    node classifies from its own first evolution-detail entry only
///    (first listed method is authoritative; later alternatives are
///    deliberately not consulted).
///
/// Traversal order never affects the output: classification depends
/// only on a node's own edge metadata. Revisited ids fail the whole
/// tree rather than corrupting sibling results.
#[derive(Debug, Clone)]
pub struct EvolutionTreeAnalyzer {
    /// Minimum-level cutoff for the late classification.
    late_level_threshold: u8,
}

impl Default for EvolutionTreeAnalyzer {
    fn default() -> Self {
        Self {
            late_level_threshold: LATE_LEVEL_THRESHOLD,
        }
    }
}

impl EvolutionTreeAnalyzer {
    /// Create an analyzer with the standard level cutoff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom level cutoff.
    pub fn with_level_threshold(late_level_threshold: u8) -> Self {
        Self {
            late_level_threshold,
        }
    }

    /// Analyze one evolution chain tree.
    ///
    /// Returns an annotation for every species in the tree, keyed by
    /// species id. Fails fast on a revisited id without returning any
    /// partial result.
    pub fn analyze(
        &self,
        root: &ChainNode,
    ) -> Result<BTreeMap<SpeciesId, EvolutionAnnotation>, AnalyzerError> {
        let depth = max_chain_depth(root);

        let mut family = Vec::with_capacity(root.node_count());
        collect_family_ids(root, &mut family);
        family.sort_unstable();

        if let Some(duplicate) = first_duplicate(&family) {
            return Err(AnalyzerError::DuplicateSpecies {
                species_id: duplicate,
                root_name: root.species_name.clone(),
            });
        }

        let mut annotations = BTreeMap::new();
        self.classify(root, true, depth, &family, &mut annotations);

        Ok(annotations)
    }

    fn classify(
        &self,
        node: &ChainNode,
        is_root: bool,
        depth: u32,
        family: &[SpeciesId],
        out: &mut BTreeMap<SpeciesId, EvolutionAnnotation>,
    ) {
        let classification = if is_root {
            Classification::None
        } else {
            // Only the first listed method is consulted.
            match node.evolution_details.first() {
                Some(details) if details.is_late_method(self.late_level_threshold) => {
                    Classification::Late
                }
                _ => Classification::Early,
            }
        };

        out.insert(
            node.species_id,
            EvolutionAnnotation {
                depth,
                family: family.to_vec(),
                classification,
            },
        );

        for child in &node.evolves_to {
            self.classify(child, false, depth, family, out);
        }
    }
}

/// Maximum root-to-leaf path length of a chain, in node count.
fn max_chain_depth(node: &ChainNode) -> u32 {
    1 + node
        .evolves_to
        .iter()
        .map(max_chain_depth)
        .max()
        .unwrap_or(0)
}

/// Collect every species id in the subtree into `out`.
fn collect_family_ids(node: &ChainNode, out: &mut Vec<SpeciesId>) {
    out.push(node.species_id);
    for child in &node.evolves_to {
        collect_family_ids(child, out);
    }
}

/// First id appearing more than once in a sorted slice.
fn first_duplicate(sorted: &[SpeciesId]) -> Option<SpeciesId> {
    sorted
        .windows(2)
        .find(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
}
