//! Per-species output of evolution tree analysis.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::species::SpeciesId;

/// How a species enters its evolution line.
///
/// `None` is reserved for chain roots (base forms). Every evolved
/// species classifies as `Early` or `Late` from its own edge metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Base form: does not evolve from anything.
    None,
    /// Evolves through an ordinary low-level level-up.
    Early,
    /// Evolves at level 40+, by item, trade, location, held item, or
    /// known move.
    Late,
}

impl Classification {
    /// Whether this marks a late-game evolution.
    pub fn is_late(&self) -> bool {
        matches!(self, Self::Late)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Early => write!(f, "early"),
            Self::Late => write!(f, "late"),
        }
    }
}

/// Annotation derived for one species by the tree analyzer.
///
/// `depth` and `family` are tree-wide values: every species in one chain
/// records the same maximum root-to-leaf length and the same sorted
/// family id list. Depth models "how long is this family's evolution
/// line", not "how far is this node from the root".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionAnnotation {
    /// Maximum root-to-leaf path length of the whole tree, in nodes.
    pub depth: u32,
    /// Every species id in the tree, ascending.
    pub family: Vec<SpeciesId>,
    /// Early/late classification; `None` for the root only.
    pub classification: Classification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_serde_names() {
        assert_eq!(
            serde_json::to_string(&Classification::None).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::to_string(&Classification::Early).unwrap(),
            "\"early\""
        );
        assert_eq!(
            serde_json::to_string(&Classification::Late).unwrap(),
            "\"late\""
        );
    }

    #[test]
    fn test_display_matches_serde() {
        for c in [
            Classification::None,
            Classification::Early,
            Classification::Late,
        ] {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json.trim_matches('"'), c.to_string());
        }
    }

    #[test]
    fn test_is_late() {
        assert!(Classification::Late.is_late());
        assert!(!Classification::Early.is_late());
        assert!(!Classification::None.is_late());
    }
}
