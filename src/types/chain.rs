//! Evolution chain tree types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::species::SpeciesId;

/// Trigger kind for a single evolution step.
///
/// Unknown upstream trigger names are preserved verbatim in `Other` so
/// they survive a serialization round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EvolutionTrigger {
    /// Ordinary level-up evolution.
    LevelUp,
    /// Evolution by applying an item.
    UseItem,
    /// Trade evolution.
    Trade,
    /// Shed evolution (splits off a second creature).
    Shed,
    /// Any other trigger name reported upstream.
    Other(String),
}

impl EvolutionTrigger {
    /// Canonical wire name of this trigger.
    pub fn as_str(&self) -> &str {
        match self {
            Self::LevelUp => "level-up",
            Self::UseItem => "use-item",
            Self::Trade => "trade",
            Self::Shed => "shed",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for EvolutionTrigger {
    fn from(s: String) -> Self {
        match s.as_str() {
            "level-up" => Self::LevelUp,
            "use-item" => Self::UseItem,
            "trade" => Self::Trade,
            "shed" => Self::Shed,
            _ => Self::Other(s),
        }
    }
}

impl From<EvolutionTrigger> for String {
    fn from(t: EvolutionTrigger) -> Self {
        t.as_str().to_string()
    }
}

impl Default for EvolutionTrigger {
    fn default() -> Self {
        Self::LevelUp
    }
}

impl fmt::Display for EvolutionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditions governing a single parent→child evolution step.
///
/// A node carries the details of how it evolves *from* its parent.
/// All requirement fields are optional; the upstream API reports only
/// the conditions that apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionDetails {
    /// Trigger kind for this step.
    #[serde(default)]
    pub trigger: EvolutionTrigger,
    /// Minimum level requirement, if any.
    #[serde(default)]
    pub min_level: Option<u8>,
    /// Item applied to trigger the evolution.
    #[serde(default)]
    pub item: Option<String>,
    /// Location the evolution must happen at.
    #[serde(default)]
    pub location: Option<String>,
    /// Item the creature must hold.
    #[serde(default)]
    pub held_item: Option<String>,
    /// Move the creature must know.
    #[serde(default)]
    pub known_move: Option<String>,
    /// Move type the creature must know a move of.
    #[serde(default)]
    pub known_move_type: Option<String>,
}

impl EvolutionDetails {
    /// Whether this evolution method counts as "late-game".
    ///
    /// Any one condition is sufficient:
    /// - minimum level at or above `level_threshold`
    /// - use-item trigger, or any item reference
    /// - trade trigger
    /// - a location requirement
    /// - a held-item requirement
    /// - a known-move or known-move-type requirement
    pub fn is_late_method(&self, level_threshold: u8) -> bool {
        if self.min_level.is_some_and(|lvl| lvl >= level_threshold) {
            return true;
        }
        if self.trigger == EvolutionTrigger::UseItem || self.item.is_some() {
            return true;
        }
        if self.trigger == EvolutionTrigger::Trade {
            return true;
        }
        if self.location.is_some() {
            return true;
        }
        if self.held_item.is_some() {
            return true;
        }
        if self.known_move.is_some() || self.known_move_type.is_some() {
            return true;
        }
        false
    }
}

/// Node in an evolution chain tree.
///
/// Each node names one species and lists the species it evolves into.
/// `evolution_details` describes how this node evolves from its parent
/// and is empty for the root of a chain.
///
/// Invariant (caller contract): one root per tree, no species appears
/// twice, no cycles. The analyzer fails fast on revisited ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainNode {
    /// Species id, unique within the tree.
    pub species_id: SpeciesId,
    /// Species name, used for lookups and error reporting.
    pub species_name: String,
    /// How this species evolves from its parent. Empty for the root.
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetails>,
    /// Species this one evolves into. Empty for leaves.
    #[serde(default)]
    pub evolves_to: Vec<ChainNode>,
}

impl ChainNode {
    /// Create a leaf node with no evolution conditions.
    pub fn new(species_id: SpeciesId, species_name: impl Into<String>) -> Self {
        Self {
            species_id,
            species_name: species_name.into(),
            evolution_details: Vec::new(),
            evolves_to: Vec::new(),
        }
    }

    /// Attach an evolution method to this node.
    pub fn with_details(mut self, details: EvolutionDetails) -> Self {
        self.evolution_details.push(details);
        self
    }

    /// Attach a child evolution to this node.
    pub fn with_child(mut self, child: ChainNode) -> Self {
        self.evolves_to.push(child);
        self
    }

    /// Number of nodes in the subtree rooted here.
    pub fn node_count(&self) -> usize {
        1 + self.evolves_to.iter().map(Self::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(min_level: u8) -> EvolutionDetails {
        EvolutionDetails {
            trigger: EvolutionTrigger::LevelUp,
            min_level: Some(min_level),
            ..Default::default()
        }
    }

    #[test]
    fn test_trigger_round_trip() {
        for name in ["level-up", "use-item", "trade", "shed", "spin"] {
            let trigger = EvolutionTrigger::from(name.to_string());
            assert_eq!(trigger.as_str(), name);
            let json = serde_json::to_string(&trigger).unwrap();
            let back: EvolutionTrigger = serde_json::from_str(&json).unwrap();
            assert_eq!(trigger, back);
        }
        assert_eq!(
            EvolutionTrigger::from("spin".to_string()),
            EvolutionTrigger::Other("spin".to_string())
        );
    }

    #[test]
    fn test_low_level_is_not_late() {
        assert!(!level(16).is_late_method(40));
        assert!(!level(39).is_late_method(40));
    }

    #[test]
    fn test_level_threshold_is_late() {
        assert!(level(40).is_late_method(40));
        assert!(level(55).is_late_method(40));
    }

    #[test]
    fn test_item_methods_are_late() {
        let use_item = EvolutionDetails {
            trigger: EvolutionTrigger::UseItem,
            ..Default::default()
        };
        assert!(use_item.is_late_method(40));

        // An item reference marks the method late even with a level-up trigger.
        let item_ref = EvolutionDetails {
            item: Some("fire-stone".to_string()),
            ..Default::default()
        };
        assert!(item_ref.is_late_method(40));
    }

    #[test]
    fn test_trade_is_late() {
        let trade = EvolutionDetails {
            trigger: EvolutionTrigger::Trade,
            ..Default::default()
        };
        assert!(trade.is_late_method(40));
    }

    #[test]
    fn test_requirement_fields_are_late() {
        let location = EvolutionDetails {
            location: Some("mt-coronet".to_string()),
            ..Default::default()
        };
        assert!(location.is_late_method(40));

        let held = EvolutionDetails {
            held_item: Some("kings-rock".to_string()),
            ..Default::default()
        };
        assert!(held.is_late_method(40));

        let known_move = EvolutionDetails {
            known_move: Some("mimic".to_string()),
            ..Default::default()
        };
        assert!(known_move.is_late_method(40));

        let known_move_type = EvolutionDetails {
            known_move_type: Some("fairy".to_string()),
            ..Default::default()
        };
        assert!(known_move_type.is_late_method(40));
    }

    #[test]
    fn test_bare_details_are_early() {
        assert!(!EvolutionDetails::default().is_late_method(40));
    }

    #[test]
    fn test_node_count() {
        let tree = ChainNode::new(SpeciesId::new(1), "a").with_child(
            ChainNode::new(SpeciesId::new(2), "b")
                .with_child(ChainNode::new(SpeciesId::new(3), "c")),
        );
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_chain_json_shape() {
        let json = r#"{
            "species_id": 172,
            "species_name": "pichu",
            "evolves_to": [{
                "species_id": 25,
                "species_name": "pikachu",
                "evolution_details": [{"trigger": "level-up"}],
                "evolves_to": [{
                    "species_id": 26,
                    "species_name": "raichu",
                    "evolution_details": [{"trigger": "use-item", "item": "thunder-stone"}]
                }]
            }]
        }"#;
        let node: ChainNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.species_id, SpeciesId::new(172));
        assert_eq!(node.node_count(), 3);
        assert_eq!(
            node.evolves_to[0].evolves_to[0].evolution_details[0].trigger,
            EvolutionTrigger::UseItem
        );
    }
}
