//! Species record types and derived attributes.
//!
//! A `SpeciesProfile` is the as-fetched, unit-raw form produced by the
//! upstream collaborator. `SpeciesRecord` is the final dataset row with
//! display names, converted units, and derived heuristics filled in.

use serde::{Deserialize, Serialize};

use super::annotation::EvolutionAnnotation;
use super::species::SpeciesId;
use super::sprite::CellCoord;

/// Base stat total at or above which a species is considered a
/// pseudo-legendary candidate.
pub const PSEUDO_BST_FLOOR: u16 = 600;

/// Species that meet the pseudo-legendary stat floor but are excluded by
/// convention (their ability neutralizes the stat advantage).
const PSEUDO_EXCEPTIONS: &[&str] = &["slaking"];

/// Base stats for one species.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    /// Hit points.
    pub hp: u16,
    /// Physical attack.
    pub atk: u16,
    /// Physical defense.
    pub def: u16,
    /// Special attack.
    pub spa: u16,
    /// Special defense.
    pub spd: u16,
    /// Speed.
    pub spe: u16,
}

impl StatBlock {
    /// Base stat total across all six stats.
    pub fn total(&self) -> u16 {
        self.hp + self.atk + self.def + self.spa + self.spd + self.spe
    }
}

/// As-fetched species data, before derivation.
///
/// Names are the upstream lowercase identifiers; height and weight carry
/// the upstream decimetre/hectogram units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    /// Species id.
    pub id: SpeciesId,
    /// Upstream lowercase species name.
    pub name: String,
    /// Upstream lowercase type names, in slot order.
    pub types: Vec<String>,
    /// Upstream egg group names.
    #[serde(default)]
    pub egg_groups: Vec<String>,
    /// Capture rate, 0-255.
    #[serde(default)]
    pub capture_rate: u8,
    /// Base stats.
    pub stats: StatBlock,
    /// Generation the species was introduced in.
    pub gen: u8,
    /// Height in decimetres.
    #[serde(default)]
    pub height_decimetres: u32,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight_hectograms: u32,
    /// Legendary flag.
    #[serde(default)]
    pub is_legendary: bool,
    /// Mythical flag.
    #[serde(default)]
    pub is_mythical: bool,
    /// English flavor text, whitespace-normalized upstream.
    #[serde(default)]
    pub description: String,
}

/// Final dataset row for one species.
///
/// Serializes with camelCase keys, the shape persisted by the
/// orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    /// Species id.
    pub id: SpeciesId,
    /// Display name.
    pub name: String,
    /// Display type names, in slot order.
    pub types: Vec<String>,
    /// Canonical egg group display names.
    pub egg_groups: Vec<String>,
    /// Capture rate, 0-255.
    pub capture_rate: u8,
    /// Base stats.
    pub stats: StatBlock,
    /// Base stat total.
    pub bst: u16,
    /// Generation the species was introduced in.
    pub gen: u8,
    /// Height in metres.
    pub height: f32,
    /// Weight in kilograms.
    pub weight: f32,
    /// Legendary flag.
    pub is_legendary: bool,
    /// Mythical flag.
    pub is_mythical: bool,
    /// Pseudo-legendary heuristic result.
    pub is_pseudo: bool,
    /// Whether this species is a late-game evolution.
    pub is_late_evolution: bool,
    /// Total stages in this species' evolution line.
    pub evolution_depth: u32,
    /// All species ids in the evolution line, ascending.
    pub evolution_family: Vec<SpeciesId>,
    /// English flavor text.
    pub description: String,
    /// Sprite sheet column, once packed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite_x: Option<u32>,
    /// Sprite sheet row, once packed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite_y: Option<u32>,
}

impl SpeciesRecord {
    /// Build a record from an as-fetched profile.
    ///
    /// Derives display names, converted units, the base stat total, and
    /// the pseudo-legendary heuristic. Evolution fields start at their
    /// no-chain defaults (depth 1, family of one, not late) and are
    /// overwritten by `apply_annotation` when the species appears in a
    /// chain.
    pub fn from_profile(profile: &SpeciesProfile) -> Self {
        let bst = profile.stats.total();
        let is_pseudo = bst >= PSEUDO_BST_FLOOR
            && !profile.is_legendary
            && !profile.is_mythical
            && !PSEUDO_EXCEPTIONS.contains(&profile.name.as_str());

        Self {
            id: profile.id,
            name: capitalize(&profile.name),
            types: profile.types.iter().map(|t| capitalize(t)).collect(),
            egg_groups: profile
                .egg_groups
                .iter()
                .map(|g| canonical_egg_group(g))
                .collect(),
            capture_rate: profile.capture_rate,
            stats: profile.stats,
            bst,
            gen: profile.gen,
            height: profile.height_decimetres as f32 / 10.0,
            weight: profile.weight_hectograms as f32 / 10.0,
            is_legendary: profile.is_legendary,
            is_mythical: profile.is_mythical,
            is_pseudo,
            is_late_evolution: false,
            evolution_depth: 1,
            evolution_family: vec![profile.id],
            description: profile.description.clone(),
            sprite_x: None,
            sprite_y: None,
        }
    }

    /// Fill evolution fields from an analyzer annotation.
    pub fn apply_annotation(&mut self, annotation: &EvolutionAnnotation) {
        self.evolution_depth = annotation.depth;
        self.evolution_family = annotation.family.clone();
        self.is_late_evolution = annotation.classification.is_late();
    }

    /// Fill sprite coordinates from a packed placement.
    pub fn apply_cell(&mut self, cell: CellCoord) {
        self.sprite_x = Some(cell.col);
        self.sprite_y = Some(cell.row);
    }
}

/// Uppercase the first character, lowercase the rest.
///
/// Matches the upstream display convention for names, types, and egg
/// groups ("water1" → "Water1", "no-eggs" → "No-eggs").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Canonical display name for an upstream egg group.
///
/// Capitalizes, then applies the display rename table.
pub fn canonical_egg_group(raw: &str) -> String {
    let capitalized = capitalize(raw);
    match capitalized.as_str() {
        "Water1" => "Water 1".to_string(),
        "Water2" => "Water 2".to_string(),
        "Water3" => "Water 3".to_string(),
        "No-eggs" => "No Eggs".to_string(),
        "Ground" => "Field".to_string(),
        "Humanshape" => "Human-Like".to_string(),
        "Plant" => "Grass".to_string(),
        "Indeterminate" => "No Gender".to_string(),
        _ => capitalized,
    }
}
