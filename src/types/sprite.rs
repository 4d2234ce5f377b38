//! Sprite input and placement types for atlas packing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One sprite queued for packing.
///
/// `identifier` is opaque to the packer and only used to report the item
/// in placements and failures. `bytes` holds the raw encoded image, or
/// `None` when no art exists for this item (its cell stays blank).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteItem {
    /// Opaque identifier for reporting.
    pub identifier: String,
    /// Raw encoded image bytes, if any.
    pub bytes: Option<Vec<u8>>,
}

impl SpriteItem {
    /// Create an item carrying image bytes.
    pub fn new(identifier: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            identifier: identifier.into(),
            bytes: Some(bytes),
        }
    }

    /// Create an item with no image data.
    pub fn missing(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            bytes: None,
        }
    }
}

/// Grid cell coordinates within a packed sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    /// Column index, zero-based.
    pub col: u32,
    /// Row index, zero-based.
    pub row: u32,
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Assigned cell for one input item, recorded in input order.
///
/// A placement exists for every item, including items with no image and
/// items whose image failed to decode; downstream consumers must be able
/// to locate a cell even for missing art.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Identifier of the input item.
    pub identifier: String,
    /// Assigned grid cell.
    pub cell: CellCoord,
}

/// Per-item packing failure.
///
/// Non-fatal: the item's cell stays blank and the rest of the batch is
/// unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteFailure {
    /// Identifier of the failed item.
    pub identifier: String,
    /// Human-readable cause.
    pub reason: String,
}

impl fmt::Display for SpriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sprite '{}': {}", self.identifier, self.reason)
    }
}
