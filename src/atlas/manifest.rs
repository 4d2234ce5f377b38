//! Atlas manifest: the persistence contract for one packing run.
//!
//! The manifest carries everything a consumer needs to address the sheet
//! (grid shape, cell size, per-identifier placements) plus fingerprints
//! for integrity checks. The content fingerprint excludes `computed_at`,
//! so re-running the same batch later yields the same fingerprint.

use serde::{Deserialize, Serialize};

use super::packer::PackResult;
use super::ATLAS_SCHEMA_VERSION;
use crate::fingerprint::{fingerprint_value, sheet_fingerprint};
use crate::types::{Placement, SpriteFailure};

/// Manifest describing one packed sprite sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasManifest {
    /// Manifest schema version.
    pub schema_version: String,
    /// Cell edge length in pixels.
    pub cell_size: u32,
    /// Grid columns.
    pub cols: u32,
    /// Grid rows.
    pub rows: u32,
    /// Sheet width in pixels.
    pub width: u32,
    /// Sheet height in pixels.
    pub height: u32,
    /// Number of input items.
    pub item_count: usize,
    /// Per-item placements, in input order.
    pub placements: Vec<Placement>,
    /// Per-item failures, in input order.
    pub failures: Vec<SpriteFailure>,
    /// Fingerprint of the composed sheet pixels.
    pub sheet_fingerprint: String,
    /// Fingerprint of the manifest content (everything above).
    pub content_fingerprint: String,
    /// Unix timestamp when the manifest was computed.
    pub computed_at: i64,
}

/// The fingerprinted subset of manifest fields.
#[derive(Serialize)]
struct ManifestContent<'a> {
    schema_version: &'a str,
    cell_size: u32,
    cols: u32,
    rows: u32,
    width: u32,
    height: u32,
    item_count: usize,
    placements: &'a [Placement],
    failures: &'a [SpriteFailure],
    sheet_fingerprint: &'a str,
}

impl AtlasManifest {
    /// Build a manifest from a packing result, stamped with the current
    /// time.
    pub fn from_result(result: &PackResult) -> Self {
        Self::from_result_at(result, chrono::Utc::now().timestamp())
    }

    /// Build a manifest from a packing result with an explicit
    /// timestamp.
    pub fn from_result_at(result: &PackResult, computed_at: i64) -> Self {
        let layout = result.sheet.layout;
        let sheet_fp = sheet_fingerprint(&result.sheet.image);

        let content = ManifestContent {
            schema_version: ATLAS_SCHEMA_VERSION,
            cell_size: layout.cell_size,
            cols: layout.cols,
            rows: layout.rows,
            width: layout.width(),
            height: layout.height(),
            item_count: result.placements.len(),
            placements: &result.placements,
            failures: &result.failures,
            sheet_fingerprint: &sheet_fp,
        };
        let content_fingerprint = fingerprint_value(&content);

        Self {
            schema_version: ATLAS_SCHEMA_VERSION.to_string(),
            cell_size: layout.cell_size,
            cols: layout.cols,
            rows: layout.rows,
            width: layout.width(),
            height: layout.height(),
            item_count: result.placements.len(),
            placements: result.placements.clone(),
            failures: result.failures.clone(),
            sheet_fingerprint: sheet_fp,
            content_fingerprint,
            computed_at,
        }
    }

    /// Look up the placement for an identifier.
    pub fn placement(&self, identifier: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.identifier == identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::packer::SpriteSheetPacker;
    use crate::types::SpriteItem;

    fn pack_three() -> PackResult {
        let packer = SpriteSheetPacker::new(8).unwrap();
        packer.pack(&[
            SpriteItem::missing("1"),
            SpriteItem::missing("2"),
            SpriteItem::missing("3"),
        ])
    }

    #[test]
    fn test_manifest_geometry() {
        let manifest = AtlasManifest::from_result_at(&pack_three(), 1000);
        assert_eq!(manifest.schema_version, ATLAS_SCHEMA_VERSION);
        assert_eq!((manifest.cols, manifest.rows), (2, 2));
        assert_eq!((manifest.width, manifest.height), (16, 16));
        assert_eq!(manifest.item_count, 3);
        assert_eq!(manifest.computed_at, 1000);
    }

    #[test]
    fn test_placement_lookup() {
        let manifest = AtlasManifest::from_result_at(&pack_three(), 1000);
        let p = manifest.placement("3").unwrap();
        assert_eq!((p.cell.col, p.cell.row), (0, 1));
        assert!(manifest.placement("missing").is_none());
    }

    #[test]
    fn test_content_fingerprint_ignores_timestamp() {
        let result = pack_three();
        let a = AtlasManifest::from_result_at(&result, 1000);
        let b = AtlasManifest::from_result_at(&result, 2000);
        assert_eq!(a.content_fingerprint, b.content_fingerprint);
        assert_eq!(a.sheet_fingerprint, b.sheet_fingerprint);
    }
}
