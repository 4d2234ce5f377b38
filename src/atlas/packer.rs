//! Deterministic sprite sheet packing.
//!
//! Lays out same-size sprites into a near-square grid and composites
//! them onto a single transparent RGBA canvas. Placement is purely
//! positional: item `i` always lands in cell `(i % cols, i / cols)`
//! whether or not its image decodes, so downstream consumers can locate
//! every cell. One bad image never aborts the batch.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::layout::GridLayout;
use super::sanitize::clean_png;
use crate::types::{Placement, SpriteFailure, SpriteItem};

/// Error type for sheet-level packing failures.
///
/// Per-item image problems are not errors; they are collected as
/// [`SpriteFailure`]s on the result.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PackError {
    /// Cell size must be at least one pixel.
    #[error("Sprite cell size must be non-zero")]
    ZeroCellSize,
}

/// A composed sprite sheet.
#[derive(Debug, Clone)]
pub struct PackedSheet {
    /// The composed RGBA canvas, `cols*S × rows*S`, transparent where no
    /// sprite was placed.
    pub image: RgbaImage,
    /// Grid geometry used for placement.
    pub layout: GridLayout,
}

impl PackedSheet {
    /// Encode the sheet as PNG bytes.
    ///
    /// Empty sheets (zero items) have no pixels and cannot be encoded;
    /// callers skip persistence for empty batches.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut out = std::io::Cursor::new(Vec::new());
        self.image.write_to(&mut out, image::ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

/// Result of one packing run.
#[derive(Debug, Clone)]
pub struct PackResult {
    /// The composed sheet.
    pub sheet: PackedSheet,
    /// One placement per input item, in input order.
    pub placements: Vec<Placement>,
    /// Per-item failures, in input order. Failed items keep their
    /// placement; their cells are blank.
    pub failures: Vec<SpriteFailure>,
}

/// Deterministic sprite sheet packer.
///
/// ## Algorithm
///
/// 1. `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`.
/// 2. Allocate a fully transparent `cols*S × rows*S` canvas.
/// 3. For each item in input order: record its cell; if it carries
///    bytes, sanitize, decode, normalize to `S×S` RGBA (nearest-neighbor
///    when resizing, to keep hard pixel edges of icon art), and alpha-
///    composite at the cell's pixel origin.
/// 4. Decode failures are isolated: log, record, leave the cell blank.
#[derive(Debug, Clone)]
pub struct SpriteSheetPacker {
    cell_size: u32,
}

impl SpriteSheetPacker {
    /// Create a packer for the given cell edge length.
    pub fn new(cell_size: u32) -> Result<Self, PackError> {
        if cell_size == 0 {
            return Err(PackError::ZeroCellSize);
        }
        Ok(Self { cell_size })
    }

    /// Cell edge length in pixels.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Pack a batch of sprites into one sheet.
    ///
    /// Zero items produce an empty sheet and empty placement list, not
    /// an error.
    pub fn pack(&self, items: &[SpriteItem]) -> PackResult {
        let layout = GridLayout::for_item_count(items.len() as u32, self.cell_size);
        let mut sheet = RgbaImage::new(layout.width(), layout.height());
        let mut placements = Vec::with_capacity(items.len());
        let mut failures = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let cell = layout.slot(index as u32);
            placements.push(Placement {
                identifier: item.identifier.clone(),
                cell,
            });

            let Some(bytes) = &item.bytes else {
                continue;
            };

            match self.decode_cell(bytes) {
                Ok(sprite) => {
                    let (x, y) = layout.pixel_origin(cell);
                    imageops::overlay(&mut sheet, &sprite, x as i64, y as i64);
                }
                Err(error) => {
                    tracing::warn!(
                        identifier = %item.identifier,
                        cell = %cell,
                        error = %error,
                        "sprite decode failed, leaving cell blank"
                    );
                    failures.push(SpriteFailure {
                        identifier: item.identifier.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        PackResult {
            sheet: PackedSheet {
                image: sheet,
                layout,
            },
            placements,
            failures,
        }
    }

    /// Decode raw bytes into an `S×S` RGBA cell image.
    fn decode_cell(&self, bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
        let cleaned = clean_png(bytes);
        let decoded = image::load_from_memory(&cleaned)?;

        let decoded = if decoded.width() != self.cell_size || decoded.height() != self.cell_size {
            decoded.resize_exact(self.cell_size, self.cell_size, FilterType::Nearest)
        } else {
            decoded
        };

        Ok(decoded.to_rgba8())
    }
}
