//! Near-square grid layout for fixed-size sprite cells.

use serde::{Deserialize, Serialize};

use crate::types::CellCoord;

/// Grid geometry for one packed sheet.
///
/// `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`. The ceiling favors a
/// near-square sheet and resolves ties deterministically on its own; no
/// separate tie-break is needed. Items fill cells row-major in input
/// order: item `i` lands at `(i % cols, i / cols)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Number of columns.
    pub cols: u32,
    /// Number of rows.
    pub rows: u32,
    /// Cell edge length in pixels.
    pub cell_size: u32,
}

impl GridLayout {
    /// Compute the grid for `n` items at the given cell size.
    ///
    /// Zero items produce an empty 0×0 grid, not an error.
    pub fn for_item_count(n: u32, cell_size: u32) -> Self {
        if n == 0 {
            return Self {
                cols: 0,
                rows: 0,
                cell_size,
            };
        }
        let cols = (n as f64).sqrt().ceil() as u32;
        let rows = n.div_ceil(cols);
        Self {
            cols,
            rows,
            cell_size,
        }
    }

    /// Grid cell for the item at `index`, row-major.
    pub fn slot(&self, index: u32) -> CellCoord {
        CellCoord {
            col: index % self.cols,
            row: index / self.cols,
        }
    }

    /// Top-left pixel of a cell.
    pub fn pixel_origin(&self, cell: CellCoord) -> (u32, u32) {
        (cell.col * self.cell_size, cell.row * self.cell_size)
    }

    /// Sheet width in pixels.
    pub fn width(&self) -> u32 {
        self.cols * self.cell_size
    }

    /// Sheet height in pixels.
    pub fn height(&self) -> u32 {
        self.rows * self.cell_size
    }

    /// Total cells in the grid (may exceed the item count).
    pub fn capacity(&self) -> u32 {
        self.cols * self.rows
    }
}
