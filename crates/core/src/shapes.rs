//! Shape catalog - the seven base shapes and the clockwise rotation transform
//!
//! A shape is a small rectangular boolean matrix stored inline (no heap), so
//! rotating produces a fresh value and the catalog is never mutated.

use crate::rng::SimpleRng;
use crate::types::PieceKind;

/// Largest extent of any shape in either direction
pub const MAX_SHAPE_SIZE: usize = 4;

/// Immutable shape matrix with its kind (color)
///
/// Only the `height x width` top-left region of `cells` is meaningful; the
/// rest is always `false` so derived equality compares shapes cell-for-cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of equal length
    ///
    /// Returns `None` for an empty matrix, ragged rows, or anything larger
    /// than 4x4.
    pub fn from_rows(kind: PieceKind, rows: &[&[bool]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len())?;
        if height == 0
            || width == 0
            || height > MAX_SHAPE_SIZE
            || width > MAX_SHAPE_SIZE
            || rows.iter().any(|r| r.len() != width)
        {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            cells[r][..width].copy_from_slice(row);
        }

        Some(Self {
            kind,
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// Base (spawn orientation) shape for a kind
    pub fn base(kind: PieceKind) -> Self {
        const X: bool = true;
        const O: bool = false;
        let (width, height, rows): (u8, u8, [[bool; MAX_SHAPE_SIZE]; 2]) = match kind {
            PieceKind::I => (4, 1, [[X, X, X, X], [O, O, O, O]]),
            PieceKind::O => (2, 2, [[X, X, O, O], [X, X, O, O]]),
            PieceKind::T => (3, 2, [[O, X, O, O], [X, X, X, O]]),
            PieceKind::J => (3, 2, [[X, O, O, O], [X, X, X, O]]),
            PieceKind::L => (3, 2, [[O, O, X, O], [X, X, X, O]]),
            PieceKind::S => (3, 2, [[O, X, X, O], [X, X, O, O]]),
            PieceKind::Z => (3, 2, [[X, X, O, O], [O, X, X, O]]),
        };

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        cells[0] = rows[0];
        cells[1] = rows[1];

        Self {
            kind,
            width,
            height,
            cells,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at (col, row) inside the bounding box is occupied
    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        col < self.width && row < self.height && self.cells[row as usize][col as usize]
    }

    /// Occupied cells as (col, row) offsets from the top-left of the bounding box
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height).flat_map(move |r| {
            (0..self.width)
                .filter(move |&c| self.cells[r as usize][c as usize])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate 90° clockwise: transpose, then reverse the row order
    ///
    /// ```
    /// use tui_blockfall_core::Shape;
    /// use tui_blockfall_types::PieceKind;
    ///
    /// let i = Shape::base(PieceKind::I);
    /// let vertical = i.rotate_cw();
    /// assert_eq!((vertical.width(), vertical.height()), (1, 4));
    /// assert_eq!(vertical.rotate_cw().rotate_cw().rotate_cw(), i);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        let h = self.height as usize;
        let w = self.width as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        // new[r][c] = old[h - 1 - c][r]
        for (r, row) in cells.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - c][r];
            }
        }

        Self {
            kind: self.kind,
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Pick one of the seven base shapes, independently and uniformly
///
/// Repeats are possible; there is no bag or history.
pub fn random_shape(rng: &mut SimpleRng) -> Shape {
    let idx = rng.next_range(PieceKind::ALL.len() as u32) as usize;
    Shape::base(PieceKind::ALL[idx])
}
