//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges 0..19 (top to bottom)
//!
//! Rows above the board (row < 0) are open space: a piece may hang partly
//! above the top edge, but nothing is ever stored there.

use arrayvec::ArrayVec;

use crate::shapes::Shape;
use crate::types::{Cell, COLS, ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (COLS as usize) * (ROWS as usize);

/// Indices of rows removed by one clear, top to bottom
pub type ClearedRows = ArrayVec<u8, { ROWS as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i16, row: i16) -> Option<usize> {
        if col < 0 || col >= COLS as i16 || row < 0 || row >= ROWS as i16 {
            return None;
        }
        Some((row as usize) * (COLS as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        COLS
    }

    pub fn height(&self) -> u8 {
        ROWS
    }

    /// Get cell at (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col as i16, row as i16).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col as i16, row as i16) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may not occupy (col, row)
    ///
    /// Anything above the board is free, so pieces can enter from the top.
    /// Below the floor, left or right of the walls, or on a filled cell is
    /// occupied.
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        self.is_occupied_at(col as i16, row as i16)
    }

    #[inline(always)]
    fn is_occupied_at(&self, col: i16, row: i16) -> bool {
        if col < 0 || col >= COLS as i16 || row >= ROWS as i16 {
            return true;
        }
        if row < 0 {
            return false;
        }
        match Self::index(col, row) {
            Some(idx) => self.cells[idx].is_some(),
            None => true,
        }
    }

    /// Check whether `shape` placed with its top-left at (x, y) hits a wall,
    /// the floor, or a filled cell
    ///
    /// Cells above the board only ever collide with the side walls.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .cells()
            .any(|(c, r)| self.is_occupied_at(x as i16 + c as i16, y as i16 + r as i16))
    }

    /// Write the shape's cells into the board, tagged with the shape's kind
    ///
    /// Cells above the top edge are skipped; the engine treats a lock that
    /// reaches there as game over before calling this.
    pub fn commit(&mut self, shape: &Shape, x: i8, y: i8) {
        let kind = shape.kind();
        for (c, r) in shape.cells() {
            if let Some(idx) = Self::index(x as i16 + c as i16, y as i16 + r as i16) {
                self.cells[idx] = Some(kind);
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS as usize {
            return false;
        }
        let start = row * COLS as usize;
        let end = start + COLS as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no filled cells
    pub fn is_row_empty(&self, row: usize) -> bool {
        if row >= ROWS as usize {
            return true;
        }
        let start = row * COLS as usize;
        let end = start + COLS as usize;
        self.cells[start..end].iter().all(|cell| cell.is_none())
    }

    /// Remove every full row and return their indices (top to bottom)
    ///
    /// Remaining rows keep their order and settle at the bottom; the same
    /// number of empty rows appear at the top. Works for any set of full rows,
    /// contiguous or not. Uses a two-pointer pass with no allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = COLS as usize;
        let mut write_row = ROWS as usize;

        // Scan from bottom to top
        for read_row in (0..ROWS as usize).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row as u8);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src_start = read_row * width;
                    let dst_start = write_row * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Everything above the last written row is now empty
        self.cells[..write_row * width].fill(None);

        cleared_rows.reverse();
        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether no cell is filled
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Export as grid codes (0 = empty, 1..=7 = piece kind)
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS as usize]; ROWS as usize]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            let start = row * COLS as usize;
            for (col, out_cell) in out_row.iter_mut().enumerate() {
                *out_cell = self.cells[start + col].map(|k| k.code()).unwrap_or(0);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), ROWS as usize);
        assert!(cells_2d.iter().all(|row| row.len() == COLS as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * COLS as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let width = COLS as usize;
        (0..ROWS as usize)
            .map(|y| {
                let start = y * width;
                self.cells[start..start + width].to_vec()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
