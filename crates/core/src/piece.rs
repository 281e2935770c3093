//! Piece module - a shape placed on the board
//!
//! Pieces are small `Copy` values. The engine replaces them wholesale on
//! spawn and lock, and only ever swaps in a new position or shape, so the
//! current and next piece can never alias each other.

use crate::board::Board;
use crate::shapes::Shape;
use crate::types::{PieceKind, COLS};

/// A shape with a board position
///
/// `(x, y)` is the top-left corner of the shape's bounding box in board
/// coordinates. `y` may be negative while the piece is still entering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at its spawn position
    ///
    /// Horizontally centered; the bounding box sits entirely above row 0.
    pub fn spawn(shape: Shape) -> Self {
        Self {
            shape,
            x: (COLS / 2) as i8 - (shape.width() / 2) as i8,
            y: -(shape.height() as i8),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    /// Same piece moved by (dx, dy)
    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Same position with a different shape
    pub fn with_shape(&self, shape: Shape) -> Self {
        Self { shape, ..*self }
    }

    /// Whether the piece overlaps a wall, the floor, or a filled cell
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Occupied cells in board coordinates
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(c, r)| (self.x + c, self.y + r))
    }

    /// Whether any occupied cell is above the top edge
    pub fn is_above_top(&self) -> bool {
        self.shape.cells().any(|(_, r)| self.y as i16 + (r as i16) < 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        let i = Piece::spawn(Shape::base(PieceKind::I));
        assert_eq!((i.x, i.y), (3, -1));

        let o = Piece::spawn(Shape::base(PieceKind::O));
        assert_eq!((o.x, o.y), (4, -2));

        let t = Piece::spawn(Shape::base(PieceKind::T));
        assert_eq!((t.x, t.y), (4, -2));
    }

    #[test]
    fn test_spawned_piece_is_above_top_and_fits() {
        let board = Board::new();
        for kind in PieceKind::ALL {
            let p = Piece::spawn(Shape::base(kind));
            assert!(p.is_above_top());
            assert!(!p.collides(&board));
        }
    }

    #[test]
    fn test_offset_and_with_shape() {
        let p = Piece::spawn(Shape::base(PieceKind::J));
        let moved = p.offset(-1, 2);
        assert_eq!((moved.x, moved.y), (p.x - 1, p.y + 2));
        assert_eq!(moved.shape, p.shape);

        let rotated = p.with_shape(p.shape.rotate_cw());
        assert_eq!((rotated.x, rotated.y), (p.x, p.y));
        assert_ne!(rotated.shape, p.shape);
    }

    #[test]
    fn test_board_cells() {
        let p = Piece {
            shape: Shape::base(PieceKind::O),
            x: 2,
            y: 5,
        };
        let cells: Vec<_> = p.board_cells().collect();
        assert_eq!(cells, vec![(2, 5), (3, 5), (2, 6), (3, 6)]);
        assert!(!p.is_above_top());
    }
}
