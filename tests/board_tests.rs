//! Board tests - grid storage, collisions and line clearing

use tui_blockfall::core::{Board, Shape};
use tui_blockfall::types::{PieceKind, COLS, ROWS};

fn fill_row_except(board: &mut Board, row: i8, gap: Option<i8>, kind: PieceKind) {
    for col in 0..COLS as i8 {
        if Some(col) != gap {
            board.set(col, row, Some(kind));
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), COLS);
    assert_eq!(board.height(), ROWS);

    for row in 0..ROWS as i8 {
        for col in 0..COLS as i8 {
            assert_eq!(board.get(col, row), Some(None));
        }
    }
    assert!(board.is_empty());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(COLS as i8, 0), None);
    assert_eq!(board.get(0, ROWS as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, ROWS as i8, Some(PieceKind::T)));
}

#[test]
fn test_collision_with_walls_floor_and_cells() {
    let mut board = Board::new();
    let o = Shape::base(PieceKind::O);

    assert!(!board.collides(&o, 0, 0));
    assert!(!board.collides(&o, 8, 18));
    assert!(board.collides(&o, -1, 0));
    assert!(board.collides(&o, 9, 0));
    assert!(board.collides(&o, 0, 19));

    board.set(1, 5, Some(PieceKind::Z));
    assert!(board.collides(&o, 0, 4));
    assert!(board.collides(&o, 1, 5));
    assert!(!board.collides(&o, 2, 4));
}

#[test]
fn test_cells_above_top_never_collide_with_stack() {
    let mut board = Board::new();
    fill_row_except(&mut board, 0, None, PieceKind::S);
    let vertical_i = Shape::base(PieceKind::I).rotate_cw();

    // Entirely above the board
    assert!(!board.collides(&vertical_i, 4, -4));
    // Bottom cell reaches row 0
    assert!(board.collides(&vertical_i, 4, -3));
}

#[test]
fn test_commit_tags_cells_with_kind() {
    let mut board = Board::new();
    let t = Shape::base(PieceKind::T);
    board.commit(&t, 3, 18);

    assert_eq!(board.get(4, 18), Some(Some(PieceKind::T)));
    assert_eq!(board.get(3, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(5, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(3, 18), Some(None));
    assert_eq!(board.filled_count(), 4);
}

#[test]
fn test_no_full_rows_is_a_no_op() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, Some(4), PieceKind::J);
    let before = board.clone();

    let cleared = board.clear_full_rows();
    assert!(cleared.is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_clear_shifts_rows_above_down() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, None, PieceKind::L);
    fill_row_except(&mut board, 18, Some(0), PieceKind::J);
    board.set(7, 10, Some(PieceKind::T));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19]);

    // Row 18 moved to 19 with its gap intact
    assert_eq!(board.get(0, 19), Some(None));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::J)));
    assert_eq!(board.get(7, 11), Some(Some(PieceKind::T)));
    assert!(board.is_row_empty(0));
}

#[test]
fn test_clear_interleaved_rows() {
    let mut board = Board::new();
    // Full, partial, full, partial from the bottom up
    fill_row_except(&mut board, 19, None, PieceKind::I);
    board.set(2, 18, Some(PieceKind::O));
    fill_row_except(&mut board, 17, None, PieceKind::I);
    board.set(5, 16, Some(PieceKind::S));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[17, 19]);

    assert_eq!(board.get(2, 19), Some(Some(PieceKind::O)));
    assert_eq!(board.get(5, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_clear_whole_board() {
    let mut board = Board::new();
    for row in 0..ROWS as i8 {
        fill_row_except(&mut board, row, None, PieceKind::Z);
    }

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), ROWS as usize);
    assert!(board.is_empty());
}

#[test]
fn test_clear_rows_zero_and_two() {
    let mut board = Board::new();
    fill_row_except(&mut board, 0, None, PieceKind::T);
    board.set(3, 1, Some(PieceKind::O));
    fill_row_except(&mut board, 2, None, PieceKind::T);
    board.set(6, 3, Some(PieceKind::J));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[0, 2]);

    assert!(board.is_row_empty(0));
    assert!(board.is_row_empty(1));
    assert_eq!(board.get(3, 2), Some(Some(PieceKind::O)));
    // Row 3 had nothing cleared below it
    assert_eq!(board.get(6, 3), Some(Some(PieceKind::J)));
    assert_eq!(board.filled_count(), 2);
}
