//! Engine scenarios driven through the public API

use tui_blockfall::core::{GameState, Piece, Shape};
use tui_blockfall::types::{
    Command, GamePhase, PieceKind, BASE_DROP_MS, COLS, DROP_STEP_MS, ROWS, SOFT_DROP_MS,
};

fn horizontal_i(x: i8, y: i8) -> Piece {
    Piece {
        shape: Shape::base(PieceKind::I),
        x,
        y,
    }
}

fn vertical_i(x: i8, y: i8) -> Piece {
    Piece {
        shape: Shape::base(PieceKind::I).rotate_cw(),
        x,
        y,
    }
}

/// Place a piece at its resting spot and lock it without drop bonus
fn lock_at(game: &mut GameState, piece: Piece) {
    assert!(game.set_current(piece), "piece does not fit: {piece:?}");
    assert!(!game.soft_drop_step(), "piece was not resting: {piece:?}");
}

#[test]
fn test_move_left_stops_at_wall() {
    let mut game = GameState::new(12345);
    let start_x = game.current().x;

    let mut successes = 0;
    for _ in 0..COLS {
        if game.move_left() {
            successes += 1;
        }
        assert!(game.current().x >= 0);
    }

    assert_eq!(successes, start_x);
    assert_eq!(game.current().x, 0);
    assert!(!game.move_left());
}

#[test]
fn test_move_right_stops_at_wall() {
    let mut game = GameState::new(777);
    for _ in 0..COLS {
        game.move_right();
    }
    let piece = game.current();
    assert_eq!(piece.x + piece.shape.width() as i8, COLS as i8);
}

#[test]
fn test_filling_gap_with_vertical_i_clears_one_line() {
    let mut game = GameState::new(5);

    lock_at(&mut game, horizontal_i(0, 19));
    lock_at(&mut game, horizontal_i(4, 19));
    lock_at(&mut game, vertical_i(8, 16));
    assert_eq!(game.lines(), 0);
    assert_eq!(game.score(), 0);

    lock_at(&mut game, vertical_i(9, 16));

    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 100);
    assert_eq!(game.level(), 1);

    let ev = game.take_last_event().expect("lock event");
    assert_eq!(ev.cleared_rows.as_slice(), &[19]);
    assert_eq!(ev.line_clear_score, 100);

    // Only the upper parts of the two vertical pieces remain
    let board = game.board();
    assert_eq!(board.filled_count(), 6);
    for row in 17..20 {
        assert_eq!(board.get(8, row), Some(Some(PieceKind::I)));
        assert_eq!(board.get(9, row), Some(Some(PieceKind::I)));
    }
}

#[test]
fn test_two_non_adjacent_rows_clear_together() {
    let mut game = GameState::new(8);
    {
        let board = game.board_mut();
        for col in 0..9 {
            board.set(col, 19, Some(PieceKind::S));
            board.set(col, 17, Some(PieceKind::S));
        }
        // Row 18 keeps a hole so it survives
        for col in 0..8 {
            board.set(col, 18, Some(PieceKind::Z));
        }
    }

    lock_at(&mut game, vertical_i(9, 16));

    assert_eq!(game.lines(), 2);
    assert_eq!(game.score(), 300);
    let ev = game.take_last_event().unwrap();
    assert_eq!(ev.cleared_rows.as_slice(), &[17, 19]);

    let board = game.board();
    // Old row 18 (with I cell at col 9) is now the bottom row
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::Z)));
    assert_eq!(board.get(8, 19), Some(None));
    assert_eq!(board.get(9, 19), Some(Some(PieceKind::I)));
    // Old row 16 dropped two rows
    assert_eq!(board.get(9, 18), Some(Some(PieceKind::I)));
}

#[test]
fn test_level_and_interval_follow_lines() {
    let mut game = GameState::new(1);
    for round in 0..3 {
        {
            let board = game.board_mut();
            for row in 16..20 {
                for col in 0..9 {
                    board.set(col, row, Some(PieceKind::O));
                }
            }
        }
        lock_at(&mut game, vertical_i(9, 16));
        assert_eq!(game.lines(), 4 * (round + 1));
    }

    assert_eq!(game.lines(), 12);
    assert_eq!(game.score(), 2400);
    assert_eq!(game.level(), 2);
    assert_eq!(game.drop_interval_ms(), BASE_DROP_MS - DROP_STEP_MS);
}

#[test]
fn test_lock_above_top_is_game_over_with_board_untouched() {
    let mut game = GameState::new(3);
    game.board_mut().set(0, 19, Some(PieceKind::T));
    let before = game.board().clone();

    let spawned = game.current();
    assert!(spawned.is_above_top());
    game.lock_current();

    assert!(game.game_over());
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.board(), &before);
    assert!(game.take_last_event().unwrap().topped_out);
}

#[test]
fn test_stack_at_top_ends_game_through_gravity() {
    let mut game = GameState::new(3);
    for col in 0..COLS as i8 {
        if col != 0 {
            game.board_mut().set(col, 0, Some(PieceKind::L));
        }
    }

    // The spawned piece cannot enter the board, so the first gravity step locks it
    game.tick(0);
    assert!(game.tick(BASE_DROP_MS as u64));
    assert!(game.game_over());

    // Ticks and commands are inert afterwards
    let snap = game.snapshot();
    assert!(!game.tick(10 * BASE_DROP_MS as u64));
    for cmd in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::SoftDrop(true),
        Command::SoftDropStep,
        Command::HardDrop,
    ] {
        assert!(!game.apply(cmd), "{cmd:?} should be rejected");
    }
    assert_eq!(game.snapshot(), snap);
}

#[test]
fn test_hard_drop_moves_k_rows_and_scores_2k() {
    let mut game = GameState::new(4);
    for col in 0..COLS as i8 {
        if col != 9 {
            game.board_mut().set(col, 15, Some(PieceKind::J));
        }
    }
    let piece = Piece {
        shape: Shape::base(PieceKind::O),
        x: 4,
        y: 0,
    };
    assert!(game.set_current(piece));
    assert_eq!(game.ghost_y(), 13);

    let k = game.hard_drop();

    assert_eq!(k, 13);
    assert_eq!(game.score(), 26);
    assert_eq!(game.board().get(4, 13), Some(Some(PieceKind::O)));
    assert_eq!(game.board().get(5, 14), Some(Some(PieceKind::O)));
}

#[test]
fn test_hard_drop_from_spawn_on_empty_board() {
    let mut game = GameState::new(10);
    let piece = game.current();
    let expected = (ROWS as i8 - piece.shape.height() as i8 - piece.y) as u32;

    assert_eq!(game.hard_drop(), expected);
    assert_eq!(game.score(), 2 * expected);
    assert_eq!(game.board().filled_count(), 4);
}

#[test]
fn test_rotation_kick_order() {
    let mut game = GameState::new(6);
    // x=8, 7 and 9 overflow the right wall; -2 lands at x=6
    assert!(game.set_current(vertical_i(8, 10)));

    assert!(game.rotate());
    assert_eq!(game.current().x, 6);
    assert_eq!(game.current().y, 10);
}

#[test]
fn test_rotation_prefers_plus_one_over_plus_two() {
    let mut game = GameState::new(6);
    assert!(game.set_current(vertical_i(4, 10)));
    // Blocks the bar at x=4 and x=3; x=5 and x=6 would both fit
    game.board_mut().set(4, 10, Some(PieceKind::Z));

    assert!(game.rotate());
    assert_eq!(game.current().x, 5);
}

#[test]
fn test_rotation_rejected_in_narrow_well() {
    let mut game = GameState::new(6);
    for row in 8..ROWS as i8 {
        for col in (0..COLS as i8).filter(|&c| c != 4) {
            game.board_mut().set(col, row, Some(PieceKind::T));
        }
    }
    assert!(game.set_current(vertical_i(4, 10)));
    let before = game.current();

    assert!(!game.rotate());
    assert_eq!(game.current(), before);
}

#[test]
fn test_tick_cadence() {
    let mut game = GameState::new(9);
    let y0 = game.current().y;

    assert!(!game.tick(100));
    assert!(!game.tick(100 + BASE_DROP_MS as u64 - 1));
    assert!(game.tick(100 + BASE_DROP_MS as u64));
    assert_eq!(game.current().y, y0 + 1);

    game.set_soft_drop(true);
    let t = 100 + BASE_DROP_MS as u64;
    assert!(game.tick(t + SOFT_DROP_MS as u64));
    assert_eq!(game.current().y, y0 + 2);
}

#[test]
fn test_reset_restores_initial_state_in_place() {
    let mut game = GameState::new(2);
    // Stack pieces in the spawn columns until they top out
    for _ in 0..200 {
        if game.game_over() {
            break;
        }
        game.hard_drop();
    }
    assert!(game.game_over());
    assert!(game.score() > 0);

    assert!(game.apply(Command::Reset));

    assert!(!game.game_over());
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.drop_interval_ms(), BASE_DROP_MS);
    assert!(!game.soft_drop_active());
    assert!(game.board().is_empty());
    assert!(game.current().is_above_top());
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Command::MoveLeft,
        Command::Rotate,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::HardDrop,
        Command::SoftDropStep,
        Command::Rotate,
        Command::HardDrop,
    ];

    let run = |seed| {
        let mut game = GameState::new(seed);
        for (i, cmd) in script.iter().enumerate() {
            game.apply(*cmd);
            game.tick(i as u64 * 100);
        }
        game.snapshot()
    };

    assert_eq!(run(31337), run(31337));
}

#[test]
fn test_snapshot_reports_ghost_and_next() {
    let mut game = GameState::new(77);
    assert!(game.set_current(horizontal_i(0, 5)));

    let snap = game.snapshot();
    assert_eq!(snap.ghost_y, 19);
    assert_eq!(snap.current.kind(), PieceKind::I);
    assert_eq!(snap.next.kind(), game.next().kind());
    assert_eq!(snap.phase, GamePhase::Active);
}

#[test]
fn test_drag_to_column_centers_piece() {
    let mut game = GameState::new(1);
    assert!(game.set_current(horizontal_i(0, 5)));

    assert!(game.drag_to_column(5));
    assert_eq!(game.current().x, 3);
    assert!(game.drag_to_column(-1));
    assert_eq!(game.current().x, 0);
    assert!(game.drag_to_column(COLS as i8));
    assert_eq!(game.current().x, 6);
}
