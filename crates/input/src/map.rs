//! Key and mouse mapping from terminal events to engine commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::types::Command;

/// Map a key press to an engine command.
///
/// The soft drop key maps to `SoftDrop(true)`; the runner releases it through
/// [`crate::SoftDropLatch`] since most terminals never report key release.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::SoftDrop(true))
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::Rotate),

        KeyCode::Char(' ') => Some(Command::HardDrop),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),

        _ => None,
    }
}

/// Whether a released key ends soft drop (terminals with release reporting).
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S')
    )
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Pointer gestures, in terminal coordinates.
///
/// Column lookup depends on the layout, so dragging reports the raw cell
/// and the renderer's view translates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Rotate,
    HardDrop,
    DragTo { x: u16, y: u16 },
}

/// Map a mouse event: left click rotates, right click hard-drops, left drag
/// follows the pointer.
pub fn handle_mouse_event(mouse: MouseEvent) -> Option<MouseAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(MouseAction::Rotate),
        MouseEventKind::Down(MouseButton::Right) => Some(MouseAction::HardDrop),
        MouseEventKind::Drag(MouseButton::Left) => Some(MouseAction::DragTo {
            x: mouse.column,
            y: mouse.row,
        }),
        _ => None,
    }
}
