//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, COLS, ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_GAP: u16 = 2;
const MIN_PANEL_W: u16 = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the bordered board lands in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the border
    pub x: u16,
    pub y: u16,
    /// Border size, including the border itself
    pub frame_w: u16,
    pub frame_h: u16,
}

/// Transient effects layered over the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Effects<'a> {
    /// Board rows to flash (rows just cleared)
    pub flash_rows: &'a [u8],
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let frame_w = COLS as u16 * self.cell_w + 2;
        let frame_h = ROWS as u16 * self.cell_h + 2;
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            x,
            y,
            frame_w,
            frame_h,
        }
    }

    /// Board column under terminal column `term_x`
    ///
    /// `None` when the pointer is outside the bordered board horizontally.
    /// The border columns map to -1 and `COLS`; the engine clamps.
    pub fn board_column_at(&self, viewport: Viewport, term_x: u16) -> Option<i8> {
        let layout = self.layout(viewport);
        if term_x < layout.x || term_x >= layout.x + layout.frame_w {
            return None;
        }
        let inner = term_x as i32 - (layout.x as i32 + 1);
        let col = inner.div_euclid(self.cell_w as i32);
        Some(col.clamp(-1, COLS as i32) as i8)
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        effects: Effects<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        self.draw_border(fb, layout, border);

        for row in 0..ROWS {
            for col in 0..COLS {
                match snap.cell(col as usize, row as usize) {
                    Some(kind) => self.draw_block(fb, layout, col as i8, row as i8, kind),
                    None => self.draw_empty_cell(fb, layout, col as i8, row as i8),
                }
            }
        }

        if snap.playable() {
            self.draw_ghost(fb, layout, &snap.current, snap.ghost_y);
        }

        let flash = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(90, 90, 100)).bold();
        for &row in effects.flash_rows {
            for col in 0..COLS as i8 {
                self.fill_board_cell(fb, layout, col, row as i8, '▓', flash);
            }
        }
        for (col, row) in piece_cells(&snap.current, snap.current.y) {
            self.draw_block(fb, layout, col, row, snap.current.kind());
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            self.draw_game_over(fb, layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, Effects::default(), viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: BoardLayout, style: CellStyle) {
        let BoardLayout {
            x,
            y,
            frame_w: w,
            frame_h: h,
        } = layout;

        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, ' ', CellStyle::new(BOARD_BG, BOARD_BG));

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: BoardLayout, col: i8, row: i8) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_board_cell(fb, layout, col, row, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: BoardLayout, col: i8, row: i8, kind: PieceKind) {
        let style = CellStyle::new(Rgb::from_tuple(kind.color_rgb()), BOARD_BG).bold();
        self.fill_board_cell(fb, layout, col, row, '█', style);
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, layout: BoardLayout, piece: &PieceSnapshot, ghost_y: i8) {
        if ghost_y == piece.y {
            return;
        }
        let tint = Rgb::from_tuple(piece.kind().color_rgb()).mix(BOARD_BG, 140);
        let style = CellStyle::new(tint, BOARD_BG).dim();
        for (col, row) in piece_cells(piece, ghost_y) {
            self.fill_board_cell(fb, layout, col, row, '░', style);
        }
    }

    /// Paint one board cell; cells outside the board are clipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        col: i8,
        row: i8,
        ch: char,
        style: CellStyle,
    ) {
        if !(0..COLS as i8).contains(&col) || !(0..ROWS as i8).contains(&row) {
            return;
        }
        let px = layout.x + 1 + col as u16 * self.cell_w;
        let py = layout.y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout.x + layout.frame_w + PANEL_GAP;
        if panel_x >= viewport.width || viewport.width - panel_x < MIN_PANEL_W {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = layout.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("LEVEL", snap.level),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        let next_kind = snap.next.kind();
        let next_style = CellStyle::new(Rgb::from_tuple(next_kind.color_rgb()), Rgb::new(0, 0, 0));
        for (col, row) in snap.next.shape.cells() {
            fb.fill_rect(
                panel_x + col as u16 * self.cell_w,
                y + row as u16,
                self.cell_w,
                1,
                '█',
                next_style,
            );
        }
        y += snap.next.shape.height() as u16 + 1;

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y + 1, snap.drop_interval_ms, value);
        fb.put_str(panel_x + digits(snap.drop_interval_ms), y + 1, "ms", value);
        y += 3;

        if snap.soft_drop {
            fb.put_str(panel_x, y, "SOFT DROP", value.dim());
        }
        y += 2;

        let hint = value.dim();
        for line in ["←→ move  ↑ rotate", "↓ soft  ␣ drop", "r reset  q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: BoardLayout) {
        let mid_y = layout.y + layout.frame_h / 2;
        let title = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let hint = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.put_centered(fb, layout, mid_y.saturating_sub(1), "GAME OVER", title);
        self.put_centered(fb, layout, mid_y + 1, "r to restart", hint);
    }

    fn put_centered(&self, fb: &mut FrameBuffer, layout: BoardLayout, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = layout.x + layout.frame_w.saturating_sub(text_w) / 2;
        fb.put_str(x, y, text, style);
    }
}

fn piece_cells(piece: &PieceSnapshot, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
    piece
        .shape
        .cells()
        .map(move |(c, r)| (piece.x + c, y.saturating_add(r)))
}

fn digits(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_centers_board() {
        let view = GameView::default();
        let layout = view.layout(Viewport::new(80, 24));
        assert_eq!(layout.frame_w, 22);
        assert_eq!(layout.frame_h, 22);
        assert_eq!(layout.x, 29);
        assert_eq!(layout.y, 1);
    }

    #[test]
    fn board_column_lookup() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        // Border at x=29, first cell spans 30..=31
        assert_eq!(view.board_column_at(vp, 28), None);
        assert_eq!(view.board_column_at(vp, 29), Some(-1));
        assert_eq!(view.board_column_at(vp, 30), Some(0));
        assert_eq!(view.board_column_at(vp, 31), Some(0));
        assert_eq!(view.board_column_at(vp, 32), Some(1));
        assert_eq!(view.board_column_at(vp, 49), Some(9));
        assert_eq!(view.board_column_at(vp, 50), Some(10));
        assert_eq!(view.board_column_at(vp, 51), None);
    }

    #[test]
    fn digit_count() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(450), 3);
        assert_eq!(digits(u32::MAX), 10);
    }
}
