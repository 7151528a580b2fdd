//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{cell_color, Cell as GridCell, Status};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Position and size of the bordered playfield.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only reallocated
    /// when the viewport size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let w = snap.width.saturating_mul(self.cell_w).saturating_add(2);
        let h = snap.height.saturating_mul(self.cell_h).saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        self.draw_border(fb, frame);

        // Locked cells and the falling piece share one pass.
        for y in 0..snap.height {
            for x in 0..snap.width {
                self.draw_grid_cell(fb, frame, x, y, snap.visible_cell(x, y).flatten());
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.status {
            Status::Paused => self.draw_overlay_text(fb, frame, "PAUSED"),
            Status::GameOver => self.draw_overlay_text(fb, frame, "GAME OVER"),
            Status::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        if f.w < 2 || f.h < 2 {
            return;
        }
        let style = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let right = f.x + f.w - 1;
        let bottom = f.y + f.h - 1;

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(right, f.y, '┐', style);
        fb.put_char(f.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    fn draw_grid_cell(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, cell: GridCell) {
        let base = CellStyle::plain(cell_color(cell), PLAY_BG);
        let (ch, style) = match cell {
            Some(_) => ('█', base.bold()),
            None => ('·', base.dim()),
        };
        self.fill_cell_rect(fb, f, x, y, ch, style);
    }

    fn fill_cell_rect(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = f.x.saturating_add(1).saturating_add(x.saturating_mul(self.cell_w));
        let py = f.y.saturating_add(1).saturating_add(y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let rows: [(&str, u32); 4] = [
            ("SCORE", snap.score),
            ("TOP", snap.top_score),
            ("LINES", snap.lines),
            ("SPEED", snap.tick_interval_ms),
        ];

        let mut y = f.y;
        for (name, v) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "STATUS", label);
        fb.put_str(panel_x, y.saturating_add(1), status_label(snap.status), value);
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, f: Frame, text: &str) {
        let mid_y = f.y.saturating_add(f.h / 2);
        let text_w = text.chars().count() as u16;
        let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
        let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn status_label(status: Status) -> &'static str {
    match status {
        Status::Running => "PLAYING",
        Status::Paused => "PAUSED",
        Status::GameOver => "GAME OVER",
    }
}
