//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! A terminal cannot show a 3D stack directly, so the field is drawn twice:
//!
//! - **Top view** (rows x cols): every column shows its tallest block, colored
//!   by the block's piece and labeled with the column height. The ghost and the
//!   active piece are drawn over it. Mouse steering targets this view.
//! - **Front elevation** (levels x cols): every level/column pair shows the
//!   block nearest to the viewer, who looks from the last row toward row 0.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

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

/// Screen rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && y >= self.y && x - self.x < self.w && y - self.y < self.h
    }
}

/// Where the two views and the panel land for a given field and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Inner area of the top view (without border)
    pub top: Rect,
    /// Inner area of the front elevation (without border)
    pub front: Rect,
    pub panel_x: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the 3D field.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    /// Screen placement for a field of the snapshot's dimensions.
    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let inner_w = (snap.num_cols as u16).saturating_mul(self.cell_w);
        let frame_w = inner_w.saturating_add(2);
        let top_frame_h = (snap.num_rows as u16).saturating_add(2);
        let front_frame_h = (snap.num_levels as u16).saturating_add(2);
        let total_h = top_frame_h + 1 + front_frame_h;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        let front_y = start_y + top_frame_h + 1;

        Layout {
            top: Rect {
                x: start_x + 1,
                y: start_y + 1,
                w: inner_w,
                h: snap.num_rows as u16,
            },
            front: Rect {
                x: start_x + 1,
                y: front_y + 1,
                w: inner_w,
                h: snap.num_levels as u16,
            },
            panel_x: start_x.saturating_add(frame_w).saturating_add(2),
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        for rect in [layout.top, layout.front] {
            fb.fill_rect(rect.x, rect.y, rect.w, rect.h, ' ', CellStyle::new(FIELD_BG, FIELD_BG));
            draw_border(
                fb,
                rect.x.saturating_sub(1),
                rect.y.saturating_sub(1),
                rect.w + 2,
                rect.h + 2,
                border,
            );
        }

        self.draw_top_view(fb, snap, layout.top);
        self.draw_front_view(fb, snap, layout.front);
        self.draw_side_panel(fb, snap, viewport, &layout);

        let text = if snap.paused {
            Some("PAUSED")
        } else if snap.game_over {
            Some("GAME OVER")
        } else {
            None
        };
        if let Some(text) = text {
            draw_overlay_text(fb, layout.top, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_top_view(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, rect: Rect) {
        let empty = CellStyle {
            dim: true,
            ..CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG)
        };

        for row in 0..snap.num_rows {
            for col in 0..snap.num_cols {
                let top = (0..snap.num_levels)
                    .rev()
                    .find_map(|level| piece_at(snap, level, row, col).map(|kind| (level, kind)));
                match top {
                    Some((level, kind)) => {
                        // brighter means taller
                        let shade = 0.35 + 0.65 * (level + 1) as f32 / snap.num_levels as f32;
                        let style = CellStyle {
                            bold: true,
                            ..CellStyle::new(Rgb::new(0, 0, 0), piece_color(kind).dimmed(shade))
                        };
                        self.fill_cell(fb, rect, col, row, ' ', style);
                        let label = height_label(level + 1);
                        fb.put_char(rect.x + col as u16 * self.cell_w + self.cell_w - 1, rect.y + row as u16, label, style);
                    }
                    None => self.fill_cell(fb, rect, col, row, '·', empty),
                }
            }
        }

        if let Some(ghost) = snap.ghost.as_ref() {
            let style = CellStyle {
                dim: true,
                ..CellStyle::new(piece_color_of(ghost), FIELD_BG)
            };
            for [col, _, row] in ghost.cells() {
                if let Some((col, row)) = in_footprint(snap, col, row) {
                    self.fill_cell(fb, rect, col, row, '░', style);
                }
            }
        }

        if let Some(active) = snap.active.as_ref() {
            let style = CellStyle {
                bold: true,
                ..CellStyle::new(piece_color_of(active), FIELD_BG)
            };
            for [col, _, row] in active.cells() {
                if let Some((col, row)) = in_footprint(snap, col, row) {
                    self.fill_cell(fb, rect, col, row, '█', style);
                }
            }
        }
    }

    fn draw_front_view(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, rect: Rect) {
        let levels = snap.num_levels;

        for level in 0..levels {
            let y = (levels - 1 - level) as u16;
            for col in 0..snap.num_cols {
                let nearest = (0..snap.num_rows)
                    .rev()
                    .find_map(|row| piece_at(snap, level, row, col).map(|kind| (row, kind)));
                if let Some((row, kind)) = nearest {
                    let shade = 0.45 + 0.55 * (row + 1) as f32 / snap.num_rows as f32;
                    let style = CellStyle::new(piece_color(kind).dimmed(shade), FIELD_BG);
                    self.fill_cell_at(fb, rect, col, y, '█', style);
                }
            }
        }

        if let Some(ghost) = snap.ghost.as_ref() {
            let style = CellStyle {
                dim: true,
                ..CellStyle::new(piece_color_of(ghost), FIELD_BG)
            };
            for [col, level, _] in ghost.cells() {
                if let Some((col, y)) = in_elevation(snap, col, level) {
                    self.fill_cell_at(fb, rect, col, y, '░', style);
                }
            }
        }

        if let (Some(active), Some(depth)) = (snap.active.as_ref(), snap.depth) {
            let color = piece_color_of(active);
            for [col, level, row] in active.cells() {
                if let Some((col, y)) = in_elevation(snap, col, level) {
                    // cells behind the piece's front face are drawn dim
                    let style = CellStyle {
                        bold: row == depth,
                        dim: row < depth,
                        ..CellStyle::new(color, FIELD_BG)
                    };
                    self.fill_cell_at(fb, rect, col, y, '█', style);
                }
            }
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, rect: Rect, col: usize, row: usize, ch: char, style: CellStyle) {
        self.fill_cell_at(fb, rect, col, row as u16, ch, style);
    }

    fn fill_cell_at(&self, fb: &mut FrameBuffer, rect: Rect, col: usize, y: u16, ch: char, style: CellStyle) {
        let px = rect.x + col as u16 * self.cell_w;
        fb.fill_rect(px, rect.y + y, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: &Layout) {
        let panel_x = layout.panel_x;
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.top.y.saturating_sub(1);
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVELS", snap.levels_cleared),
            ("PIECES", snap.pieces_placed),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_fixed(panel_x, y + 1, snap.fall_speed, 3, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        if let Some(next) = snap.next.as_ref() {
            let kind = PieceKind::from_id(next.id);
            let style = CellStyle {
                bold: true,
                ..CellStyle::new(piece_color_of(next), PANEL_BG)
            };
            fb.put_str(panel_x, y + 1, kind.map(piece_name).unwrap_or("-"), style);
        }
    }
}

fn piece_at(snap: &GameSnapshot, level: usize, row: usize, col: usize) -> Option<PieceKind> {
    snap.cell(level, row, col).and_then(PieceKind::from_id)
}

fn in_footprint(snap: &GameSnapshot, col: i32, row: i32) -> Option<(usize, usize)> {
    let (col, row) = (usize::try_from(col).ok()?, usize::try_from(row).ok()?);
    (col < snap.num_cols && row < snap.num_rows).then_some((col, row))
}

/// Screen line of a level in the front elevation, `None` off the field
fn in_elevation(snap: &GameSnapshot, col: i32, level: i32) -> Option<(usize, u16)> {
    let (col, level) = (usize::try_from(col).ok()?, usize::try_from(level).ok()?);
    (col < snap.num_cols && level < snap.num_levels)
        .then_some((col, (snap.num_levels - 1 - level) as u16))
}

fn height_label(height: usize) -> char {
    match height {
        1..=9 => char::from(b'0' + height as u8),
        _ => '+',
    }
}

/// Block colors, one per piece id
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0x00, 0xc4, 0xc7),
        PieceKind::L => Rgb::new(0xff, 0x8e, 0x24),
        PieceKind::S => Rgb::new(0xfc, 0x14, 0x14),
        PieceKind::O => Rgb::new(0xf0, 0xff, 0x24),
        PieceKind::RightScrew => Rgb::new(0xff, 0x24, 0x95),
        PieceKind::LeftScrew => Rgb::new(0x36, 0x24, 0xff),
        PieceKind::Branch => Rgb::new(0x24, 0xff, 0x57),
        PieceKind::T => Rgb::new(0xbd, 0x24, 0xff),
    }
}

fn piece_color_of(piece: &PieceSnapshot) -> Rgb {
    PieceKind::from_id(piece.id)
        .map(piece_color)
        .unwrap_or(Rgb::new(200, 200, 200))
}

fn piece_name(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::L => "L",
        PieceKind::S => "S",
        PieceKind::O => "O",
        PieceKind::RightScrew => "SCREW R",
        PieceKind::LeftScrew => "SCREW L",
        PieceKind::Branch => "BRANCH",
        PieceKind::T => "T",
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

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

fn draw_overlay_text(fb: &mut FrameBuffer, rect: Rect, text: &str) {
    let mid_y = rect.y.saturating_add(rect.h / 2);
    let text_w = text.chars().count() as u16;
    let x = rect.x.saturating_add(rect.w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        bold: true,
        ..CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG)
    };
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(levels: usize, rows: usize, cols: usize) -> GameSnapshot {
        GameSnapshot {
            num_levels: levels,
            num_rows: rows,
            num_cols: cols,
            cells: vec![0; levels * rows * cols],
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn layout_stacks_front_view_below_top_view() {
        let view = GameView::default();
        let layout = view.layout(&snapshot(8, 6, 6), Viewport::new(80, 30));
        assert_eq!(layout.top.w, 12);
        assert_eq!(layout.top.h, 6);
        assert_eq!(layout.front.h, 8);
        assert_eq!(layout.front.y, layout.top.y + layout.top.h + 3);
        assert_eq!(layout.front.x, layout.top.x);
    }

    #[test]
    fn height_labels() {
        assert_eq!(height_label(1), '1');
        assert_eq!(height_label(9), '9');
        assert_eq!(height_label(12), '+');
    }

    #[test]
    fn elevation_flips_levels() {
        let snap = snapshot(8, 6, 6);
        assert_eq!(in_elevation(&snap, 2, 0), Some((2, 7)));
        assert_eq!(in_elevation(&snap, 2, 7), Some((2, 0)));
        assert_eq!(in_elevation(&snap, 2, 8), None);
        assert_eq!(in_elevation(&snap, -1, 3), None);
    }
}
