//! GameView: maps `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The play area is `SCREEN_WIDTH x SCREEN_HEIGHT` terminal cells, framed by a
//! one-cell border. Play-area coordinates are the same ones the core uses for
//! hit testing, so [`GameView::origin`] is all the input side needs to translate
//! mouse positions.

use crate::core::{calculate_score, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Item, ItemKind, Rect, ScreenPos, CELL_H, CELL_W, GRID_HEIGHT, GRID_WIDTH, SCREEN_HEIGHT,
    SCREEN_WIDTH, SUBMIT_BOX, WIN_CONDITION,
};

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

const FRAME_W: u16 = SCREEN_WIDTH + 2;
const FRAME_H: u16 = SCREEN_HEIGHT + 2;

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const CELL_BG: Rgb = Rgb::new(235, 235, 235);
const GRID_LINE: Rgb = Rgb::new(128, 128, 128);
const TEXT: Rgb = Rgb::new(20, 20, 20);
const HINT: Rgb = Rgb::new(30, 60, 220);

/// A lightweight terminal renderer for the merge game.
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal cell of the play area's top-left corner for this viewport.
    pub fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let start_x = viewport.width.saturating_sub(FRAME_W) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(FRAME_H) / 2,
            AnchorY::Top => 0,
        };
        (start_x + 1, start_y + 1)
    }

    /// The framed play area in terminal cells, clipped to the viewport.
    ///
    /// Nothing is drawn outside it, so this is the only region worth sending.
    pub fn frame_rect(&self, viewport: Viewport) -> Rect {
        let (ox, oy) = self.origin(viewport);
        let (x, y) = (ox - 1, oy - 1);
        Rect::new(
            x,
            y,
            FRAME_W.min(viewport.width.saturating_sub(x)),
            FRAME_H.min(viewport.height.saturating_sub(y)),
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (ox, oy) = self.origin(viewport);

        draw_border(
            fb,
            ox - 1,
            oy - 1,
            FRAME_W,
            FRAME_H,
            CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND),
        );

        let hovered = snap.hovered();
        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                let cx = ox + col as u16 * CELL_W;
                let cy = oy + row as u16 * CELL_H;
                let item = snap.item(row, col).filter(|_| !snap.is_hidden(row, col));
                self.draw_cell(fb, cx, cy, item);

                let Some(item) = item else { continue };
                if item.is_generator() && snap.is_mergeable(row, col) {
                    let style = CellStyle::new(HINT, kind_color(item.kind()));
                    fb.put_str(cx + 1, cy + 1, "Merge!", style);
                }
                if hovered.map(|p| p.row == row && p.col == col).unwrap_or(false) {
                    draw_hover(fb, cx, cy, item);
                }
            }
        }

        draw_submit_box(fb, ox, oy);

        if snap.press_count < 2 {
            fb.put_str(ox + 1, oy + 1, "Click!", CellStyle::new(HINT, CELL_BG).bold());
        }

        self.draw_status(fb, snap, ox, oy);

        if snap.won {
            let text = "YOU WIN!";
            let x = ox + (SCREEN_WIDTH - text.len() as u16) / 2;
            let y = oy + (GRID_HEIGHT as u16 * CELL_H) / 2;
            fb.put_str(x, y, text, CellStyle::new(Rgb::new(0, 128, 0), BACKGROUND).bold());
        }

        if let Some(drag) = snap.drag.filter(|d| d.detached) {
            draw_floating(fb, ox, oy, drag.pointer, drag.item);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, cx: u16, cy: u16, item: Option<Item>) {
        let bg = item.map(|i| kind_color(i.kind())).unwrap_or(CELL_BG);
        fb.fill_rect(cx, cy, CELL_W, CELL_H, ' ', CellStyle::new(TEXT, bg));
        draw_border(fb, cx, cy, CELL_W, CELL_H, CellStyle::new(GRID_LINE, bg));

        if let Some(item) = item {
            let x = cx + (CELL_W - label_width(item)) / 2;
            put_label(fb, x, cy + CELL_H / 2, item, CellStyle::new(TEXT, bg).bold());
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, ox: u16, oy: u16) {
        let label = CellStyle::new(Rgb::new(255, 255, 255), BACKGROUND);
        let value = CellStyle::new(Rgb::new(220, 220, 220), BACKGROUND).bold();
        let x = ox + 1;
        let mut y = oy + SUBMIT_BOX.y;

        let end = fb.put_str(x, y, "Goal: ", label);
        fb.put_u64(end, y, WIN_CONDITION, value);
        y += 1;

        let end = fb.put_str(x, y, "Reward at: ", label);
        fb.put_u64(end, y, snap.next_goal, value);
        y += 1;

        let end = fb.put_str(x, y, "Score: ", label);
        fb.put_u64(end, y, snap.score, value);

        fb.put_str(x, oy + SCREEN_HEIGHT - 1, "q quit", label.dim());
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

fn draw_hover(fb: &mut FrameBuffer, cx: u16, cy: u16, item: Item) {
    let style = CellStyle::new(TEXT, kind_color(item.kind()));
    let points = calculate_score(item);
    if points > 0 {
        let end = fb.put_u64(cx + 1, cy + 1, points, style);
        fb.put_str(end, cy + 1, " pts", style);
    }
    if item.is_max_level() {
        fb.put_str(cx + 1, cy + CELL_H - 2, "Maxed", style);
    }
}

fn draw_submit_box(fb: &mut FrameBuffer, ox: u16, oy: u16) {
    let style = CellStyle::new(TEXT, Rgb::new(128, 128, 128));
    let (x, y) = (ox + SUBMIT_BOX.x, oy + SUBMIT_BOX.y);
    fb.fill_rect(x, y, SUBMIT_BOX.width, SUBMIT_BOX.height, ' ', style);

    let text = "Submit";
    let tx = x + (SUBMIT_BOX.width - text.len() as u16) / 2;
    fb.put_str(tx, y + SUBMIT_BOX.height / 2, text, style.bold());
}

/// Draw the dragged item centred on the pointer, if the pointer is inside the play area.
fn draw_floating(fb: &mut FrameBuffer, ox: u16, oy: u16, pointer: ScreenPos, item: Item) {
    let inside = (0..SCREEN_WIDTH as i32).contains(&pointer.x)
        && (0..SCREEN_HEIGHT as i32).contains(&pointer.y);
    if !inside {
        return;
    }
    let width = label_width(item) as i32;
    let left = (pointer.x - width / 2).clamp(0, SCREEN_WIDTH as i32 - width) as u16;
    let style = CellStyle::new(TEXT, kind_color(item.kind())).bold();
    put_label(fb, ox + left, oy + pointer.y as u16, item, style);
}

/// "Gen N" for generators, kind letter plus level otherwise ("B3").
fn put_label(fb: &mut FrameBuffer, x: u16, y: u16, item: Item, style: CellStyle) {
    let prefix = if item.is_generator() {
        "Gen "
    } else {
        item.kind().as_str()
    };
    let end = fb.put_str(x, y, prefix, style);
    fb.put_u64(end, y, item.level() as u64, style);
}

fn label_width(item: Item) -> u16 {
    if item.is_generator() {
        5
    } else {
        2
    }
}

fn kind_color(kind: ItemKind) -> Rgb {
    match kind {
        ItemKind::A => Rgb::new(240, 150, 150),
        ItemKind::B => Rgb::new(150, 220, 150),
        ItemKind::C => Rgb::new(150, 180, 240),
        ItemKind::G => Rgb::new(240, 220, 120),
    }
}
