//! Terminal output: encodes the play-area region of a framebuffer and writes it out.
//!
//! Only the framed play area is ever sent to the terminal. The first frame, and
//! any frame after a resize, a moved play area or [`TerminalRenderer::invalidate`],
//! clears the screen and paints the whole region; every other frame rewrites
//! just the cells that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;
use crate::types::Rect;

/// Frame-to-frame byte encoder, independent of any terminal handle.
///
/// Holds the previously encoded frame so each call can emit only what changed.
pub struct FrameEncoder {
    last: Option<FrameBuffer>,
    region: Option<Rect>,
    buf: Vec<u8>,
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self {
            last: None,
            region: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Encode `region` of `fb`, then swap `fb` with the retained previous frame.
    ///
    /// The caller gets the previous frame's buffer back in `fb` and can render
    /// the next frame into it without reallocating.
    pub fn encode_swap(&mut self, fb: &mut FrameBuffer, region: Rect) -> Result<&[u8]> {
        let region = clip(region, fb.width(), fb.height());
        self.buf.clear();

        let mut prev = match self.last.take() {
            Some(prev)
                if prev.width() == fb.width()
                    && prev.height() == fb.height()
                    && self.region == Some(region) =>
            {
                encode_region_into(Some(&prev), fb, region, &mut self.buf)?;
                prev
            }
            stale => {
                self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
                encode_region_into(None, fb, region, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        self.region = Some(region);
        Ok(&self.buf)
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    encoder: FrameEncoder,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            encoder: FrameEncoder::new(),
            buf: Vec::with_capacity(256),
        }
    }

    /// Raw mode, alternate screen, hidden cursor and mouse capture.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(event::EnableMouseCapture)?;
        write_flush(&mut self.stdout, &self.buf)?;
        self.encoder.invalidate();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(event::DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        write_flush(&mut self.stdout, &self.buf)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn viewport(&self) -> Result<Viewport> {
        let (width, height) = terminal::size()?;
        Ok(Viewport::new(width, height))
    }

    /// Force the next draw to clear the screen and repaint.
    pub fn invalidate(&mut self) {
        self.encoder.invalidate();
    }

    /// Draw the `region` of `fb` (usually [`GameView::frame_rect`](crate::GameView::frame_rect)).
    ///
    /// Keep one framebuffer and pass it in every frame; it comes back holding
    /// the previous frame, ready to be rendered over.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer, region: Rect) -> Result<()> {
        let bytes = self.encoder.encode_swap(fb, region)?;
        if !bytes.is_empty() {
            write_flush(&mut self.stdout, bytes)?;
        }
        Ok(())
    }
}

fn write_flush(stdout: &mut io::Stdout, bytes: &[u8]) -> Result<()> {
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}

/// Encode the cells of `region` that differ from `prev` (all of them when
/// `prev` is `None`). Returns the number of cells written.
///
/// The cursor is only moved when the next cell to write is not where the
/// previous write left it, and colors are only re-sent when the style changes.
pub fn encode_region_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    region: Rect,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let region = clip(region, next.width(), next.height());
    let mut cursor_at: Option<(u16, u16)> = None;
    let mut style: Option<CellStyle> = None;
    let mut written = 0usize;

    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            let cell = next.get(x, y).unwrap_or_default();
            if prev.and_then(|p| p.get(x, y)) == Some(cell) {
                continue;
            }

            if cursor_at != Some((x, y)) {
                out.queue(cursor::MoveTo(x, y))?;
            }
            if style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
            cursor_at = Some((x + 1, y));
            written += 1;
        }
    }

    if written > 0 {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(written)
}

fn clip(region: Rect, width: u16, height: u16) -> Rect {
    let x = region.x.min(width);
    let y = region.y.min(height);
    Rect::new(
        x,
        y,
        region.width.min(width - x),
        region.height.min(height - y),
    )
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR_ALL: &str = "\x1b[2J";

    /// Number of absolute cursor moves (`ESC [ row ; col H`) in `out`.
    fn cursor_moves(out: &[u8]) -> usize {
        let text = String::from_utf8_lossy(out);
        text.split("\x1b[")
            .skip(1)
            .filter(|seg| {
                let Some(end) = seg.find('H') else {
                    return false;
                };
                let params = &seg[..end];
                params.contains(';') && params.chars().all(|c| c.is_ascii_digit() || c == ';')
            })
            .count()
    }

    fn frame(width: u16, height: u16) -> FrameBuffer {
        FrameBuffer::new(width, height)
    }

    #[test]
    fn changes_outside_region_are_not_sent() {
        let prev = frame(10, 4);
        let mut next = frame(10, 4);
        next.put_str(0, 0, "xx", CellStyle::default());
        next.put_str(8, 3, "yy", CellStyle::default());

        let mut out = Vec::new();
        let n = encode_region_into(Some(&prev), &next, Rect::new(2, 1, 5, 2), &mut out).unwrap();
        assert_eq!(n, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn adjacent_changes_share_one_cursor_move() {
        let prev = frame(5, 2);
        let mut next = frame(5, 2);
        next.put_str(1, 0, "XYZ", CellStyle::default());
        next.put_char(0, 1, 'W', CellStyle::default());

        let mut out = Vec::new();
        let n = encode_region_into(Some(&prev), &next, Rect::new(0, 0, 5, 2), &mut out).unwrap();
        assert_eq!(n, 4);
        assert_eq!(cursor_moves(&out), 2);
        // MoveTo(1, 0) is 1-based on the wire
        assert!(String::from_utf8_lossy(&out).contains("\x1b[1;2H"));
    }

    #[test]
    fn style_is_sent_once_per_change() {
        let prev = frame(4, 1);
        let mut next = frame(4, 1);
        let red = CellStyle::new(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0));
        next.put_str(0, 0, "ab", red);
        next.put_str(2, 0, "cd", red.bold());

        let mut out = Vec::new();
        encode_region_into(Some(&prev), &next, Rect::new(0, 0, 4, 1), &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("38;2;255;0;0").count(), 2);
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let mut encoder = FrameEncoder::new();
        let region = Rect::new(1, 1, 6, 2);
        let mut fb = frame(8, 4);
        fb.put_str(1, 1, "Score", CellStyle::default());

        let first = encoder.encode_swap(&mut fb, region).unwrap().to_vec();
        assert!(String::from_utf8_lossy(&first).contains("Score"));
        assert!(String::from_utf8_lossy(&first).contains(CLEAR_ALL));

        // `fb` now holds the blank previous frame; paint the same content again
        fb.put_str(1, 1, "Score", CellStyle::default());
        assert!(encoder.encode_swap(&mut fb, region).unwrap().is_empty());
    }

    #[test]
    fn only_the_changed_cell_is_rewritten() {
        let mut encoder = FrameEncoder::new();
        let region = Rect::new(0, 0, 10, 2);
        let mut fb = frame(10, 2);
        fb.put_str(0, 0, "Score: 10", CellStyle::default());
        encoder.encode_swap(&mut fb, region).unwrap();

        fb.put_str(0, 0, "Score: 20", CellStyle::default());
        let out = String::from_utf8_lossy(encoder.encode_swap(&mut fb, region).unwrap()).into_owned();
        assert!(!out.contains(CLEAR_ALL));
        assert!(!out.contains("Score"));
        assert_eq!(cursor_moves(out.as_bytes()), 1);
        assert!(out.contains("\x1b[1;8H"));
    }

    #[test]
    fn resize_and_moved_region_repaint_everything() {
        let mut encoder = FrameEncoder::new();
        let mut fb = frame(8, 4);
        encoder.encode_swap(&mut fb, Rect::new(0, 0, 4, 2)).unwrap();

        let moved = encoder.encode_swap(&mut fb, Rect::new(2, 1, 4, 2)).unwrap();
        assert!(String::from_utf8_lossy(moved).contains(CLEAR_ALL));

        let mut bigger = frame(10, 4);
        let resized = encoder.encode_swap(&mut bigger, Rect::new(2, 1, 4, 2)).unwrap();
        assert!(String::from_utf8_lossy(resized).contains(CLEAR_ALL));

        let mut again = frame(10, 4);
        assert!(encoder.encode_swap(&mut again, Rect::new(2, 1, 4, 2)).unwrap().is_empty());

        encoder.invalidate();
        let mut after = frame(10, 4);
        let full = encoder.encode_swap(&mut after, Rect::new(2, 1, 4, 2)).unwrap();
        assert!(String::from_utf8_lossy(full).contains(CLEAR_ALL));
        assert_eq!(cursor_moves(full), 2);
    }

    #[test]
    fn region_is_clipped_to_the_framebuffer() {
        let next = frame(4, 3);
        let mut out = Vec::new();
        let n = encode_region_into(None, &next, Rect::new(2, 1, 42, 28), &mut out).unwrap();
        assert_eq!(n, 2 * 2);
        assert_eq!(clip(Rect::new(9, 9, 5, 5), 4, 3), Rect::new(4, 3, 0, 0));
    }
}
