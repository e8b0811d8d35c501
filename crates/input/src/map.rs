//! Mapping from terminal events to game input.

use crate::types::{InputEvent, ScreenPos};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Converts terminal cell coordinates into play-area coordinates.
///
/// The play area may be drawn anywhere in the terminal; `origin` is the terminal
/// cell of its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerMapper {
    origin_x: u16,
    origin_y: u16,
}

impl PointerMapper {
    pub fn new(origin_x: u16, origin_y: u16) -> Self {
        Self { origin_x, origin_y }
    }

    pub fn origin(&self) -> (u16, u16) {
        (self.origin_x, self.origin_y)
    }

    pub fn to_screen(&self, column: u16, row: u16) -> ScreenPos {
        ScreenPos::new(
            i32::from(column) - i32::from(self.origin_x),
            i32::from(row) - i32::from(self.origin_y),
        )
    }

    /// Map a mouse event. Only the left button drives the game.
    pub fn map_mouse(&self, mouse: MouseEvent) -> Option<InputEvent> {
        let pos = self.to_screen(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Press(pos)),
            MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::Release(pos)),
            MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::Move { pos, held: true }),
            MouseEventKind::Moved => Some(InputEvent::Move { pos, held: false }),
            _ => None,
        }
    }

    /// Map any terminal event. Quit keys become [`InputEvent::Quit`].
    pub fn map_event(&self, event: &Event) -> Option<InputEvent> {
        match event {
            Event::Mouse(mouse) => self.map_mouse(*mouse),
            Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(*key) => {
                Some(InputEvent::Quit)
            }
            _ => None,
        }
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
