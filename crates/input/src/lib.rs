//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` mouse events into [`crate::types::InputEvent`]s in play-area
//! coordinates, and quit keys into [`crate::types::InputEvent::Quit`].
//!
//! Mouse capture must be enabled on the terminal for mouse events to arrive
//! (the terminal renderer does this on `enter`).

pub mod map;

pub use tui_merge_types as types;

pub use map::{should_quit, PointerMapper};
