//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and instead renders into a simple framebuffer that is flushed to
//! the terminal as a diff against the previous frame.
//!
//! - [`GameView`] is pure: snapshot in, framebuffer out
//! - [`FrameEncoder`] turns the play-area region of successive frames into escape codes
//! - [`TerminalRenderer`] owns the terminal (raw mode, alternate screen, mouse capture)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_merge_core as core;
pub use tui_merge_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_region_into, FrameEncoder, TerminalRenderer};
