//! TUI Merge (workspace facade crate).
//!
//! Re-exports the member crates as `tui_merge::{types, core, input, term}` and
//! hosts the pieces only the binary needs: runtime configuration and the JSONL
//! event log.

pub mod config;
pub mod event_log;

pub use tui_merge_core as core;
pub use tui_merge_input as input;
pub use tui_merge_term as term;
pub use tui_merge_types as types;
