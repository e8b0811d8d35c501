//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed and same input produce identical games
//! - **Testable**: Randomness is injected through [`rng::RandomSource`]
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 grid of optional items
//! - [`generator`]: weighted random items spawned by generators
//! - [`scoring`]: point value of submitted items and the running total
//! - [`reward`]: score thresholds that grant new generators
//! - [`interaction`]: press/drag/release state machine
//! - [`session`]: complete game state driven by the game loop
//! - [`snapshot`]: read-only view for rendering
//! - [`timestep`]: wall-clock to fixed-tick accumulator for the game loop
//!
//! # Game Rules
//!
//! - **Merge**: drop an item onto an equal item (same kind and level) to get one
//!   item of the next level; level 7 is final
//! - **Submit**: drop an A/B/C item on the submission box to cash it in
//! - **Tap**: a quick press-release on a generator spawns an item in a random empty cell
//! - **Rewards**: every score goal (500, doubling up to 10000) grants a stronger generator
//! - **Win**: reach 10000 points
//!
//! # Example
//!
//! ```
//! use tui_merge_core::Session;
//! use tui_merge_types::{InputEvent, ScreenPos, TICK_MS};
//!
//! // New game: a level-1 generator in the top-left cell
//! let mut game = Session::new(12345);
//!
//! // Tap the generator
//! let at = ScreenPos::new(1, 1);
//! game.step(&[InputEvent::Press(at), InputEvent::Release(at)], TICK_MS);
//!
//! assert_eq!(game.grid().item_count(), 2);
//! ```
//!
//! # Timing
//!
//! The game uses a fixed timestep system:
//! - **Tick Rate**: 16ms (approximately 60 FPS)
//! - **Click Delay**: 200ms separates a generator tap from a drag
//!
//! Call [`Session::tick`](session::Session::tick) once per tick that
//! [`FixedTimestep::advance`](timestep::FixedTimestep::advance) reports due.

pub mod generator;
pub mod grid;
pub mod interaction;
pub mod reward;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timestep;

pub use tui_merge_types as types;

// Re-export commonly used types for convenience
pub use generator::spawn_item;
pub use grid::Grid;
pub use interaction::{ControllerState, DragState, InteractionController};
pub use reward::{RewardGrant, RewardState};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{calculate_score, ScoreState};
pub use session::Session;
pub use snapshot::{DragSnapshot, GameSnapshot};
pub use timestep::FixedTimestep;
