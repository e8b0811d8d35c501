//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, event logging).
//!
//! # Grid Dimensions
//!
//! The playfield is a 4x4 grid. Each grid cell is drawn as a `CELL_W` x `CELL_H`
//! block of terminal characters from the play area origin, so a pointer
//! position maps to a cell by integer division.
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CLICK_DELAY_MS` | 200 | Press shorter than this on a generator is a tap |
//! | `WIN_CONDITION` | 10000 | Score that wins the game |
//! | `MAX_LEVEL` | 7 | Items at this level no longer merge |
//! | `INITIAL_POINT_GOAL` | 500 | First reward threshold |
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tui_merge_types::{cell_at, GridPos, Item, ItemKind, ScreenPos, CELL_H, CELL_W};
//!
//! let item = Item::new(ItemKind::A, 3);
//! assert_eq!(item.merged(), Some(Item::new(ItemKind::A, 4)));
//!
//! assert!(ItemKind::G.is_generator());
//! assert_eq!(ItemKind::G.as_str(), "G");
//!
//! let pos = ScreenPos::new(CELL_W as i32 + 1, 2 * CELL_H as i32);
//! assert_eq!(cell_at(pos), Some(GridPos::new(2, 1)));
//! ```

/// Grid width in cells (4 columns)
pub const GRID_WIDTH: usize = 4;

/// Grid height in cells (4 rows)
pub const GRID_HEIGHT: usize = 4;

/// Total number of cells on the grid
pub const GRID_SIZE: usize = GRID_WIDTH * GRID_HEIGHT;

/// Cell width in terminal columns
pub const CELL_W: u16 = 10;

/// Cell height in terminal rows (half of `CELL_W` keeps cells roughly square)
pub const CELL_H: u16 = 5;

/// Terminal rows reserved below the grid for status lines and the submission box
pub const EXTRA_HEIGHT: u16 = 6;

/// Full play area width in terminal columns
pub const SCREEN_WIDTH: u16 = GRID_WIDTH as u16 * CELL_W;

/// Full play area height in terminal rows
pub const SCREEN_HEIGHT: u16 = GRID_HEIGHT as u16 * CELL_H + EXTRA_HEIGHT;

/// Press-to-release time under which a generator press counts as a tap
pub const CLICK_DELAY_MS: u64 = 200;

/// Score that wins the game
pub const WIN_CONDITION: u64 = 10_000;

/// Highest item level; items at this level cannot merge further
pub const MAX_LEVEL: u8 = 7;

/// First score threshold that grants a generator reward
pub const INITIAL_POINT_GOAL: u64 = 500;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base submission points for level-1 items of kind A, B and C
pub const ITEM_BASE_SCORES: [u64; 3] = [10, 15, 20];

/// Per-level score multiplier applied `level - 1` times
pub const LEVEL_SCORE_GROWTH: f64 = 2.4;

/// Submission box, right-aligned in the strip below the grid
pub const SUBMIT_BOX: Rect = Rect::new(SCREEN_WIDTH - 18, SCREEN_HEIGHT - 5, 17, 4);

/// The four item kinds
///
/// - **A**, **B**, **C**: mergeable and scorable, in increasing base value
/// - **G**: generator; tapped to spawn items, never scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    A,
    B,
    C,
    G,
}

impl ItemKind {
    /// Single uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::A => "A",
            ItemKind::B => "B",
            ItemKind::C => "C",
            ItemKind::G => "G",
        }
    }

    pub fn is_generator(&self) -> bool {
        matches!(self, ItemKind::G)
    }
}

/// An item occupying a grid cell: a kind and a level in `1..=MAX_LEVEL`.
///
/// Items are plain values; two items are "equal" for merging purposes exactly
/// when `==` holds (same kind and same level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    kind: ItemKind,
    level: u8,
}

impl Item {
    /// Create an item.
    ///
    /// # Panics
    ///
    /// Panics if `level` is outside `1..=MAX_LEVEL`.
    pub const fn new(kind: ItemKind, level: u8) -> Self {
        assert!(level >= 1 && level <= MAX_LEVEL, "item level out of range");
        Self { kind, level }
    }

    /// Create an item, returning `None` if `level` is outside `1..=MAX_LEVEL`.
    pub const fn try_new(kind: ItemKind, level: u8) -> Option<Self> {
        if level >= 1 && level <= MAX_LEVEL {
            Some(Self { kind, level })
        } else {
            None
        }
    }

    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    pub const fn level(&self) -> u8 {
        self.level
    }

    pub fn is_generator(&self) -> bool {
        self.kind.is_generator()
    }

    pub const fn is_max_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }

    /// The item produced by merging two copies of `self`, or `None` at max level.
    pub const fn merged(&self) -> Option<Self> {
        if self.is_max_level() {
            None
        } else {
            Some(Self {
                kind: self.kind,
                level: self.level + 1,
            })
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Item)`: Cell holding the item
pub type Cell = Option<Item>;

/// Grid coordinate (row 0 is the top row, col 0 the leftmost column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn in_bounds(&self) -> bool {
        self.row < GRID_HEIGHT && self.col < GRID_WIDTH
    }
}

/// Pointer position in terminal cells, relative to the play area origin.
///
/// Signed: positions left of or above the play area are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

impl ScreenPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle (half-open on the right and bottom edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn contains(&self, pos: ScreenPos) -> bool {
        let (x, y) = (self.x as i32, self.y as i32);
        pos.x >= x
            && pos.y >= y
            && pos.x < x + self.width as i32
            && pos.y < y + self.height as i32
    }
}

/// Map a pointer position to the grid cell under it.
///
/// Returns `None` when the position lies outside the grid.
pub const fn cell_at(pos: ScreenPos) -> Option<GridPos> {
    if pos.x < 0 || pos.y < 0 {
        return None;
    }
    let cell = GridPos::new(
        (pos.y / CELL_H as i32) as usize,
        (pos.x / CELL_W as i32) as usize,
    );
    if cell.in_bounds() {
        Some(cell)
    } else {
        None
    }
}

/// Pointer and lifecycle input consumed by the game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary button pressed at a position
    Press(ScreenPos),
    /// Pointer moved; `held` is true while the primary button is down
    Move { pos: ScreenPos, held: bool },
    /// Primary button released at a position
    Release(ScreenPos),
    /// Terminate the session
    Quit,
}

/// Why a new item appeared on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSource {
    /// A generator was tapped
    Tap,
    /// A score threshold was reached
    Reward,
}

impl SpawnSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnSource::Tap => "tap",
            SpawnSource::Reward => "reward",
        }
    }
}

/// Core-side event emitted whenever the session state changes.
///
/// These are engine-internal and mapped to log records by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Spawned {
        pos: GridPos,
        item: Item,
        source: SpawnSource,
    },
    Moved {
        from: GridPos,
        to: GridPos,
        item: Item,
    },
    Merged {
        from: GridPos,
        to: GridPos,
        result: Item,
    },
    Submitted {
        from: GridPos,
        item: Item,
        points: u64,
        total: u64,
    },
    /// A drop onto an occupied, non-matching cell (or a max-level match).
    DropRejected {
        from: GridPos,
        to: GridPos,
    },
    GoalReached {
        goal: u64,
        next_goal: u64,
        reward_level: u8,
        placed: Option<GridPos>,
    },
    Won {
        score: u64,
    },
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_box_lies_below_grid() {
        let grid_bottom = GRID_HEIGHT as u16 * CELL_H;
        assert!(SUBMIT_BOX.y >= grid_bottom);
        assert!(SUBMIT_BOX.x + SUBMIT_BOX.width <= SCREEN_WIDTH);
        assert!(SUBMIT_BOX.y + SUBMIT_BOX.height <= SCREEN_HEIGHT);
    }

    #[test]
    fn cell_at_maps_by_integer_division() {
        let (w, h) = (CELL_W as i32, CELL_H as i32);
        assert_eq!(cell_at(ScreenPos::new(0, 0)), Some(GridPos::new(0, 0)));
        assert_eq!(cell_at(ScreenPos::new(w - 1, h - 1)), Some(GridPos::new(0, 0)));
        assert_eq!(cell_at(ScreenPos::new(w, h)), Some(GridPos::new(1, 1)));
        assert_eq!(cell_at(ScreenPos::new(SCREEN_WIDTH as i32, 0)), None);
        assert_eq!(cell_at(ScreenPos::new(0, GRID_HEIGHT as i32 * h)), None);
    }

    #[test]
    fn negative_positions_are_off_grid() {
        // Truncating division would otherwise map -1 into column 0.
        assert_eq!(cell_at(ScreenPos::new(-1, 0)), None);
        assert_eq!(cell_at(ScreenPos::new(0, -1)), None);
        assert!(!SUBMIT_BOX.contains(ScreenPos::new(-1, -1)));
    }

    #[test]
    fn merged_stops_at_max_level() {
        assert_eq!(
            Item::new(ItemKind::G, 1).merged(),
            Some(Item::new(ItemKind::G, 2))
        );
        assert_eq!(Item::new(ItemKind::C, MAX_LEVEL).merged(), None);
    }

    #[test]
    fn try_new_rejects_out_of_range_levels() {
        assert!(Item::try_new(ItemKind::A, 0).is_none());
        assert!(Item::try_new(ItemKind::A, MAX_LEVEL + 1).is_none());
        assert!(Item::try_new(ItemKind::A, MAX_LEVEL).is_some());
    }

    #[test]
    fn rect_is_half_open() {
        let r = Rect::new(2, 3, 4, 5);
        assert!(r.contains(ScreenPos::new(2, 3)));
        assert!(r.contains(ScreenPos::new(5, 7)));
        assert!(!r.contains(ScreenPos::new(6, 3)));
        assert!(!r.contains(ScreenPos::new(2, 8)));
        assert!(!r.contains(ScreenPos::new(1, 3)));
    }
}
