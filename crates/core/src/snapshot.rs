use crate::types::{
    cell_at, Cell, GridPos, Item, ScreenPos, GRID_HEIGHT, GRID_WIDTH, INITIAL_POINT_GOAL,
};

/// The item currently held by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragSnapshot {
    pub item: Item,
    pub origin: GridPos,
    pub pointer: ScreenPos,
    /// Detached items are hidden at their origin and drawn at the pointer
    pub detached: bool,
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[Cell; GRID_WIDTH]; GRID_HEIGHT],
    pub score: u64,
    pub next_goal: u64,
    pub next_reward_level: u8,
    pub drag: Option<DragSnapshot>,
    /// Last known pointer position (for hover hints)
    pub pointer: Option<ScreenPos>,
    pub press_count: u32,
    pub won: bool,
    pub running: bool,
    pub tick: u64,
}

impl GameSnapshot {
    pub fn item(&self, row: usize, col: usize) -> Option<Item> {
        self.grid.get(row)?.get(col).copied().flatten()
    }

    pub fn count_matching(&self, item: Item) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|c| **c == Some(item))
            .count()
    }

    /// True iff the cell holds an item and at least one other cell holds an equal one.
    pub fn is_mergeable(&self, row: usize, col: usize) -> bool {
        self.item(row, col)
            .map(|item| self.count_matching(item) >= 2)
            .unwrap_or(false)
    }

    /// Cell under the pointer, if the pointer is over the grid
    pub fn hovered(&self) -> Option<GridPos> {
        self.pointer.and_then(cell_at)
    }

    /// Whether the cell's item should be hidden because it is being dragged
    pub fn is_hidden(&self, row: usize, col: usize) -> bool {
        self.drag
            .map(|d| d.detached && d.origin == GridPos::new(row, col))
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.grid = [[None; GRID_WIDTH]; GRID_HEIGHT];
        self.score = 0;
        self.next_goal = INITIAL_POINT_GOAL;
        self.next_reward_level = 1;
        self.drag = None;
        self.pointer = None;
        self.press_count = 0;
        self.won = false;
        self.running = true;
        self.tick = 0;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: [[None; GRID_WIDTH]; GRID_HEIGHT],
            score: 0,
            next_goal: 0,
            next_reward_level: 0,
            drag: None,
            pointer: None,
            press_count: 0,
            won: false,
            running: false,
            tick: 0,
        };
        s.clear();
        s
    }
}
