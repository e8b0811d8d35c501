//! Grid module - owns the playfield cells
//!
//! The grid is a 4x4 array where each cell is empty or holds one item.
//! Uses a flat array for zero-allocation access.
//! Coordinates: (row, col) where row 0 is the top row and col 0 the leftmost column.
//! Out-of-bounds coordinates are rejected, never clamped.

use arrayvec::ArrayVec;

use crate::rng::{choose, RandomSource};
use crate::types::{Cell, GridPos, Item, GRID_HEIGHT, GRID_SIZE, GRID_WIDTH};

/// Empty cell positions, in row-major order
pub type EmptyCells = ArrayVec<GridPos, GRID_SIZE>;

/// The game grid - 4 columns x 4 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= GRID_HEIGHT || col >= GRID_WIDTH {
            return None;
        }
        Some(row * GRID_WIDTH + col)
    }

    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false (and changes nothing) if out of bounds
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Item at `pos`, `None` if the cell is empty or out of bounds
    pub fn item_at(&self, pos: GridPos) -> Option<Item> {
        self.get(pos.row, pos.col).flatten()
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// All empty cells in row-major order
    pub fn find_empty_cells(&self) -> EmptyCells {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| GridPos::new(i / GRID_WIDTH, i % GRID_WIDTH))
            .collect()
    }

    /// Number of cells holding an item equal to `item` (same kind and level)
    pub fn count_matching(&self, item: Item) -> usize {
        self.cells.iter().filter(|c| **c == Some(item)).count()
    }

    /// True iff at least two cells hold `item`, i.e. some other copy exists to merge with
    pub fn is_mergeable(&self, item: Item) -> bool {
        self.count_matching(item) >= 2
    }

    /// Number of occupied cells
    pub fn item_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Place `item` into a uniformly random empty cell.
    /// Returns the chosen cell, or None if the grid is full.
    pub fn place_random<R: RandomSource + ?Sized>(
        &mut self,
        item: Item,
        rng: &mut R,
    ) -> Option<GridPos> {
        let empty = self.find_empty_cells();
        let pos = *choose(rng, empty.as_slice())?;
        self.set(pos.row, pos.col, Some(item));
        Some(pos)
    }

    /// Cells as rows (top to bottom)
    pub fn rows(&self) -> [[Cell; GRID_WIDTH]; GRID_HEIGHT] {
        let mut rows = [[None; GRID_WIDTH]; GRID_HEIGHT];
        for (i, cell) in self.cells.iter().enumerate() {
            rows[i / GRID_WIDTH][i % GRID_WIDTH] = *cell;
        }
        rows
    }

    /// Build a grid from rows (top to bottom)
    pub fn from_rows(rows: [[Cell; GRID_WIDTH]; GRID_HEIGHT]) -> Self {
        let mut grid = Self::new();
        for (row, cells) in rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                grid.cells[row * GRID_WIDTH + col] = *cell;
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
