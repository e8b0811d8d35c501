//! Scoring module - point value of a submitted item
//!
//! `score = ceil(base * 2.4^(level - 1))` with base A=10, B=15, C=20.
//! Generators are worth nothing. The ceiling matters: flooring shifts the
//! running total enough to change when reward thresholds and the win fire.

use crate::types::{Item, ItemKind, ITEM_BASE_SCORES, LEVEL_SCORE_GROWTH};

/// Running score total. Only grows, and only through submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreState {
    total: u64,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Add points and return the new total
    pub fn add(&mut self, points: u64) -> u64 {
        self.total = self.total.saturating_add(points);
        self.total
    }
}

/// Base points for a level-1 item of this kind
pub fn base_score(kind: ItemKind) -> u64 {
    match kind {
        ItemKind::A => ITEM_BASE_SCORES[0],
        ItemKind::B => ITEM_BASE_SCORES[1],
        ItemKind::C => ITEM_BASE_SCORES[2],
        ItemKind::G => 0,
    }
}

/// Points awarded for submitting `item`
pub fn calculate_score(item: Item) -> u64 {
    let base = base_score(item.kind());
    if base == 0 {
        return 0;
    }
    let exponent = f64::from(item.level() - 1);
    (base as f64 * LEVEL_SCORE_GROWTH.powf(exponent)).ceil() as u64
}
