//! Reward scheduler - score thresholds that grant generators
//!
//! Thresholds start at `INITIAL_POINT_GOAL` and double, capped at `WIN_CONDITION`.
//! Each threshold grants one generator whose level increases by one per reward.
//! Once the capped goal itself has been rewarded the scheduler is exhausted.

use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::types::{GridPos, Item, ItemKind, INITIAL_POINT_GOAL, MAX_LEVEL, WIN_CONDITION};

/// Outcome of one reward grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardGrant {
    /// The threshold that was reached
    pub goal: u64,
    /// The threshold now in effect
    pub next_goal: u64,
    /// Generator level granted (placed or not)
    pub reward_level: u8,
    /// Where the generator landed; None if the grid was full
    pub placed: Option<GridPos>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardState {
    next_goal: u64,
    next_reward_level: u8,
    exhausted: bool,
}

impl RewardState {
    pub fn new() -> Self {
        Self::with_goal(INITIAL_POINT_GOAL)
    }

    pub fn with_goal(initial_goal: u64) -> Self {
        Self {
            next_goal: initial_goal.min(WIN_CONDITION),
            next_reward_level: 1,
            exhausted: false,
        }
    }

    pub fn next_goal(&self) -> u64 {
        self.next_goal
    }

    pub fn next_reward_level(&self) -> u8 {
        self.next_reward_level
    }

    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether `total_score` has reached the pending threshold
    pub fn is_reached(&self, total_score: u64) -> bool {
        !self.exhausted && total_score >= self.next_goal
    }

    /// Grant the reward for the pending threshold and advance to the next one.
    ///
    /// Places a generator of `next_reward_level` at a random empty cell if any
    /// exists. Callers check [`is_reached`](Self::is_reached) first and call this
    /// at most once per tick.
    pub fn on_goal_reached<R: RandomSource + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> RewardGrant {
        let goal = self.next_goal;
        let reward_level = self.next_reward_level;

        let placed = Item::try_new(ItemKind::G, reward_level.min(MAX_LEVEL))
            .and_then(|generator| grid.place_random(generator, rng));

        if goal >= WIN_CONDITION {
            self.exhausted = true;
        }
        self.next_goal = goal.saturating_mul(2).min(WIN_CONDITION);
        self.next_reward_level = self.next_reward_level.saturating_add(1);

        RewardGrant {
            goal,
            next_goal: self.next_goal,
            reward_level,
            placed,
        }
    }
}

impl Default for RewardState {
    fn default() -> Self {
        Self::new()
    }
}
