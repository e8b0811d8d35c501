//! Session module - the complete game state owned by the game loop
//!
//! This module ties together all core components: grid, generator, scoring,
//! rewards and the interaction controller. The game loop owns one `Session` and
//! is its only writer.
//!
//! Input events are applied as they arrive ([`Session::handle_event`]); the fixed
//! timestep ([`Session::tick`]) advances the clock, promotes held presses into
//! drags and runs the reward check, at most once per tick.

use crate::grid::Grid;
use crate::interaction::{ControllerState, InteractionController};
use crate::reward::RewardState;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::ScoreState;
use crate::snapshot::{DragSnapshot, GameSnapshot};
use crate::types::{
    GameEvent, InputEvent, Item, ItemKind, ScreenPos, SpawnSource, WIN_CONDITION,
};

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session<R = SimpleRng> {
    grid: Grid,
    score: ScoreState,
    reward: RewardState,
    controller: InteractionController,
    rng: R,
    /// Session clock, advanced only by `tick`
    clock_ms: u64,
    tick: u64,
    running: bool,
    won: bool,
    press_count: u32,
    pointer: Option<ScreenPos>,
    /// Events since the last `drain_events`
    events: Vec<GameEvent>,
}

impl Session<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Fresh game: a level-1 generator in the top-left cell, everything else empty.
    pub fn with_rng(rng: R) -> Self {
        let mut grid = Grid::new();
        grid.set(0, 0, Some(Item::new(ItemKind::G, 1)));
        Self::with_grid(grid, rng)
    }

    /// Start from an arbitrary grid layout.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        Self {
            grid,
            score: ScoreState::new(),
            reward: RewardState::new(),
            controller: InteractionController::new(),
            rng,
            clock_ms: 0,
            tick: 0,
            running: true,
            won: false,
            press_count: 0,
            pointer: None,
            events: Vec::with_capacity(8),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score.total()
    }

    pub fn reward(&self) -> &RewardState {
        &self.reward
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn controller_state(&self) -> ControllerState {
        self.controller.state()
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn press_count(&self) -> u32 {
        self.press_count
    }

    /// Apply one input event. Ignored once the session has quit.
    pub fn handle_event(&mut self, event: InputEvent) {
        if !self.running {
            return;
        }

        match event {
            InputEvent::Press(pos) => {
                self.pointer = Some(pos);
                self.press_count = self.press_count.saturating_add(1);
                self.controller.press(pos, self.clock_ms, &self.grid);
            }
            InputEvent::Move { pos, held } => {
                self.pointer = Some(pos);
                self.controller.pointer_moved(pos, held, self.clock_ms);
            }
            InputEvent::Release(pos) => {
                self.pointer = Some(pos);
                if let Some(ev) = self.controller.release(
                    pos,
                    self.clock_ms,
                    &mut self.grid,
                    &mut self.score,
                    &mut self.rng,
                ) {
                    self.events.push(ev);
                }
            }
            InputEvent::Quit => {
                self.controller.cancel();
                self.running = false;
                self.events.push(GameEvent::Quit);
            }
        }
    }

    /// Advance the game by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.running {
            return;
        }

        self.clock_ms = self.clock_ms.saturating_add(u64::from(elapsed_ms));
        self.tick = self.tick.wrapping_add(1);

        self.controller.update(self.clock_ms);

        // One reward per tick even if a single submission jumped several goals.
        if self.reward.is_reached(self.score.total()) {
            let grant = self.reward.on_goal_reached(&mut self.grid, &mut self.rng);
            self.events.push(GameEvent::GoalReached {
                goal: grant.goal,
                next_goal: grant.next_goal,
                reward_level: grant.reward_level,
                placed: grant.placed,
            });
            if let Some(pos) = grant.placed {
                if let Some(item) = self.grid.item_at(pos) {
                    self.events.push(GameEvent::Spawned {
                        pos,
                        item,
                        source: SpawnSource::Reward,
                    });
                }
            }
        }

        if !self.won && self.score.total() >= WIN_CONDITION {
            self.won = true;
            self.events.push(GameEvent::Won {
                score: self.score.total(),
            });
        }
    }

    /// Apply a batch of pending events, then advance one tick.
    pub fn step(&mut self, events: &[InputEvent], elapsed_ms: u32) {
        for &event in events {
            self.handle_event(event);
        }
        self.tick(elapsed_ms);
    }

    /// Take all events recorded since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill an existing snapshot (no allocation).
    pub fn snapshot_into(&self, snap: &mut GameSnapshot) {
        snap.grid = self.grid.rows();
        snap.score = self.score.total();
        snap.next_goal = self.reward.next_goal();
        snap.next_reward_level = self.reward.next_reward_level();
        snap.drag = self.controller.drag().map(|d| DragSnapshot {
            item: d.item,
            origin: d.origin,
            pointer: d.pointer,
            detached: d.dragging,
        });
        snap.pointer = self.pointer;
        snap.press_count = self.press_count;
        snap.won = self.won;
        snap.running = self.running;
        snap.tick = self.tick;
    }
}
