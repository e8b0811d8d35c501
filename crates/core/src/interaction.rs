//! Interaction controller - press/drag/release state machine
//!
//! ```text
//! IDLE --press on item--> PRESSED --move (held) or hold past delay--> DRAGGING
//!   ^                        |                                          |
//!   +------ release ---------+---------------- release -----------------+
//! ```
//!
//! A generator only detaches once the click delay has passed, so a quick
//! press-release on it is a tap (spawn an item). Other items detach on the first
//! held move. Releasing a detached item resolves the drop: submit, move, merge, or
//! snap back. Drag state is cleared on every release whatever the outcome.
//!
//! The origin cell is never cleared while dragging, so "snap back" is simply
//! leaving the grid alone.

use crate::generator::spawn_item;
use crate::grid::Grid;
use crate::rng::{choose, RandomSource};
use crate::scoring::{calculate_score, ScoreState};
use crate::types::{
    cell_at, GameEvent, GridPos, Item, Rect, ScreenPos, SpawnSource, CLICK_DELAY_MS, SUBMIT_BOX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Pressed,
    Dragging,
}

/// Transient state of one press-release gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub item: Item,
    pub origin: GridPos,
    pub press_ms: u64,
    /// Last known pointer position
    pub pointer: ScreenPos,
    /// True once the item is visually detached from its origin cell
    pub dragging: bool,
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    drag: Option<DragState>,
    click_delay_ms: u64,
    submit_box: Rect,
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            drag: None,
            click_delay_ms: CLICK_DELAY_MS,
            submit_box: SUBMIT_BOX,
        }
    }

    pub fn state(&self) -> ControllerState {
        match self.drag {
            None => ControllerState::Idle,
            Some(d) if d.dragging => ControllerState::Dragging,
            Some(_) => ControllerState::Pressed,
        }
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Pointer pressed. Captures the item under `pos`, if any.
    ///
    /// Returns true if a gesture started. A press always discards any gesture that
    /// never saw its release.
    pub fn press(&mut self, pos: ScreenPos, now_ms: u64, grid: &Grid) -> bool {
        self.drag = cell_at(pos).and_then(|origin| {
            grid.item_at(origin).map(|item| DragState {
                item,
                origin,
                press_ms: now_ms,
                pointer: pos,
                dragging: false,
            })
        });
        self.drag.is_some()
    }

    /// Pointer moved. Detaches a pressed item if the button is still held and the
    /// item is allowed to detach yet.
    pub fn pointer_moved(&mut self, pos: ScreenPos, held: bool, now_ms: u64) {
        let delay = self.click_delay_ms;
        if let Some(drag) = self.drag.as_mut() {
            drag.pointer = pos;
            if held && !drag.dragging {
                let elapsed = now_ms.saturating_sub(drag.press_ms);
                if !drag.item.is_generator() || elapsed > delay {
                    drag.dragging = true;
                }
            }
        }
    }

    /// Per-tick update: a press held past the click delay detaches even without motion.
    pub fn update(&mut self, now_ms: u64) {
        let delay = self.click_delay_ms;
        if let Some(drag) = self.drag.as_mut() {
            if !drag.dragging && now_ms.saturating_sub(drag.press_ms) > delay {
                drag.dragging = true;
            }
        }
    }

    /// Drop the current gesture without touching the grid.
    pub fn cancel(&mut self) {
        self.drag = None;
    }

    /// Pointer released at `pos`. Resolves the gesture and returns what happened to
    /// the grid, if anything.
    pub fn release<R: RandomSource + ?Sized>(
        &mut self,
        pos: ScreenPos,
        now_ms: u64,
        grid: &mut Grid,
        score: &mut ScoreState,
        rng: &mut R,
    ) -> Option<GameEvent> {
        let drag = self.drag.take()?;
        let item = drag.item;
        let origin = drag.origin;

        // Rewards only fill empty cells, so the origin still holds the captured item.
        if grid.item_at(origin) != Some(item) {
            return None;
        }

        let elapsed = now_ms.saturating_sub(drag.press_ms);
        if item.is_generator() && elapsed < self.click_delay_ms {
            return tap_generator(item, grid, rng);
        }

        if !drag.dragging {
            return None;
        }

        if self.submit_box.contains(pos) {
            if item.is_generator() {
                return None;
            }
            grid.set(origin.row, origin.col, None);
            let points = calculate_score(item);
            let total = score.add(points);
            return Some(GameEvent::Submitted {
                from: origin,
                item,
                points,
                total,
            });
        }

        let target = cell_at(pos)?;
        if target == origin {
            return None;
        }

        match grid.item_at(target) {
            None => {
                grid.set(origin.row, origin.col, None);
                grid.set(target.row, target.col, Some(item));
                Some(GameEvent::Moved {
                    from: origin,
                    to: target,
                    item,
                })
            }
            Some(other) if other == item => match item.merged() {
                Some(result) => {
                    grid.set(origin.row, origin.col, None);
                    grid.set(target.row, target.col, Some(result));
                    Some(GameEvent::Merged {
                        from: origin,
                        to: target,
                        result,
                    })
                }
                None => Some(GameEvent::DropRejected {
                    from: origin,
                    to: target,
                }),
            },
            Some(_) => Some(GameEvent::DropRejected {
                from: origin,
                to: target,
            }),
        }
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a generated item into a random empty cell. Nothing happens on a full grid.
fn tap_generator<R: RandomSource + ?Sized>(
    generator: Item,
    grid: &mut Grid,
    rng: &mut R,
) -> Option<GameEvent> {
    let empty = grid.find_empty_cells();
    let pos = *choose(rng, empty.as_slice())?;
    let item = spawn_item(generator.level(), rng);
    grid.set(pos.row, pos.col, Some(item));
    Some(GameEvent::Spawned {
        pos,
        item,
        source: SpawnSource::Tap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::types::{ItemKind, CELL_H, CELL_W};

    fn center(row: usize, col: usize) -> ScreenPos {
        let (w, h) = (CELL_W as i32, CELL_H as i32);
        ScreenPos::new(col as i32 * w + w / 2, row as i32 * h + h / 2)
    }

    fn submit_point() -> ScreenPos {
        ScreenPos::new(SUBMIT_BOX.x as i32 + 1, SUBMIT_BOX.y as i32 + 1)
    }

    struct Fixture {
        ctl: InteractionController,
        grid: Grid,
        score: ScoreState,
        rng: SimpleRng,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                ctl: InteractionController::new(),
                grid: Grid::new(),
                score: ScoreState::new(),
                rng: SimpleRng::new(17),
            }
        }

        fn put(&mut self, row: usize, col: usize, kind: ItemKind, level: u8) {
            self.grid.set(row, col, Some(Item::new(kind, level)));
        }

        fn drag(&mut self, from: ScreenPos, to: ScreenPos) -> Option<GameEvent> {
            self.ctl.press(from, 0, &self.grid);
            self.ctl.pointer_moved(to, true, 10);
            self.ctl
                .release(to, 20, &mut self.grid, &mut self.score, &mut self.rng)
        }
    }

    #[test]
    fn press_on_empty_cell_stays_idle() {
        let mut f = Fixture::new();
        assert!(!f.ctl.press(center(1, 1), 0, &f.grid));
        assert_eq!(f.ctl.state(), ControllerState::Idle);
    }

    #[test]
    fn press_outside_grid_stays_idle() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::A, 1);
        assert!(!f.ctl.press(submit_point(), 0, &f.grid));
        assert_eq!(f.ctl.state(), ControllerState::Idle);
    }

    #[test]
    fn regular_item_detaches_on_first_held_move() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::A, 1);
        assert!(f.ctl.press(center(0, 0), 0, &f.grid));
        assert_eq!(f.ctl.state(), ControllerState::Pressed);

        f.ctl.pointer_moved(center(0, 1), false, 5);
        assert_eq!(f.ctl.state(), ControllerState::Pressed);

        f.ctl.pointer_moved(center(0, 1), true, 5);
        assert_eq!(f.ctl.state(), ControllerState::Dragging);
        assert_eq!(f.ctl.drag().unwrap().pointer, center(0, 1));
    }

    #[test]
    fn generator_detaches_only_after_delay() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::G, 1);
        f.ctl.press(center(0, 0), 0, &f.grid);

        f.ctl.pointer_moved(center(0, 1), true, CLICK_DELAY_MS);
        assert_eq!(f.ctl.state(), ControllerState::Pressed);

        f.ctl.pointer_moved(center(0, 1), true, CLICK_DELAY_MS + 1);
        assert_eq!(f.ctl.state(), ControllerState::Dragging);
    }

    #[test]
    fn holding_still_past_delay_detaches() {
        let mut f = Fixture::new();
        f.put(2, 2, ItemKind::G, 1);
        f.ctl.press(center(2, 2), 100, &f.grid);
        f.ctl.update(100 + CLICK_DELAY_MS);
        assert_eq!(f.ctl.state(), ControllerState::Pressed);
        f.ctl.update(101 + CLICK_DELAY_MS);
        assert_eq!(f.ctl.state(), ControllerState::Dragging);
    }

    #[test]
    fn drop_onto_empty_cell_moves() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::B, 2);
        let ev = f.drag(center(0, 0), center(3, 3));
        assert_eq!(
            ev,
            Some(GameEvent::Moved {
                from: GridPos::new(0, 0),
                to: GridPos::new(3, 3),
                item: Item::new(ItemKind::B, 2),
            })
        );
        assert_eq!(f.grid.get(0, 0), Some(None));
        assert_eq!(f.grid.get(3, 3), Some(Some(Item::new(ItemKind::B, 2))));
        assert_eq!(f.ctl.state(), ControllerState::Idle);
    }

    #[test]
    fn drop_onto_equal_item_merges() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::C, 3);
        f.put(1, 1, ItemKind::C, 3);
        let ev = f.drag(center(0, 0), center(1, 1));
        assert!(matches!(ev, Some(GameEvent::Merged { .. })));
        assert_eq!(f.grid.get(0, 0), Some(None));
        assert_eq!(f.grid.get(1, 1), Some(Some(Item::new(ItemKind::C, 4))));
        assert_eq!(f.grid.item_count(), 1);
    }

    #[test]
    fn generators_merge_like_any_item() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::G, 2);
        f.put(0, 1, ItemKind::G, 2);
        f.ctl.press(center(0, 0), 0, &f.grid);
        f.ctl.update(CLICK_DELAY_MS + 1);
        let ev = f.ctl.release(
            center(0, 1),
            CLICK_DELAY_MS + 1,
            &mut f.grid,
            &mut f.score,
            &mut f.rng,
        );
        assert!(matches!(ev, Some(GameEvent::Merged { .. })));
        assert_eq!(f.grid.get(0, 1), Some(Some(Item::new(ItemKind::G, 3))));
    }

    #[test]
    fn max_level_items_do_not_merge() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::A, 7);
        f.put(0, 1, ItemKind::A, 7);
        let before = f.grid.clone();
        let ev = f.drag(center(0, 0), center(0, 1));
        assert!(matches!(ev, Some(GameEvent::DropRejected { .. })));
        assert_eq!(f.grid, before);
    }

    #[test]
    fn drop_onto_different_item_snaps_back() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::A, 2);
        f.put(0, 1, ItemKind::B, 2);
        f.put(1, 0, ItemKind::A, 3);
        let before = f.grid.clone();
        assert!(matches!(
            f.drag(center(0, 0), center(0, 1)),
            Some(GameEvent::DropRejected { .. })
        ));
        assert!(matches!(
            f.drag(center(0, 0), center(1, 0)),
            Some(GameEvent::DropRejected { .. })
        ));
        assert_eq!(f.grid, before);
    }

    #[test]
    fn drop_on_origin_or_outside_is_noop() {
        let mut f = Fixture::new();
        f.put(1, 1, ItemKind::A, 1);
        let before = f.grid.clone();
        assert_eq!(f.drag(center(1, 1), center(1, 1)), None);
        // Left of the submission box, below the grid.
        let outside = ScreenPos::new(0, SUBMIT_BOX.y as i32 + 1);
        assert_eq!(f.drag(center(1, 1), outside), None);
        assert_eq!(f.grid, before);
        assert_eq!(f.ctl.state(), ControllerState::Idle);
    }

    #[test]
    fn submit_consumes_item_for_points() {
        let mut f = Fixture::new();
        f.put(2, 3, ItemKind::B, 3);
        let ev = f.drag(center(2, 3), submit_point());
        assert_eq!(
            ev,
            Some(GameEvent::Submitted {
                from: GridPos::new(2, 3),
                item: Item::new(ItemKind::B, 3),
                points: 87,
                total: 87,
            })
        );
        assert_eq!(f.grid.item_count(), 0);
        assert_eq!(f.score.total(), 87);
    }

    #[test]
    fn submitting_generator_is_rejected() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::G, 3);
        f.ctl.press(center(0, 0), 0, &f.grid);
        f.ctl.pointer_moved(submit_point(), true, 500);
        let ev = f
            .ctl
            .release(submit_point(), 600, &mut f.grid, &mut f.score, &mut f.rng);
        assert_eq!(ev, None);
        assert_eq!(f.grid.get(0, 0), Some(Some(Item::new(ItemKind::G, 3))));
        assert_eq!(f.score.total(), 0);
    }

    #[test]
    fn release_without_drag_changes_nothing() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::A, 1);
        f.ctl.press(center(0, 0), 0, &f.grid);
        let ev = f
            .ctl
            .release(center(0, 1), 50, &mut f.grid, &mut f.score, &mut f.rng);
        assert_eq!(ev, None);
        assert_eq!(f.grid.get(0, 0), Some(Some(Item::new(ItemKind::A, 1))));
        assert_eq!(f.ctl.state(), ControllerState::Idle);
    }

    #[test]
    fn tap_spawns_into_empty_cell() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::G, 1);
        f.ctl.press(center(0, 0), 1_000, &f.grid);
        let ev = f
            .ctl
            .release(center(0, 0), 1_050, &mut f.grid, &mut f.score, &mut f.rng);
        match ev {
            Some(GameEvent::Spawned { pos, item, source }) => {
                assert_eq!(source, SpawnSource::Tap);
                assert_ne!(pos, GridPos::new(0, 0));
                assert_eq!(f.grid.item_at(pos), Some(item));
                assert!(!item.is_generator());
            }
            other => panic!("expected spawn, got {other:?}"),
        }
        assert_eq!(f.grid.item_count(), 2);
    }

    #[test]
    fn slow_generator_release_is_not_a_tap() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::G, 1);
        f.ctl.press(center(0, 0), 0, &f.grid);
        let ev = f.ctl.release(
            center(0, 0),
            CLICK_DELAY_MS,
            &mut f.grid,
            &mut f.score,
            &mut f.rng,
        );
        assert_eq!(ev, None);
        assert_eq!(f.grid.item_count(), 1);
    }

    #[test]
    fn tap_on_full_grid_is_silent() {
        let mut f = Fixture::new();
        for row in 0..4 {
            for col in 0..4 {
                f.put(row, col, ItemKind::A, 1);
            }
        }
        f.put(0, 0, ItemKind::G, 1);
        let before = f.grid.clone();
        f.ctl.press(center(0, 0), 0, &f.grid);
        let ev = f
            .ctl
            .release(center(0, 0), 10, &mut f.grid, &mut f.score, &mut f.rng);
        assert_eq!(ev, None);
        assert_eq!(f.grid, before);
    }

    #[test]
    fn cancel_discards_gesture() {
        let mut f = Fixture::new();
        f.put(0, 0, ItemKind::A, 1);
        f.ctl.press(center(0, 0), 0, &f.grid);
        f.ctl.pointer_moved(center(0, 1), true, 5);
        f.ctl.cancel();
        assert_eq!(f.ctl.state(), ControllerState::Idle);
        let ev = f
            .ctl
            .release(center(0, 1), 10, &mut f.grid, &mut f.score, &mut f.rng);
        assert_eq!(ev, None);
        assert_eq!(f.grid.get(0, 0), Some(Some(Item::new(ItemKind::A, 1))));
    }
}
