//! Item generator - weighted random items for a reward level
//!
//! Higher generator levels shift both distributions away from weak items:
//!
//! ```text
//! multi = (level - 1)^1.1
//!
//! kind:  A max(0.7 - 0.1*multi, 0.1)   B 0.3 + 0.05*multi   C 0.05*multi
//! level: 1 max(0.8 - 0.1*multi, 0.1)   2 0.2 + 0.06*multi
//!        3 0.035*multi                 4 0.005*multi
//! ```
//!
//! Kind and level are sampled independently.

use crate::rng::{weighted_index, RandomSource};
use crate::types::{Item, ItemKind};

const KINDS: [ItemKind; 3] = [ItemKind::A, ItemKind::B, ItemKind::C];
const LEVELS: [u8; 4] = [1, 2, 3, 4];

/// Level multiplier: `(level - 1)^1.1`, 0 at level 1
pub fn level_multiplier(level: u8) -> f64 {
    f64::from(level.saturating_sub(1)).powf(1.1)
}

/// Kind weights for A, B, C
pub fn kind_weights(level: u8) -> [f64; 3] {
    let multi = level_multiplier(level);
    [
        (0.7 - 0.1 * multi).max(0.1),
        0.3 + 0.05 * multi,
        0.05 * multi,
    ]
}

/// Level weights for item levels 1 through 4
pub fn level_weights(level: u8) -> [f64; 4] {
    let multi = level_multiplier(level);
    [
        (0.8 - 0.1 * multi).max(0.1),
        0.2 + 0.06 * multi,
        0.035 * multi,
        0.005 * multi,
    ]
}

/// Generate an item for a generator of the given level.
pub fn spawn_item<R: RandomSource + ?Sized>(level: u8, rng: &mut R) -> Item {
    // Both weight tables always have a positive first entry.
    let kind = weighted_index(rng, &kind_weights(level))
        .map(|i| KINDS[i])
        .unwrap_or(ItemKind::A);
    let item_level = weighted_index(rng, &level_weights(level))
        .map(|i| LEVELS[i])
        .unwrap_or(1);
    Item::new(kind, item_level)
}
