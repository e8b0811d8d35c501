//! RNG module - pluggable random source and weighted choice
//!
//! Game logic never talks to a concrete generator. Everything random goes through
//! [`RandomSource`], so tests can inject a seeded or fully scripted source.
//!
//! Also provides a simple LCG for deterministic play and testing.

/// Source of uniform random numbers.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform integer in `[0, max)`; `max` must be non-zero
    ///
    /// Multiply-shift instead of modulo: the low bits of an LCG have short periods.
    fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Pick an index with probability proportional to its weight.
///
/// Cumulative-weight scan over a single uniform draw in `[0, total)`. Weights need
/// not sum to 1; zero and negative weights are never chosen. Returns `None` if no
/// weight is positive.
pub fn weighted_index<R: RandomSource + ?Sized>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let draw = rng.next_f64() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(i);
        if draw < cumulative {
            return Some(i);
        }
    }

    // Float rounding can leave `draw` a hair above the final cumulative sum.
    last_positive
}

/// Pick a uniformly random element of `items`.
pub fn choose<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.next_range(items.len() as u32) as usize;
    items.get(idx)
}
