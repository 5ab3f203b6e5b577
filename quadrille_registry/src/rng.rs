// Copyright 2025 the Quadrille Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Small xorshift64* generator.
///
/// Used for id-collision suffixes and for the randomized label update order
/// in the render pipeline. Quality requirements are modest (tie-breaking,
/// not simulation), so a self-contained generator keeps the crate `no_std`
/// without pulling in an RNG dependency.
#[derive(Clone, Debug)]
pub struct Rand64 {
    state: u64,
}

impl Rand64 {
    /// Creates a generator from a seed. A zero seed is remapped, since the
    /// all-zero state is a fixed point of the xorshift step.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    /// Returns the next pseudo-random `u64`.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Returns a value in `0..bound` (`bound` must be non-zero).
    pub fn next_below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    /// Fisher-Yates shuffle of a slice.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let len = items.len();
        for i in (1..len).rev() {
            let j = self.next_below(i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }
}
