//! 7-bag randomizer for piece generation
//!
//! Tetris uses a "7-bag" system where all 7 pieces are shuffled,
//! then dealt out before reshuffling. This prevents long droughts.
//! The upcoming bag is always shuffled ahead of time so the preview can
//! look across the bag boundary.

use crate::tetromino::TetrominoType;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag<R = ChaCha8Rng> {
    /// Remainder of the bag being dealt
    current: VecDeque<TetrominoType>,
    /// Fully shuffled bag that follows `current`
    next: Vec<TetrominoType>,
    rng: R,
}

impl Bag<ChaCha8Rng> {
    /// Deterministic bag sequence for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Bag<R> {
    /// Create a bag randomizer drawing from the given random source
    pub fn with_rng(rng: R) -> Self {
        let mut bag = Self {
            current: VecDeque::with_capacity(7),
            next: Vec::with_capacity(7),
            rng,
        };
        bag.reset();
        bag
    }

    /// Get the next piece. Once the current bag runs dry the shuffled
    /// follow-up bag takes its place and a new one is shuffled behind it.
    pub fn next(&mut self) -> TetrominoType {
        loop {
            let piece = self.current.pop_front();
            if self.current.is_empty() {
                let fresh = self.shuffled();
                self.current = std::mem::replace(&mut self.next, fresh).into();
            }
            if let Some(piece) = piece {
                return piece;
            }
        }
    }

    /// Preview the next N pieces without removing them.
    /// Looks at most into the following bag; longer requests are truncated.
    pub fn preview(&self, count: usize) -> Vec<TetrominoType> {
        self.current
            .iter()
            .chain(self.next.iter())
            .take(count)
            .copied()
            .collect()
    }

    /// Reshuffle both bags from scratch
    pub fn reset(&mut self) {
        self.current = self.shuffled().into();
        self.next = self.shuffled();
    }

    /// A fresh Fisher-Yates shuffled bag
    fn shuffled(&mut self) -> Vec<TetrominoType> {
        let mut bag = TetrominoType::all().to_vec();
        bag.shuffle(&mut self.rng);
        bag
    }
}
