//! Deterministic random number generation for bot decisions.
//!
//! Rules resolution itself is fully deterministic; randomness only enters
//! through decision providers that pick among legal options. Every bot seat
//! gets its own stream derived from the match seed, so replays with the same
//! seed make the same choices.
//!
//! ```
//! use kudurru_rules::core::{GameRng, PlayerId};
//!
//! let mut a = GameRng::new(42).for_seat(PlayerId::new(1));
//! let mut b = GameRng::new(42).for_seat(PlayerId::new(1));
//! assert_eq!(a.pick_index(10), b.pick_index(10));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::player::PlayerId;

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Independent stream for one seat. Same seed and seat, same sequence.
    #[must_use]
    pub fn for_seat(&self, seat: PlayerId) -> Self {
        let seat_seed = self
            .seed
            .wrapping_add((seat.0 as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(seat_seed)
    }

    /// Uniform index in `0..len`. Returns `None` for an empty range.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        self.pick_index(slice.len()).map(|i| &slice[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);

        for _ in 0..50 {
            assert_eq!(a.pick_index(100), b.pick_index(100));
        }
    }

    #[test]
    fn test_seat_streams_differ() {
        let root = GameRng::new(42);
        let mut s0 = root.for_seat(PlayerId::new(0));
        let mut s1 = root.for_seat(PlayerId::new(1));

        let a: Vec<_> = (0..16).filter_map(|_| s0.pick_index(1000)).collect();
        let b: Vec<_> = (0..16).filter_map(|_| s1.pick_index(1000)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_choice() {
        let mut rng = GameRng::new(1);
        let empty: [u8; 0] = [];

        assert_eq!(rng.pick_index(0), None);
        assert_eq!(rng.choose(&empty), None);
        assert_eq!(rng.choose(&[9]), Some(&9));
    }
}
