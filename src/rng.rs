//! Bit-exact reproduction of the POSIX `drand48` family of generators.
//!
//! The transition, seeding, and rejection-sampling behavior here must match
//! `glibc`'s `erand48`/`drand48` exactly: every consumer of this module
//! (the workload generator, first and foremost) depends on the precise
//! sequence of draws, not merely their statistical distribution.

const MASK48: u64 = (1u64 << 48) - 1;
const MULTIPLIER: u64 = 0x5DEECE66D; // 25214903917
const INCREMENT: u64 = 0xB; // 11

/// A 48-bit linear congruential generator, seeded the way `srand48` seeds it.
#[derive(Clone, Debug)]
pub struct Rand48 {
    n: u64,
}

impl Rand48 {
    /// Creates a generator and immediately seeds it, mirroring `srand48(seed)`.
    pub fn new(seed: i64) -> Self {
        let mut rng = Self { n: 0 };
        rng.srand(seed);
        rng
    }

    /// Re-seeds the generator: `n <- (seed << 16) | 0x330E`.
    pub fn srand(&mut self, seed: i64) {
        self.n = ((seed as u64) << 16 | 0x330E) & MASK48;
    }

    fn next(&mut self) -> u64 {
        self.n = (MULTIPLIER.wrapping_mul(self.n).wrapping_add(INCREMENT)) & MASK48;
        self.n
    }

    /// Returns a uniform real in `[0, 1)`.
    pub fn drand(&mut self) -> f64 {
        self.next() as f64 / (1u64 << 48) as f64
    }

    /// Draws from a truncated exponential distribution with rate `lambda`,
    /// rejecting (and redrawing) any value that is not strictly less than
    /// `threshold`.
    ///
    /// The reference implementation recurses on rejection; this is written
    /// as a loop, which is an observably identical transliteration since
    /// only the number and order of `drand()` calls is part of the contract,
    /// never call-stack shape.
    pub fn next_exp(&mut self, lambda: f64, threshold: u32) -> f64 {
        loop {
            let r = self.drand();
            let x = -r.ln() / lambda;
            if x < threshold as f64 {
                return x;
            }
        }
    }
}
