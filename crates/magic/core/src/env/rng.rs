//! RNG oracle for deterministic random number generation.
//!
//! Spell resolution never touches ambient randomness. The only consumer is the
//! weighted spawn resolver, which draws from an [`RngStream`]: a stateless
//! [`RngOracle`] plus a base seed and a draw cursor. Replaying a cast with the
//! same base seed replays the same draws.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit_f64(&self, seed: u64) -> f64 {
        self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// - **Deterministic**: same seed always produces same output
/// - **Small state**: only 64 bits, derived from the seed on every call
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed from independent entropy sources.
///
/// * `base_seed` - seed configured for the world (for replay/determinism)
/// * `cast_nonce` - sequence number of the cast being resolved
/// * `actor_id` - entity performing the cast
/// * `draw` - index of the draw within this cast
pub fn compute_seed(base_seed: u64, cast_nonce: u64, actor_id: u32, draw: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = base_seed;
    hash ^= cast_nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (draw as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequence of draws for one cast.
///
/// Each call advances the cursor, so two streams created with the same
/// `(oracle, base_seed, cast_nonce, actor_id)` yield identical values.
pub struct RngStream<'a> {
    oracle: &'a dyn RngOracle,
    base_seed: u64,
    cast_nonce: u64,
    actor_id: u32,
    cursor: u32,
}

impl<'a> RngStream<'a> {
    pub fn new(oracle: &'a dyn RngOracle, base_seed: u64, cast_nonce: u64, actor_id: u32) -> Self {
        Self {
            oracle,
            base_seed,
            cast_nonce,
            actor_id,
            cursor: 0,
        }
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let seed = compute_seed(self.base_seed, self.cast_nonce, self.actor_id, self.cursor);
        self.cursor = self.cursor.wrapping_add(1);
        self.oracle.unit_f64(seed)
    }

    /// Returns true with probability `p`.
    pub fn prob(&mut self, p: f32) -> bool {
        self.next_f64() < p as f64
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u32 {
        self.cursor
    }
}
