use crate::state::Tick;

/// Tunable parameters for spell resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MagicConfig {
    /// Scale applied to the performer→target vector when smiting.
    pub smite_impulse_multiplier: f32,

    /// Learn time for spellbooks that do not declare their own.
    pub default_learn_time: Tick,

    /// Base seed for every rng stream handed to the spawn resolver.
    pub rng_seed: u64,
}

impl MagicConfig {
    pub const DEFAULT_SMITE_IMPULSE_MULTIPLIER: f32 = 10_000.0;
    pub const DEFAULT_LEARN_TIME: Tick = Tick(30);
    pub const DEFAULT_RNG_SEED: u64 = 0;

    pub fn new() -> Self {
        Self {
            smite_impulse_multiplier: Self::DEFAULT_SMITE_IMPULSE_MULTIPLIER,
            default_learn_time: Self::DEFAULT_LEARN_TIME,
            rng_seed: Self::DEFAULT_RNG_SEED,
        }
    }

    pub fn with_seed(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            ..Self::new()
        }
    }
}

impl Default for MagicConfig {
    fn default() -> Self {
        Self::new()
    }
}
