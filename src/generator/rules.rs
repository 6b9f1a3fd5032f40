//! Concrete forward step of the generator being reversed

use crate::config::GeneratorConfig;
use serde::{Deserialize, Serialize};

/// The pair of state words produced by one generator step.
///
/// Purely a computation result; nothing here is persisted. The observable
/// output of the step (the generator seed) is the wrapping sum of the two
/// words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorState {
    pub s0: u64,
    pub s1: u64,
}

impl GeneratorState {
    /// The generator seed this state emits.
    pub fn gen_seed(&self) -> u64 {
        self.s0.wrapping_add(self.s1)
    }
}

/// The generator step function, parameterized by the configured constants.
pub struct GeneratorRules;

impl GeneratorRules {
    /// Advance one step from a bottom-level seed and return the state pair.
    ///
    /// Step order:
    /// 1. `s1 = seed ^ xor_const`
    /// 2. `s0 = rotl(seed, rot_a) ^ s1 ^ (s1 * 2^mul_shift)`
    /// 3. `s1 = rotl(s1, rot_b)`
    pub fn advance(seed: u64, generator: &GeneratorConfig) -> GeneratorState {
        let mut s1 = seed ^ generator.xor_const;
        let s0 = seed.rotate_left(generator.rot_a)
            ^ s1
            ^ s1.wrapping_mul(1u64 << generator.mul_shift);
        s1 = s1.rotate_left(generator.rot_b);
        GeneratorState { s0, s1 }
    }

    /// The generator seed produced from a bottom-level seed in one step.
    pub fn gen_seed(seed: u64, generator: &GeneratorConfig) -> u64 {
        Self::advance(seed, generator).gen_seed()
    }

    /// Check that a candidate seed reproduces an observed generator seed.
    pub fn reproduces(seed: u64, observed: u64, generator: &GeneratorConfig) -> bool {
        Self::gen_seed(seed, generator) == observed
    }
}
