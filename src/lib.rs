//! Generator Seed Reversal
//!
//! This library recovers every 64-bit bottom-level seed that could have
//! produced an observed generator seed under one fixed step of the game's
//! Xoroshiro128+-style generator. The step is modeled symbolically as a
//! bit-vector constraint and all solutions are enumerated through Z3 with
//! blocking clauses.

pub mod config;
pub mod generator;
pub mod smt;
pub mod reversal;
pub mod utils;

pub use config::Settings;
pub use reversal::{CandidateSet, SeedReversal};
pub use smt::{SeedEnumerator, SolverContext, SolverError};

use anyhow::Result;

/// Main entry point for reversing an observed generator seed
pub fn reverse_gen_seed(settings: Settings, observed: u64) -> Result<CandidateSet> {
    let context = SolverContext::new();
    let service = SeedReversal::new(&context, settings)?;
    service.find_all(observed)
}
