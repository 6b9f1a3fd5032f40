//! The public reversal service

use super::{CandidateSeed, CandidateSet, CandidateValidator};
use crate::config::Settings;
use crate::smt::{SeedEnumerator, SmtSession, SolverContext};
use anyhow::{Context, Result};
use std::time::Instant;

/// Reverses observed generator seeds into candidate bottom-level seeds.
///
/// Holds the validated settings and a borrow of the process-wide solver
/// context; each reversal call gets its own solver session, so the service
/// can be reused for any number of observed values.
pub struct SeedReversal<'ctx> {
    context: &'ctx SolverContext,
    settings: Settings,
}

impl<'ctx> SeedReversal<'ctx> {
    /// Create a reversal service over a solver context.
    pub fn new(context: &'ctx SolverContext, settings: Settings) -> Result<Self> {
        settings
            .validate()
            .context("Invalid reversal settings")?;
        Ok(Self { context, settings })
    }

    /// Lazily enumerate every seed that steps to `observed`.
    ///
    /// The model is built once, up front; each element pulled from the
    /// returned iterator performs exactly one solve step. Dropping the
    /// iterator early releases the session with no further work. Set
    /// completeness is deterministic for fixed constants; element order is
    /// not.
    pub fn find_potential_gen_seeds(
        &self,
        observed: u64,
    ) -> SeedEnumerator<SmtSession<'ctx>> {
        let session = SmtSession::new(self.context, &self.settings, observed);
        SeedEnumerator::new(session)
    }

    /// Drive a reversal to completion and return a validated report.
    ///
    /// Honors `solver.max_candidates`; a run stopped by the cap is marked
    /// truncated. Every returned candidate is round-tripped through the
    /// concrete forward step before the set is handed back.
    pub fn find_all(&self, observed: u64) -> Result<CandidateSet> {
        let start = Instant::now();
        let mut set = CandidateSet::new(observed);
        let cap = self.settings.solver.max_candidates;

        let mut enumerator = self.find_potential_gen_seeds(observed);
        while let Some(item) = enumerator.next() {
            let seed = item.context("Seed enumeration failed")?;
            set.candidates
                .push(CandidateSeed::derive(seed, &self.settings.generator));

            if cap.is_some_and(|cap| set.len() >= cap) {
                set.truncated = true;
                break;
            }
        }
        set.solve_time = start.elapsed();

        let validator = CandidateValidator::new(self.settings.generator);
        let validation = validator.validate_all(&set.seeds(), observed);
        if !validation.all_valid() {
            anyhow::bail!(
                "Solver produced candidates that fail the forward step:\n{}",
                validation
            );
        }

        Ok(set)
    }

    /// The settings this service runs with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
