//! SMT solver integration using Z3

use super::model::{build_gen_seed_model, width_mask, SEED_WIDTH};
use crate::config::Settings;
use thiserror::Error;
use z3::ast::{Ast, BV};
use z3::{Config, Context, Params, SatResult, Solver};

/// Failures reported by the solving capability.
///
/// An unsatisfiable constraint is NOT an error; it is the clean end of an
/// enumeration. These variants cover everything else, so "no seeds found"
/// stays distinguishable from "the solver gave up".
#[derive(Debug, Error)]
pub enum SolverError {
    /// The engine returned neither sat nor unsat (timeout, resource limit,
    /// or an incomplete theory result).
    #[error("solver returned an inconclusive result: {0}")]
    Inconclusive(String),
    /// The engine reported sat but produced no usable assignment for the
    /// seed variable.
    #[error("satisfying model carried no assignment for the seed variable")]
    MissingAssignment,
    /// The engine produced a value that was already blocked.
    #[error("solving engine re-produced blocked candidate {0:#018x}")]
    DuplicateCandidate(u64),
}

/// One reversal call's view of the solving capability.
///
/// The enumerator is written against this seam rather than against Z3
/// directly; any fixed-width bit-vector engine with incremental assertions
/// can stand behind it.
pub trait SolveSession {
    /// Check the running constraint. `Ok(Some(seed))` is a satisfying
    /// assignment, `Ok(None)` means proven unsatisfiable.
    fn next_candidate(&mut self) -> Result<Option<u64>, SolverError>;

    /// Conjoin a blocking clause excluding `seed` from future candidates.
    fn block(&mut self, seed: u64);
}

/// Process-wide solver state.
///
/// Owns the Z3 context all sessions allocate their terms from. Construct one
/// explicitly at startup and hand it to each reversal call; the working
/// constraints of a call never live here. Z3 contexts must not be shared
/// across threads, so concurrent reversal calls need a context each.
pub struct SolverContext {
    ctx: Context,
}

impl SolverContext {
    /// Initialize the solver context with model extraction enabled.
    pub fn new() -> Self {
        let mut cfg = Config::new();
        cfg.set_model_generation(true);
        Self {
            ctx: Context::new(&cfg),
        }
    }

    pub(crate) fn ctx(&self) -> &Context {
        &self.ctx
    }
}

impl Default for SolverContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Z3-backed [`SolveSession`] for one observed generator seed.
///
/// Construction builds the symbolic model once and asserts the initial
/// equality `observed == model(seed)`. Blocking clauses are conjoined onto
/// the same solver incrementally. Everything allocated here is released when
/// the session drops, on every exit path.
pub struct SmtSession<'ctx> {
    ctx: &'ctx Context,
    solver: Solver<'ctx>,
    seed_var: BV<'ctx>,
    width: u32,
    checks: usize,
}

impl<'ctx> SmtSession<'ctx> {
    /// Open a session for one observed value at the full seed width.
    pub fn new(context: &'ctx SolverContext, settings: &Settings, observed: u64) -> Self {
        Self::with_width(context, settings, observed, SEED_WIDTH)
    }

    /// Open a session over a reduced-width variant of the model.
    ///
    /// Narrow widths keep the seed domain small enough to cross-check the
    /// enumeration exhaustively against the concrete step.
    pub fn with_width(
        context: &'ctx SolverContext,
        settings: &Settings,
        observed: u64,
        width: u32,
    ) -> Self {
        let ctx = context.ctx();
        let seed_var = BV::new_const(ctx, "seed", width);

        let solver = Solver::new(ctx);
        let mut params = Params::new(ctx);
        if let Some(timeout_ms) = settings.solver.timeout_ms {
            params.set_u32("timeout", timeout_ms);
        }
        if let Some(random_seed) = settings.solver.random_seed {
            params.set_u32("random_seed", random_seed);
        }
        solver.set_params(&params);

        let session = Self {
            ctx,
            solver,
            seed_var,
            width,
            checks: 0,
        };

        let model_expr = build_gen_seed_model(ctx, &settings.generator, &session.seed_var);
        session
            .solver
            .assert(&session.constant(observed)._eq(&model_expr));
        session
    }

    /// Number of satisfiability checks issued so far.
    pub fn checks(&self) -> usize {
        self.checks
    }

    /// A width-sized constant, masked to the model width.
    fn constant(&self, value: u64) -> BV<'ctx> {
        BV::from_u64(self.ctx, value & width_mask(self.width), self.width)
    }
}

impl SolveSession for SmtSession<'_> {
    fn next_candidate(&mut self) -> Result<Option<u64>, SolverError> {
        self.checks += 1;
        match self.solver.check() {
            SatResult::Sat => {
                let model = self
                    .solver
                    .get_model()
                    .ok_or(SolverError::MissingAssignment)?;
                let value = model
                    .eval(&self.seed_var, true)
                    .and_then(|bv| bv.as_u64())
                    .ok_or(SolverError::MissingAssignment)?;
                Ok(Some(value))
            }
            SatResult::Unsat => Ok(None),
            SatResult::Unknown => Err(SolverError::Inconclusive(
                self.solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "unknown".to_string()),
            )),
        }
    }

    fn block(&mut self, seed: u64) {
        let found = self.constant(seed);
        self.solver.assert(&self.seed_var._eq(&found).not());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::generator::GeneratorRules;

    fn reduced_settings() -> Settings {
        let mut settings = Settings::default();
        settings.generator = GeneratorConfig {
            xor_const: 0x5B,
            rot_a: 3,
            rot_b: 5,
            mul_shift: 2,
        };
        settings
    }

    #[test]
    fn test_satisfiable_check_yields_preimage() {
        let context = SolverContext::new();
        let settings = reduced_settings();
        // 0x02 has exactly the preimages {0x75, 0xEC} in the 8-bit variant.
        let mut session = SmtSession::with_width(&context, &settings, 0x02, 8);

        let first = session.next_candidate().unwrap().unwrap();
        assert!(first == 0x75 || first == 0xEC);

        session.block(first);
        let second = session.next_candidate().unwrap().unwrap();
        assert!(second == 0x75 || second == 0xEC);
        assert_ne!(first, second);

        session.block(second);
        assert!(session.next_candidate().unwrap().is_none());
        assert_eq!(session.checks(), 3);
    }

    #[test]
    fn test_unsatisfiable_check_is_clean_none() {
        let context = SolverContext::new();
        let settings = reduced_settings();
        // 0x01 has no preimage in the 8-bit variant.
        let mut session = SmtSession::with_width(&context, &settings, 0x01, 8);

        assert!(session.next_candidate().unwrap().is_none());
    }

    #[test]
    fn test_full_width_candidate_round_trips() {
        let context = SolverContext::new();
        let settings = Settings::default();
        let observed = GeneratorRules::gen_seed(42, &settings.generator);
        let mut session = SmtSession::new(&context, &settings, observed);

        let candidate = session.next_candidate().unwrap().unwrap();
        assert!(GeneratorRules::reproduces(
            candidate,
            observed,
            &settings.generator
        ));
    }

    #[test]
    fn test_blocking_excludes_value() {
        let context = SolverContext::new();
        let settings = Settings::default();
        let observed = GeneratorRules::gen_seed(7, &settings.generator);
        let mut session = SmtSession::new(&context, &settings, observed);

        let first = session.next_candidate().unwrap().unwrap();
        session.block(first);

        // Either another preimage exists or the constraint is now unsat;
        // the blocked value itself must never come back.
        if let Some(second) = session.next_candidate().unwrap() {
            assert_ne!(first, second);
        }
    }
}
