//! Lazy enumeration of every seed satisfying a reversal constraint

use super::session::{SolveSession, SolverError};
use std::collections::HashSet;
use std::iter::FusedIterator;

/// Where an enumeration currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationState {
    /// Created, no check issued yet.
    Idle,
    /// A satisfiability check is in flight.
    Solving,
    /// The last check produced a candidate; the next pull resumes solving.
    Yielding,
    /// Terminal: the constraint went unsatisfiable, a failure was surfaced,
    /// or the consumer saw the end.
    Done,
}

/// Iterator over all distinct seeds satisfying one reversal constraint.
///
/// Each pull performs exactly one satisfiability check: on sat the assigned
/// seed is recorded, blocked, and yielded; on unsat the sequence ends
/// cleanly. A solver failure is yielded once as `Err` and terminates the
/// sequence; it is never folded into a clean end. No value is produced
/// twice, and nothing is computed ahead of the pull, so consumers may stop
/// at any point.
///
/// The order of seeds is whatever the engine's search yields; only the set
/// is deterministic.
pub struct SeedEnumerator<S> {
    session: S,
    found: HashSet<u64>,
    state: EnumerationState,
}

impl<S: SolveSession> SeedEnumerator<S> {
    /// Wrap a session whose running constraint is the initial equality.
    pub fn new(session: S) -> Self {
        Self {
            session,
            found: HashSet::new(),
            state: EnumerationState::Idle,
        }
    }

    /// Current position in the enumeration lifecycle.
    pub fn state(&self) -> EnumerationState {
        self.state
    }

    /// Number of distinct seeds produced so far.
    pub fn found_count(&self) -> usize {
        self.found.len()
    }
}

impl<S: SolveSession> Iterator for SeedEnumerator<S> {
    type Item = Result<u64, SolverError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == EnumerationState::Done {
            return None;
        }

        self.state = EnumerationState::Solving;
        match self.session.next_candidate() {
            Ok(Some(seed)) => {
                if !self.found.insert(seed) {
                    // The blocking clause should have excluded this value;
                    // a repeat means the engine is not honoring it.
                    self.state = EnumerationState::Done;
                    return Some(Err(SolverError::DuplicateCandidate(seed)));
                }
                self.session.block(seed);
                self.state = EnumerationState::Yielding;
                Some(Ok(seed))
            }
            Ok(None) => {
                self.state = EnumerationState::Done;
                None
            }
            Err(err) => {
                self.state = EnumerationState::Done;
                Some(Err(err))
            }
        }
    }
}

impl<S: SolveSession> FusedIterator for SeedEnumerator<S> {}
