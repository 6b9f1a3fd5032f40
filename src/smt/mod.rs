//! Symbolic modeling and solution enumeration over the SMT engine

pub mod model;
pub mod session;
pub mod enumerator;

pub use model::{build_gen_seed_model, SEED_WIDTH};
pub use session::{SmtSession, SolveSession, SolverContext, SolverError};
pub use enumerator::{EnumerationState, SeedEnumerator};
