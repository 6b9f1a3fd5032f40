//! Forward generator step (the function the reversal inverts)

pub mod rules;

pub use rules::{GeneratorRules, GeneratorState};
