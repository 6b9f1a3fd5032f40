//! Seed reversal service, candidate reports, and validation

pub mod service;
pub mod candidate;
pub mod validator;

pub use service::SeedReversal;
pub use candidate::{CandidateSeed, CandidateSet};
pub use validator::{CandidateValidator, MultiValidationResult, ValidationResult};
