//! Utility helpers for output formatting

pub mod display;

pub use display::{CandidateFormatter, ColorOutput};
