//! Round-trip validation of recovered seeds

use crate::config::GeneratorConfig;
use crate::generator::{GeneratorRules, GeneratorState};

/// Validates recovered seeds against the concrete forward step.
///
/// The solver works on a symbolic copy of the step; this closes the loop by
/// re-running the real one.
pub struct CandidateValidator {
    generator: GeneratorConfig,
}

/// Result of validating one candidate seed
#[derive(Debug, Clone, Copy)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Generator seed actually produced by the candidate.
    pub reproduced: u64,
    /// State pair the candidate steps to.
    pub state: GeneratorState,
}

/// Aggregate result over a whole candidate set
#[derive(Debug, Clone)]
pub struct MultiValidationResult {
    pub total: usize,
    pub valid: usize,
    pub invalid_seeds: Vec<u64>,
}

impl CandidateValidator {
    pub fn new(generator: GeneratorConfig) -> Self {
        Self { generator }
    }

    /// Check that one candidate reproduces the observed generator seed.
    pub fn validate(&self, seed: u64, observed: u64) -> ValidationResult {
        let state = GeneratorRules::advance(seed, &self.generator);
        let reproduced = state.gen_seed();
        ValidationResult {
            is_valid: reproduced == observed,
            reproduced,
            state,
        }
    }

    /// Validate every candidate in a set.
    pub fn validate_all(&self, seeds: &[u64], observed: u64) -> MultiValidationResult {
        let invalid_seeds: Vec<u64> = seeds
            .iter()
            .copied()
            .filter(|&seed| !self.validate(seed, observed).is_valid)
            .collect();

        MultiValidationResult {
            total: seeds.len(),
            valid: seeds.len() - invalid_seeds.len(),
            invalid_seeds,
        }
    }
}

impl MultiValidationResult {
    pub fn all_valid(&self) -> bool {
        self.invalid_seeds.is_empty()
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Validation Result: {}",
            if self.is_valid { "VALID" } else { "INVALID" }
        )?;
        writeln!(f, "  Reproduced gen seed: {:#018x}", self.reproduced)?;
        writeln!(
            f,
            "  State pair: s0={:#018x} s1={:#018x}",
            self.state.s0, self.state.s1
        )?;
        Ok(())
    }
}

impl std::fmt::Display for MultiValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Candidate Validation Results:")?;
        writeln!(f, "  Total candidates: {}", self.total)?;
        writeln!(f, "  Valid: {}", self.valid)?;
        writeln!(f, "  Invalid: {}", self.invalid_seeds.len())?;
        for seed in &self.invalid_seeds {
            writeln!(f, "    - {:#018x}", seed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_candidate() {
        let generator = GeneratorConfig::default();
        let validator = CandidateValidator::new(generator);
        let observed = GeneratorRules::gen_seed(1234, &generator);

        let result = validator.validate(1234, observed);
        assert!(result.is_valid);
        assert_eq!(result.reproduced, observed);
    }

    #[test]
    fn test_invalid_candidate() {
        let generator = GeneratorConfig::default();
        let validator = CandidateValidator::new(generator);
        let observed = GeneratorRules::gen_seed(1234, &generator);

        let result = validator.validate(4321, observed);
        assert!(!result.is_valid);
        assert_ne!(result.reproduced, observed);
    }

    #[test]
    fn test_validate_all_flags_offenders() {
        let generator = GeneratorConfig::default();
        let validator = CandidateValidator::new(generator);
        let observed = GeneratorRules::gen_seed(7, &generator);

        let result = validator.validate_all(&[7, 8], observed);
        assert_eq!(result.total, 2);
        assert_eq!(result.valid, 1);
        assert_eq!(result.invalid_seeds, vec![8]);
        assert!(!result.all_valid());
    }
}
