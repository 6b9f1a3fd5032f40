//! Candidate seed reporting for reversal runs

use crate::config::GeneratorConfig;
use crate::generator::{GeneratorRules, GeneratorState};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One recovered bottom-level seed, with the state pair it steps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSeed {
    /// The bottom-level seed.
    pub seed: u64,
    /// The generator seed the candidate reproduces.
    pub gen_seed: u64,
    /// State pair after one forward step from `seed`.
    pub state: GeneratorState,
}

impl CandidateSeed {
    /// Derive the report entry for a seed by running the forward step.
    pub fn derive(seed: u64, generator: &GeneratorConfig) -> Self {
        let state = GeneratorRules::advance(seed, generator);
        Self {
            seed,
            gen_seed: state.gen_seed(),
            state,
        }
    }
}

/// The complete result of one reversal run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSet {
    /// The observed generator seed that was reversed.
    pub observed: u64,
    /// Every recovered seed, in discovery order.
    pub candidates: Vec<CandidateSeed>,
    /// True when the candidate cap stopped the run before the constraint
    /// went unsatisfiable; the set may then be incomplete.
    pub truncated: bool,
    /// Wall-clock time of the run.
    #[serde(skip)]
    pub solve_time: Duration,
}

impl CandidateSet {
    pub fn new(observed: u64) -> Self {
        Self {
            observed,
            candidates: Vec::new(),
            truncated: false,
            solve_time: Duration::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The recovered seeds without report detail.
    pub fn seeds(&self) -> Vec<u64> {
        self.candidates.iter().map(|c| c.seed).collect()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl std::fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reversal of {:#018x}: {} candidate(s){} in {:.3}s",
            self.observed,
            self.len(),
            if self.truncated { " (truncated)" } else { "" },
            self.solve_time.as_secs_f64()
        )
    }
}
