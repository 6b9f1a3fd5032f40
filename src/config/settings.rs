//! Configuration settings for the generator seed reversal solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub generator: GeneratorConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

/// Constants of the generator step being reversed.
///
/// These are properties of the specific PRNG, not of the reversal algorithm,
/// so variant generators are handled by editing the config rather than the
/// model code. The defaults are the Xoroshiro128+ step used by the target
/// game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Initial value of the second state word, XOR-folded with the seed.
    pub xor_const: u64,
    /// Left-rotation applied to the seed in the first state word.
    pub rot_a: u32,
    /// Left-rotation applied to the second state word.
    pub rot_b: u32,
    /// The multiply constant is `2^mul_shift`.
    pub mul_shift: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Upper bound on candidates collected by the eager path. `None` means
    /// enumerate until the constraint is unsatisfiable.
    pub max_candidates: Option<usize>,
    /// Per-check solver timeout in milliseconds. A timed-out check is a
    /// solver failure, not an empty result.
    pub timeout_ms: Option<u32>,
    /// Random seed handed to the solving engine for reproducible runs.
    pub random_seed: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_candidates: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            xor_const: 0x82A2_B175_229D_6A5B,
            rot_a: 24,
            rot_b: 37,
            mul_shift: 16,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            solver: SolverConfig {
                max_candidates: None,
                timeout_ms: Some(60_000),
                random_seed: Some(42),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_candidates: false,
                output_directory: PathBuf::from("output/candidates"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;

        if self.solver.max_candidates == Some(0) {
            anyhow::bail!("Maximum candidates must be positive when set");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(max_candidates) = cli_overrides.max_candidates {
            self.solver.max_candidates = Some(max_candidates);
        }
        if let Some(timeout_ms) = cli_overrides.timeout_ms {
            self.solver.timeout_ms = Some(timeout_ms);
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save_candidates = true;
        }
    }
}

impl GeneratorConfig {
    /// Validate the generator constants against the 64-bit word size.
    pub fn validate(&self) -> Result<()> {
        if self.rot_a == 0 || self.rot_a >= 64 {
            anyhow::bail!("rot_a must be in 1..64, got {}", self.rot_a);
        }
        if self.rot_b == 0 || self.rot_b >= 64 {
            anyhow::bail!("rot_b must be in 1..64, got {}", self.rot_b);
        }
        if self.mul_shift == 0 || self.mul_shift >= 64 {
            anyhow::bail!("mul_shift must be in 1..64, got {}", self.mul_shift);
        }
        Ok(())
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_candidates: Option<usize>,
    pub timeout_ms: Option<u32>,
    pub output_dir: Option<PathBuf>,
}
