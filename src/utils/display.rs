//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::reversal::CandidateSet;
use anyhow::Result;
use itertools::Itertools;
use std::path::Path;

/// Format candidate sets for console output
pub struct CandidateFormatter;

impl CandidateFormatter {
    /// Format a full reversal report.
    pub fn format_set(set: &CandidateSet, show_states: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Reversal of {:#018x} ===\n", set.observed));
        output.push_str(&format!("Candidates: {}\n", set.len()));
        output.push_str(&format!("Solve time: {:.3}s\n", set.solve_time.as_secs_f64()));
        if set.truncated {
            output.push_str("Note: candidate cap reached, set may be incomplete\n");
        }
        output.push('\n');

        if set.is_empty() {
            output.push_str("No seed steps to this value.\n");
            return output;
        }

        if show_states {
            output.push_str("   # | Seed               | s0                 | s1\n");
            output.push_str("-----|--------------------|--------------------|-------------------\n");
            for (i, candidate) in set.candidates.iter().enumerate() {
                output.push_str(&format!(
                    "{:4} | {:#018x} | {:#018x} | {:#018x}\n",
                    i + 1,
                    candidate.seed,
                    candidate.state.s0,
                    candidate.state.s1
                ));
            }
        } else {
            output.push_str(&Self::format_seed_list(&set.seeds()));
            output.push('\n');
        }

        output
    }

    /// Format seeds as a compact hex list.
    pub fn format_seed_list(seeds: &[u64]) -> String {
        seeds.iter().map(|seed| format!("{seed:#018x}")).join(", ")
    }

    /// Save a candidate set based on the output format.
    pub fn save_candidates<P: AsRef<Path>>(
        set: &CandidateSet,
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                let filepath = output_dir.join(format!("candidates_{:016x}.txt", set.observed));
                std::fs::write(filepath, Self::format_set(set, true))?;
            }
            OutputFormat::Json => {
                let filepath = output_dir.join(format!("candidates_{:016x}.json", set.observed));
                set.save_to_file(filepath)?;
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
