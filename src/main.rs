//! Main CLI application for the generator seed reversal solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gen_seed_reverse::{
    config::{CliOverrides, Settings},
    generator::GeneratorRules,
    reversal::{CandidateValidator, SeedReversal},
    utils::{CandidateFormatter, ColorOutput},
    SolverContext,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "gen_seed_reverse")]
#[command(about = "Generator Seed Reversal Solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reverse an observed generator seed into candidate seeds
    Reverse {
        /// Observed generator seed (decimal or 0x-prefixed hex)
        observed: String,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Maximum candidates to find (overrides config)
        #[arg(short, long)]
        max_candidates: Option<usize>,

        /// Per-check solver timeout in milliseconds (overrides config)
        #[arg(short, long)]
        timeout_ms: Option<u32>,

        /// Output directory for saved reports (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the derived state pair for each candidate
        #[arg(long)]
        show_states: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compute the generator seed one step forward from a seed
    Forward {
        /// Bottom-level seed (decimal or 0x-prefixed hex)
        seed: String,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,
    },

    /// Verify that a seed reproduces an observed generator seed
    Verify {
        /// Candidate seed (decimal or 0x-prefixed hex)
        #[arg(short, long)]
        seed: String,

        /// Observed generator seed (decimal or 0x-prefixed hex)
        #[arg(short = 'g', long)]
        observed: String,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,
    },

    /// Create example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Reverse {
            observed,
            config,
            max_candidates,
            timeout_ms,
            output,
            show_states,
            verbose,
        } => reverse_command(
            observed,
            config,
            max_candidates,
            timeout_ms,
            output,
            show_states,
            verbose,
        ),
        Commands::Forward { seed, config } => forward_command(seed, config),
        Commands::Verify {
            seed,
            observed,
            config,
        } => verify_command(seed, observed, config),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Parse a u64 given as decimal or 0x-prefixed hex.
fn parse_u64(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
            .with_context(|| format!("Invalid hex value: {}", input))
    } else {
        trimmed
            .parse::<u64>()
            .with_context(|| format!("Invalid decimal value: {}", input))
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn reverse_command(
    observed: String,
    config_path: PathBuf,
    max_candidates: Option<usize>,
    timeout_ms: Option<u32>,
    output_dir: Option<PathBuf>,
    show_states: bool,
    verbose: bool,
) -> Result<()> {
    let observed = parse_u64(&observed)?;

    let mut settings = load_settings(&config_path)?;
    let cli_overrides = CliOverrides {
        max_candidates,
        timeout_ms,
        output_dir,
    };
    settings.merge_with_cli(&cli_overrides);
    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Observed gen seed: {:#018x}", observed);
        println!("  XOR constant: {:#018x}", settings.generator.xor_const);
        println!(
            "  Rotations: {} / {}, multiplier 2^{}",
            settings.generator.rot_a, settings.generator.rot_b, settings.generator.mul_shift
        );
        println!("  Max candidates: {:?}", settings.solver.max_candidates);
        println!("  Timeout: {:?} ms", settings.solver.timeout_ms);
        println!();
    }

    println!(
        "{}",
        ColorOutput::info("Building bit-vector model and enumerating seeds...")
    );

    let start_time = Instant::now();
    let context = SolverContext::new();
    let service =
        SeedReversal::new(&context, settings.clone()).context("Failed to create reversal service")?;
    let set = service
        .find_all(observed)
        .context("Failed to reverse generator seed")?;
    let total_time = start_time.elapsed();

    if set.is_empty() {
        println!(
            "{}",
            ColorOutput::warning("No candidate seeds found (value has no preimage)")
        );
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Found {} candidate(s) in {:.3}s",
            set.len(),
            total_time.as_secs_f64()
        ))
    );
    println!();
    print!("{}", CandidateFormatter::format_set(&set, show_states));

    if settings.output.save_candidates {
        CandidateFormatter::save_candidates(
            &set,
            &settings.output.output_directory,
            &settings.output.format,
        )
        .context("Failed to save candidate report")?;
        println!(
            "{}",
            ColorOutput::success(&format!(
                "Report saved to {}",
                settings.output.output_directory.display()
            ))
        );
    }

    Ok(())
}

fn forward_command(seed: String, config_path: PathBuf) -> Result<()> {
    let seed = parse_u64(&seed)?;
    let settings = load_settings(&config_path)?;
    settings.validate()?;

    let state = GeneratorRules::advance(seed, &settings.generator);
    println!("Seed:     {:#018x}", seed);
    println!("s0:       {:#018x}", state.s0);
    println!("s1:       {:#018x}", state.s1);
    println!("Gen seed: {:#018x}", state.gen_seed());

    Ok(())
}

fn verify_command(seed: String, observed: String, config_path: PathBuf) -> Result<()> {
    let seed = parse_u64(&seed)?;
    let observed = parse_u64(&observed)?;
    let settings = load_settings(&config_path)?;
    settings.validate()?;

    let validator = CandidateValidator::new(settings.generator);
    let result = validator.validate(seed, observed);
    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Seed reproduces the observed value"));
    } else {
        println!(
            "{}",
            ColorOutput::error("Seed does NOT reproduce the observed value")
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let output_dir = directory.join("output/candidates");

    for dir in [&config_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Capped variant for quick interactive runs.
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut quick_config = Settings::default();
    quick_config.solver.max_candidates = Some(4);
    quick_config.solver.timeout_ms = Some(10_000);
    quick_config.to_file(&examples_dir.join("quick.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- reverse 0x133879650f7562b4");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "gen_seed_reverse",
            "reverse",
            "0x133879650f7562b4",
            "--max-candidates",
            "5",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_parse_u64_hex_and_decimal() {
        assert_eq!(parse_u64("0x10").unwrap(), 16);
        assert_eq!(parse_u64("0XFF").unwrap(), 255);
        assert_eq!(parse_u64("42").unwrap(), 42);
        assert_eq!(
            parse_u64("0x133879650f7562b4").unwrap(),
            0x1338_7965_0F75_62B4
        );
        assert!(parse_u64("0xZZ").is_err());
        assert!(parse_u64("not a number").is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/quick.yaml").exists());
    }
}
