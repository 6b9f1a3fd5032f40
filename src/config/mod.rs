//! Configuration management for the generator seed reversal solver

pub mod settings;

pub use settings::{
    Settings, GeneratorConfig, SolverConfig, OutputConfig, OutputFormat, CliOverrides,
};
