use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sc_core::EngineConfig;

#[derive(Parser)]
#[command(name = "semantic-compressor")]
#[command(version, about = "Semantic compressor for LLM context", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Input file path (reads stdin when omitted)
    #[arg(long, global = true)]
    pub input_file: Option<PathBuf>,

    /// Write the compressed text here
    #[arg(long, global = true)]
    pub output_file: Option<PathBuf>,

    /// Desired fractional reduction in size
    #[arg(long, global = true, default_value_t = 0.25)]
    pub target_reduction: f64,

    /// Minimum preservation score
    #[arg(long, global = true, default_value_t = 0.98)]
    pub preservation_threshold: f64,

    /// Maximum processing time in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub max_time: u64,

    /// Enable aggressive compression
    #[arg(long, global = true)]
    pub aggressive_mode: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Compress input and report metrics as JSON
    Compress,
    /// Analyze input for optimization opportunities
    Analyze,
}

impl Cli {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            target_reduction: self.target_reduction,
            preservation_threshold: self.preservation_threshold,
            max_time_secs: self.max_time,
            aggressive_mode: self.aggressive_mode,
        }
    }
}
