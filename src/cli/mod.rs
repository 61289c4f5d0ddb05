//! CLI argument parsing and command dispatch

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stampede")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a ramped load group against the built-in demo plan
    Run {
        /// Number of threads to launch
        #[arg(short, long, default_value_t = 10)]
        threads: usize,

        /// Identity of the first thread
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Ramp-up window in seconds
        #[arg(short, long, default_value_t = 5)]
        ramp_secs: u64,

        /// Stop each thread after this many seconds (0 runs until Ctrl+C)
        #[arg(short, long, default_value_t = 30)]
        duration_secs: u64,

        /// Per-thread pacing in actions per second
        #[arg(short, long)]
        pacing: Option<f64>,

        /// Simulated work per action, in milliseconds
        #[arg(long, default_value_t = 100)]
        action_ms: u64,
    },
}
