//! CLI commands for the interpreter harness.
use clap::{Parser, Subcommand};

/// Run a single EVM message frame over the interpreter and print the
/// resulting control block state.
#[derive(Parser)]
#[clap(name = "evm-harness", version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute hex-encoded bytecode to completion or halt.
    Run {
        /// Bytecode as a hex string, with or without a leading "0x".
        code: String,
        /// Starting gas.
        #[clap(long, default_value_t = 1_000_000)]
        gas: i64,
        /// Run in a static (non-mutating) frame.
        #[clap(long)]
        is_static: bool,
        /// Trace every dispatched opcode to stderr.
        #[clap(long)]
        trace: bool,
    },
    /// Print the control block layout offsets this build uses.
    Layout,
}
