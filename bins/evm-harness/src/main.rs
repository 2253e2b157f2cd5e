//! Demo host for `evm-interpreter`: builds a control block from hex bytecode,
//! runs it to halt, and prints the resulting state. Everything this binary
//! does — hex decoding, control block assembly, pretty-printing the halt
//! reason — is exactly the "foreign-memory bridge" collaborator role the
//! library itself explicitly leaves out of scope.

mod command;

use clap::Parser;
use colored::Colorize;
use command::{Cli, Commands};
use evm_interpreter::dispatch::{self, State};
use evm_interpreter::tracer::{OperationResult, Tracer, TracerCallbacks};
use evm_interpreter::{ControlBlockBuilder, InterpreterConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            code,
            gas,
            is_static,
            trace,
        } => run(&code, gas, is_static, trace),
        Commands::Layout => print_layout(),
    }
}

fn run(code_hex: &str, gas: i64, is_static: bool, trace: bool) {
    let code = match hex::decode(code_hex.trim_start_matches("0x")) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{} invalid hex bytecode: {err}", "error:".red().bold());
            std::process::exit(1);
        }
    };

    let (mut region, config) = ControlBlockBuilder::new(code)
        .gas(gas)
        .is_static(is_static)
        .build_with_config();

    let mut frame = evm_interpreter::Frame::new(&mut region, config.memory_ceiling)
        .expect("harness-built region is always well-formed");

    let tracer = if trace {
        Tracer::new(
            Some(TracerCallbacks {
                pre: trace_pre,
                post: trace_post,
            }),
            std::ptr::null(),
        )
    } else {
        Tracer::none()
    };

    dispatch::run(&mut frame, &config, &tracer);
    report(&mut frame);
}

extern "C" fn trace_pre(_frame_ptr: *const u8) {
    eprintln!("{}", "pre-execution".dimmed());
}

extern "C" fn trace_post(_frame_ptr: *const u8, result: *const OperationResult) {
    let result = unsafe { &*result };
    eprintln!(
        "{} gas_cost={} pc_increment={}",
        "post-execution".dimmed(),
        result.gas_cost,
        result.pc_increment
    );
}

fn report(frame: &mut evm_interpreter::Frame<'_>) {
    let cb = frame.control_block();
    let state = cb.state();
    let label = if state == State::CompletedSuccess as u32 {
        "COMPLETED_SUCCESS".green()
    } else if state == State::Revert as u32 {
        "REVERT".yellow()
    } else {
        "EXCEPTIONAL_HALT".red()
    };

    println!("state: {label}");
    println!("halt_reason: {}", cb.halt_reason_raw());
    println!("pc: {}", cb.pc());
    println!("gas_remaining: {}", cb.gas_remaining());
    println!("gas_refund: {}", cb.gas_refund());
    println!("stack_size: {}", cb.stack_size());
}

fn print_layout() {
    use evm_interpreter::constants::*;
    println!("control block: {CONTROL_BLOCK_SIZE} bytes");
    println!("  pc                 @ {OFF_PC}");
    println!("  gas_remaining      @ {OFF_GAS_REMAINING}");
    println!("  gas_refund         @ {OFF_GAS_REFUND}");
    println!("  stack_size         @ {OFF_STACK_SIZE}");
    println!("  memory_size        @ {OFF_MEMORY_SIZE}");
    println!("  state              @ {OFF_STATE}");
    println!("  is_static          @ {OFF_IS_STATIC}");
    println!("  halt_reason        @ {OFF_HALT_REASON}");
    println!("  storage_ptr        @ {OFF_STORAGE_PTR} (reinterpreted reserved bytes)");
    println!("  max_storage_slots  @ {OFF_MAX_STORAGE_SLOTS} (reinterpreted reserved bytes)");
}
