//! The dispatch loop (spec §4.5): the state machine that drives one message
//! frame to halt.

use crate::config::InterpreterConfig;
use crate::constants::GAS_FLOOR;
use crate::error::{HaltReason, InterpreterError};
use crate::frame::Frame;
use crate::opcodes::table::HANDLER_TABLE;
use crate::tracer::{OperationResult, Tracer};
use tracing::{debug, trace};

/// Lifecycle states (spec §4.5), numbered exactly as the control block's
/// `state` field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum State {
    NotStarted = 0,
    Executing = 1,
    Suspended = 2,
    Success = 3,
    ExceptionalHalt = 4,
    Revert = 5,
    Failed = 6,
    CompletedSuccess = 7,
}

/// Runs `frame` to halt. Never returns `Err`: every failure is recorded into
/// the control block's `state`/`halt_reason` fields and the loop simply
/// exits (spec §4.5, §7 — "the interpreter never throws across the host
/// boundary").
pub fn run(frame: &mut Frame, config: &InterpreterConfig, tracer: &Tracer) {
    frame.control_block().set_state(State::Executing as u32);

    loop {
        let pc = frame.control_block().pc() as usize;
        let code_size = match frame.code() {
            Ok(code) => code.len(),
            Err(err) => {
                halt(frame, err);
                return;
            }
        };
        if pc >= code_size || frame.control_block().state() != State::Executing as u32 {
            break;
        }

        let gas_remaining = frame.control_block().gas_remaining();
        if gas_remaining < GAS_FLOOR {
            halt(frame, InterpreterError::InsufficientGas);
            return;
        }

        let opcode = match frame.code() {
            Ok(code) => code.byte_at(pc),
            Err(err) => {
                halt(frame, err);
                return;
            }
        };

        tracer.trace_pre();
        trace!(pc, opcode, "dispatch");

        let outcome = HANDLER_TABLE[opcode as usize](frame, opcode, config);
        let (pc_increment, gas_cost) = match outcome {
            Ok(result) => result,
            Err(err) => {
                debug!(pc, opcode, error = %err, "opcode handler errored");
                halt(frame, err);
                return;
            }
        };

        let gas_remaining = frame.control_block().gas_remaining();
        if gas_remaining < gas_cost as i64 {
            halt(frame, InterpreterError::InsufficientGas);
            return;
        }
        frame.control_block().set_gas_remaining(gas_remaining - gas_cost as i64);

        tracer.trace_post(OperationResult {
            gas_cost: gas_cost as i64,
            halt_reason: HaltReason::None as u32,
            pc_increment: pc_increment.max(0) as u32,
        });

        if pc_increment > 0 {
            frame.control_block().set_pc(pc as u32 + pc_increment as u32);
        }
    }

    if frame.control_block().state() == State::Executing as u32 {
        frame.control_block().set_state(State::CompletedSuccess as u32);
    }
}

fn halt(frame: &mut Frame, error: InterpreterError) {
    frame.control_block().set_state(State::ExceptionalHalt as u32);
    frame.control_block().set_halt_reason(error.halt_reason());
}
