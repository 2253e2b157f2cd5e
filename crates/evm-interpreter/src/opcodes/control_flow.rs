//! Control-flow opcodes (spec §4.3): `STOP`, `JUMP`/`JUMPI`, `JUMPDEST`,
//! `PC`, `GAS`, and the supplemented `RETURN`/`REVERT`.
//!
//! `JUMP`/`JUMPI` check destination validity *before* charging gas (spec §9's
//! resolution of the reference's inconsistency): an invalid destination
//! halts with no gas charged at all.

use super::HandlerOutcome;
use crate::config::InterpreterConfig;
use crate::constants::gas;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::word::{from_u64, is_zero, read_u64_low};

pub fn stop(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    frame.control_block().set_state(crate::dispatch::State::CompletedSuccess as u32);
    Ok((0, gas::ZERO))
}

pub fn jumpdest(_frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    Ok((1, gas::JUMPDEST))
}

pub fn pc(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let pc = frame.control_block().pc();
    super::push1(frame, &from_u64(pc as u64))?;
    Ok((1, gas::BASE))
}

pub fn gas_op(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let remaining = frame.control_block().gas_remaining();
    super::push1(frame, &from_u64(remaining as u64))?;
    Ok((1, gas::BASE))
}

fn validate_jump(frame: &mut Frame, dest: usize) -> Result<(), InterpreterError> {
    if !frame.code()?.is_jumpdest(dest) {
        return Err(InterpreterError::InvalidJumpDestination);
    }
    Ok(())
}

pub fn jump(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let dest = super::pop1(frame)?;
    let dest = read_u64_low(&dest) as usize;
    validate_jump(frame, dest)?;
    frame.control_block().set_pc(dest as u32);
    Ok((0, gas::JUMP))
}

pub fn jumpi(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (dest, cond) = super::pop2(frame)?;
    let dest = read_u64_low(&dest) as usize;
    if is_zero(&cond) {
        return Ok((1, gas::JUMPI));
    }
    validate_jump(frame, dest)?;
    frame.control_block().set_pc(dest as u32);
    Ok((0, gas::JUMPI))
}

pub fn ret(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    stage_output(frame)?;
    frame.control_block().set_state(crate::dispatch::State::CompletedSuccess as u32);
    Ok((0, gas::ZERO))
}

pub fn revert(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    stage_output(frame)?;
    frame.control_block().set_state(crate::dispatch::State::Revert as u32);
    Ok((0, gas::ZERO))
}

/// Copies `[offset, offset + len)` out of memory into the output plane.
/// Shared by `RETURN` and `REVERT`; both halt the frame with their payload
/// staged the same way.
fn stage_output(frame: &mut Frame) -> Result<(), InterpreterError> {
    let (offset, len) = super::pop2(frame)?;
    let offset = read_u64_low(&offset) as usize;
    let len = read_u64_low(&len) as usize;

    let output_ptr = frame.control_block().output_ptr() as usize;
    let output_capacity = frame.control_block().output_size() as usize;
    if len > output_capacity {
        return Err(InterpreterError::OutOfBounds);
    }

    let mut size = frame.control_block().memory_size();
    let output_end = output_ptr
        .checked_add(len)
        .ok_or(InterpreterError::MalformedControlBlock)?;
    let mut mem = frame.memory()?;
    let mut staged = vec![0u8; len];
    mem.read_into(&mut size, offset, &mut staged)?;
    drop(mem);
    frame.control_block().set_memory_size(size);

    let region_len = frame.control_block_region_len();
    if output_end > region_len {
        return Err(InterpreterError::MalformedControlBlock);
    }
    frame.write_raw(output_ptr, &staged)?;
    frame.control_block().set_return_data_size(len as u32);
    Ok(())
}
