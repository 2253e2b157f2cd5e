//! One handler per opcode (spec §4.3), addressed from `table.rs`'s 256-entry
//! dispatch table.

pub mod arithmetic;
pub mod bitwise;
pub mod control_flow;
pub mod memory_ops;
pub mod stack_ops;
pub mod storage_ops;
pub mod table;

use crate::config::InterpreterConfig;
use crate::error::InterpreterError;
use crate::frame::Frame;

/// `(pc_increment, gas_cost)` on success. A `pc_increment` of `0` means the
/// handler already advanced `pc` itself (`JUMP`, `JUMPI`).
pub type HandlerOutcome = (i64, u64);

/// One dispatch-table slot. Takes the raw opcode byte so a single function
/// can serve a whole family (`PUSH1..PUSH32`, `DUP1..DUP16`, `SWAP1..SWAP16`).
pub type Handler = fn(&mut Frame, u8, &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError>;

/// Dispatch-table slot for an opcode spec never assigned. Behavior is a
/// runtime choice (spec §4.4, §9): no-op at base gas in development mode, or
/// `INVALID_OPERATION` in conformance mode.
pub fn unassigned(
    _frame: &mut Frame,
    _opcode: u8,
    config: &InterpreterConfig,
) -> Result<HandlerOutcome, InterpreterError> {
    use crate::config::UnknownOpcodePolicy;
    match config.unknown_opcode_policy {
        UnknownOpcodePolicy::NoOpAtBaseCost => Ok((1, crate::constants::gas::BASE)),
        UnknownOpcodePolicy::Halt => Err(InterpreterError::InvalidOperation),
    }
}

/// `INVALID (0xFE)` and any opcode spec reserves: always halts regardless of
/// the unassigned-opcode policy.
pub fn invalid(
    _frame: &mut Frame,
    _opcode: u8,
    _config: &InterpreterConfig,
) -> Result<HandlerOutcome, InterpreterError> {
    Err(InterpreterError::InvalidOperation)
}

/// Pop one word off the stack, syncing `stack_size` back into the control
/// block. Shared by every handler below.
pub(crate) fn pop1(frame: &mut Frame) -> Result<crate::word::Word, InterpreterError> {
    let mut size = frame.control_block().stack_size();
    let word = frame.stack()?.pop(&mut size)?;
    frame.control_block().set_stack_size(size);
    Ok(word)
}

/// Pop two words, `a` popped first (closer to top) then `b`.
pub(crate) fn pop2(
    frame: &mut Frame,
) -> Result<(crate::word::Word, crate::word::Word), InterpreterError> {
    let mut size = frame.control_block().stack_size();
    let mut stack = frame.stack()?;
    let a = stack.pop(&mut size)?;
    let b = stack.pop(&mut size)?;
    drop(stack);
    frame.control_block().set_stack_size(size);
    Ok((a, b))
}

/// Push one word onto the stack, syncing `stack_size` back.
pub(crate) fn push1(frame: &mut Frame, word: &crate::word::Word) -> Result<(), InterpreterError> {
    let mut size = frame.control_block().stack_size();
    frame.stack()?.push(&mut size, word)?;
    frame.control_block().set_stack_size(size);
    Ok(())
}
