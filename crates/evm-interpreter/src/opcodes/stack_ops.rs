//! Stack-shape opcodes: `POP`, the `PUSH` family, `DUP1..DUP16`,
//! `SWAP1..SWAP16` (spec §4.3).

use super::HandlerOutcome;
use crate::config::InterpreterConfig;
use crate::constants::gas;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::word::ZERO_WORD;

pub fn pop(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    super::pop1(frame)?;
    Ok((1, gas::BASE))
}

pub fn push0(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    super::push1(frame, &ZERO_WORD)?;
    Ok((1, gas::BASE))
}

/// `PUSH1 (0x60)..PUSH32 (0x7F)`: `opcode - 0x5F` operand bytes follow in the
/// code plane, right-zero-padded, right-aligned into the pushed word.
pub fn push_n(frame: &mut Frame, opcode: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let n = (opcode - 0x5F) as usize;
    let pc = frame.control_block().pc() as usize;
    let word = frame.code()?.push_operand(pc + 1, n);
    super::push1(frame, &word)?;
    Ok(((n + 1) as i64, gas::VERY_LOW))
}

/// `DUP1 (0x80)..DUP16 (0x8F)`.
pub fn dup_n(frame: &mut Frame, opcode: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let n = (opcode - 0x7F) as usize;
    let mut size = frame.control_block().stack_size();
    frame.stack()?.dup(&mut size, n)?;
    frame.control_block().set_stack_size(size);
    Ok((1, gas::VERY_LOW))
}

/// `SWAP1 (0x90)..SWAP16 (0x9F)`.
pub fn swap_n(frame: &mut Frame, opcode: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let n = (opcode - 0x8F) as usize;
    let size = frame.control_block().stack_size();
    frame.stack()?.swap(size, n)?;
    Ok((1, gas::VERY_LOW))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONTROL_BLOCK_SIZE, STACK_LIMIT, WORD_SIZE};
    use crate::word::{from_u64, read_u64_low};

    fn frame_for_push(code: &[u8], stack_words: &[u64]) -> (Vec<u8>, InterpreterConfig) {
        let stack_off = CONTROL_BLOCK_SIZE;
        let code_off = stack_off + STACK_LIMIT * WORD_SIZE;
        let total = code_off + code.len();
        let mut region = vec![0u8; total];
        {
            let mut cb = crate::layout::ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
            cb.set_stack_ptr(stack_off as u64);
            cb.set_code_ptr(code_off as u64);
            cb.set_code_size(code.len() as u32);
            cb.set_stack_size(stack_words.len() as u32);
        }
        for (i, &w) in stack_words.iter().enumerate() {
            let word = from_u64(w);
            region[stack_off + i * WORD_SIZE..stack_off + (i + 1) * WORD_SIZE].copy_from_slice(&word);
        }
        region[code_off..code_off + code.len()].copy_from_slice(code);
        (region, InterpreterConfig::default())
    }

    #[test]
    fn push1_reads_operand_and_advances_by_two() {
        let (mut region, cfg) = frame_for_push(&[0x60, 0x2A], &[]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        let (inc, cost) = push_n(&mut frame, 0x60, &cfg).unwrap();
        assert_eq!(inc, 2);
        assert_eq!(cost, gas::VERY_LOW);
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 0x2A);
    }

    #[test]
    fn push1_pads_when_operand_runs_off_code() {
        let (mut region, cfg) = frame_for_push(&[0x60], &[]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        push_n(&mut frame, 0x60, &cfg).unwrap();
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 0);
    }

    #[test]
    fn dup1_duplicates_top_of_stack() {
        let (mut region, cfg) = frame_for_push(&[], &[9]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        dup_n(&mut frame, 0x80, &cfg).unwrap();
        assert_eq!(frame.control_block().stack_size(), 2);
    }

    #[test]
    fn swap1_exchanges_top_two() {
        let (mut region, cfg) = frame_for_push(&[], &[1, 2]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        swap_n(&mut frame, 0x90, &cfg).unwrap();
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 2).unwrap()), 2);
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(1, 2).unwrap()), 1);
    }
}
