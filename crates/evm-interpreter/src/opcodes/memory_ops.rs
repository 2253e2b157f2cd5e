//! Memory opcodes (spec §3.3, §4.3): `MLOAD`, `MSTORE`, `MSTORE8`, and the
//! supplemented `MSIZE`.

use super::HandlerOutcome;
use crate::config::InterpreterConfig;
use crate::constants::gas;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::word::{from_u64, read_u64_low};

pub fn mload(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let offset = super::pop1(frame)?;
    let offset = read_u64_low(&offset) as usize;
    let mut size = frame.control_block().memory_size();
    let word = frame.memory()?.load_word(&mut size, offset)?;
    frame.control_block().set_memory_size(size);
    super::push1(frame, &word)?;
    Ok((1, gas::VERY_LOW))
}

pub fn mstore(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (offset, value) = super::pop2(frame)?;
    let offset = read_u64_low(&offset) as usize;
    let mut size = frame.control_block().memory_size();
    frame.memory()?.store_word(&mut size, offset, &value)?;
    frame.control_block().set_memory_size(size);
    Ok((1, gas::VERY_LOW))
}

pub fn mstore8(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (offset, value) = super::pop2(frame)?;
    let offset = read_u64_low(&offset) as usize;
    let mut size = frame.control_block().memory_size();
    frame.memory()?.store_byte(&mut size, offset, &value)?;
    frame.control_block().set_memory_size(size);
    Ok((1, gas::VERY_LOW))
}

pub fn msize(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let size = frame.control_block().memory_size();
    super::push1(frame, &from_u64(size as u64))?;
    Ok((1, gas::BASE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONTROL_BLOCK_SIZE, STACK_LIMIT, WORD_SIZE};

    fn frame_with(stack_words: &[u64], memory_cap: usize) -> (Vec<u8>, InterpreterConfig) {
        let stack_off = CONTROL_BLOCK_SIZE;
        let memory_off = stack_off + STACK_LIMIT * WORD_SIZE;
        let total = memory_off + memory_cap;
        let mut region = vec![0u8; total];
        {
            let mut cb = crate::layout::ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
            cb.set_stack_ptr(stack_off as u64);
            cb.set_memory_ptr(memory_off as u64);
            cb.set_stack_size(stack_words.len() as u32);
        }
        for (i, &w) in stack_words.iter().enumerate() {
            let word = from_u64(w);
            region[stack_off + i * WORD_SIZE..stack_off + (i + 1) * WORD_SIZE].copy_from_slice(&word);
        }
        (region, InterpreterConfig::default())
    }

    #[test]
    fn mload_on_empty_memory_returns_zero_and_grows_memory_size() {
        let (mut region, cfg) = frame_with(&[0], 4096);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        mload(&mut frame, 0x51, &cfg).unwrap();
        assert_eq!(frame.control_block().memory_size(), 32);
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 0);
    }

    #[test]
    fn mstore_then_mload_round_trips() {
        let (mut region, cfg) = frame_with(&[0, 7], 4096);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        mstore(&mut frame, 0x52, &cfg).unwrap();
        assert_eq!(frame.control_block().stack_size(), 0);

        super::super::push1(&mut frame, &from_u64(0)).unwrap();
        mload(&mut frame, 0x51, &cfg).unwrap();
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 7);
    }

    #[test]
    fn msize_reports_current_watermark() {
        let (mut region, cfg) = frame_with(&[], 4096);
        {
            let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
            frame.control_block().set_memory_size(64);
        }
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        msize(&mut frame, 0x59, &cfg).unwrap();
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 64);
    }
}
