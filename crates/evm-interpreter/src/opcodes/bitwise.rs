//! Bitwise opcodes (spec §4.3): `AND`/`OR`/`XOR`/`NOT` are byte-wise over the
//! full 32-byte word; `SHL`/`SHR`/`SAR` fall back to the low-64-bit
//! simplification along with the arithmetic family (see `word.rs`).

use super::{pop1, pop2, push1, HandlerOutcome};
use crate::config::InterpreterConfig;
use crate::constants::gas;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::word::{from_u64, read_u64_low, Word, ZERO_WORD};

pub fn and(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (a, b) = pop2(frame)?;
    let mut result = ZERO_WORD;
    for i in 0..32 {
        result[i] = a[i] & b[i];
    }
    push1(frame, &result)?;
    Ok((1, gas::VERY_LOW))
}

pub fn or(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (a, b) = pop2(frame)?;
    let mut result = ZERO_WORD;
    for i in 0..32 {
        result[i] = a[i] | b[i];
    }
    push1(frame, &result)?;
    Ok((1, gas::VERY_LOW))
}

pub fn xor(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (a, b) = pop2(frame)?;
    let mut result = ZERO_WORD;
    for i in 0..32 {
        result[i] = a[i] ^ b[i];
    }
    push1(frame, &result)?;
    Ok((1, gas::VERY_LOW))
}

pub fn not(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let a = pop1(frame)?;
    let mut result = ZERO_WORD;
    for i in 0..32 {
        result[i] = !a[i];
    }
    push1(frame, &result)?;
    Ok((1, gas::VERY_LOW))
}

/// `BYTE (0x1A)`: index `i = μs[0]` counts from the most-significant byte of
/// `μs[1]`. Out-of-range (`i >= 32`) yields zero.
pub fn byte_op(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (index, value) = pop2(frame)?;
    let i = read_u64_low(&index);
    let result = if i < 32 {
        from_u64(value[i as usize] as u64)
    } else {
        ZERO_WORD
    };
    push1(frame, &result)?;
    Ok((1, gas::VERY_LOW))
}

fn shift(
    frame: &mut Frame,
    f: impl Fn(u64, u32) -> u64,
) -> Result<HandlerOutcome, InterpreterError> {
    let (shift_amount, value) = pop2(frame)?;
    let shift_amount = read_u64_low(&shift_amount);
    let value = read_u64_low(&value);
    let result = if shift_amount >= 64 {
        0
    } else {
        f(value, shift_amount as u32)
    };
    push1(frame, &from_u64(result))?;
    Ok((1, gas::VERY_LOW))
}

pub fn shl(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    shift(frame, |v, s| v.wrapping_shl(s))
}

pub fn shr(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    shift(frame, |v, s| v.wrapping_shr(s))
}

pub fn sar(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (shift_amount, value) = pop2(frame)?;
    let shift_amount = read_u64_low(&shift_amount);
    let value = read_u64_low(&value) as i64;
    let result = if shift_amount >= 64 {
        if value < 0 { u64::MAX } else { 0 }
    } else {
        value.wrapping_shr(shift_amount as u32) as u64
    };
    push1(frame, &from_u64(result))?;
    Ok((1, gas::VERY_LOW))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONTROL_BLOCK_SIZE, STACK_LIMIT, WORD_SIZE};

    fn frame_with_stack(words: &[Word]) -> (Vec<u8>, InterpreterConfig) {
        let stack_off = CONTROL_BLOCK_SIZE;
        let total = stack_off + STACK_LIMIT * WORD_SIZE;
        let mut region = vec![0u8; total];
        {
            let mut cb = crate::layout::ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
            cb.set_stack_ptr(stack_off as u64);
            cb.set_stack_size(words.len() as u32);
        }
        for (i, w) in words.iter().enumerate() {
            region[stack_off + i * WORD_SIZE..stack_off + (i + 1) * WORD_SIZE].copy_from_slice(w);
        }
        (region, InterpreterConfig::default())
    }

    #[test]
    fn and_is_byte_wise() {
        let (mut region, cfg) = frame_with_stack(&[from_u64(0b1100), from_u64(0b1010)]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        and(&mut frame, 0x16, &cfg).unwrap();
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 0b1000);
    }

    #[test]
    fn byte_extracts_most_significant_first() {
        let mut value = ZERO_WORD;
        value[0] = 0xAB;
        let (mut region, cfg) = frame_with_stack(&[from_u64(0), value]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        byte_op(&mut frame, 0x1A, &cfg).unwrap();
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 0xAB);
    }

    #[test]
    fn shl_by_64_or_more_is_zero() {
        let (mut region, cfg) = frame_with_stack(&[from_u64(64), from_u64(1)]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        shl(&mut frame, 0x1B, &cfg).unwrap();
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 0);
    }
}
