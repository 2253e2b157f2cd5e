//! Arithmetic and comparison opcodes (spec §4.3), operating on the low 64
//! bits of each word (see `word.rs`'s module-level note on the truncation).

use super::{pop1, pop2, push1, HandlerOutcome};
use crate::config::InterpreterConfig;
use crate::constants::gas;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::word::{from_u64, is_zero, read_u64_low};

fn binop(frame: &mut Frame, gas_cost: u64, f: impl Fn(u64, u64) -> u64) -> Result<HandlerOutcome, InterpreterError> {
    let (a, b) = pop2(frame)?;
    let result = f(read_u64_low(&a), read_u64_low(&b));
    push1(frame, &from_u64(result))?;
    Ok((1, gas_cost))
}

pub fn add(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::VERY_LOW, |a, b| a.wrapping_add(b))
}

pub fn mul(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::LOW, |a, b| a.wrapping_mul(b))
}

pub fn sub(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::VERY_LOW, |a, b| a.wrapping_sub(b))
}

pub fn div(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::LOW, |a, b| if b == 0 { 0 } else { a / b })
}

pub fn sdiv(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::LOW, |a, b| {
        if b == 0 {
            0
        } else {
            (a as i64).wrapping_div(b as i64) as u64
        }
    })
}

pub fn rem(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::LOW, |a, b| if b == 0 { 0 } else { a % b })
}

pub fn smod(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::LOW, |a, b| {
        if b == 0 {
            0
        } else {
            (a as i64).wrapping_rem(b as i64) as u64
        }
    })
}

pub fn addmod(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (a, b) = pop2(frame)?;
    let n = pop1(frame)?;
    let n = read_u64_low(&n);
    let result = if n == 0 {
        0
    } else {
        ((read_u64_low(&a) as u128 + read_u64_low(&b) as u128) % n as u128) as u64
    };
    push1(frame, &from_u64(result))?;
    Ok((1, gas::LOW))
}

pub fn mulmod(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (a, b) = pop2(frame)?;
    let n = pop1(frame)?;
    let n = read_u64_low(&n);
    let result = if n == 0 {
        0
    } else {
        ((read_u64_low(&a) as u128 * read_u64_low(&b) as u128) % n as u128) as u64
    };
    push1(frame, &from_u64(result))?;
    Ok((1, gas::LOW))
}

pub fn lt(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::VERY_LOW, |a, b| (a < b) as u64)
}

pub fn gt(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::VERY_LOW, |a, b| (a > b) as u64)
}

pub fn slt(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::VERY_LOW, |a, b| ((a as i64) < (b as i64)) as u64)
}

pub fn sgt(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    binop(frame, gas::VERY_LOW, |a, b| ((a as i64) > (b as i64)) as u64)
}

pub fn eq(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let (a, b) = pop2(frame)?;
    push1(frame, &from_u64((a == b) as u64))?;
    Ok((1, gas::VERY_LOW))
}

pub fn iszero(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let a = pop1(frame)?;
    push1(frame, &from_u64(is_zero(&a) as u64))?;
    Ok((1, gas::VERY_LOW))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONTROL_BLOCK_SIZE, STACK_LIMIT, WORD_SIZE};

    fn frame_with_stack(words: &[u64]) -> (Vec<u8>, InterpreterConfig) {
        let stack_off = CONTROL_BLOCK_SIZE;
        let total = stack_off + STACK_LIMIT * WORD_SIZE;
        let mut region = vec![0u8; total];
        {
            let mut cb = crate::layout::ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
            cb.set_stack_ptr(stack_off as u64);
            cb.set_stack_size(words.len() as u32);
        }
        for (i, &w) in words.iter().enumerate() {
            let word = from_u64(w);
            region[stack_off + i * WORD_SIZE..stack_off + (i + 1) * WORD_SIZE].copy_from_slice(&word);
        }
        (region, InterpreterConfig::default())
    }

    #[test]
    fn add_pushes_sum_and_consumes_two_words() {
        let (mut region, cfg) = frame_with_stack(&[5, 3]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        let (inc, cost) = add(&mut frame, 0x01, &cfg).unwrap();
        assert_eq!(inc, 1);
        assert_eq!(cost, gas::VERY_LOW);
        assert_eq!(frame.control_block().stack_size(), 1);
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 8);
    }

    #[test]
    fn div_by_zero_yields_zero() {
        let (mut region, cfg) = frame_with_stack(&[7, 0]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        div(&mut frame, 0x04, &cfg).unwrap();
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 0);
    }

    #[test]
    fn underflow_on_empty_stack() {
        let (mut region, cfg) = frame_with_stack(&[]);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        assert_eq!(
            add(&mut frame, 0x01, &cfg).unwrap_err(),
            InterpreterError::StackUnderflow
        );
    }
}
