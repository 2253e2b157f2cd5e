//! Storage opcodes (spec §4.3): `SLOAD`/`SSTORE`, with EIP-2929 warm/cold
//! pricing and EIP-2200 refunds (`storage.rs::sstore_gas_and_refund`).

use super::HandlerOutcome;
use crate::config::InterpreterConfig;
use crate::constants::gas;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::storage::sstore_gas_and_refund;
use crate::word::{from_u64, ZERO_WORD};

pub fn sload(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    let key = super::pop1(frame)?;
    let contract = frame.control_block().contract();
    let mut count = frame.control_block().storage_slot_count();
    let max_slots = frame.control_block().max_storage_slots() as usize;

    let (value, cost);
    {
        let mut plane = frame.storage()?;
        match plane.find(count, &contract, &key) {
            Some(index) => {
                let mut entry = plane.entry_mut(index);
                let was_warm = entry.is_warm();
                entry.set_warm(true);
                value = entry.value();
                cost = if was_warm { gas::SLOAD_WARM } else { gas::SLOAD_COLD };
            }
            None => {
                let index = plane
                    .add(&mut count, max_slots, &contract, &key)
                    .ok_or(InterpreterError::InvalidOperation)?;
                let mut entry = plane.entry_mut(index);
                entry.set_warm(true);
                value = ZERO_WORD;
                cost = gas::SLOAD_COLD;
            }
        }
    }
    frame.control_block().set_storage_slot_count(count);
    super::push1(frame, &value)?;
    Ok((1, cost))
}

pub fn sstore(frame: &mut Frame, _op: u8, _cfg: &InterpreterConfig) -> Result<HandlerOutcome, InterpreterError> {
    if frame.control_block().is_static() != 0 {
        return Err(InterpreterError::IllegalStateChange);
    }
    let (key, new_value) = super::pop2(frame)?;
    let contract = frame.control_block().contract();
    let mut count = frame.control_block().storage_slot_count();
    let max_slots = frame.control_block().max_storage_slots() as usize;
    let gas_refund_before = frame.control_block().gas_refund();

    let cost;
    let mut refund_delta = 0i64;
    {
        let mut plane = frame.storage()?;
        match plane.find(count, &contract, &key) {
            Some(index) => {
                let mut entry = plane.entry_mut(index);
                let was_warm = entry.is_warm();
                let original = entry.original();
                let current = entry.value();
                let outcome = sstore_gas_and_refund(was_warm, &original, &current, &new_value);
                entry.set_value(&new_value);
                entry.set_warm(true);
                refund_delta = outcome.refund_delta;
                cost = outcome.gas_cost;
            }
            None => {
                let index = plane
                    .add(&mut count, max_slots, &contract, &key)
                    .ok_or(InterpreterError::InvalidOperation)?;
                let mut entry = plane.entry_mut(index);
                entry.set_value(&new_value);
                entry.set_original(&new_value);
                entry.set_warm(true);
                cost = gas::SSTORE_SET;
            }
        }
    }
    frame.control_block().set_storage_slot_count(count);
    if refund_delta != 0 {
        frame.control_block().set_gas_refund(gas_refund_before + refund_delta);
    }
    Ok((1, cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONTROL_BLOCK_SIZE, STACK_LIMIT, STORAGE_ENTRY_SIZE, WORD_SIZE};
    use crate::word::read_u64_low;

    fn frame_with_storage(stack_words: &[u64], max_slots: usize) -> (Vec<u8>, InterpreterConfig) {
        let stack_off = CONTROL_BLOCK_SIZE;
        let storage_off = stack_off + STACK_LIMIT * WORD_SIZE;
        let total = storage_off + max_slots * STORAGE_ENTRY_SIZE;
        let mut region = vec![0u8; total];
        {
            let mut cb = crate::layout::ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
            cb.set_stack_ptr(stack_off as u64);
            cb.set_storage_ptr(storage_off as u64);
            cb.set_max_storage_slots(max_slots as u32);
            cb.set_stack_size(stack_words.len() as u32);
            cb.set_contract(&[0x11u8; 20]);
        }
        for (i, &w) in stack_words.iter().enumerate() {
            let word = from_u64(w);
            region[stack_off + i * WORD_SIZE..stack_off + (i + 1) * WORD_SIZE].copy_from_slice(&word);
        }
        (region, InterpreterConfig::default())
    }

    #[test]
    fn sstore_then_sload_round_trips() {
        let (mut region, cfg) = frame_with_storage(&[0x2A, 0x07], 4);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        let (_, cost) = sstore(&mut frame, 0x55, &cfg).unwrap();
        assert_eq!(cost, gas::SSTORE_SET);
        assert_eq!(frame.control_block().storage_slot_count(), 1);

        super::super::push1(&mut frame, &from_u64(0x07)).unwrap();
        let (_, cost) = sload(&mut frame, 0x54, &cfg).unwrap();
        assert_eq!(cost, gas::SLOAD_WARM);
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 0x2A);
    }

    #[test]
    fn sstore_in_static_frame_halts_without_mutating() {
        let (mut region, cfg) = frame_with_storage(&[0x2A, 0x07], 4);
        {
            let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
            frame.control_block().set_is_static(1);
        }
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        assert_eq!(
            sstore(&mut frame, 0x55, &cfg).unwrap_err(),
            InterpreterError::IllegalStateChange
        );
        assert_eq!(frame.control_block().storage_slot_count(), 0);
    }

    #[test]
    fn sload_on_cold_absent_slot_charges_cold_and_creates_entry() {
        let (mut region, cfg) = frame_with_storage(&[0x07], 4);
        let mut frame = Frame::new(&mut region, 1024 * 1024).unwrap();
        let (_, cost) = sload(&mut frame, 0x54, &cfg).unwrap();
        assert_eq!(cost, gas::SLOAD_COLD);
        assert_eq!(frame.control_block().storage_slot_count(), 1);
        assert_eq!(read_u64_low(&frame.stack().unwrap().get(0, 1).unwrap()), 0);
    }
}
