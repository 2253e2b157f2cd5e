//! Host-side convenience for assembling a control block plus its planes into
//! one contiguous region. Not part of the ABI (spec §6.2 only promises
//! layout *stability*, not how a host chooses to allocate it) — this is the
//! kind of helper the real host-side bridge (out of scope per spec §1) would
//! own; it lives here so the harness and the test suite don't each
//! reimplement it.

use crate::config::InterpreterConfig;
use crate::constants::*;

/// Default capacity reserved for the output plane: generous enough for the
/// scenarios this harness/test suite exercises without every caller having
/// to size it by hand.
const DEFAULT_OUTPUT_CAPACITY: usize = 1024;

/// Builds a single `Vec<u8>` region laid out as control block, stack,
/// memory, code, storage, output — in that order — and stamps every plane
/// pointer/size field into the header.
pub struct ControlBlockBuilder {
    code: Vec<u8>,
    gas_remaining: i64,
    is_static: bool,
    contract: [u8; ADDRESS_SIZE],
    memory_capacity: usize,
    max_storage_slots: u32,
    output_capacity: usize,
}

impl ControlBlockBuilder {
    pub fn new(code: impl Into<Vec<u8>>) -> Self {
        Self {
            code: code.into(),
            gas_remaining: 1_000_000,
            is_static: false,
            contract: [0u8; ADDRESS_SIZE],
            memory_capacity: DEFAULT_MEMORY_CEILING,
            max_storage_slots: 4096,
            output_capacity: DEFAULT_OUTPUT_CAPACITY,
        }
    }

    /// Reserve `capacity` bytes for `RETURN`/`REVERT` to copy their payload
    /// into. `RETURN`/`REVERT` halt `OUT_OF_BOUNDS` if asked to stage more
    /// than this many bytes.
    pub fn output_capacity(mut self, capacity: usize) -> Self {
        self.output_capacity = capacity;
        self
    }

    pub fn gas(mut self, gas: i64) -> Self {
        self.gas_remaining = gas;
        self
    }

    pub fn is_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn contract(mut self, address: [u8; ADDRESS_SIZE]) -> Self {
        self.contract = address;
        self
    }

    pub fn max_storage_slots(mut self, slots: u32) -> Self {
        self.max_storage_slots = slots;
        self
    }

    /// Assemble the region. Returns the region and the byte offset of each
    /// plane, for callers that want to poke at them directly (tests mostly).
    pub fn build(self) -> Vec<u8> {
        let stack_off = CONTROL_BLOCK_SIZE;
        let memory_off = stack_off + STACK_LIMIT * WORD_SIZE;
        let code_off = memory_off + self.memory_capacity;
        let storage_off = code_off + self.code.len();
        let output_off = storage_off + self.max_storage_slots as usize * STORAGE_ENTRY_SIZE;
        let total = output_off + self.output_capacity;

        let mut region = vec![0u8; total];
        {
            let mut cb = crate::layout::ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE])
                .expect("region built with CONTROL_BLOCK_SIZE header");
            cb.set_stack_ptr(stack_off as u64);
            cb.set_memory_ptr(memory_off as u64);
            cb.set_code_ptr(code_off as u64);
            cb.set_code_size(self.code.len() as u32);
            cb.set_storage_ptr(storage_off as u64);
            cb.set_max_storage_slots(self.max_storage_slots);
            cb.set_output_ptr(output_off as u64);
            cb.set_output_size(self.output_capacity as u32);
            cb.set_gas_remaining(self.gas_remaining);
            cb.set_is_static(self.is_static as u32);
            cb.set_contract(&self.contract);
        }
        region[code_off..code_off + self.code.len()].copy_from_slice(&self.code);
        region
    }

    /// `build()` plus a matching [`InterpreterConfig`] with this builder's
    /// memory ceiling and storage capacity.
    pub fn build_with_config(self) -> (Vec<u8>, InterpreterConfig) {
        let memory_capacity = self.memory_capacity;
        let max_storage_slots = self.max_storage_slots as usize;
        let region = self.build();
        let config = InterpreterConfig {
            memory_ceiling: memory_capacity,
            max_storage_slots,
            ..InterpreterConfig::default()
        };
        (region, config)
    }
}
