//! Byte-exact view over the 384-byte control block (spec §3.1).
//!
//! `ControlBlock` never copies the header into its own storage: it borrows
//! the host's `&mut [u8]` for the lifetime of one `execute_message` call and
//! reads/writes fields in place. Integer fields are little-endian; addresses
//! and words are raw big-endian bytes, copied verbatim.

use crate::constants::*;
use crate::error::InterpreterError;
use crate::word::Word;

/// Borrowed view over a host-allocated control block.
pub struct ControlBlock<'a> {
    bytes: &'a mut [u8],
}

macro_rules! field_u32 {
    ($get:ident, $set:ident, $off:ident) => {
        pub fn $get(&self) -> u32 {
            u32::from_le_bytes(self.bytes[$off..$off + 4].try_into().unwrap())
        }

        pub fn $set(&mut self, value: u32) {
            self.bytes[$off..$off + 4].copy_from_slice(&value.to_le_bytes());
        }
    };
}

macro_rules! field_i64 {
    ($get:ident, $set:ident, $off:ident) => {
        pub fn $get(&self) -> i64 {
            i64::from_le_bytes(self.bytes[$off..$off + 8].try_into().unwrap())
        }

        pub fn $set(&mut self, value: i64) {
            self.bytes[$off..$off + 8].copy_from_slice(&value.to_le_bytes());
        }
    };
}

macro_rules! field_u64 {
    ($get:ident, $set:ident, $off:ident) => {
        pub fn $get(&self) -> u64 {
            u64::from_le_bytes(self.bytes[$off..$off + 8].try_into().unwrap())
        }

        pub fn $set(&mut self, value: u64) {
            self.bytes[$off..$off + 8].copy_from_slice(&value.to_le_bytes());
        }
    };
}

macro_rules! field_address {
    ($get:ident, $set:ident, $off:ident) => {
        pub fn $get(&self) -> [u8; ADDRESS_SIZE] {
            self.bytes[$off..$off + ADDRESS_SIZE].try_into().unwrap()
        }

        pub fn $set(&mut self, value: &[u8; ADDRESS_SIZE]) {
            self.bytes[$off..$off + ADDRESS_SIZE].copy_from_slice(value);
        }
    };
}

macro_rules! field_word {
    ($get:ident, $set:ident, $off:ident) => {
        pub fn $get(&self) -> Word {
            self.bytes[$off..$off + WORD_SIZE].try_into().unwrap()
        }

        pub fn $set(&mut self, value: &Word) {
            self.bytes[$off..$off + WORD_SIZE].copy_from_slice(value);
        }
    };
}

impl<'a> ControlBlock<'a> {
    /// Wrap `bytes` as a control block. Fails closed with
    /// `MalformedControlBlock` rather than panicking on a short buffer or a
    /// plane pointer/size pair that would read or write outside `bytes`.
    pub fn new(bytes: &'a mut [u8]) -> Result<Self, InterpreterError> {
        if bytes.len() < CONTROL_BLOCK_SIZE {
            return Err(InterpreterError::MalformedControlBlock);
        }
        Ok(Self { bytes })
    }

    field_u32!(pc, set_pc, OFF_PC);
    field_u32!(section, set_section, OFF_SECTION);
    field_i64!(gas_remaining, set_gas_remaining, OFF_GAS_REMAINING);
    field_i64!(gas_refund, set_gas_refund, OFF_GAS_REFUND);
    field_u32!(stack_size, set_stack_size, OFF_STACK_SIZE);
    field_u32!(memory_size, set_memory_size, OFF_MEMORY_SIZE);
    field_u32!(state, set_state, OFF_STATE);
    field_u32!(frame_type, set_frame_type, OFF_FRAME_TYPE);
    field_u32!(is_static, set_is_static, OFF_IS_STATIC);
    field_u32!(depth, set_depth, OFF_DEPTH);

    field_u64!(stack_ptr, set_stack_ptr, OFF_STACK_PTR);
    field_u64!(memory_ptr, set_memory_ptr, OFF_MEMORY_PTR);
    field_u64!(code_ptr, set_code_ptr, OFF_CODE_PTR);
    field_u64!(input_ptr, set_input_ptr, OFF_INPUT_PTR);
    field_u64!(output_ptr, set_output_ptr, OFF_OUTPUT_PTR);
    field_u64!(return_data_ptr, set_return_data_ptr, OFF_RETURN_DATA_PTR);
    field_u64!(logs_ptr, set_logs_ptr, OFF_LOGS_PTR);
    field_u64!(
        warm_addresses_ptr,
        set_warm_addresses_ptr,
        OFF_WARM_ADDRESSES_PTR
    );

    field_u32!(code_size, set_code_size, OFF_CODE_SIZE);
    field_u32!(input_size, set_input_size, OFF_INPUT_SIZE);
    field_u32!(output_size, set_output_size, OFF_OUTPUT_SIZE);
    field_u32!(return_data_size, set_return_data_size, OFF_RETURN_DATA_SIZE);
    field_u32!(logs_count, set_logs_count, OFF_LOGS_COUNT);
    field_u32!(
        warm_addresses_count,
        set_warm_addresses_count,
        OFF_WARM_ADDRESSES_COUNT
    );
    field_u32!(
        warm_storage_count,
        set_warm_storage_count,
        OFF_WARM_STORAGE_COUNT
    );

    field_address!(recipient, set_recipient, OFF_RECIPIENT);
    field_address!(sender, set_sender, OFF_SENDER);
    field_address!(contract, set_contract, OFF_CONTRACT);
    field_address!(originator, set_originator, OFF_ORIGINATOR);
    field_address!(
        mining_beneficiary,
        set_mining_beneficiary,
        OFF_MINING_BENEFICIARY
    );

    field_word!(value, set_value, OFF_VALUE);
    field_word!(apparent_value, set_apparent_value, OFF_APPARENT_VALUE);
    field_word!(gas_price, set_gas_price, OFF_GAS_PRICE);

    field_u32!(halt_reason_raw, set_halt_reason_raw, OFF_HALT_REASON);

    field_u64!(storage_ptr, set_storage_ptr, OFF_STORAGE_PTR);
    field_u32!(max_storage_slots, set_max_storage_slots, OFF_MAX_STORAGE_SLOTS);

    pub fn set_halt_reason(&mut self, reason: crate::error::HaltReason) {
        self.set_halt_reason_raw(reason as u32);
    }

    /// Alias over `warm_storage_count` (spec §3.1's only storage-adjacent
    /// count field): doubles as the storage plane's live entry count, per
    /// the open-question resolution in DESIGN.md.
    pub fn storage_slot_count(&self) -> u32 {
        self.warm_storage_count()
    }

    pub fn set_storage_slot_count(&mut self, value: u32) {
        self.set_warm_storage_count(value);
    }
}
