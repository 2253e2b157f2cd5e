//! Layout constants and gas table shared across the interpreter.
//!
//! Offsets here are contractual: they are the ABI described by the control
//! block, not an implementation detail free to drift.

/// Size in bytes of a stack/memory word.
pub const WORD_SIZE: usize = 32;

/// Maximum number of stack entries (spec: `0 ≤ stack_size ≤ 1024`).
pub const STACK_LIMIT: usize = 1024;

/// Default hard ceiling on memory growth, in bytes.
pub const DEFAULT_MEMORY_CEILING: usize = 1024 * 1024;

/// Size in bytes of an address field.
pub const ADDRESS_SIZE: usize = 20;

/// Size in bytes of the control block header.
pub const CONTROL_BLOCK_SIZE: usize = 384;

/// Size in bytes of one storage plane entry.
pub const STORAGE_ENTRY_SIZE: usize = 124;

// Control block field offsets (see spec §3.1). All offsets are relative to
// the start of the control block.
pub const OFF_PC: usize = 0;
pub const OFF_SECTION: usize = 4;
pub const OFF_GAS_REMAINING: usize = 8;
pub const OFF_GAS_REFUND: usize = 16;
pub const OFF_STACK_SIZE: usize = 24;
pub const OFF_MEMORY_SIZE: usize = 28;
pub const OFF_STATE: usize = 32;
pub const OFF_FRAME_TYPE: usize = 36;
pub const OFF_IS_STATIC: usize = 40;
pub const OFF_DEPTH: usize = 44;

// Plane offsets (8 x 8-byte pointers starting at byte 48).
pub const OFF_STACK_PTR: usize = 48;
pub const OFF_MEMORY_PTR: usize = 56;
pub const OFF_CODE_PTR: usize = 64;
pub const OFF_INPUT_PTR: usize = 72;
pub const OFF_OUTPUT_PTR: usize = 80;
pub const OFF_RETURN_DATA_PTR: usize = 88;
pub const OFF_LOGS_PTR: usize = 96;
pub const OFF_WARM_ADDRESSES_PTR: usize = 104;

// Plane sizes (7 x 4-byte counts starting at byte 112).
pub const OFF_CODE_SIZE: usize = 112;
pub const OFF_INPUT_SIZE: usize = 116;
pub const OFF_OUTPUT_SIZE: usize = 120;
pub const OFF_RETURN_DATA_SIZE: usize = 124;
pub const OFF_LOGS_COUNT: usize = 128;
pub const OFF_WARM_ADDRESSES_COUNT: usize = 132;
pub const OFF_WARM_STORAGE_COUNT: usize = 136;

// Addresses (5 x 20 bytes starting at byte 144).
pub const OFF_RECIPIENT: usize = 144;
pub const OFF_SENDER: usize = 164;
pub const OFF_CONTRACT: usize = 184;
pub const OFF_ORIGINATOR: usize = 204;
pub const OFF_MINING_BENEFICIARY: usize = 224;

// Value words (3 x 32 bytes starting at byte 244).
pub const OFF_VALUE: usize = 244;
pub const OFF_APPARENT_VALUE: usize = 276;
pub const OFF_GAS_PRICE: usize = 308;

pub const OFF_HALT_REASON: usize = 340;

// The control block table in spec §3.1 lists eight plane pointers but the
// storage plane (§3.5) needs a ninth, and the entry point takes only a
// control-block pointer plus a tracer pointer (spec §6.1) — there is nowhere
// else for it to live. This reinterprets 12 of the 40 "reserved" bytes as
// `storage_ptr`/`max_storage_slots`; the remaining 28 bytes stay reserved and
// zero-initialized. See DESIGN.md's open-question resolutions.
pub const OFF_STORAGE_PTR: usize = 344;
pub const OFF_MAX_STORAGE_SLOTS: usize = 352;
pub const OFF_RESERVED: usize = 356;
pub const RESERVED_SIZE: usize = 28;

// Storage plane entry field offsets (see spec §3.5).
pub const STORAGE_OFF_ADDRESS: usize = 0;
pub const STORAGE_OFF_KEY: usize = 20;
pub const STORAGE_OFF_VALUE: usize = 52;
pub const STORAGE_OFF_ORIGINAL: usize = 84;
pub const STORAGE_OFF_IS_WARM: usize = 116;

/// Minimum gas that must remain before dispatch even attempts to fetch and run
/// an opcode (spec §4.5 step 3 — a micro-optimization, not the real per-opcode
/// charge, which still happens after the handler runs).
pub const GAS_FLOOR: i64 = 3;

/// Flat gas costs named directly by spec §4.3.
pub mod gas {
    pub const ZERO: u64 = 0;
    pub const VERY_LOW: u64 = 3;
    pub const LOW: u64 = 5;
    pub const BASE: u64 = 2;
    pub const JUMPDEST: u64 = 1;
    pub const JUMP: u64 = 8;
    pub const JUMPI: u64 = 10;

    pub const SLOAD_WARM: u64 = 100;
    pub const SLOAD_COLD: u64 = 2100;
    pub const SSTORE_SET: u64 = 20000;
    pub const SSTORE_RESET_WARM: u64 = 100;
    pub const SSTORE_RESET_COLD: u64 = 2100;
    pub const SSTORE_CLEAR_REFUND: u64 = 4800;
}
