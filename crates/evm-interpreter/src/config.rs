//! Build/run-time configuration knobs enumerated in spec §9.

use crate::constants::DEFAULT_MEMORY_CEILING;

/// Default capacity of the storage plane when a host doesn't say otherwise.
/// Not part of the control block ABI (spec §3.5 leaves `max_storage_slots`
/// as a collaborator-provided capacity, not a header field).
pub const DEFAULT_MAX_STORAGE_SLOTS: usize = 4096;

/// What the dispatch loop does when it indexes an unassigned opcode slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOpcodePolicy {
    /// No-op at base gas cost. Useful during development so a partially
    /// implemented program doesn't immediately halt.
    NoOpAtBaseCost,
    /// Halt with `INVALID_OPERATION`. The conformance-mode default.
    #[default]
    Halt,
}

/// Per-call configuration passed into `execute_message`/[`crate::dispatch::run`].
#[derive(Debug, Clone, Copy)]
pub struct InterpreterConfig {
    pub unknown_opcode_policy: UnknownOpcodePolicy,
    /// Hard ceiling on memory growth, in bytes. Default 1 MiB (spec §3.3).
    pub memory_ceiling: usize,
    /// Capacity of the storage plane passed in by the host (spec §3.5's
    /// `max_storage_slots`, which the control block header doesn't carry).
    pub max_storage_slots: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            unknown_opcode_policy: UnknownOpcodePolicy::default(),
            memory_ceiling: DEFAULT_MEMORY_CEILING,
            max_storage_slots: DEFAULT_MAX_STORAGE_SLOTS,
        }
    }
}

impl InterpreterConfig {
    pub fn conformance() -> Self {
        Self {
            unknown_opcode_policy: UnknownOpcodePolicy::Halt,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self {
            unknown_opcode_policy: UnknownOpcodePolicy::NoOpAtBaseCost,
            ..Default::default()
        }
    }
}
