//! Halt reasons and the library's single error type.
//!
//! `InterpreterError` never crosses the FFI boundary (see `ffi.rs`): it is
//! always caught and translated into `state`/`halt_reason` on the control
//! block rather than unwinding across the host boundary.

use thiserror::Error;

/// Halt reason codes, exactly as enumerated in spec §6.3. The numeric values
/// are part of the ABI written into the control block's `halt_reason` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum HaltReason {
    None = 0,
    InsufficientGas = 1,
    InvalidOperation = 2,
    InvalidJumpDestination = 3,
    StackUnderflow = 4,
    StackOverflow = 5,
    IllegalStateChange = 6,
    OutOfBounds = 7,
}

impl HaltReason {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::InsufficientGas),
            2 => Some(Self::InvalidOperation),
            3 => Some(Self::InvalidJumpDestination),
            4 => Some(Self::StackUnderflow),
            5 => Some(Self::StackOverflow),
            6 => Some(Self::IllegalStateChange),
            7 => Some(Self::OutOfBounds),
            _ => None,
        }
    }
}

/// Errors raised by operation handlers and the dispatch loop. Every variant
/// except `MalformedControlBlock` maps 1:1 onto a `HaltReason`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterError {
    #[error("insufficient gas")]
    InsufficientGas,
    #[error("invalid operation")]
    InvalidOperation,
    #[error("invalid jump destination")]
    InvalidJumpDestination,
    #[error("stack underflow")]
    StackUnderflow,
    #[error("stack overflow")]
    StackOverflow,
    #[error("illegal state change in static frame")]
    IllegalStateChange,
    #[error("memory expansion exceeds the configured ceiling")]
    OutOfBounds,
    /// Not a spec-defined halt reason: the control block itself is corrupt
    /// (a plane offset or size falls outside the host-allocated region). The
    /// host handed the interpreter a layout that cannot be trusted, so no
    /// opcode is dispatched at all; this still surfaces as
    /// `EXCEPTIONAL_HALT` / `OUT_OF_BOUNDS` on the wire (see DESIGN.md §7.1).
    #[error("control block layout is malformed")]
    MalformedControlBlock,
}

impl InterpreterError {
    pub fn halt_reason(self) -> HaltReason {
        match self {
            Self::InsufficientGas => HaltReason::InsufficientGas,
            Self::InvalidOperation => HaltReason::InvalidOperation,
            Self::InvalidJumpDestination => HaltReason::InvalidJumpDestination,
            Self::StackUnderflow => HaltReason::StackUnderflow,
            Self::StackOverflow => HaltReason::StackOverflow,
            Self::IllegalStateChange => HaltReason::IllegalStateChange,
            Self::OutOfBounds | Self::MalformedControlBlock => HaltReason::OutOfBounds,
        }
    }
}
