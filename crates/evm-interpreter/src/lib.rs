//! Single-frame EVM bytecode interpreter over a byte-exact shared control
//! block (see `layout::ControlBlock`). The entry point is [`ffi::execute_message`];
//! [`dispatch::run`] is the safe, pointer-free core for embedders that would
//! rather build a `Frame` themselves than cross an FFI boundary.

pub mod builder;
pub mod code;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod ffi;
pub mod frame;
pub mod layout;
pub mod memory;
pub mod opcodes;
pub mod stack;
pub mod storage;
pub mod tracer;
pub mod word;

pub use builder::ControlBlockBuilder;
pub use config::InterpreterConfig;
pub use dispatch::State;
pub use error::{HaltReason, InterpreterError};
pub use frame::Frame;
pub use layout::ControlBlock;
