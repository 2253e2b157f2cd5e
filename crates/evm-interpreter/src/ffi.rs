//! The foreign-function entry point (spec §6.1): a single exported symbol
//! taking a control block pointer and an optional tracer vtable, with all
//! output written back through the control block. Modeled on the
//! opaque-handle, `extern "C"` style used for FFI-facing EVM bindings (raw
//! pointers in, nothing but side effects out, no panics allowed to unwind
//! across the boundary).

use crate::config::InterpreterConfig;
use crate::constants::{CONTROL_BLOCK_SIZE, STACK_LIMIT, STORAGE_ENTRY_SIZE, WORD_SIZE};
use crate::dispatch;
use crate::error::InterpreterError;
use crate::frame::Frame;
use crate::layout::ControlBlock;
use crate::tracer::{Tracer, TracerCallbacks};

/// The ABI-exact entry point (spec §6.1). `control_block_ptr` must point at
/// the start of a shared region at least `CONTROL_BLOCK_SIZE` bytes long,
/// with every plane pointer/size field inside the same region.
/// `tracer_ptr` may be null for no tracing.
///
/// # Safety
/// The caller must guarantee `control_block_ptr` is valid for reads and
/// writes for the full extent implied by its own plane offsets and sizes,
/// for the duration of this call, with no other concurrent accessor (spec
/// §5's exclusive-access contract). `tracer_ptr`, if non-null, must point to
/// a live `TracerCallbacks` for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn execute_message(control_block_ptr: *mut u8, tracer_ptr: *const TracerCallbacks) {
    if control_block_ptr.is_null() {
        return;
    }

    let config = InterpreterConfig::conformance();

    let region_len = match region_len(control_block_ptr, config.memory_ceiling) {
        Some(len) => len,
        None => return,
    };
    let region = std::slice::from_raw_parts_mut(control_block_ptr, region_len);

    let tracer_callbacks = tracer_ptr.as_ref().copied();
    let tracer = Tracer::new(tracer_callbacks, control_block_ptr as *const u8);

    execute_message_with_config(region, &config, &tracer);
}

/// Safe, pointer-free equivalent of [`execute_message`] for embedders that
/// already hold a `&mut [u8]` (the test harness, the CLI, unit tests). Takes
/// an explicit [`InterpreterConfig`] rather than baking in the conformance
/// default, since build-time configuration (spec §9) is exactly the knob
/// this wrapper exists to expose.
pub fn execute_message_with_config(region: &mut [u8], config: &InterpreterConfig, tracer: &Tracer) {
    let mut frame = match Frame::new(region, config.memory_ceiling) {
        Ok(frame) => frame,
        Err(_) => return,
    };
    dispatch::run(&mut frame, config, tracer);
}

/// Computes the shared region's total extent from the control block's own
/// plane pointers and sizes, so `execute_message` can build a single bounded
/// slice instead of trusting an out-of-band length. Returns `None` if the
/// header itself doesn't fit or any field overflows. `memory_ceiling` is the
/// configured cap on memory growth (spec §3.1 fixes offsets within the
/// control block but not plane ordering, so the memory plane's extent can't
/// be inferred from another plane's placement — it must come from the host's
/// own configuration).
unsafe fn region_len(control_block_ptr: *mut u8, memory_ceiling: usize) -> Option<usize> {
    let header = std::slice::from_raw_parts_mut(control_block_ptr, CONTROL_BLOCK_SIZE);
    let cb = ControlBlock::new(header).ok()?;

    let mut max_end = CONTROL_BLOCK_SIZE;
    let mut extend = |ptr: u64, len: usize| -> Option<()> {
        let end = (ptr as usize).checked_add(len)?;
        max_end = max_end.max(end);
        Some(())
    };

    extend(cb.stack_ptr(), STACK_LIMIT * WORD_SIZE)?;
    extend(cb.memory_ptr(), memory_ceiling)?;
    extend(cb.code_ptr(), cb.code_size() as usize)?;
    extend(cb.input_ptr(), cb.input_size() as usize)?;
    extend(cb.output_ptr(), cb.output_size() as usize)?;
    extend(cb.return_data_ptr(), cb.return_data_size() as usize)?;
    extend(
        cb.storage_ptr(),
        cb.max_storage_slots() as usize * STORAGE_ENTRY_SIZE,
    )?;

    Some(max_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::read_u64_low;

    fn build_region(code: &[u8]) -> Vec<u8> {
        let stack_off = CONTROL_BLOCK_SIZE;
        let memory_off = stack_off + STACK_LIMIT * WORD_SIZE;
        let code_off = memory_off + 4096;
        let storage_off = code_off + code.len();
        let total = storage_off + 4 * STORAGE_ENTRY_SIZE;

        let mut region = vec![0u8; total];
        {
            let mut cb = ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
            cb.set_stack_ptr(stack_off as u64);
            cb.set_memory_ptr(memory_off as u64);
            cb.set_code_ptr(code_off as u64);
            cb.set_code_size(code.len() as u32);
            cb.set_storage_ptr(storage_off as u64);
            cb.set_max_storage_slots(4);
            cb.set_gas_remaining(1_000_000);
        }
        region[code_off..code_off + code.len()].copy_from_slice(code);
        region
    }

    #[test]
    fn execute_message_runs_to_completion_through_raw_pointers() {
        let code = [0x60, 0x05, 0x60, 0x03, 0x01, 0x00];
        let mut region = build_region(&code);

        unsafe {
            execute_message(region.as_mut_ptr(), std::ptr::null());
        }

        let cb = ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
        assert_eq!(cb.state(), crate::dispatch::State::CompletedSuccess as u32);
        assert_eq!(cb.stack_size(), 1);

        let stack_off = CONTROL_BLOCK_SIZE;
        let top: [u8; WORD_SIZE] = region[stack_off..stack_off + WORD_SIZE].try_into().unwrap();
        assert_eq!(read_u64_low(&top), 8);
    }

    #[test]
    fn null_control_block_is_a_no_op() {
        unsafe {
            execute_message(std::ptr::null_mut(), std::ptr::null());
        }
    }

    #[test]
    fn safe_wrapper_matches_raw_entry_point() {
        let code = [0x60, 0x05, 0x60, 0x03, 0x01, 0x00];
        let mut region = build_region(&code);
        let config = InterpreterConfig::conformance();
        execute_message_with_config(&mut region, &config, &Tracer::none());

        let cb = ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
        assert_eq!(cb.state(), crate::dispatch::State::CompletedSuccess as u32);
    }
}
