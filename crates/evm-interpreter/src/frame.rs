//! Ties the control block together with its planes: one `Frame` borrows the
//! entire shared region for the duration of one `execute_message` call.

use crate::code::CodeView;
use crate::constants::*;
use crate::error::InterpreterError;
use crate::layout::ControlBlock;
use crate::memory::MemoryView;
use crate::stack::StackView;
use crate::storage::StoragePlane;

/// Borrowed view over the whole shared region: control block plus every
/// plane, sliced out by the offsets the control block itself carries (spec
/// §9: "pointers in the layout are byte offsets from the control block
/// base").
pub struct Frame<'a> {
    region: &'a mut [u8],
    memory_ceiling: usize,
}

impl<'a> Frame<'a> {
    pub fn new(region: &'a mut [u8], memory_ceiling: usize) -> Result<Self, InterpreterError> {
        if region.len() < CONTROL_BLOCK_SIZE {
            return Err(InterpreterError::MalformedControlBlock);
        }
        Ok(Self {
            region,
            memory_ceiling,
        })
    }

    pub fn control_block(&mut self) -> ControlBlock<'_> {
        ControlBlock::new(&mut self.region[..CONTROL_BLOCK_SIZE])
            .expect("region length checked in Frame::new")
    }

    fn slice(&mut self, offset: usize, len: usize) -> Result<&mut [u8], InterpreterError> {
        let end = offset
            .checked_add(len)
            .ok_or(InterpreterError::MalformedControlBlock)?;
        self.region
            .get_mut(offset..end)
            .ok_or(InterpreterError::MalformedControlBlock)
    }

    fn slice_ro(&self, offset: usize, len: usize) -> Result<&[u8], InterpreterError> {
        let end = offset
            .checked_add(len)
            .ok_or(InterpreterError::MalformedControlBlock)?;
        self.region
            .get(offset..end)
            .ok_or(InterpreterError::MalformedControlBlock)
    }

    pub fn stack(&mut self) -> Result<StackView<'_>, InterpreterError> {
        let ptr = self.control_block().stack_ptr() as usize;
        let bytes = self.slice(ptr, STACK_LIMIT * WORD_SIZE)?;
        StackView::new(bytes)
    }

    /// The memory plane's reserved capacity is whatever remains of the
    /// region from `memory_ptr` onward, capped by the configured ceiling.
    pub fn memory(&mut self) -> Result<MemoryView<'_>, InterpreterError> {
        let ptr = self.control_block().memory_ptr() as usize;
        let ceiling = self.memory_ceiling;
        let available = self
            .region
            .len()
            .checked_sub(ptr)
            .ok_or(InterpreterError::MalformedControlBlock)?;
        let bytes = self.slice(ptr, available.min(ceiling))?;
        Ok(MemoryView::new(bytes, ceiling))
    }

    pub fn code(&mut self) -> Result<CodeView<'_>, InterpreterError> {
        let ptr = self.control_block().code_ptr() as usize;
        let size = self.control_block().code_size() as usize;
        let bytes = self.slice_ro(ptr, size)?;
        Ok(CodeView::new(bytes))
    }

    /// Total length of the borrowed shared region, for bounds checks against
    /// plane pointers that don't have their own view type (e.g. `output`).
    pub fn control_block_region_len(&self) -> usize {
        self.region.len()
    }

    /// Raw write into the region at a byte offset, used by handlers that
    /// stage a payload into a plane with no dedicated view (output, logs).
    pub fn write_raw(&mut self, offset: usize, data: &[u8]) -> Result<(), InterpreterError> {
        let dst = self.slice(offset, data.len())?;
        dst.copy_from_slice(data);
        Ok(())
    }

    pub fn storage(&mut self) -> Result<StoragePlane<'_>, InterpreterError> {
        let ptr = self.control_block().storage_ptr() as usize;
        let max_slots = self.control_block().max_storage_slots() as usize;
        let bytes = self.slice(ptr, max_slots * STORAGE_ENTRY_SIZE)?;
        Ok(StoragePlane::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MEMORY_CEILING;

    fn layout_region() -> Vec<u8> {
        // control block (384) | stack (1024*32) | memory (4096) | code (16)
        // | storage (4 * 124)
        let stack_off = CONTROL_BLOCK_SIZE;
        let memory_off = stack_off + STACK_LIMIT * WORD_SIZE;
        let code_off = memory_off + 4096;
        let storage_off = code_off + 16;
        let total = storage_off + 4 * STORAGE_ENTRY_SIZE;

        let mut region = vec![0u8; total];
        {
            let mut cb = ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
            cb.set_stack_ptr(stack_off as u64);
            cb.set_memory_ptr(memory_off as u64);
            cb.set_code_ptr(code_off as u64);
            cb.set_code_size(2);
            cb.set_storage_ptr(storage_off as u64);
            cb.set_max_storage_slots(4);
        }
        region[code_off] = 0x60;
        region[code_off + 1] = 0x01;
        region
    }

    #[test]
    fn frame_slices_every_plane_without_overlap() {
        let mut region = layout_region();
        let mut frame = Frame::new(&mut region, DEFAULT_MEMORY_CEILING).unwrap();
        assert!(frame.stack().is_ok());
        assert!(frame.memory().is_ok());
        assert_eq!(frame.code().unwrap().byte_at(0), 0x60);
        assert!(frame.storage().is_ok());
    }

    #[test]
    fn malformed_plane_pointer_is_caught() {
        let mut region = layout_region();
        {
            let mut cb = ControlBlock::new(&mut region[..CONTROL_BLOCK_SIZE]).unwrap();
            cb.set_stack_ptr(u64::MAX);
        }
        let mut frame = Frame::new(&mut region, DEFAULT_MEMORY_CEILING).unwrap();
        assert_eq!(
            frame.stack().unwrap_err(),
            InterpreterError::MalformedControlBlock
        );
    }
}
