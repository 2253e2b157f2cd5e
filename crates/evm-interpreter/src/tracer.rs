//! Tracer callback contract (spec §5, §6.1): pre/post upcalls into the host
//! around every dispatched opcode.

/// The 16-byte record handed to `post` on every dispatched opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct OperationResult {
    pub gas_cost: i64,
    pub halt_reason: u32,
    pub pc_increment: u32,
}

/// Host-provided callback pair. `frame_ptr` is the raw control block pointer
/// handed back to the host unchanged; this crate never dereferences it.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct TracerCallbacks {
    pub pre: extern "C" fn(frame_ptr: *const u8),
    pub post: extern "C" fn(frame_ptr: *const u8, result: *const OperationResult),
}

/// A tracer attached to one call, or none. Carries the `frame_ptr` the host
/// gave us so both upcalls can be invoked with it.
pub struct Tracer {
    callbacks: Option<TracerCallbacks>,
    frame_ptr: *const u8,
}

impl Tracer {
    pub fn new(callbacks: Option<TracerCallbacks>, frame_ptr: *const u8) -> Self {
        Self { callbacks, frame_ptr }
    }

    pub fn none() -> Self {
        Self {
            callbacks: None,
            frame_ptr: std::ptr::null(),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.callbacks.is_some()
    }

    /// Invoked before gas is consumed; observes gas *before* charging.
    pub fn trace_pre(&self) {
        if let Some(cb) = &self.callbacks {
            (cb.pre)(self.frame_ptr);
        }
    }

    /// Invoked after gas is consumed; observes gas *after* charging.
    pub fn trace_post(&self, result: OperationResult) {
        if let Some(cb) = &self.callbacks {
            (cb.post)(self.frame_ptr, &result as *const OperationResult);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static PRE_COUNT: AtomicUsize = AtomicUsize::new(0);
    static POST_COUNT: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn count_pre(_frame_ptr: *const u8) {
        PRE_COUNT.fetch_add(1, Ordering::SeqCst);
    }

    extern "C" fn count_post(_frame_ptr: *const u8, _result: *const OperationResult) {
        POST_COUNT.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn no_tracer_is_a_no_op() {
        let tracer = Tracer::none();
        assert!(!tracer.is_attached());
        tracer.trace_pre();
        tracer.trace_post(OperationResult {
            gas_cost: 3,
            halt_reason: 0,
            pc_increment: 1,
        });
    }

    #[test]
    fn attached_tracer_invokes_both_callbacks() {
        PRE_COUNT.store(0, Ordering::SeqCst);
        POST_COUNT.store(0, Ordering::SeqCst);
        let tracer = Tracer::new(
            Some(TracerCallbacks {
                pre: count_pre,
                post: count_post,
            }),
            std::ptr::null(),
        );
        tracer.trace_pre();
        tracer.trace_post(OperationResult {
            gas_cost: 3,
            halt_reason: 0,
            pc_increment: 1,
        });
        assert_eq!(PRE_COUNT.load(Ordering::SeqCst), 1);
        assert_eq!(POST_COUNT.load(Ordering::SeqCst), 1);
    }
}
